pub mod adjust;
pub mod trend;

pub use adjust::{adjust_forecast, to_projected_points};
pub use trend::TrendForecaster;

use crate::error::Result;
use crate::schema::{ForecastPoint, MonthlyPoint};
use std::sync::Arc;

/// Number of future months every simulation projects.
pub const FORECAST_HORIZON: usize = 12;

/// A statistical model producing monthly projections.
///
/// Implementations return one row per month of `history` (fitted values)
/// followed by `horizon` future months, in chronological order.
pub trait Forecaster {
    fn forecast(&self, history: &[MonthlyPoint], horizon: usize) -> Result<Vec<ForecastPoint>>;
}

impl<F: Forecaster + ?Sized> Forecaster for Arc<F> {
    fn forecast(&self, history: &[MonthlyPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        (**self).forecast(history, horizon)
    }
}

impl<F: Forecaster + ?Sized> Forecaster for Box<F> {
    fn forecast(&self, history: &[MonthlyPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        (**self).forecast(history, horizon)
    }
}
