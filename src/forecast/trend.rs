use super::Forecaster;
use crate::config::TrendForecastConfig;
use crate::error::{FinanceCoreError, Result};
use crate::schema::{ForecastPoint, MonthlyPoint};
use crate::utils::shift_months;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Linear-trend forecaster with sampled uncertainty intervals.
///
/// Fits `y = a + b * t` over the month index by least squares. Interval bounds
/// are quantiles of Monte Carlo draws around the trend, using the residual spread
/// widened with distance from the last observation.
pub struct TrendForecaster {
    config: TrendForecastConfig,
}

struct TrendFit {
    intercept: f64,
    slope: f64,
    residual_std: f64,
}

impl TrendForecaster {
    pub fn new(config: TrendForecastConfig) -> Self {
        Self { config }
    }

    fn fit(history: &[MonthlyPoint]) -> TrendFit {
        let n = history.len() as f64;
        let mean_t = (n - 1.0) / 2.0;
        let mean_y = history.iter().map(|p| p.value).sum::<f64>() / n;

        let (mut covariance, mut variance) = (0.0, 0.0);
        for (t, point) in history.iter().enumerate() {
            let dt = t as f64 - mean_t;
            covariance += dt * (point.value - mean_y);
            variance += dt * dt;
        }

        let slope = if variance > 0.0 {
            covariance / variance
        } else {
            0.0
        };
        let intercept = mean_y - slope * mean_t;

        let squared_error: f64 = history
            .iter()
            .enumerate()
            .map(|(t, point)| {
                let residual = point.value - (intercept + slope * t as f64);
                residual * residual
            })
            .sum();
        let degrees_of_freedom = (history.len().saturating_sub(2)).max(1) as f64;

        TrendFit {
            intercept,
            slope,
            residual_std: (squared_error / degrees_of_freedom).sqrt(),
        }
    }

    fn interval(&self, rng: &mut StdRng, center: f64, std_dev: f64) -> Result<(f64, f64)> {
        if std_dev == 0.0 {
            return Ok((center, center));
        }

        let normal = Normal::new(center, std_dev)
            .map_err(|e| FinanceCoreError::ForecastFailed(e.to_string()))?;
        let mut draws: Vec<f64> = (0..self.config.uncertainty_samples.max(1))
            .map(|_| normal.sample(rng))
            .collect();
        draws.sort_by(f64::total_cmp);

        let tail = (1.0 - self.config.interval_width) / 2.0;
        Ok((quantile(&draws, tail), quantile(&draws, 1.0 - tail)))
    }
}

impl Forecaster for TrendForecaster {
    fn forecast(&self, history: &[MonthlyPoint], horizon: usize) -> Result<Vec<ForecastPoint>> {
        let first_month = history
            .first()
            .ok_or_else(|| FinanceCoreError::ForecastFailed("history is empty".to_string()))?
            .month;

        let fit = Self::fit(history);
        debug!(
            "Trend fit over {} months: intercept {:.2}, slope {:.2}, residual std {:.2}",
            history.len(),
            fit.intercept,
            fit.slope,
            fit.residual_std
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let observed = history.len();
        let mut rows = Vec::with_capacity(observed + horizon);

        for t in 0..observed + horizon {
            let center = fit.intercept + fit.slope * t as f64;
            let steps_ahead = t.saturating_sub(observed - 1) as f64;
            let std_dev = fit.residual_std * (1.0 + steps_ahead / observed as f64).sqrt();
            let (lower_bound, upper_bound) = self.interval(&mut rng, center, std_dev)?;

            rows.push(ForecastPoint {
                month: shift_months(first_month, t as i32),
                point_estimate: center,
                lower_bound,
                upper_bound,
            });
        }

        Ok(rows)
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    sorted[low] + (sorted[high] - sorted[low]) * (position - low as f64)
}
