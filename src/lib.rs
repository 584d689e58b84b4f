//! # Finance Analytics Core
//!
//! Turns irregular transaction records into the numbers a personal/company finance
//! dashboard shows, and into adjusted 12-month projections for "what-if" simulations.
//!
//! ## Pipelines
//!
//! - **Overview**: raw records → [`normalize_records`] → [`compute_overview`] plus
//!   daily and monthly expense buckets ([`aggregate_expenses`]).
//! - **Simulation**: raw records → [`normalize_records`] → [`build_forecast_input`] →
//!   a [`Forecaster`] → [`adjust_forecast`].
//!
//! Every step is a pure, synchronous transform over data the caller has already
//! fetched. Fetching records, persisting simulations and serving HTTP are left to
//! the caller.
//!
//! ## Example
//!
//! ```rust,ignore
//! use finance_analytics_core::*;
//! use chrono::NaiveDate;
//!
//! let records = vec![
//!     RawTransaction::new("2024-01-05", 100.0, Some("ingreso")),
//!     RawTransaction::new("2024-01-10", 40.0, Some("gasto")),
//! ];
//!
//! let request = OverviewRequest { scope: "personal".to_string(), resource_id: None };
//! let report = OverviewProcessor::process(&request, "42", &records, Locale::Es)?;
//! assert_eq!(report.summary.balance_percentage, 60.0);
//!
//! let simulator = SimulationProcessor::new(
//!     TrendForecaster::new(TrendForecastConfig::default()),
//!     Locale::Es,
//! );
//! let params = SimulationParameters { income_change_percent: 10.0, expense_cut_flat: 0.0 };
//! let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
//! let projection = simulator.run(&records, &params, today)?;
//! assert_eq!(projection.projected_data.len(), 12);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod forecast;
pub mod gap_fill;
pub mod locale;
pub mod normalize;
pub mod overview;
pub mod schema;
pub mod scope;
pub mod utils;

#[cfg(feature = "gemini")]
pub mod llm;

pub use aggregate::{aggregate_expenses, daily_expenses, monthly_expenses, Granularity};
pub use config::{EngineConfig, TrendForecastConfig};
pub use error::{FinanceCoreError, Result};
pub use forecast::{
    adjust_forecast, to_projected_points, Forecaster, TrendForecaster, FORECAST_HORIZON,
};
pub use gap_fill::build_forecast_input;
pub use locale::Locale;
pub use normalize::normalize_records;
pub use overview::{compute_overview, ensure_finite_buckets};
pub use schema::*;
pub use scope::{resolve_scope, ResolvedScope};

use chrono::{NaiveDate, Utc};
use log::{debug, info};

pub struct OverviewProcessor;

impl OverviewProcessor {
    /// Resolves the requested scope, then summarizes `records`.
    ///
    /// Scope errors are returned before any record is parsed.
    pub fn process(
        request: &OverviewRequest,
        caller_user_id: &str,
        records: &[RawTransaction],
        locale: Locale,
    ) -> Result<OverviewReport> {
        let target = resolve_scope(
            &request.scope,
            request.resource_id.as_deref(),
            caller_user_id,
        )?;
        Self::summarize(&target, records, locale)
    }

    /// Summarizes `records` for an already resolved target.
    pub fn summarize(
        target: &ResolvedScope,
        records: &[RawTransaction],
        locale: Locale,
    ) -> Result<OverviewReport> {
        info!(
            "Building {} overview for resource {} from {} records",
            target.scope().as_str(),
            target.resource_id(),
            records.len()
        );

        let series = normalize_records(records)?;
        let summary = compute_overview(&series);
        summary.ensure_finite()?;
        let daily = daily_expenses(&series, locale);
        let monthly = monthly_expenses(&series, locale);
        ensure_finite_buckets(daily.iter().chain(&monthly))?;

        debug!(
            "Overview has {} daily and {} monthly expense buckets",
            daily.len(),
            monthly.len()
        );

        Ok(OverviewReport {
            scope: target.scope(),
            resource_id: target.resource_id(),
            summary,
            daily_expenses: daily.into_iter().map(DailyExpense::from).collect(),
            monthly_expenses: monthly.into_iter().map(MonthlyExpense::from).collect(),
        })
    }
}

/// Runs what-if simulations against a forecaster built once at startup.
pub struct SimulationProcessor<F: Forecaster> {
    forecaster: F,
    locale: Locale,
}

impl<F: Forecaster> SimulationProcessor<F> {
    pub fn new(forecaster: F, locale: Locale) -> Self {
        Self { forecaster, locale }
    }

    pub fn forecaster(&self) -> &F {
        &self.forecaster
    }

    /// Projects the next [`FORECAST_HORIZON`] months of `records` under `parameters`.
    /// `today` anchors the synthetic history used when there are no records.
    pub fn run(
        &self,
        records: &[RawTransaction],
        parameters: &SimulationParameters,
        today: NaiveDate,
    ) -> Result<SimulationReport> {
        parameters.validate()?;

        let series = normalize_records(records)?;
        let history = build_forecast_input(&series, today);
        info!(
            "Running simulation over {} months of history (income change {}%, flat cut {})",
            history.len(),
            parameters.income_change_percent,
            parameters.expense_cut_flat
        );

        let forecast = self.forecaster.forecast(&history, FORECAST_HORIZON)?;
        let adjusted = adjust_forecast(&forecast, parameters)?;
        let projected_data = to_projected_points(&adjusted);

        Ok(SimulationReport {
            summary: self.locale.simulation_summary(projected_data.len()),
            projected_data,
        })
    }

    /// [`SimulationProcessor::run`] anchored at the current UTC date.
    pub fn run_now(
        &self,
        records: &[RawTransaction],
        parameters: &SimulationParameters,
    ) -> Result<SimulationReport> {
        self.run(records, parameters, Utc::now().date_naive())
    }
}

impl SimulationProcessor<TrendForecaster> {
    /// Builds a processor backed by the built-in [`TrendForecaster`].
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            TrendForecaster::new(config.forecast.clone()),
            config.locale,
        ))
    }
}

pub fn financial_overview(
    request: &OverviewRequest,
    caller_user_id: &str,
    records: &[RawTransaction],
) -> Result<OverviewReport> {
    OverviewProcessor::process(request, caller_user_id, records, Locale::default())
}
