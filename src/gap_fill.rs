use crate::aggregate::{sum_by_period, Granularity};
use crate::schema::{MonthlyPoint, Transaction};
use crate::utils::{month_start, month_starts_in_range, shift_months};
use chrono::NaiveDate;
use log::debug;

/// Months synthesized when there is no history at all.
pub const EMPTY_HISTORY_MONTHS: usize = 12;
/// Minimum number of monthly points handed to a forecaster.
pub const MIN_HISTORY_MONTHS: usize = 6;

/// Builds a contiguous monthly series suitable as forecasting input.
///
/// Every transaction counts regardless of kind. Months without records inside
/// the observed range become zero. With fewer than [`MIN_HISTORY_MONTHS`]
/// observed months, five zero months are prepended before the earliest one.
/// With no records at all, twelve zero months ending at `today`'s month are returned.
pub fn build_forecast_input(series: &[Transaction], today: NaiveDate) -> Vec<MonthlyPoint> {
    let totals = sum_by_period(series, Granularity::Month);

    let (first, last) = match (totals.keys().next(), totals.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            let end = month_start(today);
            debug!(
                "No history; synthesizing {} zero months ending {}",
                EMPTY_HISTORY_MONTHS, end
            );
            return (0..EMPTY_HISTORY_MONTHS as i32)
                .rev()
                .map(|back| MonthlyPoint {
                    month: shift_months(end, -back),
                    value: 0.0,
                })
                .collect();
        }
    };

    let observed_months = month_starts_in_range(first, last);
    let start = if observed_months.len() < MIN_HISTORY_MONTHS {
        let padded = shift_months(first, -(MIN_HISTORY_MONTHS as i32 - 1));
        debug!(
            "Only {} months of history; padding back to {}",
            observed_months.len(),
            padded
        );
        padded
    } else {
        first
    };

    month_starts_in_range(start, last)
        .into_iter()
        .map(|month| MonthlyPoint {
            month,
            value: totals.get(&month).copied().unwrap_or(0.0),
        })
        .collect()
}
