use super::FORECAST_HORIZON;
use crate::error::{FinanceCoreError, Result};
use crate::schema::{ForecastPoint, ProjectedPoint, SimulationParameters};
use crate::utils::format_period;

/// Applies the what-if policy to the trailing [`FORECAST_HORIZON`] rows.
///
/// Every value of every row goes through the same affine transform
/// `v * (1 + income_change_percent / 100) - expense_cut_flat`. Bounds are not
/// reordered afterwards: a change below -100% flips the interval and is returned as-is.
pub fn adjust_forecast(
    rows: &[ForecastPoint],
    parameters: &SimulationParameters,
) -> Result<Vec<ForecastPoint>> {
    if rows.len() < FORECAST_HORIZON {
        return Err(FinanceCoreError::ForecastTooShort {
            required: FORECAST_HORIZON,
            actual: rows.len(),
        });
    }

    let factor = parameters.scale_factor();
    let cut = parameters.expense_cut_flat;
    let apply = |value: f64| value * factor - cut;

    Ok(rows[rows.len() - FORECAST_HORIZON..]
        .iter()
        .map(|row| ForecastPoint {
            month: row.month,
            point_estimate: apply(row.point_estimate),
            lower_bound: apply(row.lower_bound),
            upper_bound: apply(row.upper_bound),
        })
        .collect())
}

pub fn to_projected_points(rows: &[ForecastPoint]) -> Vec<ProjectedPoint> {
    rows.iter()
        .map(|row| ProjectedPoint {
            date: format_period(row.month),
            projected_amount: row.point_estimate,
            lower_bound: row.lower_bound,
            upper_bound: row.upper_bound,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::shift_months;
    use chrono::NaiveDate;

    fn flat_rows(count: usize, point: f64, lower: f64, upper: f64) -> Vec<ForecastPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..count)
            .map(|i| ForecastPoint {
                month: shift_months(start, i as i32),
                point_estimate: point,
                lower_bound: lower,
                upper_bound: upper,
            })
            .collect()
    }

    fn params(percent: f64, cut: f64) -> SimulationParameters {
        SimulationParameters {
            income_change_percent: percent,
            expense_cut_flat: cut,
        }
    }

    #[test]
    fn test_percentage_scaling() {
        let rows = flat_rows(12, 1000.0, 900.0, 1100.0);
        let adjusted = adjust_forecast(&rows, &params(10.0, 0.0)).unwrap();
        assert!(adjusted.iter().all(|r| r.point_estimate == 1100.0));
        assert!((adjusted[0].lower_bound - 990.0).abs() < 1e-9);
        assert!((adjusted[0].upper_bound - 1210.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_cut() {
        let rows = flat_rows(12, 1000.0, 900.0, 1100.0);
        let adjusted = adjust_forecast(&rows, &params(0.0, 50.0)).unwrap();
        assert!(adjusted.iter().all(|r| r.point_estimate == 950.0));
        assert_eq!(adjusted[0].lower_bound, 850.0);
        assert_eq!(adjusted[0].upper_bound, 1050.0);
    }

    #[test]
    fn test_only_trailing_horizon_is_kept() {
        let rows = flat_rows(30, 1.0, 1.0, 1.0);
        let adjusted = adjust_forecast(&rows, &SimulationParameters::default()).unwrap();
        assert_eq!(adjusted.len(), FORECAST_HORIZON);
        assert_eq!(adjusted[0].month, rows[18].month);
        assert_eq!(adjusted.last().unwrap().month, rows[29].month);
    }

    #[test]
    fn test_short_forecast_is_rejected() {
        let rows = flat_rows(11, 1.0, 1.0, 1.0);
        assert!(matches!(
            adjust_forecast(&rows, &SimulationParameters::default()),
            Err(FinanceCoreError::ForecastTooShort {
                required: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_negative_bounds_are_not_reordered() {
        // -200% gives a scale factor of -1, which flips the interval.
        let rows = flat_rows(12, 0.0, -100.0, 100.0);
        let adjusted = adjust_forecast(&rows, &params(-200.0, 10.0)).unwrap();
        assert_eq!(adjusted[0].point_estimate, -10.0);
        assert_eq!(adjusted[0].lower_bound, 90.0);
        assert_eq!(adjusted[0].upper_bound, -110.0);
        assert!(adjusted[0].lower_bound > adjusted[0].upper_bound);
    }

    #[test]
    fn test_projected_point_labels() {
        let rows = flat_rows(12, 5.0, 4.0, 6.0);
        let projected = to_projected_points(&rows);
        assert_eq!(projected[0].date, "2024-01");
        assert_eq!(projected[11].date, "2024-12");
        assert_eq!(projected[0].projected_amount, 5.0);
    }
}
