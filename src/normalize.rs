use crate::error::{FinanceCoreError, Result};
use crate::schema::{NormalizedSeries, RawAmount, RawTransaction, Transaction, TransactionKind};
use crate::utils::parse_transaction_date;
use log::debug;

/// Converts fetched rows into a series sorted ascending by date.
///
/// Parsing is all-or-nothing: the first row with a missing or unparseable date
/// or amount rejects the whole batch. Rows sharing a date keep their input order.
pub fn normalize_records(records: &[RawTransaction]) -> Result<NormalizedSeries> {
    let mut series = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        let raw_date = record
            .date
            .as_deref()
            .ok_or(FinanceCoreError::MissingField { row, field: "date" })?;
        let date = parse_transaction_date(raw_date).ok_or_else(|| {
            FinanceCoreError::InvalidDate {
                row,
                value: raw_date.to_string(),
            }
        })?;

        let raw_amount = record
            .amount
            .as_ref()
            .ok_or(FinanceCoreError::MissingField { row, field: "amount" })?;
        let amount = coerce_amount(row, raw_amount)?;

        let kind = record.kind.as_deref().and_then(TransactionKind::from_tag);

        series.push(Transaction { date, amount, kind });
    }

    series.sort_by_key(|t| t.date);

    debug!(
        "Normalized {} records ({} uncategorized)",
        series.len(),
        series.iter().filter(|t| t.kind.is_none()).count()
    );

    Ok(series)
}

fn coerce_amount(row: usize, raw: &RawAmount) -> Result<f64> {
    let value = match raw {
        RawAmount::Number(n) => Some(*n),
        RawAmount::Text(text) => text.trim().parse::<f64>().ok(),
    };

    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(FinanceCoreError::InvalidAmount {
            row,
            value: match raw {
                RawAmount::Number(n) => n.to_string(),
                RawAmount::Text(text) => text.clone(),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_input_yields_empty_series() {
        let series = normalize_records(&[]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_sorts_by_date_and_coerces_amounts() {
        let records = vec![
            RawTransaction::new("2024-03-02", "15.5", Some("gasto")),
            RawTransaction::new("2024-01-10", 40.0, Some("gasto")),
            RawTransaction::new("2024-02-01T09:00:00Z", " 100 ", Some("ingreso")),
        ];

        let series = normalize_records(&records).unwrap();
        let dates: Vec<NaiveDate> = series.iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            ]
        );
        assert_eq!(series[1].amount, 100.0);
        assert_eq!(series[1].kind, Some(TransactionKind::Income));
        assert_eq!(series[2].amount, 15.5);
    }

    #[test]
    fn test_same_day_rows_keep_input_order() {
        let records = vec![
            RawTransaction::new("2024-01-05", 1.0, Some("gasto")),
            RawTransaction::new("2024-01-05", 2.0, Some("gasto")),
            RawTransaction::new("2024-01-04", 3.0, Some("gasto")),
        ];
        let series = normalize_records(&records).unwrap();
        let amounts: Vec<f64> = series.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_unparseable_date_rejects_everything() {
        let records = vec![
            RawTransaction::new("2024-01-05", 100.0, Some("ingreso")),
            RawTransaction::new("not-a-date", 40.0, Some("gasto")),
        ];

        match normalize_records(&records) {
            Err(FinanceCoreError::InvalidDate { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_amount_is_rejected() {
        let records = vec![RawTransaction::new("2024-01-05", "doce", Some("gasto"))];
        assert!(matches!(
            normalize_records(&records),
            Err(FinanceCoreError::InvalidAmount { row: 0, .. })
        ));

        let records = vec![RawTransaction::new("2024-01-05", "NaN", Some("gasto"))];
        assert!(matches!(
            normalize_records(&records),
            Err(FinanceCoreError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let records = vec![RawTransaction {
            date: Some("2024-01-05".to_string()),
            ..Default::default()
        }];
        assert!(matches!(
            normalize_records(&records),
            Err(FinanceCoreError::MissingField { row: 0, field: "amount" })
        ));

        let records = vec![RawTransaction {
            amount: Some(RawAmount::Number(5.0)),
            ..Default::default()
        }];
        assert!(matches!(
            normalize_records(&records),
            Err(FinanceCoreError::MissingField { row: 0, field: "date" })
        ));
    }

    #[test]
    fn test_unknown_kind_is_kept_uncategorized() {
        let records = vec![
            RawTransaction::new("2024-01-05", 10.0, Some("transferencia")),
            RawTransaction::new("2024-01-06", 20.0, None),
        ];
        let series = normalize_records(&records).unwrap();
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|t| t.kind.is_none()));
    }
}
