use crate::locale::Locale;
use crate::schema::{ExpenseBucket, Transaction, TransactionKind};
use crate::utils::month_start;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const DAILY_BUCKET_LIMIT: usize = 7;
pub const MONTHLY_BUCKET_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    /// Start of the period containing `date`.
    pub fn period_key(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => month_start(date),
        }
    }

    pub fn bucket_limit(self) -> usize {
        match self {
            Granularity::Day => DAILY_BUCKET_LIMIT,
            Granularity::Month => MONTHLY_BUCKET_LIMIT,
        }
    }

    pub fn label(self, period_start: NaiveDate, locale: Locale) -> String {
        match self {
            Granularity::Day => locale.day_label(period_start),
            Granularity::Month => locale.month_label(period_start),
        }
    }
}

/// Sums amounts per period, keyed by period start.
pub fn sum_by_period<'a, I>(transactions: I, granularity: Granularity) -> BTreeMap<NaiveDate, f64>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = BTreeMap::new();
    for transaction in transactions {
        *totals
            .entry(granularity.period_key(transaction.date))
            .or_insert(0.0) += transaction.amount;
    }
    totals
}

/// Expense totals for the most recent non-empty periods, oldest first.
///
/// Periods summing to exactly zero are dropped before the
/// [`Granularity::bucket_limit`] cap is applied.
pub fn aggregate_expenses(
    series: &[Transaction],
    granularity: Granularity,
    locale: Locale,
) -> Vec<ExpenseBucket> {
    let expenses = series
        .iter()
        .filter(|t| t.kind == Some(TransactionKind::Expense));
    let totals = sum_by_period(expenses, granularity);

    let mut buckets: Vec<ExpenseBucket> = totals
        .into_iter()
        .rev()
        .filter(|(_, amount)| *amount != 0.0)
        .take(granularity.bucket_limit())
        .map(|(period, amount)| ExpenseBucket {
            label: granularity.label(period, locale),
            amount,
        })
        .collect();
    buckets.reverse();
    buckets
}

pub fn daily_expenses(series: &[Transaction], locale: Locale) -> Vec<ExpenseBucket> {
    aggregate_expenses(series, Granularity::Day, locale)
}

pub fn monthly_expenses(series: &[Transaction], locale: Locale) -> Vec<ExpenseBucket> {
    aggregate_expenses(series, Granularity::Month, locale)
}
