use crate::error::{FinanceCoreError, Result};
use crate::schema::{ExpenseBucket, OverviewSummary, Transaction, TransactionKind};

pub fn compute_overview(series: &[Transaction]) -> OverviewSummary {
    let total_for = |kind: TransactionKind| -> f64 {
        series
            .iter()
            .filter(|t| t.kind == Some(kind))
            .map(|t| t.amount)
            .sum()
    };

    let total_income = total_for(TransactionKind::Income);
    let total_expenses = total_for(TransactionKind::Expense);
    let net_balance = total_income - total_expenses;
    let balance_percentage = if total_income != 0.0 {
        net_balance / total_income * 100.0
    } else {
        0.0
    };

    OverviewSummary {
        total_income,
        total_expenses,
        net_balance,
        balance_percentage,
    }
}

impl OverviewSummary {
    /// Rejects totals that overflowed, since JSON cannot carry them.
    pub fn ensure_finite(&self) -> Result<()> {
        let fields = [
            ("total_income", self.total_income),
            ("total_expenses", self.total_expenses),
            ("net_balance", self.net_balance),
            ("balance_percentage", self.balance_percentage),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(FinanceCoreError::NonFiniteTotal {
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }
}

pub fn ensure_finite_buckets<'a, I>(buckets: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ExpenseBucket>,
{
    match buckets.into_iter().find(|b| !b.amount.is_finite()) {
        Some(bucket) => Err(FinanceCoreError::NonFiniteTotal {
            field: format!("expenses for {}", bucket.label),
        }),
        None => Ok(()),
    }
}
