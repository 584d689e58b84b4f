use crate::error::{FinanceCoreError, Result};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[serde(alias = "ingreso")]
    #[schemars(description = "Money coming in (stored as 'ingreso')")]
    Income,

    #[serde(alias = "gasto")]
    #[schemars(description = "Money going out (stored as 'gasto')")]
    Expense,
}

impl TransactionKind {
    /// Maps a stored tag to a kind. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "ingreso" | "income" => Some(Self::Income),
            "gasto" | "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// Amount as delivered by the data store: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A transaction row exactly as fetched, before any validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RawTransaction {
    #[serde(default, alias = "fecha")]
    #[schemars(description = "Transaction date, e.g. '2024-01-05' or an RFC 3339 timestamp")]
    pub date: Option<String>,

    #[serde(default, alias = "monto")]
    #[schemars(description = "Non-negative magnitude; the sign is conveyed by `kind`")]
    pub amount: Option<RawAmount>,

    #[serde(default, alias = "tipo", alias = "category")]
    #[schemars(description = "'ingreso'/'income' or 'gasto'/'expense'")]
    pub kind: Option<String>,

    #[serde(default, alias = "categoria")]
    pub category_label: Option<String>,

    #[serde(default, alias = "descripcion")]
    pub note: Option<String>,
}

impl RawTransaction {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<RawAmount>,
        kind: Option<&str>,
    ) -> Self {
        Self {
            date: Some(date.into()),
            amount: Some(amount.into()),
            kind: kind.map(str::to_string),
            category_label: None,
            note: None,
        }
    }
}

/// One row of a normalized series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    /// `None` when the row carried no recognized income/expense tag.
    pub kind: Option<TransactionKind>,
}

/// Transactions sorted ascending by date. Dates may repeat or skip.
pub type NormalizedSeries = Vec<Transaction>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExpenseBucket {
    #[schemars(description = "Localized period label, e.g. 'Ene. 05' or 'Enero 2024'")]
    pub label: String,
    pub amount: f64,
}

/// Daily entry of an overview report, keyed as dashboards read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyExpense {
    #[schemars(description = "Localized day label, e.g. 'Ene. 05'")]
    pub date: String,
    pub amount: f64,
}

impl From<ExpenseBucket> for DailyExpense {
    fn from(bucket: ExpenseBucket) -> Self {
        Self {
            date: bucket.label,
            amount: bucket.amount,
        }
    }
}

/// Monthly entry of an overview report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyExpense {
    #[schemars(description = "Localized month label, e.g. 'Enero 2024'")]
    pub month: String,
    pub amount: f64,
}

impl From<ExpenseBucket> for MonthlyExpense {
    fn from(bucket: ExpenseBucket) -> Self {
        Self {
            month: bucket.label,
            amount: bucket.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverviewSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    #[schemars(description = "net_balance / total_income * 100, or 0 when there is no income")]
    pub balance_percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Personal,
    Company,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Personal => "personal",
            Scope::Company => "company",
        }
    }
}

impl FromStr for Scope {
    type Err = FinanceCoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "personal" => Ok(Scope::Personal),
            "company" => Ok(Scope::Company),
            other => Err(FinanceCoreError::UnsupportedScope(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OverviewRequest {
    #[schemars(description = "'personal' or 'company'")]
    pub scope: String,
    #[serde(default)]
    pub resource_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OverviewReport {
    pub scope: Scope,
    pub resource_id: String,
    #[serde(flatten)]
    pub summary: OverviewSummary,
    #[schemars(description = "Up to 7 most recent days with expenses, oldest first")]
    pub daily_expenses: Vec<DailyExpense>,
    #[schemars(description = "Up to 6 most recent months with expenses, oldest first")]
    pub monthly_expenses: Vec<MonthlyExpense>,
}

impl OverviewReport {
    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&schemars::schema_for!(OverviewReport))
    }
}

/// One month of forecasting input: (period start, value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub value: f64,
}

/// One forecaster output row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastPoint {
    #[schemars(description = "First day of the forecast month")]
    pub month: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SimulationParameters {
    #[schemars(description = "Signed percentage applied multiplicatively, e.g. 10 for +10%")]
    pub income_change_percent: f64,
    #[schemars(description = "Non-negative amount subtracted from every projected value")]
    pub expense_cut_flat: f64,
}

impl SimulationParameters {
    /// Reads the flat option mapping sent by clients. Unknown keys are ignored,
    /// missing keys default to zero.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let params: SimulationParameters = serde_json::from_value(value)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.income_change_percent.is_finite() {
            return Err(FinanceCoreError::InvalidParameter {
                name: "income_change_percent".to_string(),
                details: format!("{} is not a finite number", self.income_change_percent),
            });
        }

        if !self.expense_cut_flat.is_finite() || self.expense_cut_flat < 0.0 {
            return Err(FinanceCoreError::InvalidParameter {
                name: "expense_cut_flat".to_string(),
                details: format!("{} must be a finite, non-negative amount", self.expense_cut_flat),
            });
        }

        Ok(())
    }

    pub fn scale_factor(&self) -> f64 {
        1.0 + self.income_change_percent / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectedPoint {
    #[schemars(description = "Forecast month as YYYY-MM")]
    pub date: String,
    pub projected_amount: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SimulationReport {
    pub summary: String,
    pub projected_data: Vec<ProjectedPoint>,
}

impl SimulationReport {
    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&schemars::schema_for!(SimulationReport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_transaction_accepts_store_field_names() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "fecha": "2024-01-05",
            "monto": "100.50",
            "tipo": "ingreso",
            "categoria": "Nómina",
            "descripcion": "Pago quincenal"
        }))
        .unwrap();

        assert_eq!(raw.date.as_deref(), Some("2024-01-05"));
        assert_eq!(raw.amount, Some(RawAmount::Text("100.50".to_string())));
        assert_eq!(raw.kind.as_deref(), Some("ingreso"));
        assert_eq!(raw.category_label.as_deref(), Some("Nómina"));
        assert_eq!(raw.note.as_deref(), Some("Pago quincenal"));
    }

    #[test]
    fn test_raw_transaction_numeric_amount_and_missing_fields() {
        let raw: RawTransaction =
            serde_json::from_value(json!({ "date": "2024-01-05", "amount": 40 })).unwrap();
        assert_eq!(raw.amount, Some(RawAmount::Number(40.0)));
        assert!(raw.kind.is_none());
    }

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(TransactionKind::from_tag("gasto"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::from_tag(" Ingreso "), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::from_tag("EXPENSE"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::from_tag("transferencia"), None);
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("personal".parse::<Scope>().unwrap(), Scope::Personal);
        assert_eq!("company".parse::<Scope>().unwrap(), Scope::Company);
        assert!(matches!(
            "team".parse::<Scope>(),
            Err(FinanceCoreError::UnsupportedScope(tag)) if tag == "team"
        ));
    }

    #[test]
    fn test_simulation_parameters_ignore_unknown_and_default_missing() {
        let params = SimulationParameters::from_value(json!({
            "income_change_percent": 10,
            "inflation": 4.5
        }))
        .unwrap();
        assert_eq!(params.income_change_percent, 10.0);
        assert_eq!(params.expense_cut_flat, 0.0);

        let empty = SimulationParameters::from_value(json!({})).unwrap();
        assert_eq!(empty, SimulationParameters::default());
    }

    #[test]
    fn test_simulation_parameters_reject_negative_cut() {
        let result = SimulationParameters::from_value(json!({ "expense_cut_flat": -5 }));
        assert!(matches!(
            result,
            Err(FinanceCoreError::InvalidParameter { name, .. }) if name == "expense_cut_flat"
        ));
    }

    #[test]
    fn test_simulation_parameters_reject_non_numeric() {
        let result = SimulationParameters::from_value(json!({ "income_change_percent": "ten" }));
        assert!(matches!(result, Err(FinanceCoreError::SerializationError(_))));
    }

    #[test]
    fn test_report_buckets_serialize_with_period_keys() {
        let bucket = ExpenseBucket {
            label: "Ene. 10".to_string(),
            amount: 40.0,
        };
        let daily = serde_json::to_value(DailyExpense::from(bucket)).unwrap();
        assert_eq!(daily, json!({ "date": "Ene. 10", "amount": 40.0 }));

        let monthly = serde_json::to_value(MonthlyExpense::from(ExpenseBucket {
            label: "Enero 2024".to_string(),
            amount: 40.0,
        }))
        .unwrap();
        assert_eq!(monthly, json!({ "month": "Enero 2024", "amount": 40.0 }));
    }

    #[test]
    fn test_report_schema_generation() {
        let overview = OverviewReport::schema_as_json().unwrap();
        assert!(overview.contains("balance_percentage"));
        assert!(overview.contains("daily_expenses"));

        let simulation = SimulationReport::schema_as_json().unwrap();
        assert!(simulation.contains("projected_amount"));
    }
}
