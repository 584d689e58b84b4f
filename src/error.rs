use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanceCoreError {
    #[error("Invalid amount in record #{row}: '{value}' is not a finite number")]
    InvalidAmount { row: usize, value: String },

    #[error("Invalid date in record #{row}: '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Record #{row} is missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("Unsupported scope '{0}': expected 'personal' or 'company'")]
    UnsupportedScope(String),

    #[error("Invalid user identifier: {0}")]
    InvalidUserId(String),

    #[error("Cannot query another user's personal data (requested {requested}, caller {caller})")]
    CrossUserAccess { requested: i64, caller: i64 },

    #[error("A company identifier is required for company scope")]
    MissingCompanyId,

    #[error("Total '{field}' overflowed to a non-finite value")]
    NonFiniteTotal { field: String },

    #[error("Invalid simulation parameter '{name}': {details}")]
    InvalidParameter { name: String, details: String },

    #[error("Forecast has {actual} rows, at least {required} are required")]
    ForecastTooShort { required: usize, actual: usize },

    #[error("Forecasting failed: {0}")]
    ForecastFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "gemini")]
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[cfg(feature = "gemini")]
    #[error("Advisor request failed: {0}")]
    AdvisorError(String),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FinanceCoreError>;
