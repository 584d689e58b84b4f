use crate::error::{FinanceCoreError, Result};
use crate::locale::Locale;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Engine-wide settings, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineConfig {
    #[schemars(description = "Language for bucket labels and summaries ('es' or 'en')")]
    pub locale: Locale,

    #[schemars(description = "Built-in forecaster settings")]
    pub forecast: TrendForecastConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Es,
            forecast: TrendForecastConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TrendForecastConfig {
    #[schemars(description = "Coverage of the uncertainty interval, strictly between 0 and 1")]
    pub interval_width: f64,

    #[schemars(description = "Number of Monte Carlo draws per forecast month")]
    pub uncertainty_samples: usize,

    #[schemars(description = "Seed for the sampling RNG; equal seeds give equal forecasts")]
    pub seed: u64,
}

impl Default for TrendForecastConfig {
    fn default() -> Self {
        Self {
            interval_width: 0.8,
            uncertainty_samples: 1000,
            seed: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let width = self.forecast.interval_width;
        if !(width > 0.0 && width < 1.0) {
            return Err(FinanceCoreError::InvalidConfig(format!(
                "interval_width {} must be strictly between 0 and 1",
                width
            )));
        }

        if self.forecast.uncertainty_samples == 0 {
            return Err(FinanceCoreError::InvalidConfig(
                "uncertainty_samples must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings for the language-model advisor.
#[cfg(feature = "gemini")]
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub base_url: String,
}

#[cfg(feature = "gemini")]
impl AdvisorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.2,
            max_output_tokens: 512,
            base_url: crate::llm::GEMINI_BASE_URL.to_string(),
        }
    }

    /// Reads `GEMINI_API_KEY` (required) and `GEMINI_MODEL` (optional).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FinanceCoreError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
