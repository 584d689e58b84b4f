use crate::config::AdvisorConfig;
use crate::error::Result;
use crate::llm::client::GeminiClient;
use crate::llm::types::{AdviceResponse, GenerationConfig};
use crate::locale::Locale;
use crate::schema::{RawAmount, RawTransaction};
use crate::utils::parse_transaction_date;
use log::{info, warn};
use serde_json::{json, Value};

/// Most recent transactions included in the model context.
pub const CONTEXT_TRANSACTION_LIMIT: usize = 100;

/// Answers free-form finance questions using the user's own data.
///
/// Build it once at startup and share it (e.g. behind an `Arc`).
pub struct FinancialAdvisor {
    client: GeminiClient,
    config: AdvisorConfig,
    locale: Locale,
}

impl FinancialAdvisor {
    pub fn new(config: AdvisorConfig, locale: Locale) -> Self {
        let client = GeminiClient::with_base_url(config.api_key.clone(), config.base_url.clone());
        Self {
            client,
            config,
            locale,
        }
    }

    pub fn from_env(locale: Locale) -> Result<Self> {
        Ok(Self::new(AdvisorConfig::from_env()?, locale))
    }

    /// Asks the model for a recommendation.
    ///
    /// Model failures do not surface as errors: the answer then explains that no
    /// recommendation could be produced and carries the technical detail.
    pub async fn advise(
        &self,
        transactions: &[RawTransaction],
        goals: &[Value],
        query: &str,
    ) -> AdviceResponse {
        let context = self.build_context(transactions, goals);
        let user_prompt = match self.locale {
            Locale::Es => format!(
                "Contexto del usuario:\n{}\n\nPregunta del usuario: {}",
                context, query
            ),
            Locale::En => format!("User context:\n{}\n\nUser question: {}", context, query),
        };

        info!(
            "Requesting advice from {} with {} transactions and {} goals",
            self.config.model,
            transactions.len().min(CONTEXT_TRANSACTION_LIMIT),
            goals.len()
        );

        let generation = GenerationConfig {
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
        };

        match self
            .client
            .generate_text(&self.config.model, self.system_prompt(), &user_prompt, generation)
            .await
        {
            Ok(answer) => AdviceResponse { answer },
            Err(err) => {
                warn!("Advisor fell back after model error: {}", err);
                AdviceResponse {
                    answer: self.fallback_answer(&err.to_string()),
                }
            }
        }
    }

    fn system_prompt(&self) -> &'static str {
        match self.locale {
            Locale::Es => {
                "Eres un asesor financiero que responde en español, \
                 dando recomendaciones accionables basadas en los datos del usuario."
            }
            Locale::En => {
                "You are a financial advisor who gives actionable recommendations \
                 grounded in the user's own data."
            }
        }
    }

    fn fallback_answer(&self, detail: &str) -> String {
        match self.locale {
            Locale::Es => format!(
                "No pude generar una recomendación con Gemini en este momento. \
                 Detalle técnico: {}",
                detail
            ),
            Locale::En => format!(
                "I could not generate a recommendation with Gemini right now. \
                 Technical detail: {}",
                detail
            ),
        }
    }

    /// Renders recent transactions and active goals as prompt context.
    pub fn build_context(&self, transactions: &[RawTransaction], goals: &[Value]) -> String {
        let rows: Vec<Value> = recent_transactions(transactions, CONTEXT_TRANSACTION_LIMIT)
            .into_iter()
            .map(|tx| {
                json!({
                    "fecha": tx.date,
                    "tipo": tx.kind,
                    "monto": tx.amount.as_ref().map(amount_value),
                    "categoria": tx.category_label,
                    "descripcion": tx.note,
                })
            })
            .collect();

        let rows = Value::Array(rows);
        let goals = Value::Array(goals.to_vec());
        match self.locale {
            Locale::Es => format!(
                "Transacciones recientes (fecha, tipo, monto, categoría, nota): {}\n\
                 Metas financieras activas: {}",
                rows, goals
            ),
            Locale::En => format!(
                "Recent transactions (date, kind, amount, category, note): {}\n\
                 Active financial goals: {}",
                rows, goals
            ),
        }
    }
}

fn amount_value(amount: &RawAmount) -> Value {
    match amount {
        RawAmount::Number(n) => json!(n),
        RawAmount::Text(text) => json!(text),
    }
}

/// Newest first. Rows whose date cannot be parsed sort last, in input order.
pub fn recent_transactions(transactions: &[RawTransaction], limit: usize) -> Vec<&RawTransaction> {
    let mut ordered: Vec<&RawTransaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| {
        std::cmp::Reverse(tx.date.as_deref().and_then(parse_transaction_date))
    });
    ordered.truncate(limit);
    ordered
}
