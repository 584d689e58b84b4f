use crate::error::{FinanceCoreError, Result};
use crate::llm::types::*;
use reqwest::Client;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Single-turn text generation with a system instruction.
    pub async fn generate_text(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        generation_config: GenerationConfig,
    ) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content::user(user_prompt)],
            system_instruction: Some(Content::user(system_prompt)),
            generation_config,
        };

        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let err_text = res.text().await?;
            return Err(FinanceCoreError::AdvisorError(format!(
                "Gemini API Error (status {}): {}",
                status, err_text
            )));
        }

        let body: GenerateContentResponse = res.json().await?;
        extract_text(body)
    }
}

fn extract_text(body: GenerateContentResponse) -> Result<String> {
    let content = body
        .candidates
        .ok_or_else(|| FinanceCoreError::AdvisorError("No candidates returned".to_string()))?
        .into_iter()
        .next()
        .ok_or_else(|| FinanceCoreError::AdvisorError("Empty candidates list".to_string()))?
        .content
        .ok_or_else(|| FinanceCoreError::AdvisorError("Candidate has no content".to_string()))?;

    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.is_empty() {
        return Err(FinanceCoreError::AdvisorError(
            "No text in content parts".to_string(),
        ));
    }
    Ok(text)
}
