//! Google Generative Language (`generateContent`) client.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{
    habit_prompt, identity_prompt, IdentityMotivationRequest, MotivationGenerator,
    MotivationMessage,
};
use crate::error::MotivationError;
use crate::storage::MotivationConfig;

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl GeminiClient {
    /// Build a client from config. `api_key` of `None` makes every call
    /// fail with [`MotivationError::MissingApiKey`].
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &MotivationConfig, api_key: Option<String>) -> Result<Self, MotivationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: String) -> Result<MotivationMessage, MotivationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MotivationError::MissingApiKey {
                service: "gemini".to_string(),
            })?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(MotivationError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed
            .into_text()
            .map(|message| MotivationMessage { message })
            .ok_or(MotivationError::EmptyResponse)
    }
}

impl MotivationGenerator for GeminiClient {
    async fn generate_motivation_message(
        &self,
        habit_name: &str,
        streak_length: u32,
    ) -> Result<MotivationMessage, MotivationError> {
        self.generate(habit_prompt(habit_name, streak_length)).await
    }

    async fn generate_identity_motivation(
        &self,
        request: &IdentityMotivationRequest,
    ) -> Result<MotivationMessage, MotivationError> {
        self.generate(identity_prompt(request)).await
    }
}
