//! Text generation capability used by the optimizer and engagement planner.
//!
//! Generation is always injected as an `Arc<dyn TextGenerator>`; the audit
//! and scoring core never touches it.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::settings::Settings;

/// One prompt sent to a generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Opaque "prompt in, free text out" capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Human-readable name for logs.
    fn name(&self) -> &'static str;
}

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Builds a client from settings; fails when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?;
        Ok(Self::new(
            api_key,
            settings.gemini_model.clone(),
            settings.gemini_endpoint.clone(),
        ))
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let request_body = json!({
            "systemInstruction": {
                "parts": [{ "text": request.system }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "temperature": request.temperature
            }
        });

        tracing::debug!(model = %self.model, prompt_chars = request.prompt.len(), "sending Gemini request");

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .body(request_body.to_string())
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::service(
                "gemini",
                format!("HTTP {}: {}", status, error_text),
            ));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| AppError::service("gemini", "response contained no candidate text"))?
            .to_string();

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "Gemini"
    }
}
