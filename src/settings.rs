//! Runtime settings: generation service credentials, prompt customization
//! and keyword extraction limits.
//!
//! Settings come from an optional JSON file; selected keys can then be
//! overridden from the environment.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::service::keyword_strategy::DEFAULT_TOP_N;

pub const ENV_API_KEY: &str = "SEO_AUDIT_GEMINI_API_KEY";
pub const ENV_MODEL: &str = "SEO_AUDIT_GEMINI_MODEL";
pub const ENV_ENDPOINT: &str = "SEO_AUDIT_GEMINI_ENDPOINT";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SNIPPET_CHARS: usize = 1200;

/// A user-editable prompt fragment. `content` may contain `{variable}`
/// placeholders that are substituted per page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PromptBlock {
    pub id: String,
    pub r#type: String, // "text" or "variable"
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub gemini_persona: Option<String>,
    pub prompt_blocks: Vec<PromptBlock>,
    pub keyword_top_n: usize,
    pub content_snippet_chars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_endpoint: DEFAULT_ENDPOINT.to_string(),
            gemini_persona: None,
            prompt_blocks: Vec::new(),
            keyword_top_n: DEFAULT_TOP_N,
            content_snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

impl Settings {
    /// Loads settings from `path` (defaults when `None`) and applies
    /// environment overrides.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| AppError::io(path.display().to_string(), e))?;
                Self::from_json(&raw)?
            }
            None => Self::default(),
        };

        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(raw)
            .context("Failed to parse settings file")
            .map_err(|e| AppError::settings(format!("{:#}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.gemini_api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.gemini_model = model;
        }
        if let Some(endpoint) = non_empty(ENV_ENDPOINT) {
            self.gemini_endpoint = endpoint;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.gemini_model.trim().is_empty() {
            return Err(AppError::settings("gemini_model must not be empty"));
        }
        url::Url::parse(&self.gemini_endpoint)
            .map_err(|e| AppError::settings(format!("gemini_endpoint is not a URL: {}", e)))?;
        if self.keyword_top_n == 0 {
            return Err(AppError::settings("keyword_top_n must be at least 1"));
        }
        Ok(())
    }

    /// The API key, required only once generation is actually requested.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.gemini_api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AppError::settings(format!(
                "API_KEY_MISSING: set {} or gemini_api_key in the settings file",
                ENV_API_KEY
            ))),
        }
    }
}
