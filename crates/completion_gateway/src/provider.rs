//! Completion provider trait and the Gemini implementation.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use chat_core::{ChatHistoryEntry, GenerationConfig};

use crate::gemini::{GeminiContent, GeminiRequest, GeminiResponse};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upstream API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Upstream response carried no text")]
    EmptyResponse,
}

pub type Result<T, E = ProviderError> = std::result::Result<T, E>;

/// Seam between the chat route and the hosted model.
///
/// The route hands over an already-split (context, prompt) pair; the
/// caller of the route is responsible for putting the current prompt
/// last in the transmitted history.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn generate(
        &self,
        context: &[ChatHistoryEntry],
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String>;
}

/// Google Gemini API provider (non-streaming).
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
        }
    }

    /// Set a custom base URL (e.g., for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn generate(
        &self,
        context: &[ChatHistoryEntry],
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<String> {
        let mut contents: Vec<GeminiContent> =
            context.iter().map(GeminiContent::from).collect();
        contents.push(GeminiContent::from(&ChatHistoryEntry::user(prompt)));

        let request = GeminiRequest {
            contents,
            generation_config: Some(config),
        };

        // Query-parameter authentication, single-shot call.
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.map_err(ProviderError::Http)?;

            if status == 401 || status == 403 {
                return Err(ProviderError::Auth(format!(
                    "Gemini authentication failed: {}. Please check your API key.",
                    body
                )));
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = response.json().await.map_err(ProviderError::Http)?;
        parsed.text().ok_or(ProviderError::EmptyResponse)
    }
}
