//! Completion gateway client seam.

use async_trait::async_trait;
use thiserror::Error;

use chat_core::{ChatHistoryEntry, ChatRequest, GenerationConfig};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gateway response carried no aiResponseText")]
    MissingText,
}

/// One-shot completion call against the gateway.
///
/// The transmitted history must already carry the current prompt as
/// its final entry; the gateway splits on position.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        chat_history: Vec<ChatHistoryEntry>,
        config: GenerationConfig,
    ) -> Result<String, ClientError>;
}

/// HTTP client for the gateway's chat route.
pub struct HttpCompletionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCompletionClient {
    /// `endpoint` is the full chat route URL,
    /// e.g. `http://127.0.0.1:8080/v1/chat`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        chat_history: Vec<ChatHistoryEntry>,
        config: GenerationConfig,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                chat_history,
                generation_config: config,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let value: serde_json::Value = response.json().await?;
        match value.get("aiResponseText").and_then(|v| v.as_str()) {
            Some(text) => Ok(text.to_string()),
            None => Err(ClientError::MissingText),
        }
    }
}
