//! Wire protocol between the orchestrator and the completion gateway.
//!
//! The gateway speaks a parts-based history format:
//! - Roles are "user" or "model" (not "assistant")
//! - Each entry carries an array of text parts
//! - Generation parameters travel alongside the history
//!
//! # Example request body
//! ```json
//! {
//!   "chatHistory": [
//!     {"role": "user", "parts": [{"text": "Hello"}]}
//!   ],
//!   "generationConfig": {"temperature": 0.7, "maxOutputTokens": 800}
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::turn::Turn;

/// One piece of an entry's content. Text only in this product.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatPart {
    pub text: String,
}

/// One (role, parts) entry in the transmitted history.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatHistoryEntry {
    /// "user" or "model"
    pub role: String,
    pub parts: Vec<ChatPart>,
}

impl ChatHistoryEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![ChatPart { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![ChatPart { text: text.into() }],
        }
    }

    /// All text parts concatenated.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl From<&Turn> for ChatHistoryEntry {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.sender.chat_role().to_string(),
            parts: vec![ChatPart {
                text: turn.text.clone(),
            }],
        }
    }
}

/// Generation parameters forwarded to the upstream model.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 800,
        }
    }
}

/// Request body for the gateway's chat route.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub chat_history: Vec<ChatHistoryEntry>,
    pub generation_config: GenerationConfig,
}

/// Success body from the gateway's chat route.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub ai_response_text: String,
}

/// Assemble the outbound context window.
///
/// Layout contract with the gateway: the persona goes first as a
/// user-role entry, prior turns follow in order, and the current
/// prompt is the final entry. The gateway peels the last entry off as
/// the prompt and treats everything before it as context.
pub fn build_chat_history(persona: &str, prior: &[Turn], current: &str) -> Vec<ChatHistoryEntry> {
    let mut history = Vec::with_capacity(prior.len() + 2);
    history.push(ChatHistoryEntry::user(persona));
    history.extend(prior.iter().map(ChatHistoryEntry::from));
    history.push(ChatHistoryEntry::user(current));
    history
}
