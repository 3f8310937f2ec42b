//! Google Gemini wire types.
//!
//! The upstream API has its own shapes:
//! - Messages are called "contents"
//! - Role is "user" or "model" (not "assistant")
//! - Content is an array of "parts"
//!
//! # Example request
//! ```json
//! {
//!   "contents": [
//!     {"role": "user", "parts": [{"text": "Hello"}]}
//!   ],
//!   "generationConfig": {"temperature": 0.7, "maxOutputTokens": 800}
//! }
//! ```

use serde::{Deserialize, Serialize};

use chat_core::{ChatHistoryEntry, GenerationConfig};

/// Gemini request format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    /// Conversation history, current prompt last
    pub contents: Vec<GeminiContent>,
    /// Generation config (temperature, max tokens)
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Gemini message/content format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"
    pub role: String,
    /// Array of content parts
    pub parts: Vec<GeminiPart>,
}

/// Gemini content part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Gemini response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiResponse {
    pub candidates: Vec<GeminiCandidate>,
}

/// Gemini response candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
    #[serde(rename = "finishReason", skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl From<&ChatHistoryEntry> for GeminiContent {
    fn from(entry: &ChatHistoryEntry) -> Self {
        Self {
            role: entry.role.clone(),
            parts: entry
                .parts
                .iter()
                .map(|p| GeminiPart {
                    text: Some(p.text.clone()),
                })
                .collect(),
        }
    }
}

impl GeminiResponse {
    /// Text of the first candidate, all parts concatenated.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some("Hello".to_string()),
                }],
            }],
            generation_config: Some(GenerationConfig::default()),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"maxOutputTokens\""));
    }

    #[test]
    fn test_response_text_extraction() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"I'm "},{"text":"busy."}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("I'm busy."));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response = GeminiResponse { candidates: vec![] };
        assert!(response.text().is_none());
    }
}
