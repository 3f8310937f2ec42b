//! Turn - one authored message in a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a turn.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The trainee typing into the widget.
    User,
    /// The simulated business owner.
    Ai,
}

impl Sender {
    /// Role name the completion gateway expects for this sender.
    ///
    /// The upstream protocol calls the assistant side "model", not "ai".
    pub fn chat_role(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "model",
        }
    }
}

/// One persisted message in a conversation.
///
/// `id` and `created_at` are assigned by the store when the turn is
/// appended; turns are totally ordered by `created_at` ascending.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Turn {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a turn with a fresh id and the current time.
    ///
    /// Callers outside the store should prefer appending raw
    /// (sender, text) pairs and letting the store assign these fields.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a user-authored turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create an assistant-authored turn.
    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }
}
