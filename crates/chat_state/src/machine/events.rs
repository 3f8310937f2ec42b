//! Session events - triggers for phase transitions.

use serde::{Deserialize, Serialize};

/// Defines the events that can trigger phase transitions in the FSM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    // ========== Identity Events ==========
    /// The identity provider produced a user id.
    IdentityEstablished { user_id: String },

    // ========== User Events ==========
    /// A non-empty submission was accepted while idle.
    SubmissionAccepted,

    /// The user cleared the rendered view.
    ViewReset,

    // ========== Gateway Events ==========
    /// The gateway call was dispatched.
    CompletionRequested,

    /// The gateway returned generated text.
    CompletionSucceeded,

    /// The gateway call failed (transport, status, or payload).
    CompletionFailed { error: String },

    // ========== Store Events ==========
    /// The store subscription pushed a fresh ordered turn list.
    SnapshotReceived { turn_count: usize },
}

impl SessionEvent {
    /// Check if this event is user-initiated.
    pub fn is_user_event(&self) -> bool {
        matches!(self, Self::SubmissionAccepted | Self::ViewReset)
    }

    /// Check if this is an error event.
    pub fn is_error_event(&self) -> bool {
        matches!(self, Self::CompletionFailed { .. })
    }
}
