//! Session phases - the possible states of a chat session's lifecycle.

use serde::{Deserialize, Serialize};

/// Defines the possible phases of a chat session.
///
/// A submission walks Idle → Composing → AwaitingCompletion → Idle;
/// AwaitingCompletion always terminates in Idle whether the gateway
/// call succeeds or fails, so the machine can never get stuck.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Identity has not been established yet; the store is unreadable.
    AwaitingIdentity,

    /// Ready for user input.
    Idle,

    /// A submission was accepted and the context window is being assembled.
    Composing,

    /// Waiting on the completion gateway for the assistant's reply.
    AwaitingCompletion,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::AwaitingIdentity
    }
}

impl SessionPhase {
    /// Check if this phase accepts a new user submission.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if a completion is in flight (or about to be).
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Composing | Self::AwaitingCompletion)
    }

    /// Get a human-readable description of the current phase.
    pub fn description(&self) -> &str {
        match self {
            Self::AwaitingIdentity => "Signing in",
            Self::Idle => "Ready for input",
            Self::Composing => "Processing your message",
            Self::AwaitingCompletion => "Mr./Ms. Thompson is thinking...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_awaits_identity() {
        assert_eq!(SessionPhase::default(), SessionPhase::AwaitingIdentity);
    }

    #[test]
    fn test_only_idle_accepts_input() {
        assert!(SessionPhase::Idle.accepts_user_input());
        assert!(!SessionPhase::AwaitingIdentity.accepts_user_input());
        assert!(!SessionPhase::Composing.accepts_user_input());
        assert!(!SessionPhase::AwaitingCompletion.accepts_user_input());
    }

    #[test]
    fn test_busy_detection() {
        assert!(SessionPhase::AwaitingCompletion.is_busy());
        assert!(SessionPhase::Composing.is_busy());
        assert!(!SessionPhase::Idle.is_busy());
    }
}
