//! ChatSession - the single explicit session state value.
//!
//! Replaces the cluster of independent UI state cells (message list,
//! input buffer, loading flag, identity) with one value whose
//! transitions are pure methods over the FSM in `machine`.

use chat_core::Turn;

use crate::machine::{SessionEvent, SessionPhase, StateMachine};

/// Why a submission was not accepted. Rejections are silent no-ops,
/// not errors; the reason exists for callers that want to log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Empty or whitespace-only input.
    EmptyInput,
    /// Identity has not been established yet.
    AwaitingIdentity,
    /// A prior completion is still in flight.
    CompletionInFlight,
}

/// Outcome of offering a submission to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitDecision {
    /// The submission was accepted; the session moved to Composing.
    Accepted {
        /// The trimmed prompt text to send as the final history entry.
        prompt: String,
        /// The turns that existed before this submission, in order.
        /// These become the context window, excluding the new prompt.
        prior: Vec<Turn>,
    },
    /// The submission was ignored.
    Rejected(RejectReason),
}

/// The complete session state: phase machine, rendered turn list,
/// pending input, and identity.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    machine: StateMachine,
    turns: Vec<Turn>,
    pending_input: Option<String>,
    identity: Option<String>,
}

impl ChatSession {
    /// Create a session awaiting identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already identity-ready.
    ///
    /// Used by the local-only orchestrator variant, which has no
    /// identity provider to wait for.
    pub fn with_identity(user_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.identity_ready(user_id);
        session
    }

    pub fn phase(&self) -> &SessionPhase {
        self.machine.phase()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn pending_input(&self) -> Option<&str> {
        self.pending_input.as_deref()
    }

    /// Record an established identity and leave AwaitingIdentity.
    pub fn identity_ready(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        self.machine.handle_event(SessionEvent::IdentityEstablished {
            user_id: user_id.clone(),
        });
        self.identity = Some(user_id);
    }

    /// Offer a submission to the session.
    ///
    /// Accepts only non-empty input while Idle; everything else is a
    /// silent no-op. On acceptance the prior turn list is captured
    /// before the caller appends the new user turn, so it can become
    /// the context window.
    pub fn begin_submission(&mut self, text: &str) -> SubmitDecision {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitDecision::Rejected(RejectReason::EmptyInput);
        }
        match self.machine.phase() {
            SessionPhase::AwaitingIdentity => {
                return SubmitDecision::Rejected(RejectReason::AwaitingIdentity)
            }
            SessionPhase::Composing | SessionPhase::AwaitingCompletion => {
                return SubmitDecision::Rejected(RejectReason::CompletionInFlight)
            }
            SessionPhase::Idle => {}
        }

        let prior = self.turns.clone();
        self.pending_input = Some(trimmed.to_string());
        self.machine.handle_event(SessionEvent::SubmissionAccepted);

        SubmitDecision::Accepted {
            prompt: trimmed.to_string(),
            prior,
        }
    }

    /// Mark the gateway call as dispatched.
    pub fn completion_requested(&mut self) {
        self.machine.handle_event(SessionEvent::CompletionRequested);
    }

    /// Mark the in-flight completion as finished successfully.
    pub fn completion_succeeded(&mut self) {
        self.pending_input = None;
        self.machine.handle_event(SessionEvent::CompletionSucceeded);
    }

    /// Mark the in-flight completion as failed. The session still
    /// returns to Idle; the caller substitutes the apology turn.
    pub fn completion_failed(&mut self, error: impl Into<String>) {
        self.pending_input = None;
        self.machine.handle_event(SessionEvent::CompletionFailed {
            error: error.into(),
        });
    }

    /// Append a turn to the local view.
    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Replace the rendered list with the store's current ordering.
    ///
    /// The snapshot always wins: locally-appended optimistic turns are
    /// superseded wholesale, which is safe because the store is
    /// append-only and timestamp-ordered.
    pub fn apply_snapshot(&mut self, turns: Vec<Turn>) {
        self.machine.handle_event(SessionEvent::SnapshotReceived {
            turn_count: turns.len(),
        });
        self.turns = turns;
    }

    /// Clear the rendered list and pending input.
    ///
    /// Display-only: persisted history is untouched and no delete is
    /// issued anywhere downstream of this call.
    pub fn reset_view(&mut self) {
        self.turns.clear();
        self.pending_input = None;
        self.machine.handle_event(SessionEvent::ViewReset);
    }
}
