//! Phase transitions - FSM transition logic.
//!
//! Events that do not apply in the current phase leave the phase
//! unchanged; that silent no-op is what rejects submissions while a
//! completion is in flight, and discards completion results that
//! arrive after a view reset.

use super::events::SessionEvent;
use super::phases::SessionPhase;

/// Represents a phase transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The phase before the transition.
    pub from: SessionPhase,
    /// The phase after the transition.
    pub to: SessionPhase,
    /// The event that triggered the transition.
    pub event: SessionEvent,
    /// Whether the phase actually changed.
    pub changed: bool,
}

/// State machine for the chat session lifecycle.
#[derive(Debug, Clone)]
pub struct StateMachine {
    /// Current phase.
    current_phase: SessionPhase,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine awaiting identity.
    pub fn new() -> Self {
        Self::with_phase(SessionPhase::AwaitingIdentity)
    }

    /// Create a state machine in a specific initial phase.
    pub fn with_phase(phase: SessionPhase) -> Self {
        Self {
            current_phase: phase,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current phase.
    pub fn phase(&self) -> &SessionPhase {
        &self.current_phase
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event and transition to a new phase.
    pub fn handle_event(&mut self, event: SessionEvent) -> StateTransition {
        let old_phase = self.current_phase.clone();
        let new_phase = compute_next_phase(&old_phase, &event);
        let changed = old_phase != new_phase;

        if !changed && !matches!(event, SessionEvent::SnapshotReceived { .. }) {
            tracing::debug!(?old_phase, ?event, "event left phase unchanged");
        }

        self.current_phase = new_phase.clone();

        let transition = StateTransition {
            from: old_phase,
            to: new_phase,
            event,
            changed,
        };

        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Check if an event would change the phase without executing it.
    pub fn can_transition(&self, event: &SessionEvent) -> bool {
        compute_next_phase(&self.current_phase, event) != self.current_phase
    }
}

/// Compute the next phase given the current phase and an event.
///
/// Pure function; the only state it reads is its arguments.
fn compute_next_phase(phase: &SessionPhase, event: &SessionEvent) -> SessionPhase {
    use SessionEvent::*;
    use SessionPhase::*;

    match (phase, event) {
        // ========== Identity ==========
        (AwaitingIdentity, IdentityEstablished { .. }) => Idle,

        // ========== Submission flow ==========
        (Idle, SubmissionAccepted) => Composing,
        (Composing, CompletionRequested) => AwaitingCompletion,

        // AwaitingCompletion always terminates in Idle, success or not.
        (AwaitingCompletion, CompletionSucceeded) => Idle,
        (AwaitingCompletion, CompletionFailed { .. }) => Idle,

        // ========== View reset ==========
        // A reset mid-flight returns to Idle; the late completion
        // result then hits the default arm and is discarded.
        (Idle | Composing | AwaitingCompletion, ViewReset) => Idle,

        // ========== Default: no transition ==========
        _ => phase.clone(),
    }
}
