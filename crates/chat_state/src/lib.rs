//! chat_state - State machine and session state for the chat system
//!
//! Provides the session FSM (phases, events, transitions) and the
//! `ChatSession` value that composes the FSM with the rendered turn
//! list, pending input, and identity.

pub mod machine;
pub mod session;

pub use machine::{SessionEvent, SessionPhase, StateMachine, StateTransition};
pub use session::{ChatSession, RejectReason, SubmitDecision};
