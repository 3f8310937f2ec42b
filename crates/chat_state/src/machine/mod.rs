//! Session state machine
//!
//! Split into phases (states), events, and transition logic.

pub mod events;
pub mod phases;
pub mod transitions;

pub use events::SessionEvent;
pub use phases::SessionPhase;
pub use transitions::{StateMachine, StateTransition};
