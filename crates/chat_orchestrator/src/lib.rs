//! chat_orchestrator - drives the turn-taking loop
//!
//! Owns the session state machine, mirrors turns into the optional
//! conversation store, assembles the context window, and calls the
//! completion gateway. Every gateway failure is substituted with a
//! fixed apology turn so the log never ends on an unanswered prompt.

pub mod client;
pub mod inbox;
pub mod orchestrator;

pub use client::{ClientError, CompletionClient, HttpCompletionClient};
pub use inbox::{run, OrchestratorCommand};
pub use orchestrator::ChatOrchestrator;
