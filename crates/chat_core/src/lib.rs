//! chat_core - Core types for the role-play chat system
//!
//! This crate provides the foundational types used across all chat-related crates:
//! - `turn` - Turn and Sender, the persisted conversation record
//! - `protocol` - the wire protocol between orchestrator and gateway
//! - `persona` - the Thompson persona prompt and canned assistant lines

pub mod persona;
pub mod protocol;
pub mod turn;

// Re-export commonly used types
pub use protocol::{
    build_chat_history, ChatHistoryEntry, ChatPart, ChatRequest, ChatResponse, GenerationConfig,
};
pub use turn::{Sender, Turn};
