//! conversation_store - identity and turn persistence
//!
//! Bridges the orchestrator to the per-(tenant, user) ordered append
//! log and the identity provider:
//! - `identity` - identity establishment (reuse, token, anonymous)
//! - `storage` - the `TurnStorage` trait with file and memory backends
//! - `store` - the `ConversationStore` facade with its live
//!   subscription pushing the full ordered turn list on every append
//! - `config` - environment-driven store configuration

pub mod config;
pub mod error;
pub mod identity;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use identity::{establish_identity, Identity, IdentityProvider, LocalIdentityProvider};
pub use storage::{FileTurnStorage, MemoryTurnStorage, TurnStorage};
pub use store::{open_conversation, ConversationStore};
