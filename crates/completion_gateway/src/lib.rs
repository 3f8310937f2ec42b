//! completion_gateway - stateless HTTP proxy to the hosted model
//!
//! One POST route translating a chat history + generation parameters
//! into a single upstream Gemini `generateContent` call. No retries,
//! no timeout enforcement, no streaming.

pub mod config;
pub mod controllers;
pub mod error;
pub mod gemini;
pub mod provider;
pub mod server;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use provider::{CompletionProvider, GeminiProvider, ProviderError};
pub use server::{app_config, AppState};
