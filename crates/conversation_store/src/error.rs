//! Conversation store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Sign-in failed: {0}")]
    SignInFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
