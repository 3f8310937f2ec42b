//! Identity establishment.
//!
//! Identity is established once per session: an existing signed-in
//! session is reused; otherwise token sign-in is attempted when a
//! bootstrap token is supplied, else anonymous sign-in. There is no
//! retry loop; a failure leaves the caller without an identity and
//! the orchestrator stays in AwaitingIdentity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Opaque per-session user handle required for store access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Identity provider seam.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The already-signed-in identity for this session, if any.
    async fn current_user(&self) -> Option<Identity>;

    /// Sign in with a bootstrap token.
    async fn sign_in_with_token(&self, token: &str) -> Result<Identity>;

    /// Sign in anonymously.
    async fn sign_in_anonymously(&self) -> Result<Identity>;
}

/// Establish identity once at startup.
pub async fn establish_identity(
    provider: &dyn IdentityProvider,
    bootstrap_token: Option<&str>,
) -> Result<Identity> {
    if let Some(identity) = provider.current_user().await {
        tracing::debug!(user_id = %identity.user_id, "reusing signed-in session");
        return Ok(identity);
    }

    let identity = match bootstrap_token {
        Some(token) => {
            tracing::debug!("signing in with bootstrap token");
            provider.sign_in_with_token(token).await?
        }
        None => {
            tracing::debug!("signing in anonymously");
            provider.sign_in_anonymously().await?
        }
    };
    Ok(identity)
}

/// Process-local identity provider.
///
/// Stands in for the hosted auth service: anonymous sign-in mints a
/// random user id, token sign-in treats the token as the user id.
#[derive(Default)]
pub struct LocalIdentityProvider {
    current: RwLock<Option<Identity>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn current_user(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    async fn sign_in_with_token(&self, token: &str) -> Result<Identity> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StoreError::SignInFailed("empty bootstrap token".to_string()));
        }
        let identity = Identity::new(token);
        *self.current.write().await = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_in_anonymously(&self) -> Result<Identity> {
        let identity = Identity::new(format!("anon-{}", Uuid::new_v4()));
        *self.current.write().await = Some(identity.clone());
        Ok(identity)
    }
}
