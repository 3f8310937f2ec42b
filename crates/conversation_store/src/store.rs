//! ConversationStore - the per-user append log with a live subscription.

use std::sync::Arc;

use tokio::sync::watch;

use chat_core::{Sender, Turn};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::identity::{establish_identity, Identity, IdentityProvider};
use crate::storage::{FileTurnStorage, TurnStorage};

/// Facade over a `TurnStorage` scoped to one (tenant, user) pair.
///
/// Every append re-reads the ordered log and pushes the full turn
/// list to all subscribers, making the subscription the single source
/// of truth for rendered history.
pub struct ConversationStore {
    storage: Arc<dyn TurnStorage>,
    tenant: String,
    identity: Identity,
    snapshot_tx: watch::Sender<Vec<Turn>>,
}

impl ConversationStore {
    /// Open the conversation for an established identity, priming the
    /// subscription with whatever history already exists.
    pub async fn open(
        storage: Arc<dyn TurnStorage>,
        tenant: impl Into<String>,
        identity: Identity,
    ) -> Result<Self> {
        let tenant = tenant.into();
        let initial = storage.list_turns(&tenant, &identity.user_id).await?;
        let (snapshot_tx, _) = watch::channel(initial);
        Ok(Self {
            storage,
            tenant,
            identity,
            snapshot_tx,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.identity.user_id
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Subscribe to the ordered turn list. The receiver holds the
    /// current snapshot immediately and is refreshed on every append.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Turn>> {
        self.snapshot_tx.subscribe()
    }

    /// Append a turn; the store assigns its id and timestamp.
    ///
    /// There is no update or delete counterpart. A view reset upstream
    /// must not reach for one.
    pub async fn append(&self, sender: Sender, text: &str) -> Result<Turn> {
        let turn = self
            .storage
            .append_turn(&self.tenant, &self.identity.user_id, sender, text)
            .await?;
        tracing::debug!(user_id = %self.identity.user_id, ?sender, "turn appended");

        let turns = self
            .storage
            .list_turns(&self.tenant, &self.identity.user_id)
            .await?;
        self.snapshot_tx.send_replace(turns);
        Ok(turn)
    }

    /// The current ordered turn list, read directly from storage.
    pub async fn turns(&self) -> Result<Vec<Turn>> {
        self.storage
            .list_turns(&self.tenant, &self.identity.user_id)
            .await
    }
}

/// Establish identity and open the file-backed conversation for it.
///
/// The standard startup path: reuse-else-token-else-anonymous sign-in,
/// then a `FileTurnStorage` rooted at the configured data directory.
pub async fn open_conversation(
    config: &StoreConfig,
    provider: &dyn IdentityProvider,
) -> Result<ConversationStore> {
    let identity = establish_identity(provider, config.bootstrap_token.as_deref()).await?;
    let storage = Arc::new(FileTurnStorage::new(&config.data_dir));
    ConversationStore::open(storage, config.tenant.as_str(), identity).await
}
