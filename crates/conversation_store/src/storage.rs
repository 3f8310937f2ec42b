//! Turn storage trait and implementations.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use chat_core::{Sender, Turn};

use crate::error::Result;

/// Backing store for per-(tenant, user) turn logs.
///
/// Append only: there is no update or delete. Ids and timestamps are
/// assigned at append time, so ordering is the store's to define.
#[async_trait]
pub trait TurnStorage: Send + Sync {
    /// Append a turn, assigning its id and creation timestamp.
    /// Returns the turn as stored.
    async fn append_turn(
        &self,
        tenant: &str,
        user_id: &str,
        sender: Sender,
        text: &str,
    ) -> Result<Turn>;

    /// All turns for the user, ordered by creation timestamp ascending.
    async fn list_turns(&self, tenant: &str, user_id: &str) -> Result<Vec<Turn>>;
}

fn order_by_creation(mut turns: Vec<Turn>) -> Vec<Turn> {
    // Stable sort: equal timestamps keep insertion order.
    turns.sort_by_key(|t| t.created_at);
    turns
}

/// File-based turn storage: one JSON document per (tenant, user).
#[derive(Clone)]
pub struct FileTurnStorage {
    base_path: PathBuf,
}

impl FileTurnStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn turns_path(&self, tenant: &str, user_id: &str) -> PathBuf {
        self.base_path.join(tenant).join(user_id).join("turns.json")
    }

    async fn read_turns(&self, tenant: &str, user_id: &str) -> Result<Vec<Turn>> {
        let path = self.turns_path(tenant, user_id);
        if !path.exists() {
            // A conversation is created implicitly on first write.
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path).await?;
        let turns: Vec<Turn> = serde_json::from_str(&contents)?;
        Ok(turns)
    }
}

#[async_trait]
impl TurnStorage for FileTurnStorage {
    async fn append_turn(
        &self,
        tenant: &str,
        user_id: &str,
        sender: Sender,
        text: &str,
    ) -> Result<Turn> {
        let mut turns = self.read_turns(tenant, user_id).await?;
        let turn = Turn::new(sender, text);
        turns.push(turn.clone());

        let path = self.turns_path(tenant, user_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(&turns)?;
        fs::write(&path, contents).await?;

        Ok(turn)
    }

    async fn list_turns(&self, tenant: &str, user_id: &str) -> Result<Vec<Turn>> {
        Ok(order_by_creation(self.read_turns(tenant, user_id).await?))
    }
}

/// In-memory turn storage for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryTurnStorage {
    logs: RwLock<HashMap<(String, String), Vec<Turn>>>,
}

impl MemoryTurnStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnStorage for MemoryTurnStorage {
    async fn append_turn(
        &self,
        tenant: &str,
        user_id: &str,
        sender: Sender,
        text: &str,
    ) -> Result<Turn> {
        let turn = Turn::new(sender, text);
        let mut logs = self.logs.write().await;
        logs.entry((tenant.to_string(), user_id.to_string()))
            .or_default()
            .push(turn.clone());
        Ok(turn)
    }

    async fn list_turns(&self, tenant: &str, user_id: &str) -> Result<Vec<Turn>> {
        let logs = self.logs.read().await;
        let turns = logs
            .get(&(tenant.to_string(), user_id.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(order_by_creation(turns))
    }
}
