//! Store configuration from the environment.

use std::path::PathBuf;

/// Conversation store configuration.
///
/// Environment variables:
/// - `APP_TENANT_ID`: tenant partition for the turn log
///   (default: `default-app-id`)
/// - `INITIAL_AUTH_TOKEN`: bootstrap token for token sign-in; absent
///   means anonymous sign-in
/// - `APP_DATA_DIR`: base directory for the file-backed turn log
///   (default: `./data`)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub tenant: String,
    pub bootstrap_token: Option<String>,
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            tenant: std::env::var("APP_TENANT_ID")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "default-app-id".to_string()),
            bootstrap_token: std::env::var("INITIAL_AUTH_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            data_dir: std::env::var("APP_DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tenant: "default-app-id".to_string(),
            bootstrap_token: None,
            data_dir: PathBuf::from("./data"),
        }
    }
}
