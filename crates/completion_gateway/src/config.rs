//! Configuration management for the gateway
//!
//! Supports loading configuration from environment variables with fallback to defaults.

/// Gateway configuration.
///
/// Environment variables:
/// - `GEMINI_API_KEY`: upstream credential; absence is a deployment
///   fault surfaced as a 500 on every chat request
/// - `GEMINI_MODEL`: upstream model name (default: `gemini-2.0-flash`)
/// - `GEMINI_API_BASE`: upstream base URL override
/// - `APP_PORT`: listen port (default: 8080)
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: Option<String>,
    pub port: u16,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("GEMINI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "gemini-2.0-flash".to_string()),
            api_base: std::env::var("GEMINI_API_BASE").ok(),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            api_base: None,
            port: 8080,
        }
    }
}
