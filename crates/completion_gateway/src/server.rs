use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use crate::config::GatewayConfig;
use crate::controllers::chat_controller;
use crate::provider::{CompletionProvider, GeminiProvider};

const DEFAULT_WORKER_COUNT: usize = 4;

pub struct AppState {
    /// Present only when an upstream credential is configured; the
    /// chat route answers 500 when absent.
    pub provider: Option<Arc<dyn CompletionProvider>>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    /// Build state from configuration. A missing API key still yields
    /// a runnable service; the fault is reported per request.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let provider = config.api_key.as_ref().map(|key| {
            let mut gemini = GeminiProvider::new(key).with_model(&config.model);
            if let Some(base) = &config.api_base {
                gemini = gemini.with_base_url(base);
            }
            Arc::new(gemini) as Arc<dyn CompletionProvider>
        });
        Self { provider }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/v1").configure(chat_controller::config));
}

pub async fn run(config: GatewayConfig) -> Result<(), String> {
    info!("Starting completion gateway...");

    if config.api_key.is_none() {
        error!("GEMINI_API_KEY is not set; chat requests will fail with a configuration error");
    }

    let port = config.port;
    let app_state = web::Data::new(AppState::from_config(&config));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(format!("127.0.0.1:{port}"))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Completion gateway listening on http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Gateway server error: {}", e);
        return Err(format!("Gateway server error: {e}"));
    }

    Ok(())
}
