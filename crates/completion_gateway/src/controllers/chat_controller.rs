//! Chat route: one POST translated into one upstream call.

use actix_web::{web, HttpResponse};

use chat_core::{ChatRequest, ChatResponse};

use crate::error::GatewayError;
use crate::server::AppState;

/// Configure the chat route.
///
/// Only POST is served; every other method on the resource answers
/// 405 with an `Allow: POST` header.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/chat")
            .route(web::post().to(chat))
            .route(web::route().to(method_not_allowed)),
    );
}

async fn method_not_allowed() -> Result<HttpResponse, GatewayError> {
    Err(GatewayError::MethodNotAllowed)
}

/// Handle one chat completion request.
///
/// The last history entry is the current prompt; everything before it
/// is context. That positional split is the contract with the caller;
/// the gateway has no other way to tell "current" from "history".
pub async fn chat(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, GatewayError> {
    // Credential check comes first: a misconfigured deployment answers
    // 500 regardless of what the request body contains.
    let provider = state.provider.as_ref().ok_or_else(|| {
        log::error!("GEMINI_API_KEY is not configured; rejecting chat request");
        GatewayError::MissingApiKey
    })?;

    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::MalformedRequest(e.to_string()))?;

    let mut history = request.chat_history;
    let current = history
        .pop()
        .ok_or_else(|| GatewayError::MalformedRequest("chatHistory must not be empty".to_string()))?;
    let prompt = current.text();

    log::info!(
        "chat request: {} context entries, prompt {} chars",
        history.len(),
        prompt.len()
    );

    let text = provider
        .generate(&history, &prompt, request.generation_config)
        .await
        .map_err(|e| {
            log::error!("upstream completion failed: {e}");
            GatewayError::Upstream(e.to_string())
        })?;

    Ok(HttpResponse::Ok().json(ChatResponse {
        ai_response_text: text,
    }))
}
