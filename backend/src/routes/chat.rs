use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chat))
}

/// POST /chat
///
/// Request body: `{ "query": "...", "language": "hindi", "debug": false }`
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let request: ChatRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid chat request: {}", e)))?;

    info!("POST /chat - language: {}", request.language);

    let response = state.chat_service.relay(&request).await.map_err(|e| {
        error!("Error processing message: {}", e);
        e
    })?;

    Ok(Json(response))
}
