use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::NarrativeRequest;
use crate::services::narrative_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(generate_narrative))
}

/// POST /generate-narrative
///
/// Request body: `{ "fileContent": "<financial statement text>" }`
///
/// Returns the narrative JSON produced by the model. A body that is not a
/// JSON object is treated as missing `fileContent`.
async fn generate_narrative(
    State(state): State<AppState>,
    payload: Result<Json<NarrativeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    info!("POST /generate-narrative");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable narrative request body: {}", rejection);
            NarrativeRequest::default()
        }
    };

    let narrative = narrative_service::generate_narrative(
        &state.llm_service,
        &state.config.narrative,
        &request,
    )
    .await
    .map_err(|e| {
        error!("Narrative Generation Error: {}", e);
        e
    })?;

    Ok(Json(narrative))
}
