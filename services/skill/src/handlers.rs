//! Axum Handlers for the Skill Endpoint
//!
//! The skill endpoint accepts voice-platform request envelopes and always
//! answers with a response envelope; only envelope-shape violations (bad
//! JSON, an envelope issued for a different application) surface as HTTP
//! errors instead of speech.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::{
    dispatch,
    models::{ErrorResponse, RequestEnvelope, ResponseEnvelope},
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
        }
    }
}

/// Handles one voice-platform request envelope.
#[utoipa::path(
    post,
    path = "/skill",
    request_body = RequestEnvelope,
    responses(
        (status = 200, description = "Spoken response envelope", body = ResponseEnvelope),
        (status = 400, description = "Malformed or misaddressed envelope", body = ErrorResponse)
    )
)]
pub async fn handle_skill_request(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    if let Some(expected) = state.config.application_id.as_deref() {
        let received = envelope
            .session
            .application
            .as_ref()
            .map(|app| app.application_id.as_str());
        if received != Some(expected) {
            warn!(?received, "Envelope for unexpected application");
            return Err(ApiError::BadRequest(
                "Request was issued for a different application".to_string(),
            ));
        }
    }

    Ok(Json(dispatch::dispatch(&state, &envelope).await))
}

/// Reports service liveness.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy"))
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "headway-skill",
    }))
}
