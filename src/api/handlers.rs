//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use tracing::error;

use crate::state::AppState;
use super::{
    fragment::render_fragment,
    responses::{HealthResponse, StatusResponse},
};

/// Handle GET /countdown - Render the latest countdown as an HTML fragment
pub async fn countdown_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    match state.get_snapshot() {
        Ok(snapshot) => Ok(Html(render_fragment(&state.settings, &snapshot))),
        Err(e) => {
            error!("Failed to get countdown snapshot: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the countdown state as JSON
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get countdown snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse::from_snapshot(
        snapshot,
        state.settings.timezone.name().to_string(),
        state.settings.debug,
        state.settings.recurrence.horizon_weeks,
        state.get_uptime(),
    )))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
