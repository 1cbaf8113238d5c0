//! HTTP API module
//!
//! This module contains the endpoint handlers, response structures and
//! the countdown fragment renderer.

pub mod fragment;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/countdown", get(countdown_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
