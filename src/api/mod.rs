//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/manual-time", post(manual_time_handler))
        .route("/validate", post(validate_handler))
        .route("/elapsed", get(elapsed_handler))
        .route("/display", get(display_handler))
        .route("/status", get(status_handler))
        .route("/settings", get(get_settings_handler))
        .route("/settings/font", put(font_handler))
        .route("/settings/font-size", put(font_size_handler))
        .route("/settings/text-color", put(text_color_handler))
        .route("/settings/bg-color", put(bg_color_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
