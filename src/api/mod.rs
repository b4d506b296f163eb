//! HTTP API for the medal tally
//!
//! Pull query for the current ranked tally plus an SSE push stream of tally
//! updates, backed by the shared state's broadcast channel.

pub mod handlers;
pub mod sse;

use std::sync::Arc;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub state: Arc<SharedState>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tally", get(handlers::get_tally))
        .route("/tally/updates", get(sse::tally_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "medal-tally",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
