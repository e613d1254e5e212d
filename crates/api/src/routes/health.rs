//! Health check route.

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::AppState;

/// Creates the health router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - Basic liveness endpoint.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
