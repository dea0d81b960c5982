use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness banner for the API root.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "CharismaAI Backend API - Ready",
        "status": "online"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
