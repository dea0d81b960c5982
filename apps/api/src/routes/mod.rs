pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::feedback;
use crate::questions;
use crate::state::AppState;

/// Upper bound on multipart bodies. Recorded answers are short clips, but
/// well past axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Agent 1 — Context Architect
        .route(
            "/agent1/generate-questions",
            post(questions::handlers::handle_generate_questions),
        )
        // Agent 2 — Multimodal Coach
        .route(
            "/agent2/analyze-video",
            post(feedback::handlers::handle_analyze_video),
        )
        .route(
            "/agent2/health",
            get(feedback::handlers::handle_agent2_health),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
