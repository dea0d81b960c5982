use std::sync::Arc;

use crate::gemini::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one configured gateway client, constructed at startup and reused
    /// across requests. Held as a trait object so tests can substitute a stub.
    pub gateway: Arc<dyn CompletionGateway>,
}
