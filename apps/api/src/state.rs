use std::sync::Arc;

use crate::backend::PromptBackend;
use crate::quality::QualityAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: QualityAnalyzer,
    /// Gateway to the prompt backend. Default: `BackendClient` over HTTP.
    pub backend: Arc<dyn PromptBackend>,
}
