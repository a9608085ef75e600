use std::sync::Arc;

use crate::analysis::analyzer::DocumentAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Holds the shared pattern catalog and the registry / text-extraction backends.
    pub analyzer: Arc<DocumentAnalyzer>,
    pub config: Config,
}
