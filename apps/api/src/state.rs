use crate::analysis::pipeline::Analyzer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; the analyzer only carries its AI capability.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
}
