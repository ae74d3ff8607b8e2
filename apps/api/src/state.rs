use std::sync::Arc;

use crate::baseline::BaselineStore;
use crate::config::Config;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Also carries the default score and optimize strategies for requests that name none.
    pub config: Config,
    pub baseline: BaselineStore,
    /// Document backend for optimized resumes. Default: PlainTextRenderer.
    pub renderer: Arc<dyn DocumentRenderer>,
}
