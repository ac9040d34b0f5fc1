use std::sync::Arc;

use crate::config::Config;
use crate::draft::DraftBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store. `RestBackend` when `BACKEND_URL` is set, otherwise `MemoryBackend`.
    pub backend: Arc<dyn DraftBackend>,
    pub config: Config,
}
