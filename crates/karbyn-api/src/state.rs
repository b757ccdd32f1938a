//! Shared application state.

use std::sync::Arc;

use karbyn_store::Catalog;

/// State handed to every handler.
///
/// The catalog is the process-wide owner of the archive handle, so it is
/// shared by reference rather than rebuilt per request.
#[derive(Clone)]
pub struct AppState {
    /// Catalog read service backing all database endpoints.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// Create state around an existing catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}
