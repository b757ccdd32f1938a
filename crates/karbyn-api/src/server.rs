//! Serving the API router.

use tokio::net::TcpListener;

use crate::routes::router;
use crate::state::AppState;

/// Serve the API on an already-bound listener until the task is dropped.
///
/// Binding is left to the caller so tests and the binary can pick their own
/// addresses (including port 0).
///
/// # Errors
///
/// Returns any I/O error raised while accepting or serving connections.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "karbyn API listening");
    }
    axum::serve(listener, router(state)).await
}
