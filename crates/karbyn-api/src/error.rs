//! Error types for karbyn-api.
//!
//! Every handler returns [`Result`]; the [`Error`] type decides the HTTP
//! status and renders a JSON `{"error": ...}` body. Catalog errors keep
//! their taxonomy: "archive not loaded yet" is a 503 the client can retry
//! after triggering a load, while an unknown id is a plain 404.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use karbyn_core::ModelKind;

/// Result type alias for karbyn-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in karbyn-api.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the catalog read path.
    #[error(transparent)]
    Catalog(#[from] karbyn_core::Error),

    /// A single-entity lookup found no document for the id.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Model kind that was queried.
        kind: ModelKind,
        /// Id that had no document.
        id: String,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::Catalog(karbyn_core::Error::NotOpen) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        }
        (status, Json(ErrorBody {
            error: self.to_string(),
        }))
            .into_response()
    }
}
