//! # karbyn-api
//!
//! HTTP API facade for the Karbyn LCA catalog.
//!
//! Maps inbound requests onto catalog read operations and serializes the
//! results as JSON. The catalog itself (archive handling, projection) lives
//! in `karbyn-store`; this crate only decides routes, status codes, and
//! response shapes.
//!
//! # Modules
//!
//! - [`error`]: API error type and status-code mapping
//! - [`state`]: Shared application state
//! - [`routes`]: Endpoint handlers and router assembly
//! - [`server`]: Serving the router on a listener

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{Error, Result};
pub use routes::router;
pub use state::AppState;
