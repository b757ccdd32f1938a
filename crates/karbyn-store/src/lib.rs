//! # karbyn-store
//!
//! Archive-backed read-through store for the Karbyn LCA catalog.
//!
//! This crate owns the read path against a zipped JSON-document archive:
//! - [`container`]: the keyed-document container adapter (zip + JSON)
//! - [`store`]: the lazily-opened, guarded archive handle
//! - [`catalog`]: the read service combining enumeration, fetch, and
//!   projection into listings
//!
//! The container is opened read-only and never mutated; once a handle
//! exists it is held for the life of the process.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod container;
pub mod store;

pub use catalog::{Catalog, Listing};
pub use container::{DocumentContainer, ZipDocumentStore};
pub use store::ArchiveStore;
