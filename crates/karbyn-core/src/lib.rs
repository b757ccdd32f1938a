//! Karbyn Core — shared types, errors, and projection rules.
//!
//! This crate provides the foundational types used across all Karbyn crates.
//! It has no internal Karbyn dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`model`]: Model kinds and entity references
//! - [`projection`]: Declarative field projection from raw documents

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod projection;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use model::{EntityRef, ModelKind};
pub use projection::{ProjectedEntity, ProjectionSchema, project, project_with};
