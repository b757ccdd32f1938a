//! Error types for the Karbyn core library.

use std::path::PathBuf;

use crate::model::ModelKind;

/// Errors that can occur while reading an LCA archive.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The archive at the given path is missing, unreadable, or not a
    /// valid container.
    #[error("Failed to open archive at {}: {source}", path.display())]
    ArchiveOpen {
        /// Path that was passed to the open operation
        path: PathBuf,
        /// Underlying I/O or container error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An operation was attempted before any archive was opened.
    #[error("No archive is open")]
    NotOpen,

    /// A listed document could not be read or parsed.
    #[error("Failed to read {kind} document {id}: {source}")]
    Document {
        /// Model kind the document was filed under
        kind: ModelKind,
        /// Reference id of the offending document
        id: String,
        /// Underlying read or parse error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Karbyn operations.
///
/// This is the standard Result type used throughout the Karbyn codebase.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is recoverable per entry.
    ///
    /// Recoverable errors affect a single document and may be skipped
    /// during bulk listing; the rest of the enumeration can proceed.
    /// Store-level errors abort the whole operation.
    pub fn is_per_entry(&self) -> bool {
        match self {
            Error::Document { .. } => true,
            Error::ArchiveOpen { .. } => false,
            Error::NotOpen => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a new archive-open error.
    pub fn archive_open<P, E>(path: P, source: E) -> Self
    where
        P: Into<PathBuf>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::ArchiveOpen {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Creates a new per-document error.
    pub fn document<S, E>(kind: ModelKind, id: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Document {
            kind,
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
