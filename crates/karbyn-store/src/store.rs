//! Lazily-opened, guarded archive handle.
//!
//! The archive handle is process-wide shared state: written once by whichever
//! request first triggers an open, read afterwards by everyone. All access
//! goes through one mutex, so concurrent first-open races collapse to a
//! single underlying container open and every caller observes its result.
//!
//! The zip reader seeks within its file on every fetch, so reads hold the
//! same lock rather than running fully concurrently. No cancellation or
//! timeout semantics beyond what file I/O already provides.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use karbyn_core::{Error, ModelKind, Result};

use crate::container::{DocumentContainer, ZipDocumentStore};

/// Owner of the (at most one) opened archive container.
///
/// Stateless apart from the held handle; safe to share behind an `Arc`.
#[derive(Default)]
pub struct ArchiveStore {
    inner: Mutex<Option<Box<dyn DocumentContainer>>>,
}

impl ArchiveStore {
    /// Create a store with no archive open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds the given container.
    ///
    /// Injection seam for callers that open (or simulate) the container
    /// themselves; `open` and `ensure_open` still work and replace it.
    pub fn with_container(container: Box<dyn DocumentContainer>) -> Self {
        Self {
            inner: Mutex::new(Some(container)),
        }
    }

    // A poisoned lock only means another thread panicked mid-read; the
    // archive itself is immutable, so the slot is still usable.
    fn guard(&self) -> MutexGuard<'_, Option<Box<dyn DocumentContainer>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open the archive at `path`, replacing any previously held handle.
    ///
    /// The new container is opened before the slot is touched, so a failed
    /// open leaves the previous state unchanged. On success the old handle
    /// (if any) is dropped, closing its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveOpen`] if the archive cannot be opened.
    pub fn open(&self, path: &Path) -> Result<()> {
        let container = ZipDocumentStore::open(path)?;
        let mut slot = self.guard();
        // Assignment drops the old handle before the lock is released.
        *slot = Some(Box::new(container));
        log::info!("Archive opened from {}", path.display());
        Ok(())
    }

    /// Open the archive at `path` unless a handle is already held.
    ///
    /// The lock is held across the underlying open, so N simultaneous
    /// callers produce exactly one container open; the rest observe the
    /// installed handle and return without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveOpen`] if no handle was held and the archive
    /// cannot be opened. State is unchanged on failure.
    pub fn ensure_open(&self, path: &Path) -> Result<()> {
        let mut slot = self.guard();
        if slot.is_none() {
            *slot = Some(Box::new(ZipDocumentStore::open(path)?));
            log::info!("Archive opened from {}", path.display());
        }
        Ok(())
    }

    /// Whether a handle is currently held. Pure query, no side effect.
    pub fn is_ready(&self) -> bool {
        self.guard().is_some()
    }

    /// Every reference id stored under `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotOpen`] if no handle is held.
    pub fn list_ids(&self, kind: ModelKind) -> Result<Vec<String>> {
        let slot = self.guard();
        match slot.as_ref() {
            Some(container) => Ok(container.ref_ids(kind)),
            None => Err(Error::NotOpen),
        }
    }

    /// The document for `id` under `kind`, or `None` if the id is unknown.
    ///
    /// Absence is never an error; only a present-but-unreadable entry fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotOpen`] if no handle is held, or
    /// [`Error::Document`] if the entry exists but cannot be read or parsed.
    pub fn fetch(&self, kind: ModelKind, id: &str) -> Result<Option<Value>> {
        let mut slot = self.guard();
        match slot.as_mut() {
            Some(container) => container.get(kind, id),
            None => Err(Error::NotOpen),
        }
    }
}

impl std::fmt::Debug for ArchiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveStore")
            .field("ready", &self.is_ready())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
