//! Catalog read service.
//!
//! Combines enumeration, fetch, and projection into caller-facing listings.
//! A bulk listing tolerates per-entry failures: a corrupt or dangling
//! document is logged and counted, never fatal to the rest of the
//! enumeration. Store-level failures (no archive open, unopenable archive)
//! still abort the whole call.

use std::path::{Path, PathBuf};

use serde::Serialize;

use karbyn_core::{ModelKind, ProjectedEntity, Result, project};

use crate::store::ArchiveStore;

/// Result of listing every entity of one kind.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Successfully projected entities.
    pub items: Vec<ProjectedEntity>,

    /// Number of items returned.
    pub total: usize,

    /// Listed ids that could not be materialized (dangling references or
    /// unreadable documents). Zero on a healthy archive.
    pub skipped: usize,
}

/// Read service over a lazily-opened archive.
///
/// Owns the configured archive path and the [`ArchiveStore`]; the archive is
/// opened on first use and held for the life of the process.
#[derive(Debug)]
pub struct Catalog {
    store: ArchiveStore,
    archive_path: PathBuf,
}

impl Catalog {
    /// Create a catalog reading from the archive at `archive_path`.
    ///
    /// The archive is not opened until [`Catalog::ensure_loaded`] or an
    /// explicit [`Catalog::reload`].
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self::with_store(ArchiveStore::new(), archive_path)
    }

    /// Create a catalog over an existing store.
    ///
    /// Injection seam: the store may already hold a container (see
    /// [`ArchiveStore::with_container`]), in which case the catalog is
    /// loaded from the start and `archive_path` is only used on an explicit
    /// [`Catalog::reload`].
    pub fn with_store(store: ArchiveStore, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            archive_path: archive_path.into(),
        }
    }

    /// The configured archive path.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Whether the archive has been opened.
    pub fn is_loaded(&self) -> bool {
        self.store.is_ready()
    }

    /// Open the archive if it is not already open.
    ///
    /// Safe to call from concurrent requests; at most one underlying open
    /// proceeds and every caller observes its result.
    ///
    /// # Errors
    ///
    /// Returns [`karbyn_core::Error::ArchiveOpen`] if the archive cannot be
    /// opened.
    pub fn ensure_loaded(&self) -> Result<()> {
        self.store.ensure_open(&self.archive_path)
    }

    /// Reopen the archive, replacing the held handle.
    ///
    /// # Errors
    ///
    /// Returns [`karbyn_core::Error::ArchiveOpen`] on failure; the previous
    /// handle stays in place.
    pub fn reload(&self) -> Result<()> {
        self.store.open(&self.archive_path)
    }

    /// List every entity of `kind`, skipping entries that cannot be
    /// materialized.
    ///
    /// # Errors
    ///
    /// Returns [`karbyn_core::Error::NotOpen`] if the archive has not been
    /// loaded. Per-entry failures do not error; they are logged and counted
    /// in [`Listing::skipped`].
    pub fn list(&self, kind: ModelKind) -> Result<Listing> {
        let ids = self.store.list_ids(kind)?;

        let mut items = Vec::with_capacity(ids.len());
        let mut skipped = 0;
        for id in ids {
            match self.store.fetch(kind, &id) {
                Ok(Some(doc)) => items.push(project(kind, &id, &doc)),
                Ok(None) => {
                    log::warn!("Listed {kind} id {id} has no document; skipping");
                    skipped += 1;
                }
                Err(err) if err.is_per_entry() => {
                    log::warn!("Skipping {kind} id {id}: {err}");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        let total = items.len();
        Ok(Listing {
            items,
            total,
            skipped,
        })
    }

    /// Fetch and project a single entity, or `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`karbyn_core::Error::NotOpen`] if the archive has not been
    /// loaded, or [`karbyn_core::Error::Document`] if the document exists
    /// but cannot be read.
    pub fn get(&self, kind: ModelKind, id: &str) -> Result<Option<ProjectedEntity>> {
        Ok(self
            .store
            .fetch(kind, id)?
            .map(|doc| project(kind, id, &doc)))
    }
}
