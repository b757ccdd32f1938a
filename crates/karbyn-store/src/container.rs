//! Keyed-document container contract and its zip implementation.
//!
//! An LCA archive is a zip file holding one JSON document per entity, filed
//! under a kind-specific directory (`processes/p1.json`,
//! `lcia_methods/m1.json`). [`ZipDocumentStore`] is the only code that knows
//! this layout; everything above it sees the opaque [`DocumentContainer`]
//! list/get contract, so alternative containers (including simulated ones in
//! tests) can stand in for the zip reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use zip::ZipArchive;
use zip::result::ZipError;

use karbyn_core::{Error, ModelKind, Result};

/// Abstract keyed-document container.
///
/// A container may list an id it cannot later produce a document for (a
/// dangling reference); `get` reports that as `Ok(None)`, never an error.
pub trait DocumentContainer: Send {
    /// Every reference id filed under `kind`.
    fn ref_ids(&self, kind: ModelKind) -> Vec<String>;

    /// The document for `id` under `kind`, or `None` if no such entry
    /// exists.
    ///
    /// Absence is not an error; a present but unreadable or unparseable
    /// entry is [`Error::Document`].
    fn get(&mut self, kind: ModelKind, id: &str) -> Result<Option<Value>>;
}

/// A keyed-document store over a zipped JSON-LD archive.
///
/// Opened read-only; `get` needs `&mut self` because the zip reader seeks
/// within the underlying file.
pub struct ZipDocumentStore {
    archive: ZipArchive<File>,
}

impl ZipDocumentStore {
    /// Open the archive at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArchiveOpen`] if the path does not exist, cannot be
    /// read, or is not a valid zip container.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::archive_open(path, e))?;
        let archive = ZipArchive::new(file).map_err(|e| Error::archive_open(path, e))?;
        Ok(Self { archive })
    }
}

impl DocumentContainer for ZipDocumentStore {
    /// Ids are entry names with the kind directory and `.json` suffix
    /// stripped; entries in nested subdirectories are not ids and are
    /// ignored. Sorted so enumeration order is stable across openings.
    fn ref_ids(&self, kind: ModelKind) -> Vec<String> {
        let prefix = format!("{}/", kind.dir());
        let mut ids: Vec<String> = self
            .archive
            .file_names()
            .filter_map(|name| name.strip_prefix(prefix.as_str()))
            .filter_map(|rest| rest.strip_suffix(".json"))
            .filter(|id| !id.is_empty() && !id.contains('/'))
            .map(str::to_string)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn get(&mut self, kind: ModelKind, id: &str) -> Result<Option<Value>> {
        let entry_name = format!("{}/{}.json", kind.dir(), id);
        let mut entry = match self.archive.by_name(&entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(Error::document(kind, id, e)),
        };

        let mut raw = String::new();
        entry
            .read_to_string(&mut raw)
            .map_err(|e| Error::document(kind, id, e))?;

        let doc = serde_json::from_str(&raw).map_err(|e| Error::document(kind, id, e))?;
        Ok(Some(doc))
    }
}

impl std::fmt::Debug for ZipDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipDocumentStore")
            .field("entries", &self.archive.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn fixture(entries: &[(&str, &str)]) -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        let mut writer = ZipWriter::new(file.reopen().unwrap());
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        file
    }

    #[test]
    fn test_open_missing_path_fails() {
        let err = ZipDocumentStore::open(Path::new("data/does-not-exist.zip")).unwrap_err();
        assert!(matches!(err, Error::ArchiveOpen { .. }));
    }

    #[test]
    fn test_open_non_zip_fails() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();
        let err = ZipDocumentStore::open(file.path()).unwrap_err();
        assert!(matches!(err, Error::ArchiveOpen { .. }));
    }

    #[test]
    fn test_ref_ids_scoped_to_kind() {
        let file = fixture(&[
            ("processes/p1.json", r#"{"name":"Steel production"}"#),
            ("processes/p2.json", r#"{"name":"Clinker"}"#),
            ("lcia_methods/m1.json", r#"{"name":"EF 3.1"}"#),
            ("flows/f1.json", r#"{"name":"Carbon dioxide"}"#),
        ]);
        let store = ZipDocumentStore::open(file.path()).unwrap();

        assert_eq!(store.ref_ids(ModelKind::Process), vec!["p1", "p2"]);
        assert_eq!(store.ref_ids(ModelKind::ImpactMethod), vec!["m1"]);
    }

    #[test]
    fn test_ref_ids_ignores_nested_and_non_json() {
        let file = fixture(&[
            ("processes/p1.json", "{}"),
            ("processes/sub/deep.json", "{}"),
            ("processes/readme.txt", "not a document"),
        ]);
        let store = ZipDocumentStore::open(file.path()).unwrap();
        assert_eq!(store.ref_ids(ModelKind::Process), vec!["p1"]);
    }

    #[test]
    fn test_get_returns_document() {
        let file = fixture(&[("processes/p1.json", r#"{"name":"Steel production"}"#)]);
        let mut store = ZipDocumentStore::open(file.path()).unwrap();

        let doc = store.get(ModelKind::Process, "p1").unwrap().unwrap();
        assert_eq!(doc["name"], "Steel production");
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let file = fixture(&[("processes/p1.json", "{}")]);
        let mut store = ZipDocumentStore::open(file.path()).unwrap();

        assert!(store.get(ModelKind::Process, "unknown").unwrap().is_none());
        // Same id under the other kind is a distinct namespace.
        assert!(store.get(ModelKind::ImpactMethod, "p1").unwrap().is_none());
    }

    #[test]
    fn test_get_corrupt_entry_is_document_error() {
        let file = fixture(&[("processes/bad.json", "{not valid json")]);
        let mut store = ZipDocumentStore::open(file.path()).unwrap();

        let err = store.get(ModelKind::Process, "bad").unwrap_err();
        assert!(matches!(err, Error::Document { .. }));
        assert!(err.is_per_entry());
    }
}
