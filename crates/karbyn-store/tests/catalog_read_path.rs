//! Integration tests for the catalog read path.
//!
//! Builds real zip fixtures and exercises the full
//! enumerate → fetch → project pipeline, including lazy loading and
//! partial-failure tolerance.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use karbyn_core::{Error, ModelKind};
use karbyn_store::{ArchiveStore, Catalog, DocumentContainer};

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

fn sample_archive() -> NamedTempFile {
    fixture(&[
        ("processes/p1.json", r#"{"name":"Steel production"}"#),
        (
            "processes/p2.json",
            r#"{"name":"Clinker","description":"Rotary kiln"}"#,
        ),
        ("lcia_methods/m1.json", r#"{"name":"EF 3.1","description":"EU method"}"#),
    ])
}

#[test]
fn listing_before_load_requires_open() {
    let file = sample_archive();
    let catalog = Catalog::new(file.path());

    assert!(!catalog.is_loaded());
    assert!(matches!(
        catalog.list(ModelKind::Process).unwrap_err(),
        Error::NotOpen
    ));

    catalog.ensure_loaded().unwrap();
    assert!(catalog.is_loaded());
    assert_eq!(catalog.list(ModelKind::Process).unwrap().total, 2);
}

#[test]
fn listing_projects_display_fields() {
    let file = sample_archive();
    let catalog = Catalog::new(file.path());
    catalog.ensure_loaded().unwrap();

    let listing = catalog.list(ModelKind::Process).unwrap();
    assert_eq!(listing.total, 2);
    assert_eq!(listing.skipped, 0);

    let p1 = listing.items.iter().find(|e| e.id == "p1").unwrap();
    assert_eq!(p1.name, "Steel production");
    assert_eq!(p1.description, "");

    let p2 = listing.items.iter().find(|e| e.id == "p2").unwrap();
    assert_eq!(p2.description, "Rotary kiln");
}

#[test]
fn listing_skips_and_counts_corrupt_entries() {
    let file = fixture(&[
        ("processes/p1.json", r#"{"name":"Steel production"}"#),
        ("processes/p2.json", "{truncated"),
    ]);
    let catalog = Catalog::new(file.path());
    catalog.ensure_loaded().unwrap();

    let listing = catalog.list(ModelKind::Process).unwrap();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.skipped, 1);
    assert_eq!(listing.items[0].id, "p1");
}

/// Container whose index lists an id it cannot produce a document for.
///
/// A real zip cannot list an absent entry, so the dangling-reference case
/// is simulated here.
struct DanglingContainer;

impl DocumentContainer for DanglingContainer {
    fn ref_ids(&self, kind: ModelKind) -> Vec<String> {
        match kind {
            ModelKind::Process => vec!["p1".to_string(), "p2".to_string()],
            ModelKind::ImpactMethod => Vec::new(),
        }
    }

    fn get(&mut self, kind: ModelKind, id: &str) -> karbyn_core::Result<Option<serde_json::Value>> {
        if kind == ModelKind::Process && id == "p1" {
            Ok(Some(serde_json::json!({"name": "Steel production"})))
        } else {
            Ok(None)
        }
    }
}

#[test]
fn listing_skips_and_counts_dangling_listed_ids() {
    let store = ArchiveStore::with_container(Box::new(DanglingContainer));
    let catalog = Catalog::with_store(store, "unused.zip");
    assert!(catalog.is_loaded());

    // "p2" is listed but its document is gone: the listing keeps going,
    // yields only "p1", and reports the miss.
    let listing = catalog.list(ModelKind::Process).unwrap();
    assert_eq!(listing.total, 1);
    assert_eq!(listing.skipped, 1);
    assert_eq!(listing.items[0].id, "p1");
    assert_eq!(listing.items[0].name, "Steel production");
}

#[test]
fn single_lookup_distinguishes_missing_from_not_open() {
    let file = sample_archive();
    let catalog = Catalog::new(file.path());

    // Before load: NotOpen.
    assert!(matches!(
        catalog.get(ModelKind::Process, "p1").unwrap_err(),
        Error::NotOpen
    ));

    catalog.ensure_loaded().unwrap();

    // After load: known id projects, unknown id is a clean None.
    let entity = catalog.get(ModelKind::Process, "p1").unwrap().unwrap();
    assert_eq!(entity.name, "Steel production");
    assert!(catalog.get(ModelKind::Process, "unknown").unwrap().is_none());
}

#[test]
fn ensure_loaded_failure_is_idempotent() {
    let catalog = Catalog::new(Path::new("data/does-not-exist.zip"));

    let err = catalog.ensure_loaded().unwrap_err();
    assert!(matches!(err, Error::ArchiveOpen { .. }));
    assert!(!catalog.is_loaded());

    // A later attempt against the same bad path fails the same way.
    assert!(matches!(
        catalog.ensure_loaded().unwrap_err(),
        Error::ArchiveOpen { .. }
    ));
}

#[test]
fn empty_kind_lists_cleanly() {
    let file = fixture(&[("processes/p1.json", "{}")]);
    let catalog = Catalog::new(file.path());
    catalog.ensure_loaded().unwrap();

    let listing = catalog.list(ModelKind::ImpactMethod).unwrap();
    assert!(listing.items.is_empty());
    assert_eq!(listing.total, 0);
    assert_eq!(listing.skipped, 0);
}

#[test]
fn reload_replaces_handle() {
    let file = sample_archive();
    let catalog = Catalog::new(file.path());
    catalog.ensure_loaded().unwrap();
    assert_eq!(catalog.list(ModelKind::Process).unwrap().total, 2);

    catalog.reload().unwrap();
    assert!(catalog.is_loaded());
    assert_eq!(catalog.list(ModelKind::Process).unwrap().total, 2);
}
