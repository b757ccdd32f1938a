//! Model kinds and entity references.
//!
//! An archive files every document under a kind-specific namespace. The
//! namespaces follow the openLCA JSON-LD layout (`processes/`,
//! `lcia_methods/`), but nothing outside this module depends on those
//! directory names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of model stored in an LCA archive.
///
/// Determines which namespace of the archive is queried and which
/// projection rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelKind {
    /// A production or treatment process.
    Process,
    /// An impact-assessment method.
    ImpactMethod,
}

impl ModelKind {
    /// All supported model kinds.
    pub const ALL: [ModelKind; 2] = [ModelKind::Process, ModelKind::ImpactMethod];

    /// Archive directory this kind's documents are filed under.
    pub fn dir(&self) -> &'static str {
        match self {
            ModelKind::Process => "processes",
            ModelKind::ImpactMethod => "lcia_methods",
        }
    }

    /// Stable wire name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Process => "PROCESS",
            ModelKind::ImpactMethod => "IMPACT_METHOD",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(kind, id)` pair identifying one document in an archive.
///
/// The id is an opaque reference key, unique within its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Model kind the entity is filed under.
    pub kind: ModelKind,
    /// Opaque reference id, unique within the kind.
    pub id: String,
}

impl EntityRef {
    /// Create a new entity reference.
    pub fn new(kind: ModelKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dirs_are_distinct() {
        assert_eq!(ModelKind::Process.dir(), "processes");
        assert_eq!(ModelKind::ImpactMethod.dir(), "lcia_methods");
        assert_ne!(ModelKind::Process.dir(), ModelKind::ImpactMethod.dir());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ModelKind::Process.to_string(), "PROCESS");
        assert_eq!(ModelKind::ImpactMethod.to_string(), "IMPACT_METHOD");
    }

    #[test]
    fn test_kind_serde_wire_names() {
        let json = serde_json::to_string(&ModelKind::ImpactMethod).unwrap();
        assert_eq!(json, "\"IMPACT_METHOD\"");

        let kind: ModelKind = serde_json::from_str("\"PROCESS\"").unwrap();
        assert_eq!(kind, ModelKind::Process);
    }

    #[test]
    fn test_entity_ref_display() {
        let entity = EntityRef::new(ModelKind::Process, "p1");
        assert_eq!(entity.to_string(), "PROCESS/p1");
    }
}
