//! Declarative field projection from raw archive documents.
//!
//! A raw document is an untyped JSON tree. Callers never see it directly;
//! instead a [`ProjectionSchema`] names the fields to extract for each model
//! kind and the default to substitute when a field is missing. Projection is
//! total: any well-formed JSON value projects to a [`ProjectedEntity`],
//! absent or non-string fields included.
//!
//! The `id` of the result is always the caller-supplied index key, never the
//! document's self-reported id. The index is authoritative.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ModelKind;

/// Rule for extracting one string field from a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Key to look up in the document's top-level object.
    pub source_key: &'static str,
    /// Value substituted when the key is absent or not a string.
    pub default: &'static str,
}

impl FieldRule {
    /// Extract this field from `doc`, falling back to the default.
    pub fn extract(&self, doc: &Value) -> String {
        doc.get(self.source_key)
            .and_then(Value::as_str)
            .unwrap_or(self.default)
            .to_string()
    }
}

/// Per-kind projection rules.
///
/// Both kinds currently use identical field names, but each kind carries its
/// own schema so they can diverge without touching the projection logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionSchema {
    /// Source of the `name` field.
    pub name: FieldRule,
    /// Source of the `description` field.
    pub description: FieldRule,
}

const PROCESS_SCHEMA: ProjectionSchema = ProjectionSchema {
    name: FieldRule {
        source_key: "name",
        default: "",
    },
    description: FieldRule {
        source_key: "description",
        default: "",
    },
};

const IMPACT_METHOD_SCHEMA: ProjectionSchema = ProjectionSchema {
    name: FieldRule {
        source_key: "name",
        default: "",
    },
    description: FieldRule {
        source_key: "description",
        default: "",
    },
};

impl ModelKind {
    /// Projection rules for this kind.
    pub fn projection(&self) -> &'static ProjectionSchema {
        match self {
            ModelKind::Process => &PROCESS_SCHEMA,
            ModelKind::ImpactMethod => &IMPACT_METHOD_SCHEMA,
        }
    }
}

/// The caller-facing view of one archive document.
///
/// Fields are always present; missing source fields project to `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedEntity {
    /// Reference id (the index key, not the document's own id field).
    pub id: String,
    /// Display name, empty if the document has none.
    pub name: String,
    /// Description, empty if the document has none.
    pub description: String,
}

/// Project a raw document using the schema for `kind`.
pub fn project(kind: ModelKind, id: &str, doc: &Value) -> ProjectedEntity {
    project_with(kind.projection(), id, doc)
}

/// Project a raw document with an explicit schema.
pub fn project_with(schema: &ProjectionSchema, id: &str, doc: &Value) -> ProjectedEntity {
    ProjectedEntity {
        id: id.to_string(),
        name: schema.name.extract(doc),
        description: schema.description.extract(doc),
    }
}

// ============================================================================
// Tests
// ============================================================================
