#![deny(missing_docs)]

//! # Documentation Overlay
//!
//! Externally authored documentation merged into generated operations.
//! The overlay is a JSON structure keyed by edge name, with per-path (or
//! per-method) entries carrying free-text comment records.
//!
//! Two layouts are accepted: a flat map of edge documentation, or a
//! wrapped form carrying a `.apidocs` marker key with separate `edges`
//! and `schemas` sections. An absent or unparsable overlay is normalized
//! to an empty one at this boundary; generation downstream never checks
//! for overlay errors.

use crate::model::HttpVerb;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Whether an overlay parameter rides in the request body or the query
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A request-body property.
    Body,
    /// A query-string parameter.
    Query,
}

/// A documented parameter of a custom method.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentParam {
    /// Parameter name.
    pub name: String,
    /// Type-descriptor string, resolved through the type resolver.
    #[serde(rename = "type", default)]
    pub type_: String,
    /// Body or query placement.
    pub kind: ParamKind,
    /// Whether the parameter may be omitted.
    #[serde(default)]
    pub optional: bool,
    /// Optional default value, resolved through the value resolver.
    #[serde(rename = "defaultValue", default)]
    pub default_value: Option<String>,
    /// One-line description.
    #[serde(default)]
    pub summary: String,
}

/// A documented response field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseParam {
    /// Field name; an unnamed single field stands for the whole response
    /// body.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the field may be absent.
    #[serde(default)]
    pub optional: bool,
    /// Type-descriptor string.
    #[serde(rename = "type", default)]
    pub type_: String,
    /// One-line description.
    #[serde(default)]
    pub summary: String,
}

/// A documented response status code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseCode {
    /// The status code, as text (`"200"`, `"404"`).
    pub code: String,
    /// Its description.
    #[serde(default)]
    pub summary: String,
}

/// A free-text comment record attached to a path or method.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MethodComment {
    /// One-line summary.
    pub summary: String,
    /// Longer description.
    pub description: String,
    /// Additional remarks.
    pub remarks: String,
    /// Return-value prose.
    pub returns: String,
    /// Usage examples.
    pub examples: Vec<String>,
    /// Documented parameters.
    pub params: Vec<CommentParam>,
    /// Documented response fields.
    pub response: Vec<ResponseParam>,
    /// Documented response codes.
    #[serde(rename = "responseCodes")]
    pub response_codes: Vec<ResponseCode>,
    /// Modifier flags; `deprecated` marks the operation deprecated.
    pub modifiers: Vec<String>,
    /// Built-in query-parameter groups to attach:
    /// `all|sort|pagination|where|fields|embed`.
    #[serde(rename = "apiCoreQueryParams")]
    pub query_params: Vec<String>,
}

impl MethodComment {
    /// Whether the `deprecated` modifier is set.
    pub fn is_deprecated(&self) -> bool {
        self.modifiers.iter().any(|m| m == "deprecated")
    }
}

/// A per-verb comment override.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct VerbEntry {
    /// The overriding comment, when present.
    pub comment: Option<MethodComment>,
}

/// Documentation attached to one path or method of an edge.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DocEntry {
    /// Per-verb overrides, keyed by lowercase verb name.
    pub verbs: IndexMap<String, VerbEntry>,
    /// The entry-level comment, used when no verb override matches.
    pub comment: Option<MethodComment>,
}

impl DocEntry {
    /// The comment for a verb: the verb override when present, the
    /// entry-level comment otherwise.
    pub fn comment_for(&self, verb: HttpVerb) -> Option<&MethodComment> {
        self.verbs
            .get(verb.as_str())
            .and_then(|v| v.comment.as_ref())
            .or(self.comment.as_ref())
    }
}

/// All documented entries of one edge, keyed by path or method name.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EdgeDocumentation {
    /// The entries map.
    pub entries: IndexMap<String, DocEntry>,
}

/// A documented field of a named schema.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FieldDoc {
    /// The field description.
    pub description: String,
}

/// Documentation attached to a named schema definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SchemaDocumentation {
    /// Schema-level description.
    pub description: String,
    /// Modifier flags; `deprecated` marks the schema deprecated.
    pub modifiers: Vec<String>,
    /// Per-field documentation.
    pub fields: IndexMap<String, FieldDoc>,
}

impl SchemaDocumentation {
    /// Whether the `deprecated` modifier is set.
    pub fn is_deprecated(&self) -> bool {
        self.modifiers.iter().any(|m| m == "deprecated")
    }
}

/// The full overlay: edge documentation plus schema documentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentationOverlay {
    /// Per-edge documentation, keyed by edge name.
    pub edges: IndexMap<String, EdgeDocumentation>,
    /// Per-schema documentation, keyed by schema (edge) name.
    pub schemas: IndexMap<String, SchemaDocumentation>,
}

/// Wrapped overlay layout, distinguished by the `.apidocs` marker key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WrappedOverlay {
    edges: IndexMap<String, EdgeDocumentation>,
    schemas: IndexMap<String, SchemaDocumentation>,
}

impl DocumentationOverlay {
    /// An overlay with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Interprets a JSON value as an overlay.
    ///
    /// A top-level `.apidocs` key selects the wrapped `{edges, schemas}`
    /// layout; otherwise the whole value is the flat edge map. A value
    /// that deserializes as neither yields the empty overlay.
    pub fn from_value(value: Value) -> Self {
        let is_wrapped = value
            .as_object()
            .is_some_and(|obj| obj.contains_key(".apidocs"));

        if is_wrapped {
            match serde_json::from_value::<WrappedOverlay>(value) {
                Ok(wrapped) => Self {
                    edges: wrapped.edges,
                    schemas: wrapped.schemas,
                },
                Err(_) => Self::empty(),
            }
        } else {
            match serde_json::from_value::<IndexMap<String, EdgeDocumentation>>(value) {
                Ok(edges) => Self {
                    edges,
                    schemas: IndexMap::new(),
                },
                Err(_) => Self::empty(),
            }
        }
    }

    /// Parses overlay JSON text; malformed text yields the empty overlay.
    pub fn from_str(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::empty(),
        }
    }

    /// Reads an overlay file; an unreadable or malformed file yields the
    /// empty overlay.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_str(&text),
            Err(_) => Self::empty(),
        }
    }

    /// The documented entry for a path or method of an edge, if any.
    pub fn entry(&self, edge_name: &str, key: &str) -> Option<&DocEntry> {
        self.edges.get(edge_name)?.entries.get(key)
    }

    /// The comment applying to one operation: the per-verb override when
    /// present, the entry-level comment otherwise.
    pub fn operation_comment(
        &self,
        edge_name: &str,
        key: &str,
        verb: HttpVerb,
    ) -> Option<&MethodComment> {
        self.entry(edge_name, key)?.comment_for(verb)
    }

    /// Documentation for a named schema, if any.
    pub fn schema(&self, name: &str) -> Option<&SchemaDocumentation> {
        self.schemas.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_layout() {
        let overlay = DocumentationOverlay::from_value(json!({
            "widget": {
                "entries": {
                    "/widgets": {
                        "comment": { "summary": "All widgets" },
                        "verbs": {
                            "get": { "comment": { "summary": "List them" } }
                        }
                    }
                }
            }
        }));

        let entry = overlay.entry("widget", "/widgets").unwrap();
        assert_eq!(entry.comment_for(HttpVerb::Get).unwrap().summary, "List them");
        // No override for post: falls back to the entry-level comment.
        assert_eq!(
            entry.comment_for(HttpVerb::Post).unwrap().summary,
            "All widgets"
        );
        assert!(overlay.schemas.is_empty());
    }

    #[test]
    fn test_wrapped_layout() {
        let overlay = DocumentationOverlay::from_value(json!({
            ".apidocs": true,
            "edges": {
                "widget": { "entries": {} }
            },
            "schemas": {
                "widget": {
                    "description": "A widget",
                    "modifiers": ["deprecated"],
                    "fields": { "name": { "description": "Its name" } }
                }
            }
        }));

        assert!(overlay.edges.contains_key("widget"));
        let docs = overlay.schema("widget").unwrap();
        assert!(docs.is_deprecated());
        assert_eq!(docs.fields["name"].description, "Its name");
    }

    #[test]
    fn test_malformed_text_is_empty() {
        let overlay = DocumentationOverlay::from_str("{ not json");
        assert_eq!(overlay, DocumentationOverlay::empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let overlay = DocumentationOverlay::from_file("/definitely/not/here.json");
        assert_eq!(overlay, DocumentationOverlay::empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(
            &path,
            r#"{"widget": {"entries": {"render": {"comment": {"summary": "Render"}}}}}"#,
        )
        .unwrap();

        let overlay = DocumentationOverlay::from_file(&path);
        assert_eq!(
            overlay
                .operation_comment("widget", "render", HttpVerb::Get)
                .unwrap()
                .summary,
            "Render"
        );
    }

    #[test]
    fn test_comment_defaults() {
        let comment: MethodComment = serde_json::from_value(json!({})).unwrap();
        assert!(comment.params.is_empty());
        assert!(comment.response_codes.is_empty());
        assert!(!comment.is_deprecated());
    }
}
