#![deny(missing_docs)]

//! # Type Resolution
//!
//! Compiles textual type descriptors into JSON-schema fragments. A
//! parallel walk over the same expression tree resolves descriptors into
//! default values instead.
//!
//! Resolution is total: a descriptor that fails to parse compiles to an
//! explicit `INVALID` fragment carrying the offending text and the parser
//! message, so document generation never aborts on a malformed
//! annotation.

pub mod parser;

pub use parser::{parse, ParseError, RecordEntry, TypeExpr};

use crate::model::{Api, SchemaVersion};
use serde_json::{json, Map, Value};

/// Names that map directly onto JSON-schema primitive types.
const VALID_TYPE_NAMES: [&str; 6] = ["array", "boolean", "integer", "number", "object", "string"];

/// The 24-hex-character pattern constraining ObjectId-formatted strings.
pub const OBJECT_ID_PATTERN: &str = "^[A-Fa-f\\d]{24}$";

/// The `$ref` path for a named schema under the given dialect.
pub fn provide_ref(reference_name: &str, version: SchemaVersion) -> String {
    match version {
        SchemaVersion::V2 => format!("#/definitions/{}", reference_name),
        SchemaVersion::V3 => format!("#/components/schemas/{}", reference_name),
    }
}

/// Resolves type descriptors against an API graph.
///
/// The graph is consulted for one thing only: a bare name matching an
/// edge's schema name (case-insensitively) compiles to a `$ref` instead
/// of an opaque object.
pub struct TypeResolver<'a> {
    api: &'a Api,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over the given graph.
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    /// Compiles a type descriptor to a JSON-schema fragment.
    ///
    /// Parse failure yields `{"type": "INVALID", "error": ..., "format":
    /// <original text>}` rather than an error.
    pub fn resolve_type(&self, descriptor: &str, version: SchemaVersion) -> Value {
        match parse(descriptor) {
            Ok(expr) => self.resolve_expr(&expr, version),
            Err(err) => json!({
                "type": "INVALID",
                "error": err.to_string(),
                "format": descriptor,
            }),
        }
    }

    /// Resolves a descriptor to a default **value** instead of a schema.
    ///
    /// Parse failure returns the original text unchanged.
    pub fn resolve_value(&self, descriptor: &str) -> Value {
        match parse(descriptor) {
            Ok(expr) => resolve_value_expr(&expr),
            Err(_) => Value::String(descriptor.to_string()),
        }
    }

    fn resolve_expr(&self, expr: &TypeExpr, version: SchemaVersion) -> Value {
        match expr {
            TypeExpr::Name(name) => self.resolve_type_name(name, version),

            TypeExpr::Union(alts) => {
                if alts.iter().all(|e| matches!(e, TypeExpr::StringValue(_))) {
                    let values: Vec<Value> = alts
                        .iter()
                        .filter_map(|e| match e {
                            TypeExpr::StringValue(s) => Some(Value::String(s.clone())),
                            _ => None,
                        })
                        .collect();
                    json!({ "type": "string", "enum": values })
                } else if alts.iter().all(|e| matches!(e, TypeExpr::NumberValue(_))) {
                    let values: Vec<Value> = alts
                        .iter()
                        .filter_map(|e| match e {
                            TypeExpr::NumberValue(n) => Some(number_literal(n)),
                            _ => None,
                        })
                        .collect();
                    json!({ "type": "number", "enum": values })
                } else if version == SchemaVersion::V3 {
                    let resolved: Vec<Value> = alts
                        .iter()
                        .map(|e| self.resolve_expr(e, version))
                        .collect();
                    json!({ "oneOf": resolved })
                } else {
                    // Swagger 2 has no union support.
                    json!({ "type": "object", "format": expr.render() })
                }
            }

            TypeExpr::Record(entries) => {
                let mut required = Vec::new();
                let mut properties = Map::new();
                for entry in entries {
                    required.push(Value::String(entry.key.clone()));
                    let resolved = match &entry.value {
                        Some(value) => self.resolve_expr(value, version),
                        None => json!({ "type": "string" }),
                    };
                    properties.insert(entry.key.clone(), resolved);
                }

                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("object"));
                if !required.is_empty() {
                    schema.insert("required".to_string(), Value::Array(required));
                }
                schema.insert("properties".to_string(), Value::Object(properties));
                Value::Object(schema)
            }

            TypeExpr::Generic { subject, args } => {
                let is_array = matches!(subject.as_ref(), TypeExpr::Name(name) if name == "Array");
                match (is_array, args.first()) {
                    (true, Some(item)) => json!({
                        "type": "array",
                        "items": self.resolve_expr(item, version),
                    }),
                    _ => json!({ "type": "object", "format": expr.render() }),
                }
            }

            TypeExpr::StringValue(s) => json!({ "type": "string", "enum": [s] }),

            TypeExpr::NumberValue(n) => json!({ "type": "number", "enum": [number_literal(n)] }),
        }
    }

    fn resolve_type_name(&self, name: &str, version: SchemaVersion) -> Value {
        let lower = name.to_lowercase();
        if VALID_TYPE_NAMES.contains(&lower.as_str()) {
            json!({ "type": lower })
        } else if lower == "true" || lower == "false" {
            json!({ "type": "boolean", "enum": [lower == "true"] })
        } else if lower == "objectid" || lower == "object-id" {
            json!({
                "type": "string",
                "format": "ObjectId",
                "pattern": OBJECT_ID_PATTERN,
            })
        } else if let Some(edge) = self
            .api
            .edges
            .iter()
            .find(|e| e.name.to_lowercase() == lower)
        {
            json!({ "$ref": provide_ref(&edge.name, version) })
        } else {
            json!({ "type": "object", "format": name })
        }
    }
}

fn resolve_value_expr(expr: &TypeExpr) -> Value {
    match expr {
        TypeExpr::Name(name) => match name.as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            // JSON carries neither `undefined` nor non-finite numbers;
            // `undefined` degrades to null, the rest to their names.
            "null" | "undefined" => Value::Null,
            other => Value::String(other.to_string()),
        },

        TypeExpr::Record(entries) => {
            let mut record = Map::new();
            for entry in entries {
                if let Some(value) = &entry.value {
                    record.insert(entry.key.clone(), resolve_value_expr(value));
                }
            }
            Value::Object(record)
        }

        TypeExpr::Generic { subject, args } => {
            let is_array = matches!(subject.as_ref(), TypeExpr::Name(name) if name == "Array");
            if is_array {
                Value::Array(args.iter().map(resolve_value_expr).collect())
            } else {
                Value::String(expr.render())
            }
        }

        TypeExpr::StringValue(s) => Value::String(s.clone()),

        TypeExpr::NumberValue(n) => number_literal(n),

        TypeExpr::Union(_) => Value::String(expr.render()),
    }
}

/// Converts a numeric literal's source text to a JSON number, preferring
/// the integer representation when the text carries no fraction.
fn number_literal(text: &str) -> Value {
    if let Ok(int) = text.parse::<i64>() {
        return Value::Number(int.into());
    }
    match text.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(num) => Value::Number(num),
        None => Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiEdge, ServiceInfo};
    use pretty_assertions::assert_eq;

    fn api() -> Api {
        Api::new("1.0", ServiceInfo::new("svc", "1.0.0"))
            .with_edge(ApiEdge::new("widget", "widgets"))
    }

    #[test]
    fn test_primitive_names() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("string", SchemaVersion::V3),
            json!({ "type": "string" })
        );
        // Case-insensitive.
        assert_eq!(
            resolver.resolve_type("Number", SchemaVersion::V2),
            json!({ "type": "number" })
        );
    }

    #[test]
    fn test_boolean_literal_names() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("true", SchemaVersion::V3),
            json!({ "type": "boolean", "enum": [true] })
        );
    }

    #[test]
    fn test_object_id() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        for descriptor in ["objectId", "object-id"] {
            assert_eq!(
                resolver.resolve_type(descriptor, SchemaVersion::V3),
                json!({
                    "type": "string",
                    "format": "ObjectId",
                    "pattern": "^[A-Fa-f\\d]{24}$",
                })
            );
        }
    }

    #[test]
    fn test_edge_reference_paths_differ_by_version() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("widget", SchemaVersion::V2),
            json!({ "$ref": "#/definitions/widget" })
        );
        assert_eq!(
            resolver.resolve_type("Widget", SchemaVersion::V3),
            json!({ "$ref": "#/components/schemas/widget" })
        );
    }

    #[test]
    fn test_unknown_name_is_opaque_object() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("Duration", SchemaVersion::V3),
            json!({ "type": "object", "format": "Duration" })
        );
    }

    #[test]
    fn test_union_resolves_to_one_of_in_v3() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("string|number", SchemaVersion::V3),
            json!({ "oneOf": [{ "type": "string" }, { "type": "number" }] })
        );
    }

    #[test]
    fn test_union_falls_back_in_v2() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("string|number", SchemaVersion::V2),
            json!({ "type": "object", "format": "string|number" })
        );
    }

    #[test]
    fn test_string_literal_union_collapses_to_enum() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("'a'|'b'", SchemaVersion::V2),
            json!({ "type": "string", "enum": ["a", "b"] })
        );
    }

    #[test]
    fn test_number_literal_union_collapses_to_enum() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("1|2|3", SchemaVersion::V3),
            json!({ "type": "number", "enum": [1, 2, 3] })
        );
    }

    #[test]
    fn test_array_generic() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("Array<string>", SchemaVersion::V3),
            json!({ "type": "array", "items": { "type": "string" } })
        );
    }

    #[test]
    fn test_non_array_generic_is_opaque() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("Map<string, number>", SchemaVersion::V3),
            json!({ "type": "object", "format": "Map<string, number>" })
        );
    }

    #[test]
    fn test_record() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(
            resolver.resolve_type("{name: string, count}", SchemaVersion::V3),
            json!({
                "type": "object",
                "required": ["name", "count"],
                "properties": {
                    "name": { "type": "string" },
                    "count": { "type": "string" },
                },
            })
        );
    }

    #[test]
    fn test_invalid_descriptor_never_fails() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        let fragment = resolver.resolve_type("string|", SchemaVersion::V3);
        assert_eq!(fragment["type"], "INVALID");
        assert_eq!(fragment["format"], "string|");
        assert!(!fragment["error"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_value_resolution() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(resolver.resolve_value("true"), json!(true));
        assert_eq!(resolver.resolve_value("null"), json!(null));
        assert_eq!(resolver.resolve_value("undefined"), json!(null));
        assert_eq!(resolver.resolve_value("42"), json!(42));
        assert_eq!(resolver.resolve_value("'draft'"), json!("draft"));
        assert_eq!(resolver.resolve_value("pending"), json!("pending"));
        assert_eq!(
            resolver.resolve_value("Array<1, 2>"),
            json!([1, 2])
        );
        assert_eq!(
            resolver.resolve_value("{a: 1, b: 'x'}"),
            json!({ "a": 1, "b": "x" })
        );
    }

    #[test]
    fn test_value_resolution_on_parse_failure() {
        let api = api();
        let resolver = TypeResolver::new(&api);
        assert_eq!(resolver.resolve_value("{{"), json!("{{"));
    }
}
