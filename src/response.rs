#![deny(missing_docs)]

//! # Response Code Generation
//!
//! Builds the status-code-to-response map for an operation from an
//! optional documentation comment, with fallback defaults. The emitted
//! response body schema is always attached under a bare `schema` key; the
//! document mapper re-wraps it into `content` form for OpenAPI 3.

use crate::docs::MethodComment;
use crate::model::SchemaVersion;
use crate::type_expr::TypeResolver;
use serde_json::{json, Map, Value};

/// The canonical success entry of a response map: the first `20x` key.
pub fn success_code(responses: &Map<String, Value>) -> Option<String> {
    responses
        .keys()
        .find(|code| code.starts_with("20"))
        .cloned()
}

/// Builds the response map for one operation.
///
/// Documented codes appear in documentation order; the first `20x` code
/// is canonical. When none is documented, a `200` with
/// `default_200_description` is synthesized. Documented response fields
/// become the success entry's body schema: named fields form an object
/// schema with the non-optional names required, a single unnamed field
/// resolves directly to the whole response schema.
pub fn generate_response_codes(
    docs: Option<&MethodComment>,
    version: SchemaVersion,
    default_200_description: &str,
    resolver: &TypeResolver<'_>,
) -> Map<String, Value> {
    let mut output = Map::new();
    let mut success: Option<String> = None;

    if let Some(docs) = docs {
        for entry in &docs.response_codes {
            output.insert(
                entry.code.clone(),
                json!({ "description": entry.summary }),
            );
            if success.is_none() && entry.code.starts_with("20") {
                success = Some(entry.code.clone());
            }
        }
    }

    let success = match success {
        Some(code) => code,
        None => {
            output.insert(
                "200".to_string(),
                json!({ "description": default_200_description }),
            );
            "200".to_string()
        }
    };

    if let Some(docs) = docs {
        let response = &docs.response;
        let named = response.len() > 1 || response.first().is_some_and(|p| p.name.is_some());

        let schema = if named {
            let mut required = Vec::new();
            let mut properties = Map::new();
            for param in response {
                let Some(name) = &param.name else {
                    continue;
                };
                if !param.optional {
                    required.push(Value::String(name.clone()));
                }
                let mut fragment = resolver.resolve_type(&param.type_, version);
                if let Value::Object(fragment) = &mut fragment {
                    fragment.insert("description".to_string(), json!(param.summary));
                }
                properties.insert(name.clone(), fragment);
            }

            let mut schema = Map::new();
            schema.insert("type".to_string(), json!("object"));
            if !required.is_empty() {
                schema.insert("required".to_string(), Value::Array(required));
            }
            schema.insert("properties".to_string(), Value::Object(properties));
            Some(Value::Object(schema))
        } else if let Some(only) = response.first() {
            Some(resolver.resolve_type(&only.type_, version))
        } else {
            None
        };

        if let Some(schema) = schema {
            if let Some(Value::Object(entry)) = output.get_mut(&success) {
                entry.insert("schema".to_string(), schema);
            }
        }
    }

    output
}
