#![deny(missing_docs)]

//! # Schema Mapper
//!
//! Converts an edge's native field-descriptor tree into JSON-schema
//! object/array/reference fragments, merged with the per-schema
//! documentation overlay. The structural typing never changes under the
//! overlay; only `description` and `deprecated` annotations are added.

use crate::docs::DocumentationOverlay;
use crate::model::{Api, FieldType, SchemaField};
use crate::type_expr::OBJECT_ID_PATTERN;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// Maps field-descriptor trees to schema fragments.
pub struct SchemaMapper<'a> {
    overlay: &'a DocumentationOverlay,
}

impl<'a> SchemaMapper<'a> {
    /// Creates a mapper over the given overlay.
    pub fn new(overlay: &'a DocumentationOverlay) -> Self {
        Self { overlay }
    }

    /// The schema fragment for a single field type.
    pub fn map_field_type(&self, type_: &FieldType) -> Value {
        match type_ {
            FieldType::Number => json!({ "type": "number" }),
            FieldType::String => json!({ "type": "string" }),
            FieldType::Boolean => json!({ "type": "boolean" }),
            FieldType::Date => json!({ "type": "string", "format": "date" }),
            FieldType::Reference => json!({
                "type": "string",
                "format": "ObjectId",
                "pattern": OBJECT_ID_PATTERN,
            }),
            FieldType::Mixed => json!({ "type": "object" }),
            FieldType::Array(inner) => json!({
                "type": "array",
                "items": self.map_field_type(inner),
            }),
            FieldType::Object(fields) | FieldType::SubSchema(fields) => {
                self.map_object(fields, None)
            }
        }
    }

    /// The schema fragment for a field descriptor.
    pub fn map_field(&self, field: &SchemaField) -> Value {
        self.map_field_type(&field.type_)
    }

    /// The object schema for a field set, with overlay documentation
    /// merged when `schema_name` names a documented schema.
    pub fn map_object(
        &self,
        fields: &IndexMap<String, SchemaField>,
        schema_name: Option<&str>,
    ) -> Value {
        let docs = schema_name.and_then(|name| self.overlay.schema(name));

        let mut properties = Map::new();
        for (key, field) in fields {
            properties.insert(key.clone(), self.map_field(field));
        }

        let mut output = Map::new();
        output.insert("type".to_string(), json!("object"));
        output.insert("properties".to_string(), Value::Object(properties));

        if let Some(docs) = docs {
            output.insert("description".to_string(), json!(docs.description));
            if docs.is_deprecated() {
                output.insert("deprecated".to_string(), json!(true));
            }
            if let Some(Value::Object(properties)) = output.get_mut("properties") {
                for (field_name, field_doc) in &docs.fields {
                    if let Some(Value::Object(fragment)) = properties.get_mut(field_name) {
                        fragment
                            .insert("description".to_string(), json!(field_doc.description));
                    }
                }
            }
        }

        let required: Vec<Value> = fields
            .iter()
            .filter(|(_, field)| field.required)
            .map(|(key, _)| Value::String(key.clone()))
            .collect();
        if !required.is_empty() {
            output.insert("required".to_string(), Value::Array(required));
        }

        Value::Object(output)
    }

    /// One named definition per edge, in edge order; feeds `definitions`
    /// (v2) or `components.schemas` (v3).
    pub fn map_schemas(&self, api: &Api) -> Map<String, Value> {
        let mut output = Map::new();
        for edge in &api.edges {
            output.insert(
                edge.name.clone(),
                self.map_object(&edge.schema.original, Some(&edge.name)),
            );
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiEdge, ApiEdgeSchema, ServiceInfo};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields() -> IndexMap<String, SchemaField> {
        let mut map = IndexMap::new();
        map.insert("name".to_string(), SchemaField::new(FieldType::String).required());
        map.insert("size".to_string(), SchemaField::new(FieldType::Number));
        map.insert("created".to_string(), SchemaField::new(FieldType::Date));
        map.insert("owner".to_string(), SchemaField::new(FieldType::Reference));
        map.insert(
            "tags".to_string(),
            SchemaField::new(FieldType::Array(Box::new(FieldType::String))),
        );
        map
    }

    #[test]
    fn test_scalar_fragments() {
        let overlay = DocumentationOverlay::empty();
        let mapper = SchemaMapper::new(&overlay);
        assert_eq!(
            mapper.map_field_type(&FieldType::Date),
            json!({ "type": "string", "format": "date" })
        );
        assert_eq!(
            mapper.map_field_type(&FieldType::Reference),
            json!({
                "type": "string",
                "format": "ObjectId",
                "pattern": "^[A-Fa-f\\d]{24}$",
            })
        );
        assert_eq!(mapper.map_field_type(&FieldType::Mixed), json!({ "type": "object" }));
    }

    #[test]
    fn test_array_recursion() {
        let overlay = DocumentationOverlay::empty();
        let mapper = SchemaMapper::new(&overlay);
        let nested = FieldType::Array(Box::new(FieldType::Array(Box::new(FieldType::Number))));
        assert_eq!(
            mapper.map_field_type(&nested),
            json!({
                "type": "array",
                "items": { "type": "array", "items": { "type": "number" } },
            })
        );
    }

    #[test]
    fn test_object_schema_with_required() {
        let overlay = DocumentationOverlay::empty();
        let mapper = SchemaMapper::new(&overlay);
        let schema = mapper.map_object(&fields(), None);
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["properties"]["size"], json!({ "type": "number" }));
    }

    #[test]
    fn test_required_omitted_when_empty() {
        let overlay = DocumentationOverlay::empty();
        let mapper = SchemaMapper::new(&overlay);
        let mut map = IndexMap::new();
        map.insert("a".to_string(), SchemaField::new(FieldType::String));
        let schema = mapper.map_object(&map, None);
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_overlay_merge_keeps_structure() {
        let overlay = DocumentationOverlay::from_value(json!({
            ".apidocs": true,
            "edges": {},
            "schemas": {
                "widget": {
                    "description": "A widget",
                    "modifiers": ["deprecated"],
                    "fields": { "name": { "description": "Display name" } }
                }
            }
        }));
        let mapper = SchemaMapper::new(&overlay);
        let schema = mapper.map_object(&fields(), Some("widget"));

        assert_eq!(schema["description"], "A widget");
        assert_eq!(schema["deprecated"], json!(true));
        assert_eq!(
            schema["properties"]["name"],
            json!({ "type": "string", "description": "Display name" })
        );
        // Undocumented fields keep their bare fragments.
        assert_eq!(schema["properties"]["size"], json!({ "type": "number" }));
    }

    #[test]
    fn test_map_schemas_in_edge_order() {
        let overlay = DocumentationOverlay::empty();
        let mapper = SchemaMapper::new(&overlay);
        let api = Api::new("1.0", ServiceInfo::new("svc", "1.0.0"))
            .with_edge(ApiEdge::new("widget", "widgets").with_schema(ApiEdgeSchema::new(fields())))
            .with_edge(ApiEdge::new("part", "parts"));
        let schemas = mapper.map_schemas(&api);
        let names: Vec<&str> = schemas.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["widget", "part"]);
        // An empty schema still yields an object definition.
        assert_eq!(schemas["part"]["type"], "object");
    }
}
