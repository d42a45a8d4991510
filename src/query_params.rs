#![deny(missing_docs)]

//! # Query Parameter Builders
//!
//! Deterministic construction of the shared parameter objects: the id
//! path parameter, sorting, pagination, field selection, relation
//! embedding and the nested `where` filter. Version dispatch is uniform:
//! Swagger 2 inlines the schema fields into the parameter object, OpenAPI
//! 3 nests them under `schema`.

use crate::model::{ApiEdge, ApiEdgeSchema, FieldType, SchemaVersion};
use crate::schema_mapper::SchemaMapper;
use crate::type_expr::OBJECT_ID_PATTERN;
use serde_json::{json, Map, Value};

/// The id path parameter for item-scoped paths.
pub fn provide_id_param(id_param: &str, version: SchemaVersion) -> Value {
    let mut output = Map::new();
    output.insert("in".to_string(), json!("path"));
    output.insert("name".to_string(), json!(id_param));
    output.insert("required".to_string(), json!(true));

    let schema = json!({
        "type": "string",
        "format": "ObjectId",
        "pattern": OBJECT_ID_PATTERN,
    });

    match version {
        SchemaVersion::V2 => merge_into(&mut output, schema),
        SchemaVersion::V3 => {
            output.insert("schema".to_string(), schema);
        }
    }

    Value::Object(output)
}

/// A query parameter carrying the given schema, shaped per dialect.
pub fn provide_query_param(
    name: &str,
    description: &str,
    schema: Value,
    version: SchemaVersion,
    required: Option<bool>,
) -> Value {
    let mut output = Map::new();
    output.insert("in".to_string(), json!("query"));
    output.insert("name".to_string(), json!(name));
    output.insert("description".to_string(), json!(description));
    if let Some(required) = required {
        output.insert("required".to_string(), json!(required));
    }

    match version {
        SchemaVersion::V2 => merge_into(&mut output, schema),
        SchemaVersion::V3 => {
            output.insert("schema".to_string(), schema);
        }
    }

    Value::Object(output)
}

/// Appends the `sort` parameter, constrained to the edge's own fields
/// with an optional leading direction sign.
pub fn generate_sort_param(parameters: &mut Vec<Value>, fields: &[String], version: SchemaVersion) {
    parameters.push(provide_query_param(
        "sort",
        "Sort the response entries by a specified field in the given direction. \
         Direction can be specified using either a plus or a minus sign before the field name.",
        json!({
            "type": "string",
            "pattern": format!("^[+-]?({})$", fields.join("|")),
        }),
        version,
        None,
    ));
}

/// Appends the `limit`/`skip`/`page` pagination parameters.
pub fn generate_pagination_params(parameters: &mut Vec<Value>, version: SchemaVersion) {
    parameters.push(provide_query_param(
        "limit",
        "If specified, it determines the maximum number of entries to return.",
        json!({ "type": "integer", "minimum": 1 }),
        version,
        None,
    ));

    parameters.push(provide_query_param(
        "skip",
        "If specified, it determines how many entries to skip before the first entry to return. \
         This and `limit` combined can be used for pagination.",
        json!({ "type": "integer", "minimum": 0 }),
        version,
        None,
    ));

    parameters.push(provide_query_param(
        "page",
        "If specified, it determines the index of the page of entries to return. \
         Page size is specified by the `limit` parameter.",
        json!({ "type": "integer", "minimum": 1 }),
        version,
        None,
    ));
}

/// Appends the `where` filter parameter: one nested object property per
/// field, exposing `eq`/`ne`/`in` universally plus `gt`/`gte`/`lt`/`lte`
/// for numeric and date fields and `like` for string fields.
pub fn generate_where_param(
    parameters: &mut Vec<Value>,
    schema: &ApiEdgeSchema,
    mapper: &SchemaMapper<'_>,
    version: SchemaVersion,
) {
    let mut properties = Map::new();
    for field in &schema.fields {
        let Some(entry) = schema.original.get(field) else {
            continue;
        };
        let base = mapper.map_field(entry);

        let mut inner = Map::new();
        inner.insert(
            "eq".to_string(),
            described(&base, "Equals with the provided value."),
        );
        inner.insert(
            "ne".to_string(),
            described(&base, "Not equals with the provided value."),
        );
        inner.insert(
            "in".to_string(),
            json!({
                "type": "string",
                "description": "Comma separated list of values in which the target should be present.",
            }),
        );

        match entry.type_ {
            FieldType::Number | FieldType::Date => {
                inner.insert(
                    "gt".to_string(),
                    described(&base, "Greater than the provided value."),
                );
                inner.insert(
                    "gte".to_string(),
                    described(&base, "Greater than or equals with the provided value."),
                );
                inner.insert(
                    "lt".to_string(),
                    described(&base, "Lower than the provided value."),
                );
                inner.insert(
                    "lte".to_string(),
                    described(&base, "Lower than or equals with the provided value."),
                );
            }
            FieldType::String => {
                inner.insert(
                    "like".to_string(),
                    described(&base, "Similar to the provided value."),
                );
            }
            _ => {}
        }

        properties.insert(
            field.clone(),
            json!({ "type": "object", "properties": inner }),
        );
    }

    let mut param = provide_query_param(
        "where",
        "Filters the returned entries based on advanced criteria.",
        json!({ "type": "object", "properties": properties }),
        version,
        None,
    );
    if let Value::Object(param) = &mut param {
        param.insert("style".to_string(), json!("deepObject"));
        param.insert("explode".to_string(), json!(true));
    }
    parameters.push(param);
}

/// Appends the `fields` selection parameter, restricted to the edge's
/// own field names.
pub fn generate_fields_param(
    parameters: &mut Vec<Value>,
    fields: &[String],
    version: SchemaVersion,
) {
    let mut param = provide_query_param(
        "fields",
        "If specified, the response entries will only contain the listed fields. \
         Comma separated list.",
        json!({
            "type": "array",
            "items": { "type": "string", "enum": fields },
        }),
        version,
        None,
    );
    if let Value::Object(param) = &mut param {
        param.insert("style".to_string(), json!("form"));
        param.insert("explode".to_string(), json!(false));
    }
    parameters.push(param);
}

/// Appends the `embed` parameter: an enum of the edge's relation names,
/// excluding self-named relations, deduplicated in first-seen order.
pub fn generate_embed_param(parameters: &mut Vec<Value>, edge: &ApiEdge, version: SchemaVersion) {
    let mut names: Vec<&str> = Vec::new();
    for relation in &edge.relations {
        if relation.name == edge.name || relation.name == edge.plural_name {
            continue;
        }
        if !names.contains(&relation.name.as_str()) {
            names.push(&relation.name);
        }
    }

    let mut param = provide_query_param(
        "embed",
        "Populates the specified related fields in the response entries. Comma separated list.",
        json!({
            "type": "array",
            "items": { "type": "string", "enum": names },
        }),
        version,
        None,
    );
    if let Value::Object(param) = &mut param {
        param.insert("style".to_string(), json!("form"));
        param.insert("explode".to_string(), json!(false));
    }
    parameters.push(param);
}

/// Clones a base fragment with a comparator description attached.
fn described(base: &Value, description: &str) -> Value {
    let mut fragment = base.clone();
    if let Value::Object(fragment) = &mut fragment {
        fragment.insert("description".to_string(), json!(description));
    }
    fragment
}

/// Flattens a schema object's fields into a parameter object (Swagger 2
/// inline shape).
fn merge_into(output: &mut Map<String, Value>, schema: Value) {
    if let Value::Object(schema) = schema {
        for (key, value) in schema {
            output.insert(key, value);
        }
    }
}
