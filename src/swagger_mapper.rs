#![deny(missing_docs)]

//! # Swagger/OpenAPI Document Mapper
//!
//! The document-producing counterpart of the route mapper: the same
//! depth-bounded traversal over the resource graph, but every visited
//! path yields full per-verb operation objects, and the walk's output is
//! assembled into a version-specific envelope (Swagger 2 or OpenAPI 3).
//!
//! Operations compose the schema mapper (body and definition schemas),
//! the response-code generator, the shared query-parameter builders and
//! an optional security collaborator. Given identical inputs the output
//! is structurally identical on repeated calls: all maps preserve
//! insertion order and traversal order follows the edge/relation order
//! of the input graph.

use crate::docs::{DocumentationOverlay, MethodComment, ParamKind};
use crate::model::{
    Api, ApiEdge, ApiMethod, HttpVerb, MethodScope, RelationKind, SchemaVersion,
};
use crate::naming::{articlize, normalise_name};
use crate::query_params::{
    generate_embed_param, generate_fields_param, generate_pagination_params, generate_sort_param,
    generate_where_param, provide_id_param,
};
use crate::response::{generate_response_codes, success_code};
use crate::schema_mapper::SchemaMapper;
use crate::security::{requirement_list, RouteSecurity, SecurityProvider};
use crate::type_expr::{provide_ref, TypeResolver};
use log::debug;
use serde_json::{json, Map, Value};
use url::Url;

/// One CRUD operation to emit at a path.
struct OperationSpec {
    verb: HttpVerb,
    description: String,
    /// The id parameter name for item-scoped operations; empty otherwise.
    parameter: String,
    /// The named schema referenced by the request body, when the verb
    /// carries one.
    ref_name: Option<String>,
    /// Scheme names guarding the operation, when a security collaborator
    /// answered for this verb.
    security: Option<Vec<String>>,
}

/// Maps an API graph to a Swagger 2 or OpenAPI 3 document.
pub struct ApiSwaggerMapper<'a> {
    api: &'a Api,
    overlay: DocumentationOverlay,
    security: Option<&'a dyn SecurityProvider>,
    /// Maximum relation-traversal depth; the root level counts as 1.
    pub level_limit: usize,
    /// When set, descending into a relation appends `/relationName` to
    /// the tag so nested resources carry hierarchical tags.
    pub extended_tags: bool,
}

impl<'a> ApiSwaggerMapper<'a> {
    /// Creates a mapper with an empty overlay, no security collaborator,
    /// the default depth limit of 2 and extended tags enabled.
    pub fn new(api: &'a Api) -> Self {
        Self {
            api,
            overlay: DocumentationOverlay::empty(),
            security: None,
            level_limit: 2,
            extended_tags: true,
        }
    }

    /// Attaches a documentation overlay.
    pub fn with_overlay(mut self, overlay: DocumentationOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Attaches a security collaborator, consumed under OpenAPI 3 only.
    pub fn with_security(mut self, provider: &'a dyn SecurityProvider) -> Self {
        self.security = Some(provider);
        self
    }

    /// Builds the document for the requested dialect.
    pub fn map(&self, version: SchemaVersion) -> Value {
        match version {
            SchemaVersion::V2 => self.map_v2(),
            SchemaVersion::V3 => self.map_v3(),
        }
    }

    /// Builds the Swagger 2.0 document.
    pub fn map_v2(&self) -> Value {
        debug!("building swagger 2 document for {}", self.api.service.name);
        let schema_mapper = SchemaMapper::new(&self.overlay);

        let mut document = Map::new();
        document.insert("swagger".to_string(), json!("2.0"));
        document.insert("info".to_string(), self.build_info());
        document.insert("consumes".to_string(), json!(["application/json"]));
        document.insert("produces".to_string(), json!(["application/json"]));
        document.insert(
            "paths".to_string(),
            Value::Object(self.map_edges(SchemaVersion::V2)),
        );
        document.insert(
            "definitions".to_string(),
            Value::Object(schema_mapper.map_schemas(self.api)),
        );

        if let Some(url_text) = &self.api.url {
            // An unparsable base URL omits host/basePath rather than
            // emitting nulls.
            if let Ok(parsed) = Url::parse(url_text) {
                if let Some(host) = parsed.host_str() {
                    let host = match parsed.port() {
                        Some(port) => format!("{}:{}", host, port),
                        None => host.to_string(),
                    };
                    document.insert("host".to_string(), json!(host));
                }
                document.insert("basePath".to_string(), json!(parsed.path()));
            }
        }

        Value::Object(document)
    }

    /// Builds the OpenAPI 3.0 document.
    pub fn map_v3(&self) -> Value {
        debug!("building openapi 3 document for {}", self.api.service.name);
        let schema_mapper = SchemaMapper::new(&self.overlay);

        let mut components = Map::new();
        components.insert(
            "schemas".to_string(),
            Value::Object(schema_mapper.map_schemas(self.api)),
        );
        if let Some(provider) = self.security {
            components.insert(
                "securitySchemes".to_string(),
                Value::Object(provider.security_schemes()),
            );
        }

        let mut document = Map::new();
        document.insert("openapi".to_string(), json!("3.0.0"));
        document.insert("info".to_string(), self.build_info());
        document.insert(
            "paths".to_string(),
            Value::Object(self.map_edges(SchemaVersion::V3)),
        );
        document.insert("components".to_string(), Value::Object(components));

        if let Some(url) = &self.api.url {
            document.insert("servers".to_string(), json!([{ "url": url }]));
        }

        Value::Object(document)
    }

    fn build_info(&self) -> Value {
        let mut info = Map::new();
        match &self.api.info {
            Some(block) => {
                info.insert("title".to_string(), json!(block.title));
                if let Some(description) = &block.description {
                    info.insert("description".to_string(), json!(description));
                }
            }
            None => {
                info.insert("title".to_string(), json!("API"));
            }
        }
        info.insert("version".to_string(), json!(self.api.service.version));
        Value::Object(info)
    }

    fn map_edges(&self, version: SchemaVersion) -> Map<String, Value> {
        let mut output = Map::new();
        for edge in self.api.edges.iter().filter(|e| !e.external) {
            let tag = normalise_name(&edge.plural_name);
            self.provide_routes(
                &mut output,
                &tag,
                edge,
                version,
                format!("/{}", edge.plural_name),
                1,
                "",
                RelationKind::OneToMany,
            );
        }
        output
    }

    /// The traversal, parametrized by the cardinality that led into the
    /// current edge. Duplicate path keys from independently traversed
    /// relations overwrite (last write wins).
    #[allow(clippy::too_many_arguments)]
    fn provide_routes(
        &self,
        target: &mut Map<String, Value>,
        tag: &str,
        edge: &ApiEdge,
        version: SchemaVersion,
        prefix: String,
        level: usize,
        id_param: &str,
        mode: RelationKind,
    ) {
        if level > self.level_limit {
            return;
        }

        match mode {
            RelationKind::OneToMany => {
                let operations = self.generate_all_operations(&prefix, edge, version, "");
                self.provide_path(target, tag, &prefix, operations, edge, version, id_param);

                let item_prefix = format!("{}/{{{}}}", prefix, edge.id_field);
                let operations =
                    self.generate_all_operations(&item_prefix, edge, version, &edge.id_field);
                self.provide_path(target, tag, &item_prefix, operations, edge, version, id_param);

                let inner_id = if edge.id_field.is_empty() {
                    id_param
                } else {
                    &edge.id_field
                };
                for method in &edge.methods {
                    if matches!(method.scope, MethodScope::Collection | MethodScope::Edge) {
                        self.provide_method(target, tag, &prefix, method, edge, version, id_param);
                    }
                    if matches!(method.scope, MethodScope::Entry | MethodScope::Edge) {
                        self.provide_method(
                            target,
                            tag,
                            &item_prefix,
                            method,
                            edge,
                            version,
                            inner_id,
                        );
                    }
                }

                for relation in edge.owned_relations().filter(|r| !r.external) {
                    let Some(target_edge) = self.api.edge(&relation.to) else {
                        continue;
                    };
                    let next_prefix =
                        format!("{}/{{{}}}/{}", prefix, edge.id_field, relation.name);
                    self.provide_routes(
                        target,
                        &self.relation_tag(tag, relation.name.as_str()),
                        target_edge,
                        version,
                        next_prefix,
                        level + 1,
                        inner_id,
                        relation.kind,
                    );
                }
            }

            RelationKind::OneToOne => {
                let operations = self.generate_all_operations(&prefix, edge, version, "");
                self.provide_path(target, tag, &prefix, operations, edge, version, id_param);

                for method in &edge.methods {
                    if matches!(method.scope, MethodScope::Entry | MethodScope::Edge) {
                        self.provide_method(target, tag, &prefix, method, edge, version, id_param);
                    }
                }

                for relation in edge.owned_relations().filter(|r| !r.external) {
                    let Some(target_edge) = self.api.edge(&relation.to) else {
                        continue;
                    };
                    let next_prefix = format!("{}/{}", prefix, relation.name);
                    self.provide_routes(
                        target,
                        &self.relation_tag(tag, relation.name.as_str()),
                        target_edge,
                        version,
                        next_prefix,
                        level + 1,
                        id_param,
                        relation.kind,
                    );
                }
            }
        }
    }

    fn relation_tag(&self, tag: &str, relation_name: &str) -> String {
        if self.extended_tags {
            format!("{}/{}", tag, relation_name)
        } else {
            tag.to_string()
        }
    }

    /// The CRUD operations permitted at one path, derived from the
    /// edge's allow flags.
    fn generate_all_operations(
        &self,
        path: &str,
        edge: &ApiEdge,
        version: SchemaVersion,
        id_param: &str,
    ) -> Vec<OperationSpec> {
        let has_id = !id_param.is_empty();
        let extra = if has_id { " by ID" } else { "" };
        let public_edge_name = articlize(&normalise_name(&edge.name));
        let public_plural_name = normalise_name(&edge.plural_name);

        let security: RouteSecurity = match (version, self.security) {
            (SchemaVersion::V3, Some(provider)) => {
                provider.security_for_route(path, &HttpVerb::ALL)
            }
            _ => RouteSecurity::new(),
        };

        let mut output = Vec::new();

        if (edge.allow_get && has_id) || (edge.allow_list && !has_id) {
            output.push(OperationSpec {
                verb: HttpVerb::Get,
                description: if has_id {
                    format!("Get {}", public_edge_name)
                } else {
                    format!("List {}", public_plural_name)
                },
                parameter: id_param.to_string(),
                ref_name: None,
                security: security.get(&HttpVerb::Get).cloned(),
            });
        }

        if edge.allow_patch {
            output.push(OperationSpec {
                verb: HttpVerb::Patch,
                description: format!("Modify {}{}", public_edge_name, extra),
                parameter: id_param.to_string(),
                ref_name: Some(edge.name.clone()),
                security: security.get(&HttpVerb::Patch).cloned(),
            });
        }

        if edge.allow_update {
            output.push(OperationSpec {
                verb: HttpVerb::Put,
                description: format!("Replace {}{}", public_edge_name, extra),
                parameter: id_param.to_string(),
                ref_name: Some(edge.name.clone()),
                security: security.get(&HttpVerb::Put).cloned(),
            });
        }

        if edge.allow_remove {
            output.push(OperationSpec {
                verb: HttpVerb::Delete,
                description: format!("Delete {}{}", public_edge_name, extra),
                parameter: id_param.to_string(),
                ref_name: None,
                security: security.get(&HttpVerb::Delete).cloned(),
            });
        }

        if !has_id && edge.allow_create {
            output.push(OperationSpec {
                verb: HttpVerb::Post,
                description: format!("Create {}", public_edge_name),
                parameter: id_param.to_string(),
                ref_name: Some(edge.name.clone()),
                security: security.get(&HttpVerb::Post).cloned(),
            });
        }

        output
    }

    #[allow(clippy::too_many_arguments)]
    fn provide_path(
        &self,
        target: &mut Map<String, Value>,
        tag: &str,
        path: &str,
        operations: Vec<OperationSpec>,
        edge: &ApiEdge,
        version: SchemaVersion,
        id_param: &str,
    ) {
        let mut path_item = Map::new();
        if !id_param.is_empty() {
            // The inherited parent id parameter is declared at path level;
            // the edge's own id rides on the operations.
            path_item.insert(
                "parameters".to_string(),
                json!([provide_id_param(id_param, version)]),
            );
        }

        for operation in operations {
            self.provide_operation(&mut path_item, path, tag, &operation, edge, version);
        }

        target.insert(path.to_string(), Value::Object(path_item));
    }

    fn provide_operation(
        &self,
        path_item: &mut Map<String, Value>,
        path: &str,
        tag: &str,
        spec: &OperationSpec,
        edge: &ApiEdge,
        version: SchemaVersion,
    ) {
        let mut parameters = Vec::new();
        if !spec.parameter.is_empty() {
            parameters.push(provide_id_param(&spec.parameter, version));
        }

        let docs = self
            .overlay
            .operation_comment(&edge.name, path, spec.verb)
            .cloned();
        let public_edge_name = normalise_name(&edge.name);
        let resolver = TypeResolver::new(self.api);

        let mut responses = generate_response_codes(
            docs.as_ref(),
            version,
            &format!("The requested {}", public_edge_name),
            &resolver,
        );

        let mut schema = json!({ "$ref": provide_ref(&edge.name, version) });
        let is_plain_get = spec.verb == HttpVerb::Get && spec.parameter.is_empty();
        if is_plain_get {
            schema = json!({ "type": "array", "items": schema });
            generate_sort_param(&mut parameters, &edge.schema.fields, version);
            generate_pagination_params(&mut parameters, version);
            let schema_mapper = SchemaMapper::new(&self.overlay);
            generate_where_param(&mut parameters, &edge.schema, &schema_mapper, version);
        }

        let success = success_code(&responses);
        let mut request_body = None;
        match version {
            SchemaVersion::V2 => {
                if spec.ref_name.is_some() {
                    parameters.push(json!({
                        "in": "body",
                        "name": "body",
                        "description": format!("The input {} object", public_edge_name),
                        "required": true,
                        "schema": schema.clone(),
                    }));
                }
                if let Some(code) = &success {
                    if let Some(Value::Object(entry)) = responses.get_mut(code) {
                        entry.insert("schema".to_string(), schema.clone());
                    }
                }
            }
            SchemaVersion::V3 => {
                let content = json!({ "application/json": { "schema": schema } });
                if let Some(code) = &success {
                    if let Some(Value::Object(entry)) = responses.get_mut(code) {
                        entry.insert("content".to_string(), content.clone());
                    }
                }
                if spec.ref_name.is_some() {
                    request_body = Some(json!({
                        "required": true,
                        "description": format!("The input {} object", public_edge_name),
                        "content": content,
                    }));
                }
            }
        }

        if spec.verb == HttpVerb::Get {
            generate_embed_param(&mut parameters, edge, version);
            generate_fields_param(&mut parameters, &edge.schema.fields, version);
        }

        if spec.verb == HttpVerb::Post {
            let has_documented_codes = docs
                .as_ref()
                .is_some_and(|d| !d.response_codes.is_empty());
            if has_documented_codes {
                responses.insert("201".to_string(), json!({ "description": "Created" }));
            } else {
                responses = Map::new();
                responses.insert("201".to_string(), json!({ "description": "Created" }));
            }
        } else if !spec.parameter.is_empty() {
            responses.insert("404".to_string(), json!({ "description": "Not Found" }));
        }

        let mut operation = Map::new();
        operation.insert("summary".to_string(), json!(spec.description));
        operation.insert(
            "description".to_string(),
            match &docs {
                Some(docs) => json!(docs.description),
                None => json!(spec.description),
            },
        );
        operation.insert("tags".to_string(), json!([tag]));
        operation.insert("parameters".to_string(), Value::Array(parameters));
        if version == SchemaVersion::V2 {
            operation.insert("consumes".to_string(), json!(["application/json"]));
            operation.insert("produces".to_string(), json!(["application/json"]));
        }
        if let Some(body) = request_body {
            operation.insert("requestBody".to_string(), body);
        }
        operation.insert("responses".to_string(), Value::Object(responses));
        if let Some(schemes) = &spec.security {
            if !schemes.is_empty() {
                operation.insert("security".to_string(), requirement_list(schemes));
            }
        }

        path_item.insert(spec.verb.as_str().to_string(), Value::Object(operation));
    }

    #[allow(clippy::too_many_arguments)]
    fn provide_method(
        &self,
        target: &mut Map<String, Value>,
        tag: &str,
        prefix: &str,
        method: &ApiMethod,
        edge: &ApiEdge,
        version: SchemaVersion,
        id_param: &str,
    ) {
        let verbs = method.verbs();
        let route = format!("{}/{}", prefix, method.name);

        let mut path_item = Map::new();
        if !id_param.is_empty() {
            path_item.insert(
                "parameters".to_string(),
                json!([provide_id_param(id_param, version)]),
            );
        }

        let method_docs = self.overlay.entry(&edge.name, &method.name);
        let base_comment = method_docs
            .and_then(|entry| entry.comment.clone())
            .unwrap_or_default();
        let data = self.provide_method_docs(&base_comment, tag, method, edge, version);

        let security: RouteSecurity = match (version, self.security) {
            (SchemaVersion::V3, Some(provider)) => provider.security_for_route(&route, &verbs),
            _ => RouteSecurity::new(),
        };

        for verb in verbs {
            let alternate = method_docs
                .and_then(|entry| entry.verbs.get(verb.as_str()))
                .and_then(|v| v.comment.as_ref());
            let mut operation = match alternate {
                Some(comment) => self.provide_method_docs(comment, tag, method, edge, version),
                None => data.clone(),
            };
            if let Some(schemes) = security.get(&verb) {
                if !schemes.is_empty() {
                    operation.insert("security".to_string(), requirement_list(schemes));
                }
            }
            path_item.insert(verb.as_str().to_string(), Value::Object(operation));
        }

        target.insert(route, Value::Object(path_item));
    }

    fn provide_method_docs(
        &self,
        docs: &MethodComment,
        tag: &str,
        method: &ApiMethod,
        edge: &ApiEdge,
        version: SchemaVersion,
    ) -> Map<String, Value> {
        let public_name = normalise_name(&method.name);
        let resolver = TypeResolver::new(self.api);

        let (parameters, request_body) = self.generate_method_parameters(docs, edge, version);
        let mut responses = generate_response_codes(Some(docs), version, "OK", &resolver);

        if version == SchemaVersion::V3 {
            // Re-wrap schema-bearing responses into content form.
            for value in responses.values_mut() {
                if let Value::Object(entry) = value {
                    if let Some(schema) = entry.remove("schema") {
                        let description =
                            entry.get("description").cloned().unwrap_or(json!(""));
                        let mut wrapped = Map::new();
                        wrapped.insert("description".to_string(), description);
                        wrapped.insert(
                            "content".to_string(),
                            json!({ "application/json": { "schema": schema } }),
                        );
                        *entry = wrapped;
                    }
                }
            }
        }

        let mut data = Map::new();
        data.insert(
            "summary".to_string(),
            if docs.summary.is_empty() {
                json!(format!("Call {}", public_name))
            } else {
                json!(docs.summary)
            },
        );
        data.insert("description".to_string(), json!(docs.description));
        data.insert("tags".to_string(), json!([tag]));
        data.insert("parameters".to_string(), Value::Array(parameters));
        if let Some(body) = request_body {
            data.insert("requestBody".to_string(), body);
        }
        data.insert("responses".to_string(), Value::Object(responses));
        if docs.is_deprecated() {
            data.insert("deprecated".to_string(), json!(true));
        }
        if version == SchemaVersion::V2 {
            data.insert("consumes".to_string(), json!(["application/json"]));
            data.insert("produces".to_string(), json!(["application/json"]));
        }
        data
    }

    /// Parameters (and, under OpenAPI 3, the request body) of a custom
    /// method, synthesized from its overlay comment.
    fn generate_method_parameters(
        &self,
        docs: &MethodComment,
        edge: &ApiEdge,
        version: SchemaVersion,
    ) -> (Vec<Value>, Option<Value>) {
        let resolver = TypeResolver::new(self.api);

        let mut output = Vec::new();
        let mut required = Vec::new();
        let mut body_properties = Map::new();
        let mut has_body = false;

        for param in &docs.params {
            match param.kind {
                ParamKind::Body => {
                    has_body = true;
                    if !param.optional {
                        required.push(Value::String(param.name.clone()));
                    }
                    let mut fragment = resolver.resolve_type(&param.type_, version);
                    if let Value::Object(fragment) = &mut fragment {
                        fragment.insert("description".to_string(), json!(param.summary));
                        if let Some(default) = &param.default_value {
                            fragment
                                .insert("default".to_string(), resolver.resolve_value(default));
                        }
                    }
                    body_properties.insert(param.name.clone(), fragment);
                }
                ParamKind::Query => {
                    let mut entry = Map::new();
                    entry.insert("name".to_string(), json!(param.name));
                    entry.insert("description".to_string(), json!(param.summary));
                    entry.insert("in".to_string(), json!("query"));
                    entry.insert("required".to_string(), json!(!param.optional));
                    if let Value::Object(fragment) =
                        resolver.resolve_type(&param.type_, version)
                    {
                        for (key, value) in fragment {
                            entry.insert(key, value);
                        }
                    }
                    if let Some(default) = &param.default_value {
                        entry.insert("default".to_string(), resolver.resolve_value(default));
                    }
                    output.push(Value::Object(entry));
                }
            }
        }

        let groups = &docs.query_params;
        let all = groups.iter().any(|g| g == "all");
        if all || groups.iter().any(|g| g == "pagination") {
            generate_pagination_params(&mut output, version);
        }
        if all || groups.iter().any(|g| g == "embed") {
            generate_embed_param(&mut output, edge, version);
        }
        if all || groups.iter().any(|g| g == "fields") {
            generate_fields_param(&mut output, &edge.schema.fields, version);
        }
        if all || groups.iter().any(|g| g == "sort") {
            generate_sort_param(&mut output, &edge.schema.fields, version);
        }
        if all || groups.iter().any(|g| g == "where") {
            let schema_mapper = SchemaMapper::new(&self.overlay);
            generate_where_param(&mut output, &edge.schema, &schema_mapper, version);
        }

        if !has_body {
            return (output, None);
        }

        let mut body_schema = Map::new();
        body_schema.insert("type".to_string(), json!("object"));
        if !required.is_empty() {
            body_schema.insert("required".to_string(), Value::Array(required));
        }
        body_schema.insert("properties".to_string(), Value::Object(body_properties));

        match version {
            SchemaVersion::V2 => {
                output.push(json!({
                    "in": "body",
                    "name": "body",
                    "required": true,
                    "schema": body_schema,
                }));
                (output, None)
            }
            SchemaVersion::V3 => (
                output,
                Some(json!({
                    "required": true,
                    "content": { "application/json": { "schema": body_schema } },
                })),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiInfo, ApiRelation, RequestKind, ServiceInfo};
    use pretty_assertions::assert_eq;

    fn api() -> Api {
        Api::new("1.0", ServiceInfo::new("inventory", "2.3.0"))
            .with_info(ApiInfo::new("Inventory API"))
            .with_edge(ApiEdge::new("widget", "widgets"))
    }

    #[test]
    fn test_v2_envelope_keys() {
        let api = api().with_url("https://api.example.com:8443/v1");
        let document = ApiSwaggerMapper::new(&api).map_v2();
        assert_eq!(document["swagger"], "2.0");
        assert_eq!(document["info"]["title"], "Inventory API");
        assert_eq!(document["info"]["version"], "2.3.0");
        assert_eq!(document["consumes"], json!(["application/json"]));
        assert_eq!(document["host"], "api.example.com:8443");
        assert_eq!(document["basePath"], "/v1");
        assert!(document["definitions"]["widget"].is_object());
        assert!(document.get("openapi").is_none());
    }

    #[test]
    fn test_v3_envelope_keys() {
        let api = api().with_url("https://api.example.com/v1");
        let document = ApiSwaggerMapper::new(&api).map_v3();
        assert_eq!(document["openapi"], "3.0.0");
        assert_eq!(
            document["servers"],
            json!([{ "url": "https://api.example.com/v1" }])
        );
        assert!(document["components"]["schemas"]["widget"].is_object());
        assert!(document.get("swagger").is_none());
        assert!(document.get("consumes").is_none());
    }

    #[test]
    fn test_info_defaults_to_bare_title() {
        let api = Api::new("1.0", ServiceInfo::new("svc", "0.1.0"))
            .with_edge(ApiEdge::new("widget", "widgets"));
        let document = ApiSwaggerMapper::new(&api).map_v3();
        assert_eq!(document["info"], json!({ "title": "API", "version": "0.1.0" }));
    }

    #[test]
    fn test_unparsable_url_omits_host() {
        let api = api().with_url("not a url");
        let document = ApiSwaggerMapper::new(&api).map_v2();
        assert!(document.get("host").is_none());
        assert!(document.get("basePath").is_none());
    }

    #[test]
    fn test_crud_verbs_from_allow_flags() {
        let mut edge = ApiEdge::new("widget", "widgets");
        edge.allow_update = false;
        edge.allow_remove = false;
        let api = Api::new("1.0", ServiceInfo::new("svc", "1.0.0")).with_edge(edge);
        let document = ApiSwaggerMapper::new(&api).map_v3();

        let collection = &document["paths"]["/widgets"];
        assert!(collection.get("get").is_some());
        assert!(collection.get("post").is_some());
        assert!(collection.get("patch").is_some());
        assert!(collection.get("put").is_none());
        assert!(collection.get("delete").is_none());

        let item = &document["paths"]["/widgets/{id}"];
        assert!(item.get("get").is_some());
        // Creation never appears on item paths.
        assert!(item.get("post").is_none());
    }

    #[test]
    fn test_method_verb_asymmetry() {
        let edge = ApiEdge::new("widget", "widgets").with_method(ApiMethod::new(
            "sync",
            MethodScope::Collection,
            vec![RequestKind::Update, RequestKind::Create],
        ));
        let api = Api::new("1.0", ServiceInfo::new("svc", "1.0.0")).with_edge(edge);
        let document = ApiSwaggerMapper::new(&api).map_v3();

        let path = &document["paths"]["/widgets/sync"];
        // Method-level Update decodes to post, Create to put.
        assert!(path.get("post").is_some());
        assert!(path.get("put").is_some());
        assert!(path.get("get").is_none());
    }

    #[test]
    fn test_extended_tags_on_nested_paths() {
        let widget = ApiEdge::new("widget", "widgets")
            .with_relation(ApiRelation::new("widget", "part", RelationKind::OneToMany));
        let part = ApiEdge::new("part", "parts");
        let api = Api::new("1.0", ServiceInfo::new("svc", "1.0.0"))
            .with_edge(widget)
            .with_edge(part);

        let document = ApiSwaggerMapper::new(&api).map_v3();
        let nested = &document["paths"]["/widgets/{id}/part"];
        assert_eq!(nested["get"]["tags"], json!(["Widgets/part"]));

        let mut flat = ApiSwaggerMapper::new(&api);
        flat.extended_tags = false;
        let document = flat.map_v3();
        let nested = &document["paths"]["/widgets/{id}/part"];
        assert_eq!(nested["get"]["tags"], json!(["Widgets"]));
    }

    #[test]
    fn test_nested_path_declares_parent_id_param() {
        let widget = ApiEdge::new("widget", "widgets")
            .with_relation(ApiRelation::new("widget", "profile", RelationKind::OneToOne));
        let profile = ApiEdge::new("profile", "profiles").id_field("profileId");
        let api = Api::new("1.0", ServiceInfo::new("svc", "1.0.0"))
            .with_edge(widget)
            .with_edge(profile);

        let document = ApiSwaggerMapper::new(&api).map_v3();
        let nested = &document["paths"]["/widgets/{id}/profile"];
        // The parent's id is a path-level parameter on the nested item.
        assert_eq!(nested["parameters"][0]["name"], "id");
        // Singular targets have no id-segmented path of their own.
        assert!(document["paths"]
            .get("/widgets/{id}/profile/{profileId}")
            .is_none());
    }
}
