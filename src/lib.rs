#![deny(missing_docs)]

//! # Edgedoc
//!
//! Maps a declarative REST resource graph (edges, relations, custom
//! methods) to flat route-template lists and to complete Swagger 2 /
//! OpenAPI 3 documents. Given identical inputs every mapper produces
//! structurally identical output, so repeated runs serialize
//! byte-identically.

/// Shared error types.
pub mod error;

/// The resource-graph data model.
pub mod model;

/// Documentation overlay structures and loading.
pub mod docs;

/// Security collaborator seam.
pub mod security;

/// Human-readable naming helpers.
pub mod naming;

/// Type-descriptor parsing and resolution.
pub mod type_expr;

/// Field-descriptor tree to JSON-schema mapping.
pub mod schema_mapper;

/// Response-code map generation.
pub mod response;

/// Query and path parameter builders.
pub mod query_params;

/// Plain route-template traversal.
pub mod route_mapper;

/// Swagger/OpenAPI document traversal and envelopes.
pub mod swagger_mapper;

/// Fan-out over sets of API graphs.
pub mod provider;

pub use docs::{DocumentationOverlay, MethodComment};
pub use error::{AppError, AppResult};
pub use model::{
    Api, ApiEdge, ApiEdgeSchema, ApiInfo, ApiMethod, ApiRelation, FieldType, HttpVerb,
    MethodScope, RelationKind, RequestKind, SchemaField, SchemaVersion, ServiceInfo,
};
pub use provider::{ApiMapProvider, ApiSwaggerProvider, RouteMap};
pub use route_mapper::ApiMapper;
pub use security::SecurityProvider;
pub use swagger_mapper::ApiSwaggerMapper;
