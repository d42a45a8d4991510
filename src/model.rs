#![deny(missing_docs)]

//! # Resource Graph Model
//!
//! Definition of the immutable input structures the mappers traverse: the
//! API graph, its resource edges, edge-to-edge relations, custom methods
//! and per-edge field schemas.
//!
//! The graph is plain data. Relations refer to their source and target
//! edges **by name** and targets are resolved through [`Api::edge`], so a
//! graph containing relationship cycles is representable without any
//! shared-ownership gymnastics. Nothing here validates the graph; the
//! mappers trust their input contract.

use indexmap::IndexMap;
use std::fmt;

/// The HTTP verbs an operation object can be keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
}

impl HttpVerb {
    /// All verbs, in the order CRUD operations are probed for a path.
    pub const ALL: [HttpVerb; 5] = [
        HttpVerb::Get,
        HttpVerb::Put,
        HttpVerb::Patch,
        HttpVerb::Delete,
        HttpVerb::Post,
    ];

    /// The lowercase wire name of the verb, as used for operation keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Patch => "patch",
            HttpVerb::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The target specification dialect.
///
/// Selects the document envelope and the in-body-vs-content parameter
/// shape throughout generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Swagger 2.0: `consumes`/`produces`, `in: body` parameters,
    /// `#/definitions/*` references.
    V2,
    /// OpenAPI 3.0: `requestBody`/`content` wrappers,
    /// `#/components/schemas/*` references.
    V3,
}

/// Cardinality of a relation, which decides the traversal mode of its
/// target edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Exactly one related entry; the target is addressed without an id
    /// segment.
    OneToOne,
    /// A collection of related entries; the target gets collection and
    /// id-segmented item paths.
    OneToMany,
}

/// Where a custom method is exposed on its edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodScope {
    /// Single-item level only (`/widgets/:id/render`).
    Entry,
    /// Collection level only (`/widgets/report`).
    Collection,
    /// Both levels.
    Edge,
}

/// The request kinds a custom method accepts.
///
/// This is the explicit set-of-verbs form of what the upstream data model
/// encodes as a bitmask. Note the intentional asymmetry: `Update` maps to
/// HTTP `post` at the method level, while the edge-level update flag maps
/// to `put`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Maps to `put`.
    Create,
    /// Maps to `get`.
    Read,
    /// Maps to `post`.
    Update,
    /// Maps to `patch`.
    Patch,
    /// Maps to `delete`.
    Delete,
}

impl RequestKind {
    /// Fixed decode order, so verb emission is deterministic regardless of
    /// how a method's accepted set was constructed.
    pub const ALL: [RequestKind; 5] = [
        RequestKind::Create,
        RequestKind::Read,
        RequestKind::Update,
        RequestKind::Patch,
        RequestKind::Delete,
    ];

    /// The HTTP verb a request kind is served under.
    pub fn verb(&self) -> HttpVerb {
        match self {
            RequestKind::Create => HttpVerb::Put,
            RequestKind::Read => HttpVerb::Get,
            RequestKind::Update => HttpVerb::Post,
            RequestKind::Patch => HttpVerb::Patch,
            RequestKind::Delete => HttpVerb::Delete,
        }
    }
}

/// The type of a single field in an edge schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A numeric field.
    Number,
    /// A string field.
    String,
    /// A boolean field.
    Boolean,
    /// A date field (`string` with `format: date`).
    Date,
    /// A reference to another entry by id (`string` with an ObjectId
    /// pattern).
    Reference,
    /// A mixed/untyped field (plain `object`).
    Mixed,
    /// A nested structured object with its own fields.
    Object(IndexMap<String, SchemaField>),
    /// An array of a single element type.
    Array(Box<FieldType>),
    /// A named sub-schema wrapper around a nested field set.
    SubSchema(IndexMap<String, SchemaField>),
}

/// A single field descriptor in an edge schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    /// The field type.
    pub type_: FieldType,
    /// Whether the field is listed in the schema's `required` set.
    pub required: bool,
}

impl SchemaField {
    /// Creates an optional field of the given type.
    pub fn new(type_: FieldType) -> Self {
        Self {
            type_,
            required: false,
        }
    }

    /// Marks the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The field-descriptor tree of an edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiEdgeSchema {
    /// Field names in declaration order; used for sort patterns, `fields`
    /// enums and `where` property order.
    pub fields: Vec<String>,
    /// The descriptor tree itself, keyed by field name.
    pub original: IndexMap<String, SchemaField>,
}

impl ApiEdgeSchema {
    /// Creates a schema from a descriptor tree; field order follows the
    /// map's insertion order.
    pub fn new(original: IndexMap<String, SchemaField>) -> Self {
        let fields = original.keys().cloned().collect();
        Self { fields, original }
    }

    /// A schema with no fields.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A directed, named link from one edge to another.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRelation {
    /// Name of the edge owning the relation. Traversal only follows
    /// relations whose `from` matches the edge currently being visited.
    pub from: String,
    /// Name of the target edge, resolved through [`Api::edge`].
    pub to: String,
    /// The path segment and display name of the relation.
    pub name: String,
    /// Cardinality, selecting the traversal mode of the target.
    pub kind: RelationKind,
    /// External relations are skipped by the document mapper.
    pub external: bool,
}

impl ApiRelation {
    /// Creates a relation between two edges, named after the target by
    /// default.
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationKind) -> Self {
        let to = to.into();
        Self {
            from: from.into(),
            name: to.clone(),
            to,
            kind,
            external: false,
        }
    }

    /// Overrides the relation's path-segment name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the relation external.
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }
}

/// A custom (non-CRUD) action exposed on an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiMethod {
    /// The path segment appended to the edge path.
    pub name: String,
    /// Where the method is exposed.
    pub scope: MethodScope,
    /// The request kinds the method accepts; decoded in
    /// [`RequestKind::ALL`] order.
    pub accepted: Vec<RequestKind>,
}

impl ApiMethod {
    /// Creates a method.
    pub fn new(name: impl Into<String>, scope: MethodScope, accepted: Vec<RequestKind>) -> Self {
        Self {
            name: name.into(),
            scope,
            accepted,
        }
    }

    /// The HTTP verbs this method answers to, in fixed decode order.
    pub fn verbs(&self) -> Vec<HttpVerb> {
        RequestKind::ALL
            .iter()
            .filter(|kind| self.accepted.contains(kind))
            .map(RequestKind::verb)
            .collect()
    }
}

/// A resource type node in the API graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiEdge {
    /// Singular display name; also the name of the edge's schema
    /// definition in the generated document.
    pub name: String,
    /// Plural name; the root path segment and tag source.
    pub plural_name: String,
    /// Name of the id field used for item paths.
    pub id_field: String,
    /// The edge's field schema. Possibly empty, never absent.
    pub schema: ApiEdgeSchema,
    /// Custom methods, in declaration order.
    pub methods: Vec<ApiMethod>,
    /// Outgoing (and incoming) relations, in declaration order.
    pub relations: Vec<ApiRelation>,
    /// Whether single-item reads are permitted.
    pub allow_get: bool,
    /// Whether collection reads are permitted.
    pub allow_list: bool,
    /// Whether creation is permitted.
    pub allow_create: bool,
    /// Whether full replacement (`put`) is permitted.
    pub allow_update: bool,
    /// Whether partial modification (`patch`) is permitted.
    pub allow_patch: bool,
    /// Whether deletion is permitted.
    pub allow_remove: bool,
    /// External edges are excluded from document and route generation at
    /// the top level.
    pub external: bool,
}

impl ApiEdge {
    /// Creates an edge with every CRUD verb permitted and an `id` id
    /// field.
    pub fn new(name: impl Into<String>, plural_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural_name: plural_name.into(),
            id_field: "id".to_string(),
            schema: ApiEdgeSchema::empty(),
            methods: Vec::new(),
            relations: Vec::new(),
            allow_get: true,
            allow_list: true,
            allow_create: true,
            allow_update: true,
            allow_patch: true,
            allow_remove: true,
            external: false,
        }
    }

    /// Overrides the id field name.
    pub fn id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// Sets the edge schema.
    pub fn with_schema(mut self, schema: ApiEdgeSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Adds a custom method.
    pub fn with_method(mut self, method: ApiMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a relation.
    pub fn with_relation(mut self, relation: ApiRelation) -> Self {
        self.relations.push(relation);
        self
    }

    /// Marks the edge external.
    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Relations owned by this edge (whose `from` is this edge's name).
    pub fn owned_relations(&self) -> impl Iterator<Item = &ApiRelation> {
        self.relations.iter().filter(|r| r.from == self.name)
    }
}

/// Document-level metadata for the generated envelope's `info` object.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiInfo {
    /// The title of the API.
    pub title: String,
    /// Optional description for the API.
    pub description: Option<String>,
}

impl ApiInfo {
    /// Creates an info block with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets an optional description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The service owning the API; its version stamps the `info.version`
/// field of the generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInfo {
    /// Service name.
    pub name: String,
    /// Service version.
    pub version: String,
}

impl ServiceInfo {
    /// Creates a service descriptor.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// The root resource graph: an ordered sequence of edges plus envelope
/// metadata. Immutable for the duration of a mapping pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    /// The edges, in declaration order. Traversal order follows this
    /// order, which makes repeated generation deterministic.
    pub edges: Vec<ApiEdge>,
    /// The API version string reported alongside plain route maps.
    pub version: String,
    /// Optional `info` block; a bare `{title: "API"}` is synthesized when
    /// absent.
    pub info: Option<ApiInfo>,
    /// Optional base URL, populating `host`/`basePath` (v2) or `servers`
    /// (v3).
    pub url: Option<String>,
    /// The owning service.
    pub service: ServiceInfo,
}

impl Api {
    /// Creates an empty graph for the given service.
    pub fn new(version: impl Into<String>, service: ServiceInfo) -> Self {
        Self {
            edges: Vec::new(),
            version: version.into(),
            info: None,
            url: None,
            service,
        }
    }

    /// Adds an edge to the graph.
    pub fn with_edge(mut self, edge: ApiEdge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Sets the `info` block.
    pub fn with_info(mut self, info: ApiInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Sets the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Looks up an edge by name. Relation targets resolve through this.
    pub fn edge(&self, name: &str) -> Option<&ApiEdge> {
        self.edges.iter().find(|e| e.name == name)
    }
}
