#![deny(missing_docs)]

//! # Provider Layer
//!
//! Fans a route or document build out over a set of API graphs, one
//! output per graph. Configuration set on a provider is forwarded to
//! every mapper it constructs.

use crate::docs::DocumentationOverlay;
use crate::error::AppResult;
use crate::model::{Api, SchemaVersion};
use crate::route_mapper::ApiMapper;
use crate::security::SecurityProvider;
use crate::swagger_mapper::ApiSwaggerMapper;
use serde_json::Value;

/// The route list of one API graph, labelled with the graph's version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMap {
    /// The API version the routes belong to.
    pub version: String,
    /// The flat, deduplicated route-template list.
    pub routes: Vec<String>,
}

/// Produces plain route lists for a set of API graphs.
pub struct ApiMapProvider<'a> {
    apis: &'a [Api],
    /// Maximum relation-traversal depth forwarded to every mapper.
    pub level_limit: usize,
}

impl<'a> ApiMapProvider<'a> {
    /// Creates a provider with the default depth limit of 2.
    pub fn new(apis: &'a [Api]) -> Self {
        Self {
            apis,
            level_limit: 2,
        }
    }

    /// One route map per API graph, in input order.
    pub fn map(&self) -> Vec<RouteMap> {
        self.apis
            .iter()
            .map(|api| {
                let mut mapper = ApiMapper::new(api);
                mapper.level_limit = self.level_limit;
                RouteMap {
                    version: api.version.clone(),
                    routes: mapper.map(),
                }
            })
            .collect()
    }
}

/// Produces Swagger/OpenAPI documents for a set of API graphs.
pub struct ApiSwaggerProvider<'a> {
    apis: &'a [Api],
    overlay: DocumentationOverlay,
    security: Option<&'a dyn SecurityProvider>,
    /// Maximum relation-traversal depth forwarded to every mapper.
    pub level_limit: usize,
    /// Extended-tag mode forwarded to every mapper.
    pub extended_tags: bool,
}

impl<'a> ApiSwaggerProvider<'a> {
    /// Creates a provider with an empty overlay, no security collaborator,
    /// the default depth limit of 2 and extended tags enabled.
    pub fn new(apis: &'a [Api]) -> Self {
        Self {
            apis,
            overlay: DocumentationOverlay::empty(),
            security: None,
            level_limit: 2,
            extended_tags: true,
        }
    }

    /// Attaches a documentation overlay, shared by every graph.
    pub fn with_overlay(mut self, overlay: DocumentationOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Attaches a security collaborator, consumed under OpenAPI 3 only.
    pub fn with_security(mut self, provider: &'a dyn SecurityProvider) -> Self {
        self.security = Some(provider);
        self
    }

    /// One document per API graph, in input order.
    pub fn map(&self, version: SchemaVersion) -> Vec<Value> {
        self.apis
            .iter()
            .map(|api| {
                let mut mapper =
                    ApiSwaggerMapper::new(api).with_overlay(self.overlay.clone());
                if let Some(provider) = self.security {
                    mapper = mapper.with_security(provider);
                }
                mapper.level_limit = self.level_limit;
                mapper.extended_tags = self.extended_tags;
                mapper.map(version)
            })
            .collect()
    }

    /// One YAML rendering per API graph, in input order.
    pub fn map_to_yaml(&self, version: SchemaVersion) -> AppResult<Vec<String>> {
        self.map(version)
            .iter()
            .map(|document| Ok(serde_yaml::to_string(document)?))
            .collect()
    }
}
