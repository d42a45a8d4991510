#![deny(missing_docs)]

//! # Route Mapper
//!
//! Produces the flat, deduplicated list of route-template strings
//! reachable from an API graph within a configured depth limit. Routes
//! use colon-prefixed parameter tokens (`/widgets/:id/parts`) and carry
//! no document semantics.
//!
//! The traversal is one recursive function parametrized by the relation
//! cardinality that led into the current edge: plural mode emits
//! collection and item paths, singular mode emits the plain path only.
//! An integer depth counter bounds exploration of cyclic relation
//! graphs; no cycle detection exists beyond it.

use crate::model::{Api, ApiEdge, MethodScope, RelationKind};
use log::debug;

/// Maps an API graph to plain route templates.
pub struct ApiMapper<'a> {
    api: &'a Api,
    /// Maximum relation-traversal depth; the root level counts as 1.
    pub level_limit: usize,
}

impl<'a> ApiMapper<'a> {
    /// Creates a mapper with the default depth limit of 2.
    pub fn new(api: &'a Api) -> Self {
        Self { api, level_limit: 2 }
    }

    /// The deduplicated route list, in first-seen traversal order.
    pub fn map(&self) -> Vec<String> {
        debug!(
            "mapping routes for {} edges (depth limit {})",
            self.api.edges.len(),
            self.level_limit
        );

        let mut output: Vec<String> = Vec::new();
        for edge in self.api.edges.iter().filter(|e| !e.external) {
            let mut routes = Vec::new();
            self.collect_routes(
                edge,
                format!("/{}", edge.plural_name),
                1,
                RelationKind::OneToMany,
                &mut routes,
            );
            for route in routes {
                if !output.contains(&route) {
                    output.push(route);
                }
            }
        }
        output
    }

    fn collect_routes(
        &self,
        edge: &ApiEdge,
        prefix: String,
        level: usize,
        mode: RelationKind,
        output: &mut Vec<String>,
    ) {
        if level > self.level_limit {
            return;
        }

        output.push(prefix.clone());
        if mode == RelationKind::OneToMany {
            output.push(format!("{}/:{}", prefix, edge.id_field));
        }

        for method in &edge.methods {
            match mode {
                RelationKind::OneToMany => {
                    if matches!(method.scope, MethodScope::Collection | MethodScope::Edge) {
                        output.push(format!("{}/{}", prefix, method.name));
                    }
                    if matches!(method.scope, MethodScope::Entry | MethodScope::Edge) {
                        output.push(format!("{}/:{}/{}", prefix, edge.id_field, method.name));
                    }
                }
                RelationKind::OneToOne => {
                    if matches!(method.scope, MethodScope::Entry | MethodScope::Collection) {
                        output.push(format!("{}/{}", prefix, method.name));
                    }
                }
            }
        }

        for relation in edge.owned_relations() {
            let Some(target) = self.api.edge(&relation.to) else {
                // Dangling relation targets are a malformed-graph case;
                // behavior is undefined, so they are simply skipped.
                continue;
            };
            let next_prefix = match mode {
                RelationKind::OneToMany => {
                    format!("{}/:{}/{}", prefix, edge.id_field, relation.name)
                }
                RelationKind::OneToOne => format!("{}/{}", prefix, relation.name),
            };
            self.collect_routes(target, next_prefix, level + 1, relation.kind, output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApiMethod, ApiRelation, RequestKind, ServiceInfo};
    use pretty_assertions::assert_eq;

    fn api_with(edges: Vec<ApiEdge>) -> Api {
        let mut api = Api::new("1.0", ServiceInfo::new("svc", "1.0.0"));
        for edge in edges {
            api = api.with_edge(edge);
        }
        api
    }

    #[test]
    fn test_edge_without_relations() {
        let api = api_with(vec![ApiEdge::new("widget", "widgets")]);
        let mapper = ApiMapper::new(&api);
        assert_eq!(mapper.map(), vec!["/widgets", "/widgets/:id"]);
    }

    #[test]
    fn test_method_scopes_in_plural_mode() {
        let edge = ApiEdge::new("widget", "widgets")
            .with_method(ApiMethod::new(
                "report",
                MethodScope::Collection,
                vec![RequestKind::Read],
            ))
            .with_method(ApiMethod::new(
                "render",
                MethodScope::Entry,
                vec![RequestKind::Read],
            ))
            .with_method(ApiMethod::new(
                "sync",
                MethodScope::Edge,
                vec![RequestKind::Update],
            ));
        let api = api_with(vec![edge]);
        let mapper = ApiMapper::new(&api);
        assert_eq!(
            mapper.map(),
            vec![
                "/widgets",
                "/widgets/:id",
                "/widgets/report",
                "/widgets/:id/render",
                "/widgets/sync",
                "/widgets/:id/sync",
            ]
        );
    }

    #[test]
    fn test_one_to_many_relation_gets_id_segment() {
        let widget = ApiEdge::new("widget", "widgets")
            .with_relation(ApiRelation::new("widget", "part", RelationKind::OneToMany));
        let part = ApiEdge::new("part", "parts");
        let api = api_with(vec![widget, part]);
        let mapper = ApiMapper::new(&api);
        let routes = mapper.map();
        assert!(routes.contains(&"/widgets/:id/part".to_string()));
        assert!(routes.contains(&"/widgets/:id/part/:id".to_string()));
    }

    #[test]
    fn test_one_to_one_relation_has_no_id_segment() {
        let widget = ApiEdge::new("widget", "widgets")
            .with_relation(ApiRelation::new("widget", "profile", RelationKind::OneToOne));
        let profile = ApiEdge::new("profile", "profiles").with_method(ApiMethod::new(
            "refresh",
            MethodScope::Entry,
            vec![RequestKind::Update],
        ));
        let api = api_with(vec![widget, profile]);
        let mapper = ApiMapper::new(&api);
        let routes = mapper.map();

        assert!(routes.contains(&"/widgets/:id/profile".to_string()));
        assert!(routes.contains(&"/widgets/:id/profile/refresh".to_string()));
        // Singular targets never get an id-segmented path.
        assert!(!routes.iter().any(|r| r.starts_with("/widgets/:id/profile/:")));
    }

    #[test]
    fn test_depth_limit_bounds_cycles() {
        // widget -> part -> widget -> ... is an infinite chain without
        // the level guard.
        let widget = ApiEdge::new("widget", "widgets")
            .with_relation(ApiRelation::new("widget", "part", RelationKind::OneToMany));
        let part = ApiEdge::new("part", "parts")
            .with_relation(ApiRelation::new("part", "widget", RelationKind::OneToMany));
        let api = api_with(vec![widget, part]);

        let mapper = ApiMapper::new(&api);
        let routes = mapper.map();
        assert!(routes.contains(&"/widgets/:id/part".to_string()));
        assert!(!routes.iter().any(|r| r.contains("/part/:id/widget")));

        let mut deep = ApiMapper::new(&api);
        deep.level_limit = 3;
        let routes = deep.map();
        assert!(routes.iter().any(|r| r.contains("/part/:id/widget")));
        assert!(!routes.iter().any(|r| r.contains("/part/:id/widget/:id/part")));
    }

    #[test]
    fn test_duplicate_routes_suppressed() {
        // Two edges pointing at the same target produce distinct
        // prefixes; identical prefixes collapse.
        let a = ApiEdge::new("widget", "widgets")
            .with_relation(ApiRelation::new("widget", "part", RelationKind::OneToMany));
        let b = ApiEdge::new("part", "parts");
        let api = api_with(vec![a.clone(), a, b]);
        let routes = ApiMapper::new(&api).map();
        let mut deduped = routes.clone();
        deduped.dedup();
        assert_eq!(routes, deduped);
    }

    #[test]
    fn test_external_edges_excluded() {
        let api = api_with(vec![
            ApiEdge::new("widget", "widgets"),
            ApiEdge::new("secret", "secrets").external(),
        ]);
        let routes = ApiMapper::new(&api).map();
        assert!(!routes.iter().any(|r| r.contains("secrets")));
    }

    #[test]
    fn test_zero_depth_limit_yields_nothing() {
        let api = api_with(vec![ApiEdge::new("widget", "widgets")]);
        let mut mapper = ApiMapper::new(&api);
        mapper.level_limit = 0;
        assert!(mapper.map().is_empty());
    }
}
