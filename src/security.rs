#![deny(missing_docs)]

//! # Security Collaborator
//!
//! The seam through which authorization requirements enter the document
//! mapper. The decision logic itself lives outside this crate; the mapper
//! only asks which schemes guard a given route and verb set, and attaches
//! the answer to the emitted operations. Consumed under OpenAPI 3 only.

use crate::model::HttpVerb;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Scheme names guarding each verb of one route.
pub type RouteSecurity = IndexMap<HttpVerb, Vec<String>>;

/// Supplies security schemes and per-route requirements.
///
/// Lookups are synchronous: every result is complete before the traversal
/// attaches it, so serialization can never observe a partially attached
/// `security` field.
pub trait SecurityProvider {
    /// The `securitySchemes` map emitted under `components`.
    fn security_schemes(&self) -> Map<String, Value>;

    /// The schemes guarding `route`, per verb. Verbs absent from the
    /// result produce operations without a `security` field.
    fn security_for_route(&self, route: &str, verbs: &[HttpVerb]) -> RouteSecurity;
}

/// Renders a scheme-name list in the OpenAPI requirement form:
/// one `{name: []}` object per scheme.
pub fn requirement_list(schemes: &[String]) -> Value {
    Value::Array(
        schemes
            .iter()
            .map(|name| {
                let mut req = Map::new();
                req.insert(name.clone(), Value::Array(Vec::new()));
                Value::Object(req)
            })
            .collect(),
    )
}
