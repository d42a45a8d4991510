#![deny(missing_docs)]

//! # Naming Helpers
//!
//! Human-readable name handling for tags and synthesized descriptions.
//! Edge and method names arrive in `kebab-case` or `camelCase`; tags and
//! summaries want `Title Case` with an indefinite article where English
//! grammar asks for one ("Get a Widget", "Create an Order").

use heck::ToTitleCase;

/// Normalises a resource or method name for display: dashes become spaces,
/// the result is title-cased.
///
/// `user-accounts` -> `User Accounts`.
pub fn normalise_name(name: &str) -> String {
    name.replace('-', " ").to_title_case()
}

/// Prefixes a display name with its indefinite article.
///
/// A plain orthographic heuristic (leading vowel letter) is enough for the
/// synthesized descriptions this crate emits; it is not a pronunciation
/// model.
pub fn articlize(name: &str) -> String {
    let article = match name.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    };
    format!("{} {}", article, name)
}
