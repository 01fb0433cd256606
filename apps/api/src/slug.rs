//! Slug helpers for state / city / service URLs.
//!
//! `slugify` and `unslugify` are two independent best-effort transforms, not
//! inverses of each other. "St. Louis" slugs to `st.-louis` and comes back as
//! "St. Louis" only by luck; "Winston-Salem" never comes back at all.
//! Every lookup built on top of these must treat a miss as a normal outcome.

/// Suffix carried by older city and state URLs (`/georgia/atlanta-network-cabling`).
pub const LEGACY_SUFFIX: &str = "-network-cabling";

/// Lowercases `name` and collapses each whitespace run into a single hyphen.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Removes a trailing `-network-cabling` if present.
pub fn strip_legacy_suffix(slug: &str) -> &str {
    slug.strip_suffix(LEGACY_SUFFIX).unwrap_or(slug)
}

/// Reconstructs a candidate display name from a slug: `new-york-network-cabling` -> `New York`.
pub fn unslugify(slug: &str) -> String {
    strip_legacy_suffix(slug)
        .split('-')
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `slug` names the state either by abbreviation (`ga`) or by slugified name (`georgia`).
pub fn matches_state(slug: &str, state_name: &str, state_abbr: &str) -> bool {
    let slug = strip_legacy_suffix(slug);
    slug.eq_ignore_ascii_case(state_abbr) || slug.eq_ignore_ascii_case(&slugify(state_name))
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
