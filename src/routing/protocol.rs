//! Routing Headers
//!
//! Header names exchanged between router hops and cache nodes, and the parsing
//! rules for the ordered backend list.

use crate::membership::types::Backend;

/// Ordered, comma-joined backend list set by an upstream router hop.
pub const HEADER_BACKENDS: &str = "x-backends";
/// Cache status reported by a backend on its response.
pub const HEADER_CACHE: &str = "x-cache";
/// The only `X-Cache` value counted as a hit.
pub const CACHE_HIT: &str = "HIT";
/// Client addresses of every hop so far, appended by the proxy.
pub const HEADER_FORWARDED_FOR: &str = "x-forwarded-for";

/// Parses an `X-Backends` value.
///
/// Entries are trimmed and blank entries dropped. A header with no usable
/// entry is reported as `None` so callers fall back to a ring lookup.
pub fn parse_backends_header(value: &str) -> Option<Vec<Backend>> {
    let backends: Vec<Backend> = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(Backend::from)
        .collect();

    if backends.is_empty() {
        None
    } else {
        Some(backends)
    }
}
