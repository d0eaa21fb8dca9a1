//! `ETag` generation and conditional request handling

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hash file content into a quoted `ETag` value
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check a client `If-None-Match` header against the server's `ETag`
///
/// Handles comma-separated lists and the `*` wildcard. Returns true when the
/// response should be `304 Not Modified`.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}
