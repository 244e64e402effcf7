//! URL sanitization for stored event fields.
//!
//! URLs reported by clients can carry personal data in credentials, query
//! strings and fragments. Only scheme, host, port and path are kept.

mod sanitize;

pub use sanitize::clean_url;

/// Sanitize an optional URL field, passing `None` through.
pub fn clean_optional(url: Option<&str>) -> Option<String> {
    url.map(clean_url)
}
