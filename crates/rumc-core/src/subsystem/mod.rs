//! Subsystem (routing target) resolution from request headers.
//!
//! Priority: AEM routing metadata, then forwarded host, then plain host.
//! A synthesized endpoint is informational only; it is not validated.

mod routing;

pub use routing::{
    forwarded_host, is_platform_host, parse_routing_pairs, routing_endpoint, ROUTING_DOMAIN,
};

use crate::headers::{names, HeaderSource};
use crate::UNDEFINED;

type Resolver = fn(&dyn HeaderSource) -> Option<String>;

const RESOLVERS: &[Resolver] = &[from_routing, from_forwarded_host, from_host];

fn from_routing(headers: &dyn HeaderSource) -> Option<String> {
    headers.non_empty(names::ADOBE_ROUTING).map(routing_endpoint)
}

fn from_forwarded_host(headers: &dyn HeaderSource) -> Option<String> {
    headers.non_empty(names::FORWARDED_HOST).map(forwarded_host)
}

fn from_host(headers: &dyn HeaderSource) -> Option<String> {
    headers.non_empty(names::HOST).map(str::to_string)
}

/// Resolve the subsystem identifier, or `"undefined"` when no routing or
/// host information is present.
pub fn subsystem<H: HeaderSource>(headers: &H) -> String {
    let headers: &dyn HeaderSource = headers;
    RESOLVERS
        .iter()
        .find_map(|resolve| resolve(headers))
        .unwrap_or_else(|| UNDEFINED.to_string())
}
