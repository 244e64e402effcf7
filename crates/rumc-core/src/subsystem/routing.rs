//! `x-adobe-routing` and `x-forwarded-host` parsing.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::UNDEFINED;

/// Domain used for endpoints synthesized from routing metadata.
pub const ROUTING_DOMAIN: &str = "adobeaemcloud.net";

/// Parse `key=value` pairs separated by commas. Pairs are trimmed; pairs
/// without `=` are dropped; later keys overwrite earlier ones. The value is
/// the text between the first and second `=`.
pub fn parse_routing_pairs(value: &str) -> HashMap<&str, &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            Some((parts.next()?, parts.next()?))
        })
        .collect()
}

/// Synthesize `{tier}-p{program}-e{environment}.adobeaemcloud.net` from a
/// routing header value. Missing keys render as `undefined`.
pub fn routing_endpoint(value: &str) -> String {
    let info = parse_routing_pairs(value);
    let get = |key: &str| info.get(key).copied().unwrap_or(UNDEFINED);
    let endpoint = format!(
        "{}-p{}-e{}.{}",
        get("tier"),
        get("program"),
        get("environment"),
        ROUTING_DOMAIN
    );
    if ["tier", "program", "environment"]
        .iter()
        .any(|k| !info.contains_key(k))
    {
        tracing::debug!(%endpoint, "routing header is missing keys");
    }
    endpoint
}

fn platform_host_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r".+-.+[.](adobeaemcloud|aemcloud|aem|hlx)[.](page|live|net)$")
            .expect("static platform host pattern")
    })
}

/// True for hosts of the form `<a>-<b>.<platform>.<tld>` on a recognized
/// platform domain.
pub fn is_platform_host(host: &str) -> bool {
    platform_host_pattern().is_match(host)
}

/// Pick a host from a comma-separated `x-forwarded-host` value: the first
/// candidate on a platform domain, otherwise the first candidate.
pub fn forwarded_host(value: &str) -> String {
    let mut candidates = value.split(',').map(str::trim);
    let first = candidates.clone().next().unwrap_or_default();
    candidates
        .find(|h| is_platform_host(h))
        .unwrap_or(first)
        .to_string()
}
