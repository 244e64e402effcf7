//! Case-insensitive request header access.
//!
//! The classifier and subsystem resolver only read headers through
//! [`HeaderSource`]. [`HeaderMap`] is the owned implementation; build it from
//! the request's header pairs in arrival order so repeated names resolve to
//! the last value. An HTTP layer with its own map can implement the trait
//! directly if it already folds case variants into one entry.

use std::collections::HashMap;

/// Header names read by the classifiers.
pub mod names {
    /// CloudFront device hint: desktop browser.
    pub const CF_DESKTOP_VIEWER: &str = "cloudfront-is-desktop-viewer";
    /// CloudFront device hint: phone.
    pub const CF_MOBILE_VIEWER: &str = "cloudfront-is-mobile-viewer";
    /// CloudFront device hint: smart TV.
    pub const CF_SMARTTV_VIEWER: &str = "cloudfront-is-smarttv-viewer";
    /// CloudFront device hint: tablet.
    pub const CF_TABLET_VIEWER: &str = "cloudfront-is-tablet-viewer";
    /// Set by New Relic synthetic monitors.
    pub const NEWRELIC_ID: &str = "x-newrelic-id";
    pub const USER_AGENT: &str = "user-agent";
    pub const REFERER: &str = "referer";
    /// AEM Cloud routing metadata, `key=value` pairs separated by commas.
    pub const ADOBE_ROUTING: &str = "x-adobe-routing";
    pub const FORWARDED_HOST: &str = "x-forwarded-host";
    pub const HOST: &str = "host";
}

/// Read-only, case-insensitive view over request headers.
pub trait HeaderSource {
    /// Value for `name` (any case), or `None` if the header is absent.
    fn header(&self, name: &str) -> Option<&str>;

    /// Value for `name` if present and non-empty.
    fn non_empty(&self, name: &str) -> Option<&str> {
        self.header(name).filter(|v| !v.is_empty())
    }
}

/// Owned header map: one value per name, last insert wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any previous value under the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.inner.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Parse a raw `Name: value` line. Lines without a colon are ignored.
    pub fn insert_line(&mut self, line: &str) -> bool {
        match line.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                self.insert(name.trim(), value.trim());
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl HeaderSource for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.inner.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderMap
where
    N: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name.as_ref(), value);
        }
        map
    }
}
