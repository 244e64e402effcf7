//! Strip credentials, query and fragment from absolute URLs.

use url::Url;

/// Returns `url` without user name, password, query string and fragment.
///
/// Input that does not parse as an absolute URL is returned unchanged.
/// The result is stable under repeated application.
pub fn clean_url(url: &str) -> String {
    let mut parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => {
            tracing::trace!(error = %e, "url did not parse, keeping as is");
            return url.to_string();
        }
    };

    parsed.set_query(None);
    parsed.set_fragment(None);
    // Both fail only for URLs without a host, which carry no credentials.
    let _ = parsed.set_username("");
    let _ = parsed.set_password(None);

    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_credentials_query_and_fragment() {
        assert_eq!(clean_url("https://u:p@host/path?x=1#f"), "https://host/path");
    }

    #[test]
    fn keeps_scheme_host_port_and_path() {
        assert_eq!(
            clean_url("http://www.example.com:8080/a/b/c.html"),
            "http://www.example.com:8080/a/b/c.html"
        );
    }

    #[test]
    fn empty_query_marker_is_dropped() {
        assert_eq!(clean_url("https://example.com/page?"), "https://example.com/page");
        assert_eq!(clean_url("https://example.com/page#"), "https://example.com/page");
    }

    #[test]
    fn unparseable_input_is_unchanged() {
        assert_eq!(clean_url("not a url"), "not a url");
        assert_eq!(clean_url("/relative/path?x=1"), "/relative/path?x=1");
        assert_eq!(clean_url(""), "");
    }

    #[test]
    fn hostless_urls_still_lose_query() {
        assert_eq!(
            clean_url("mailto:someone@example.com?subject=hi"),
            "mailto:someone@example.com"
        );
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "https://u:p@host/path?x=1#f",
            "HTTPS://Example.COM/a/../b?q",
            "https://example.com",
            "not a url",
            "mailto:a@b.c?x=1",
            "https://user@example.com:443/x#frag",
        ];
        for input in inputs {
            let once = clean_url(input);
            assert_eq!(clean_url(&once), once, "input: {input}");
        }
    }
}
