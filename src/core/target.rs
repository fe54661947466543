// src/core/target.rs

use url::{Host, Url};

/// Ensures the target carries an explicit scheme, defaulting to plain HTTP.
///
/// A trailing `/` is trimmed so that probe paths (which all start with `/`)
/// can be appended directly.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// Extracts the host of a normalized target, used for DNS lookups.
/// IPv6 literals come back without brackets.
pub fn host_of(target: &str) -> Option<String> {
    let url = Url::parse(target).ok()?;
    match url.host()? {
        Host::Domain(domain) => Some(domain.to_string()),
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

/// Builds the URL for a rooted probe path such as `/robots.txt`.
pub fn join_path(target: &str, path: &str) -> String {
    format!("{}{}", target, path)
}

/// Resolves a possibly relative reference (e.g. a `<script src>`) against the target.
pub fn resolve_reference(target: &str, reference: &str) -> Option<String> {
    let base = Url::parse(&format!("{}/", target)).ok()?;
    base.join(reference).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_http_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com:8080"), "http://example.com:8080");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com");
    }

    #[test]
    fn host_is_extracted_without_port() {
        assert_eq!(host_of("http://example.com:8080").as_deref(), Some("example.com"));
        assert_eq!(host_of("http://[::1]:8080").as_deref(), Some("::1"));
        assert_eq!(host_of("not a url"), None);
    }

    #[test]
    fn references_resolve_against_target() {
        assert_eq!(
            resolve_reference("http://example.com", "/static/app.js").as_deref(),
            Some("http://example.com/static/app.js")
        );
        assert_eq!(
            resolve_reference("http://example.com", "https://cdn.example.net/lib.js").as_deref(),
            Some("https://cdn.example.net/lib.js")
        );
    }
}
