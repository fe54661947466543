// src/core/scanner/api_scanner.rs

use crate::core::http::{self, API_DISCOVERY_TIMEOUT, API_PROBE_TIMEOUT, CHECK_TIMEOUT, ProbeError};
use crate::core::knowledge_base::{
    API_CONTENT_TYPES, API_PATTERNS, COMMON_API_ENDPOINTS, PATH_PROBE_WORKERS,
};
use crate::core::scanner::probe_all;
use crate::core::target::{join_path, resolve_reference};
use crate::ui::{self, Status};
use futures::StreamExt;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static SCRIPTS: Lazy<Selector> = Lazy::new(|| Selector::parse("script[src]").unwrap());
static RE_API_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:fetch|axios|ajax)\(['"](.*?)['"]\)"#).unwrap());

/// Links and external scripts extracted from the homepage.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageRefs {
    /// `<a href>` values that look like API endpoints.
    pub api_links: Vec<String>,
    /// `<script src>` values ending in `.js`.
    pub scripts: Vec<String>,
}

fn is_api_like(candidate: &str) -> bool {
    API_PATTERNS.iter().any(|pattern| candidate.contains(pattern))
}

pub fn extract_refs(body: &str) -> PageRefs {
    let document = Html::parse_document(body);
    let api_links = document
        .select(&ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_api_like(href))
        .map(String::from)
        .collect();
    let scripts = document
        .select(&SCRIPTS)
        .filter_map(|s| s.value().attr("src"))
        .filter(|src| src.ends_with(".js"))
        .map(String::from)
        .collect();
    PageRefs { api_links, scripts }
}

/// URLs passed to `fetch(...)`, `axios(...)` or `ajax(...)` that look like API endpoints.
pub fn extract_api_calls(js: &str) -> Vec<String> {
    RE_API_CALL
        .captures_iter(js)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|call| is_api_like(call))
        .map(String::from)
        .collect()
}

/// Whether a path answers like an API: a non-error status and a
/// machine-readable content type.
pub async fn check_api_endpoint(client: &Client, url: &str) -> Result<bool, ProbeError> {
    let page = http::fetch(client, url, API_PROBE_TIMEOUT).await?;
    let content_type = page.header(CONTENT_TYPE.as_str()).unwrap_or("");
    Ok(page.status.as_u16() < 400 && API_CONTENT_TYPES.iter().any(|ct| content_type.contains(ct)))
}

fn push_unique(found: &mut Vec<String>, endpoint: String) -> bool {
    if found.contains(&endpoint) {
        return false;
    }
    found.push(endpoint);
    true
}

/// Discovers API endpoints exposed by the target.
///
/// Looks at homepage links, at `fetch`/`axios`/`ajax` calls in the scripts
/// the homepage loads, and at a list of common API roots answered with a
/// machine-readable content type.
///
/// # Arguments
/// * `client` - The shared HTTP client.
/// * `target` - The normalised target URL, without a trailing slash.
///
/// # Returns
/// The distinct endpoints in discovery order. A failure to fetch the
/// homepage ends discovery with an empty list.
pub async fn discover_apis(client: &Client, target: &str) -> Vec<String> {
    ui::phase("API DISCOVERY PHASE");
    info!(target, "Starting API discovery.");
    let mut found = Vec::new();

    let homepage = match http::fetch(client, target, API_DISCOVERY_TIMEOUT).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "API discovery could not fetch the homepage.");
            ui::line(Status::Alert, format!("API discovery error: {}", e));
            return found;
        }
    };

    let refs = extract_refs(&homepage.body);
    for link in refs.api_links {
        if push_unique(&mut found, link.clone()) {
            ui::line(Status::Highlight, format!("Found API endpoint: {}", link));
        }
    }

    for src in refs.scripts {
        let Some(url) = resolve_reference(target, &src) else {
            debug!(src = %src, "Skipping unresolvable script reference.");
            continue;
        };
        let js = match http::fetch(client, &url, CHECK_TIMEOUT).await {
            Ok(page) => page.body,
            Err(e) => {
                debug!(url = %url, error = %e, "Skipping script that could not be fetched.");
                continue;
            }
        };
        for call in extract_api_calls(&js) {
            if push_unique(&mut found, call.clone()) {
                ui::line(Status::Info, format!("Found API call: {}", call));
            }
        }
    }

    let mut probes = std::pin::pin!(probe_all(
        COMMON_API_ENDPOINTS.iter().copied(),
        PATH_PROBE_WORKERS,
        |endpoint| async move {
            check_api_endpoint(client, &join_path(target, endpoint)).await
        }
    ));
    while let Some((endpoint, is_api)) = probes.next().await {
        if is_api == Some(true) && push_unique(&mut found, endpoint.to_string()) {
            ui::line(Status::Found, format!("Discovered API: {}", endpoint));
        }
    }

    info!(count = found.len(), "API discovery finished.");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_and_scripts_are_extracted() {
        let html = r#"
            <a href="/api/users">Users</a>
            <a href="/about">About</a>
            <a href="https://example.com/graphql">GQL</a>
            <script src="/static/app.js"></script>
            <script src="/static/app.mjs"></script>
        "#;
        let refs = extract_refs(html);
        assert_eq!(refs.api_links, vec!["/api/users", "https://example.com/graphql"]);
        assert_eq!(refs.scripts, vec!["/static/app.js"]);
    }

    #[test]
    fn api_calls_are_found_in_javascript() {
        let js = r#"
            fetch('/api/items').then(r => r.json());
            axios("/v2/orders");
            fetch('/images/logo.png');
            $.ajax('/rest/cart')
        "#;
        assert_eq!(extract_api_calls(js), vec!["/api/items", "/v2/orders", "/rest/cart"]);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut found = vec!["/api".to_string()];
        assert!(!push_unique(&mut found, "/api".to_string()));
        assert!(push_unique(&mut found, "/graphql".to_string()));
        assert_eq!(found.len(), 2);
    }
}
