// src/core/scanner/footprint_scanner.rs

use crate::core::http::{self, CHECK_TIMEOUT, PATH_PROBE_TIMEOUT, ProbeError};
use crate::core::knowledge_base::{COMMON_DIRS, COMMON_FILES, PATH_PROBE_WORKERS, ROBOTS_PREVIEW_LIMIT};
use crate::core::models::{
    DnsResults, FootprintResults, RobotsSummary, ScanResult, ServerInfo, SitemapSummary,
};
use crate::core::scanner::{dns_scanner, probe_all};
use crate::core::target::{host_of, join_path};
use crate::ui::{self, Status};
use futures::StreamExt;
use reqwest::Client;
use reqwest::header::SERVER;
use std::net::IpAddr;
use tracing::{debug, info, warn};

const NOT_FOUND: &str = "Not Found";
const X_POWERED_BY: &str = "x-powered-by";

/// Runs every footprinting step against the target, in order.
///
/// The steps are server banners, DNS records, robots.txt, sitemap.xml,
/// hidden directories and exposed files. Each step handles and prints its
/// own failures, so a failing step never stops the ones after it.
///
/// # Arguments
/// * `client` - The shared HTTP client.
/// * `target` - The normalised target URL, without a trailing slash.
///
/// # Returns
/// A `FootprintResults` struct with the outcome of every step.
pub async fn run_footprint(client: &Client, target: &str) -> FootprintResults {
    ui::phase("FOOTPRINTING PHASE");
    info!(target, "Starting footprint.");

    let (server_info, ip_address) = get_server_info(client, target).await;
    let dns = get_dns_info(target).await;
    let robots = check_robots(client, target).await;
    let sitemap = check_sitemap(client, target).await;
    let hidden_dirs = find_hidden_dirs(client, target).await;
    let exposed_files = find_exposed_files(client, target).await;

    info!(
        hidden_dirs = hidden_dirs.len(),
        exposed_files = exposed_files.len(),
        "Footprint finished."
    );
    FootprintResults {
        server_info,
        ip_address,
        dns,
        robots,
        sitemap,
        hidden_dirs,
        exposed_files,
    }
}

/// Reads the `Server` and `X-Powered-By` banners from the homepage.
pub fn server_info_from_headers(page: &http::Page) -> ServerInfo {
    ServerInfo {
        server: Some(page.header(SERVER.as_str()).unwrap_or(NOT_FOUND).to_string()),
        powered_by: Some(page.header(X_POWERED_BY).unwrap_or(NOT_FOUND).to_string()),
    }
}

/// Fetches server banners from the homepage and resolves the host's address.
pub async fn get_server_info(client: &Client, target: &str) -> (ServerInfo, Option<String>) {
    ui::section("Server Information");
    let page = match http::fetch(client, target, CHECK_TIMEOUT).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "Could not fetch homepage for server info.");
            ui::detail(Status::Alert, format!("Error getting server info: {}", e));
            return (ServerInfo::default(), None);
        }
    };

    let info = server_info_from_headers(&page);
    ui::detail(Status::Info, format!("Server: {}", info.server.as_deref().unwrap_or(NOT_FOUND)));
    ui::detail(
        Status::Info,
        format!("X-Powered-By: {}", info.powered_by.as_deref().unwrap_or(NOT_FOUND)),
    );

    let ip = match host_of(target) {
        Some(host) => resolve_ip(&host).await,
        None => None,
    };
    match &ip {
        Some(ip) => ui::detail(Status::Info, format!("IP Address: {}", ip)),
        None => ui::detail(Status::Alert, "Could not resolve IP address"),
    }
    (info, ip)
}

/// First address the system resolver returns for `host`, preferring IPv4.
async fn resolve_ip(host: &str) -> Option<String> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(ip.to_string());
    }
    match tokio::net::lookup_host((host, 0)).await {
        Ok(addrs) => {
            let addrs: Vec<_> = addrs.map(|a| a.ip()).collect();
            addrs
                .iter()
                .find(|ip| ip.is_ipv4())
                .or_else(|| addrs.first())
                .map(|ip| ip.to_string())
        }
        Err(e) => {
            warn!(host, error = %e, "Address resolution failed.");
            None
        }
    }
}

async fn get_dns_info(target: &str) -> ScanResult<DnsResults> {
    ui::section("DNS Information");
    let Some(host) = host_of(target) else {
        ui::detail(Status::Alert, "Error in DNS lookup: target has no host");
        return Err("target has no host".to_string());
    };

    let result = dns_scanner::run_dns_scan(&host).await;
    match &result {
        Ok(Some(records)) => {
            for a in &records.a {
                ui::detail(Status::Info, format!("A Record: {}", a));
            }
            for mx in &records.mx {
                ui::detail(
                    Status::Info,
                    format!("MX Record: {} (Priority: {})", mx.exchange, mx.preference),
                );
            }
            for txt in &records.txt {
                ui::detail(Status::Info, format!("TXT Record: {}", txt));
            }
        }
        Ok(None) => ui::detail(Status::Info, "Target is an IP address, no DNS records to enumerate"),
        Err(e) => ui::detail(Status::Alert, format!("Error in DNS lookup: {}", e)),
    }
    result
}

/// Collects the `Disallow:` lines of a robots.txt body.
pub fn summarize_robots(body: &str) -> RobotsSummary {
    let disallowed: Vec<&str> = body
        .split('\n')
        .filter(|line| line.to_lowercase().starts_with("disallow:"))
        .collect();
    let preview = disallowed
        .iter()
        .take(ROBOTS_PREVIEW_LIMIT)
        .map(|line| line.trim().to_string())
        .collect();
    RobotsSummary {
        preview,
        remaining: disallowed.len().saturating_sub(ROBOTS_PREVIEW_LIMIT),
    }
}

/// Console lines shown for a robots.txt summary.
pub fn robots_preview_lines(summary: &RobotsSummary) -> Vec<String> {
    let mut lines = summary.preview.clone();
    if summary.remaining > 0 {
        lines.push(format!("... and {} more disallowed paths", summary.remaining));
    }
    lines
}

pub async fn check_robots(client: &Client, target: &str) -> ScanResult<RobotsSummary> {
    ui::section("Robots.txt Analysis");
    let page = http::fetch(client, &join_path(target, "/robots.txt"), CHECK_TIMEOUT)
        .await
        .map_err(|e| {
            ui::detail(Status::Alert, format!("Error checking robots.txt: {}", e));
            e.to_string()
        })?;

    if !page.is_ok() {
        ui::detail(Status::Missing, "No robots.txt file found");
        return Ok(None);
    }

    ui::detail(Status::Found, "Found robots.txt file:");
    let summary = summarize_robots(&page.body);
    for line in robots_preview_lines(&summary) {
        ui::detail(Status::Info, line);
    }
    Ok(Some(summary))
}

/// Approximate URL count of a sitemap: `<url>` entries, or `<urlset` tags
/// when there are none.
pub fn count_sitemap_urls(body: &str) -> usize {
    match body.matches("<url>").count() {
        0 => body.matches("<urlset").count(),
        n => n,
    }
}

pub async fn check_sitemap(client: &Client, target: &str) -> ScanResult<SitemapSummary> {
    ui::section("Sitemap Analysis");
    let page = http::fetch(client, &join_path(target, "/sitemap.xml"), CHECK_TIMEOUT)
        .await
        .map_err(|e| {
            ui::detail(Status::Alert, format!("Error checking sitemap.xml: {}", e));
            e.to_string()
        })?;

    if !page.is_ok() {
        ui::detail(Status::Missing, "No sitemap.xml file found");
        return Ok(None);
    }

    let approx_urls = count_sitemap_urls(&page.body);
    ui::detail(Status::Found, "Found sitemap.xml file");
    ui::detail(Status::Info, format!("Contains ~{} URLs", approx_urls));
    Ok(Some(SitemapSummary { approx_urls }))
}

async fn check_dir(client: &Client, target: &str, dir: &str) -> Result<bool, ProbeError> {
    let page = http::fetch(client, &join_path(target, dir), PATH_PROBE_TIMEOUT).await?;
    Ok(page.is_ok())
}

async fn check_file(client: &Client, target: &str, file: &str) -> Result<bool, ProbeError> {
    let page = http::fetch(client, &join_path(target, file), PATH_PROBE_TIMEOUT).await?;
    Ok(page.is_ok() && !page.body.is_empty())
}

/// Probes common hidden directories, at most `PATH_PROBE_WORKERS` at a time.
///
/// A path that errors or does not answer within `PATH_PROBE_TIMEOUT` counts
/// as not found.
///
/// # Returns
/// The directories that answered `200`, in completion order.
pub async fn find_hidden_dirs(client: &Client, target: &str) -> Vec<String> {
    ui::section("Checking Common Hidden Directories");
    let mut found = Vec::new();
    let mut probes = std::pin::pin!(probe_all(
        COMMON_DIRS.iter().copied(),
        PATH_PROBE_WORKERS,
        |dir| check_dir(client, target, dir)
    ));
    while let Some((dir, hit)) = probes.next().await {
        if hit == Some(true) {
            ui::detail(Status::Found, format!("Found: {}", dir));
            found.push(dir.to_string());
        }
    }
    if found.is_empty() {
        ui::detail(Status::Missing, "No common hidden directories found");
    }
    debug!(count = found.len(), "Hidden directory probing finished.");
    found
}

/// Probes sensitive files; returns those answering `200` with a body.
pub async fn find_exposed_files(client: &Client, target: &str) -> Vec<String> {
    ui::section("Checking for Exposed Files");
    let mut found = Vec::new();
    let mut probes = std::pin::pin!(probe_all(
        COMMON_FILES.iter().copied(),
        PATH_PROBE_WORKERS,
        |file| check_file(client, target, file)
    ));
    while let Some((file, hit)) = probes.next().await {
        if hit == Some(true) {
            ui::detail(Status::Found, format!("Found: {}", file));
            found.push(file.to_string());
        }
    }
    if found.is_empty() {
        ui::detail(Status::Missing, "No common exposed files found");
    }
    debug!(count = found.len(), "Exposed file probing finished.");
    found
}
