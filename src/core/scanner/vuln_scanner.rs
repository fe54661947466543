// src/core/scanner/vuln_scanner.rs

use crate::core::http::{self, CHECK_TIMEOUT, ProbeError};
use crate::core::knowledge_base::get_finding_detail;
use crate::core::models::{TechFamily, Technology, Vulnerability};
use crate::core::target::join_path;
use crate::ui::{self, Status};
use reqwest::Client;
use std::io::ErrorKind;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

const WPSCAN_TIMEOUT: Duration = Duration::from_secs(300);
const XSS_PAYLOAD: &str = "<script>alert(1)</script>";

/// Collects vulnerabilities found while scanning. Labels are recorded once.
#[derive(Debug, Default)]
pub struct VulnFindings {
    found: Vec<Vulnerability>,
    basic_scans_done: bool,
    spa_scan_done: bool,
}

impl VulnFindings {
    fn record(&mut self, vulnerability: Vulnerability) {
        if !self.found.contains(&vulnerability) {
            self.found.push(vulnerability);
        }
    }

    pub fn into_vec(self) -> Vec<Vulnerability> {
        self.found
    }
}

/// Runs the checks that fit the detected technologies.
///
/// With nothing detected, the basic checks run once. WordPress is handed to
/// `wpscan` and Joomla gets an administrator panel check; neither records a
/// vulnerability. SPA frameworks get a source map check, and any other
/// technology falls back to the basic checks. The source map check and the
/// basic checks each run at most once per scan.
///
/// # Arguments
/// * `client` - The shared HTTP client.
/// * `target` - The normalised target URL, without a trailing slash.
/// * `technologies` - The technologies found during detection.
///
/// # Returns
/// The distinct vulnerabilities found, in the order they were recorded.
pub async fn scan_vulnerabilities(
    client: &Client,
    target: &str,
    technologies: &[Technology],
) -> Vec<Vulnerability> {
    ui::phase("VULNERABILITY SCANNING PHASE");
    info!(target, technologies = technologies.len(), "Starting vulnerability scan.");
    let mut findings = VulnFindings::default();

    if technologies.is_empty() {
        ui::line(Status::Info, "No technologies detected - running basic scans");
        run_basic_scans(client, target, &mut findings).await;
    }

    for tech in technologies {
        match (tech, tech.family()) {
            (Technology::WordPress, _) => scan_wordpress(target).await,
            (Technology::Joomla, _) => scan_joomla(client, target).await,
            (_, TechFamily::Spa) => scan_spa(client, target, &mut findings).await,
            _ => run_basic_scans(client, target, &mut findings).await,
        }
    }

    info!(count = findings.found.len(), "Vulnerability scan finished.");
    findings.into_vec()
}

/// Hands a WordPress target to an external `wpscan` and prints its report.
async fn scan_wordpress(target: &str) {
    ui::section("WordPress Scan");
    ui::detail(Status::Info, "Running WPScan (requires wpscan installed)...");

    let mut command = Command::new("wpscan");
    command
        .args(["--url", target, "--no-update", "--format", "cli-no-color"])
        .kill_on_drop(true);

    match tokio::time::timeout(WPSCAN_TIMEOUT, command.output()).await {
        Ok(Ok(output)) => {
            debug!(status = %output.status, "wpscan exited.");
            ui::raw(Status::Info, String::from_utf8_lossy(&output.stdout));
        }
        Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
            info!("wpscan is not installed.");
            ui::detail(Status::Alert, "WPScan not installed. Install with: gem install wpscan");
        }
        Ok(Err(e)) => {
            error!(error = %e, "Failed to run wpscan.");
            ui::detail(Status::Alert, format!("Error running WPScan: {}", e));
        }
        Err(_) => {
            warn!(timeout_secs = WPSCAN_TIMEOUT.as_secs(), "wpscan timed out.");
            ui::detail(Status::Alert, "Error running WPScan: timed out");
        }
    }
}

/// Reports whether the Joomla administrator panel is reachable.
async fn scan_joomla(client: &Client, target: &str) {
    ui::section("Joomla Scan");
    ui::detail(Status::Info, "Checking common Joomla vulnerabilities...");
    match http::fetch(client, &join_path(target, "/administrator"), CHECK_TIMEOUT).await {
        Ok(page) if page.is_ok() => {
            ui::detail(Status::Alert, "Administrator panel is accessible")
        }
        Ok(_) => ui::detail(Status::Found, "Administrator panel not directly accessible"),
        Err(e) => {
            warn!(error = %e, "Joomla admin panel check failed.");
            ui::detail(Status::Alert, format!("Error checking admin panel: {}", e));
        }
    }
}

/// Looks for a published source map of the main bundle.
async fn scan_spa(client: &Client, target: &str, findings: &mut VulnFindings) {
    if findings.spa_scan_done {
        return;
    }
    findings.spa_scan_done = true;

    ui::section("SPA Framework Scan");
    ui::detail(Status::Info, "Checking common SPA vulnerabilities...");
    match http::fetch(client, &join_path(target, "/static/js/main.js.map"), CHECK_TIMEOUT).await {
        Ok(page) if page.is_ok() => {
            ui::detail(Status::Alert, "Source map file exposed (main.js.map)");
            findings.record(Vulnerability::ExposedSourceMap);
        }
        Ok(_) => ui::detail(Status::Found, "No source map file exposed"),
        Err(e) => {
            warn!(error = %e, "Source map check failed.");
            ui::detail(Status::Alert, format!("Error checking source maps: {}", e));
        }
    }
}

/// The generic checks: SQL injection, reflected XSS and directory listing.
/// Runs sequentially and only the first time it is called.
async fn run_basic_scans(client: &Client, target: &str, findings: &mut VulnFindings) {
    if findings.basic_scans_done {
        debug!("Basic scans already ran, skipping.");
        return;
    }
    findings.basic_scans_done = true;

    ui::section("Running Basic Vulnerability Checks");
    for vulnerability in [
        Vulnerability::SqlInjection,
        Vulnerability::Xss,
        Vulnerability::DirectoryListing,
    ] {
        let outcome = match vulnerability {
            Vulnerability::SqlInjection => check_sqli(client, target).await,
            Vulnerability::Xss => check_xss(client, target).await,
            Vulnerability::DirectoryListing => check_directory_listing(client, target).await,
            Vulnerability::ExposedSourceMap => continue,
        };
        match outcome {
            Ok(true) => {
                ui::detail(Status::Alert, format!("Potential {} vulnerability", vulnerability));
                if let Some(detail) = get_finding_detail(vulnerability) {
                    ui::detail(Status::Info, format!("[{}] {}", detail.category, detail.description));
                    ui::detail(Status::Info, format!("Fix: {}", detail.remediation));
                }
                findings.record(vulnerability);
            }
            Ok(false) => {
                ui::detail(Status::Found, format!("No {} vulnerability detected", vulnerability))
            }
            Err(e) => {
                // Transport failures count as "not vulnerable".
                warn!(check = %vulnerability, error = %e, "Basic check failed.");
                ui::detail(Status::Found, format!("No {} vulnerability detected", vulnerability));
            }
        }
    }
}

pub fn looks_like_sql_error(body: &str) -> bool {
    let body = body.to_lowercase();
    body.contains("sql") || body.contains("syntax")
}

pub fn reflects_xss_payload(body: &str) -> bool {
    body.contains(XSS_PAYLOAD)
}

pub fn is_directory_listing(body: &str) -> bool {
    body.contains("Index of /")
}

// URL parsing percent-encodes the quote, so the server sees `id=1%27`.
async fn check_sqli(client: &Client, target: &str) -> Result<bool, ProbeError> {
    let page = http::fetch(client, &join_path(target, "/product?id=1'"), CHECK_TIMEOUT).await?;
    Ok(looks_like_sql_error(&page.body))
}

async fn check_xss(client: &Client, target: &str) -> Result<bool, ProbeError> {
    let url = join_path(target, &format!("/search?q={}", XSS_PAYLOAD));
    let page = http::fetch(client, &url, CHECK_TIMEOUT).await?;
    Ok(reflects_xss_payload(&page.body))
}

async fn check_directory_listing(client: &Client, target: &str) -> Result<bool, ProbeError> {
    let page = http::fetch(client, &join_path(target, "/images/"), CHECK_TIMEOUT).await?;
    Ok(is_directory_listing(&page.body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_error_matching_ignores_case() {
        assert!(looks_like_sql_error("You have an error in your SQL syntax"));
        assert!(looks_like_sql_error("Syntax error near '1''"));
        assert!(!looks_like_sql_error("<h1>Product 1</h1>"));
    }

    #[test]
    fn xss_requires_verbatim_reflection() {
        assert!(reflects_xss_payload("Results for <script>alert(1)</script>"));
        assert!(!reflects_xss_payload("Results for &lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn directory_listing_signature() {
        assert!(is_directory_listing("<title>Index of /images</title>"));
        assert!(!is_directory_listing("<title>Images</title>"));
    }

    #[test]
    fn findings_are_recorded_once() {
        let mut findings = VulnFindings::default();
        findings.record(Vulnerability::Xss);
        findings.record(Vulnerability::Xss);
        findings.record(Vulnerability::DirectoryListing);
        assert_eq!(
            findings.into_vec(),
            vec![Vulnerability::Xss, Vulnerability::DirectoryListing]
        );
    }
}
