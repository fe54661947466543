// src/app.rs

use crate::core::http::{self, ProbeError};
use crate::core::models::{ServerInfo, Technology, Vulnerability};
use crate::core::report::{self, Report};
use crate::core::scanner::{api_scanner, footprint_scanner, tech_scanner, vuln_scanner};
use crate::core::target::normalize_url;
use crate::ui::{self, Status};
use chrono::Local;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{error, info};

/// Settings for one run, built from the command line.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub target: String,
    /// Report path; a timestamped name in the working directory when `None`.
    pub output: Option<PathBuf>,
}

/// The scan session. Owns the accumulators every phase appends to.
pub struct App {
    pub target: String,
    pub technologies: Vec<Technology>,
    pub api_endpoints: Vec<String>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub exposed_files: Vec<String>,
    pub server_info: ServerInfo,
    /// Where the report ended up, once written.
    pub report_path: Option<PathBuf>,
    output: Option<PathBuf>,
    client: Client,
}

impl App {
    pub fn new(options: ScanOptions) -> Result<Self, ProbeError> {
        Ok(Self {
            target: normalize_url(&options.target),
            technologies: Vec::new(),
            api_endpoints: Vec::new(),
            vulnerabilities: Vec::new(),
            exposed_files: Vec::new(),
            server_info: ServerInfo::default(),
            report_path: None,
            output: options.output,
            client: http::build_client()?,
        })
    }

    /// Detects technologies and discovers API endpoints concurrently.
    pub async fn detect_tech(&mut self) {
        ui::phase("TECHNOLOGY DETECTION PHASE");
        let (technologies, api_endpoints) = tokio::join!(
            tech_scanner::detect_technologies(&self.client, &self.target),
            api_scanner::discover_apis(&self.client, &self.target)
        );

        self.technologies = technologies;
        self.api_endpoints = api_endpoints;

        if self.technologies.is_empty() {
            ui::line(Status::Missing, "No major technologies detected");
        } else {
            ui::raw(
                Status::Highlight,
                format!("\n  Identified Technologies: {}", self.technology_list()),
            );
        }
    }

    pub async fn footprint(&mut self) {
        let results = footprint_scanner::run_footprint(&self.client, &self.target).await;
        self.server_info = results.server_info;
        for file in results.exposed_files {
            if !self.exposed_files.contains(&file) {
                self.exposed_files.push(file);
            }
        }
    }

    pub async fn scan_vulnerabilities(&mut self) {
        let found =
            vuln_scanner::scan_vulnerabilities(&self.client, &self.target, &self.technologies)
                .await;
        for vulnerability in found {
            if !self.vulnerabilities.contains(&vulnerability) {
                self.vulnerabilities.push(vulnerability);
            }
        }
    }

    /// Builds the report from the accumulators and writes it to disk.
    ///
    /// A write failure is printed and logged; the report is returned either way.
    pub fn generate_report(&mut self) -> Report {
        ui::phase("GENERATING REPORT");
        let now = Local::now();
        let report = Report::new(
            &self.target,
            now,
            &self.technologies,
            &self.api_endpoints,
            &self.vulnerabilities,
            &self.exposed_files,
            &self.server_info,
        );

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| report::default_report_path(now));
        match report::write_report(&report, &path) {
            Ok(()) => {
                info!(path = %path.display(), "Report written.");
                ui::line(Status::Found, format!("Report saved to {}", path.display()));
                self.report_path = Some(path);
            }
            Err(e) => {
                error!(error = ?e, "Could not write report.");
                ui::line(Status::Alert, format!("Could not save report: {:#}", e));
            }
        }
        report
    }

    /// Runs every phase in order, then prints the summary.
    pub async fn run(&mut self) -> Report {
        info!(target = %self.target, "Scan started.");
        ui::raw(Status::Highlight, format!("Target: {}\n", self.target));

        self.detect_tech().await;
        self.footprint().await;
        self.scan_vulnerabilities().await;
        let report = self.generate_report();

        self.print_summary();
        info!(
            technologies = self.technologies.len(),
            vulnerabilities = self.vulnerabilities.len(),
            exposed_files = self.exposed_files.len(),
            "Scan finished."
        );
        report
    }

    fn technology_list(&self) -> String {
        self.technologies
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn print_summary(&self) {
        ui::raw(Status::Highlight, "\n[*] SCAN SUMMARY");
        ui::line(Status::Info, format!("Target: {}", self.target));
        let technologies = if self.technologies.is_empty() {
            "None detected".to_string()
        } else {
            self.technology_list()
        };
        ui::line(Status::Info, format!("Technologies: {}", technologies));
        ui::line(
            if self.vulnerabilities.is_empty() { Status::Found } else { Status::Alert },
            format!("Vulnerabilities Found: {}", self.vulnerabilities.len()),
        );
        ui::line(
            if self.exposed_files.is_empty() { Status::Found } else { Status::Alert },
            format!("Exposed Files: {}", self.exposed_files.len()),
        );
        ui::raw(
            Status::Highlight,
            "\nScan completed! Check the JSON report for full details.",
        );
    }
}
