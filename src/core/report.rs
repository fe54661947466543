// src/core/report.rs

use crate::core::models::{ServerInfo, Technology, Vulnerability};
use chrono::{DateTime, Local};
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The JSON report written at the end of a scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub target: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    pub technologies: Vec<Technology>,
    pub api_endpoints: Vec<String>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub exposed_files: Vec<String>,
    pub server_info: ServerInfo,
}

impl Report {
    pub fn new(
        target: &str,
        now: DateTime<Local>,
        technologies: &[Technology],
        api_endpoints: &[String],
        vulnerabilities: &[Vulnerability],
        exposed_files: &[String],
        server_info: &ServerInfo,
    ) -> Self {
        Self {
            target: target.to_string(),
            date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            technologies: technologies.to_vec(),
            api_endpoints: api_endpoints.to_vec(),
            vulnerabilities: vulnerabilities.to_vec(),
            exposed_files: exposed_files.to_vec(),
            server_info: server_info.clone(),
        }
    }

    /// Serializes the report as JSON indented with four spaces.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .wrap_err("Failed to serialize report")?;
        Ok(buf)
    }
}

/// `gscan_report_YYYYMMDD_HHMMSS.json` in the working directory.
pub fn default_report_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!("gscan_report_{}.json", now.format("%Y%m%d_%H%M%S")))
}

pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(path, json)
        .wrap_err_with(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(server_info: ServerInfo) -> Report {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        Report::new(
            "http://example.com",
            now,
            &[Technology::VueJs, Technology::Static],
            &["/api".to_string()],
            &[Vulnerability::SqlInjection],
            &["/.env".to_string()],
            &server_info,
        )
    }

    #[test]
    fn report_has_expected_keys_and_labels() {
        let report = sample(ServerInfo {
            server: Some("nginx".into()),
            powered_by: Some("Not Found".into()),
        });
        let value: serde_json::Value = serde_json::from_slice(&report.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "api_endpoints",
                "date",
                "exposed_files",
                "server_info",
                "target",
                "technologies",
                "vulnerabilities"
            ]
        );
        assert_eq!(object["date"], "2024-03-09 07:05:01");
        assert_eq!(object["technologies"], serde_json::json!(["Vue.js", "Static"]));
        assert_eq!(object["vulnerabilities"], serde_json::json!(["SQL Injection"]));
        assert_eq!(
            object["server_info"],
            serde_json::json!({"server": "nginx", "powered_by": "Not Found"})
        );
    }

    #[test]
    fn unreachable_homepage_gives_empty_server_info() {
        let value: serde_json::Value =
            serde_json::from_slice(&sample(ServerInfo::default()).to_json().unwrap()).unwrap();
        assert_eq!(value["server_info"], serde_json::json!({}));
    }

    #[test]
    fn output_is_indented_with_four_spaces() {
        let json = String::from_utf8(sample(ServerInfo::default()).to_json().unwrap()).unwrap();
        assert!(json.contains("\n    \"target\": \"http://example.com\""));
    }

    #[test]
    fn default_path_is_timestamped() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            default_report_path(now),
            PathBuf::from("gscan_report_20240309_070501.json")
        );
    }
}
