// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

// --- Reusable Result Types ---
// Outcome of a scan phase: an optional success value or a printable error.
pub type ScanResult<T> = Result<Option<T>, String>;

// --- Technology Labels ---

/// A web technology the detector knows how to recognise.
///
/// The serialized form is the human-readable label used in the JSON report
/// (e.g. `"Vue.js"`), so the enum and the report never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Technology {
    #[serde(rename = "WordPress")]
    #[strum(serialize = "WordPress")]
    WordPress,
    #[serde(rename = "Joomla")]
    #[strum(serialize = "Joomla")]
    Joomla,
    #[serde(rename = "React")]
    #[strum(serialize = "React")]
    React,
    #[serde(rename = "Angular")]
    #[strum(serialize = "Angular")]
    Angular,
    #[serde(rename = "Vue.js")]
    #[strum(serialize = "Vue.js")]
    VueJs,
    #[serde(rename = "Static")]
    #[strum(serialize = "Static")]
    Static,
}

/// Broad family a technology belongs to; drives vulnerability dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechFamily {
    /// Content management systems (WordPress, Joomla).
    Cms,
    /// Client-side single-page application frameworks.
    Spa,
    Other,
}

impl Technology {
    // Maps a technology to its family.
    pub fn family(self) -> TechFamily {
        match self {
            Technology::WordPress | Technology::Joomla => TechFamily::Cms,
            Technology::React | Technology::Angular | Technology::VueJs => TechFamily::Spa,
            Technology::Static => TechFamily::Other,
        }
    }
}

// --- Vulnerability Labels ---

/// A vulnerability class the scanner can record.
///
/// Like `Technology`, the serialized form is the label written to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Vulnerability {
    #[serde(rename = "SQL Injection")]
    #[strum(serialize = "SQL Injection")]
    SqlInjection,
    #[serde(rename = "XSS")]
    #[strum(serialize = "XSS")]
    Xss,
    #[serde(rename = "Directory Listing")]
    #[strum(serialize = "Directory Listing")]
    DirectoryListing,
    #[serde(rename = "Exposed source map")]
    #[strum(serialize = "Exposed source map")]
    ExposedSourceMap,
}

// --- Footprint Models ---

/// Server banner headers captured from the homepage.
///
/// Both fields are `None` only when the homepage could not be fetched; a
/// missing header is recorded as `"Not Found"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powered_by: Option<String>,
}

// A mail exchanger and its priority, as printed in the DNS step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub exchange: String,
    pub preference: u16,
}

/// Records returned by the DNS enumeration step.
#[derive(Debug, Clone, Default)]
pub struct DnsResults {
    /// IPv4 addresses.
    pub a: Vec<String>,
    pub mx: Vec<MxRecord>,
    pub txt: Vec<String>,
}

/// Summary of the `Disallow:` entries of a robots.txt file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsSummary {
    /// At most the first five entries, trimmed.
    pub preview: Vec<String>,
    /// Number of entries not included in `preview`.
    pub remaining: usize,
}

// Approximate size of a sitemap.xml, counted from its `<url>` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSummary {
    pub approx_urls: usize,
}

/// Everything collected during the footprinting phase.
#[derive(Debug, Clone)]
pub struct FootprintResults {
    pub server_info: ServerInfo,
    /// Resolved address of the host, IPv4 preferred.
    pub ip_address: Option<String>,
    pub dns: ScanResult<DnsResults>,
    pub robots: ScanResult<RobotsSummary>,
    pub sitemap: ScanResult<SitemapSummary>,
    /// Common directories that answered `200`.
    pub hidden_dirs: Vec<String>,
    /// Sensitive files that answered `200` with a non-empty body.
    pub exposed_files: Vec<String>,
}

// Empty results: nothing found, every optional step skipped.
impl Default for FootprintResults {
    fn default() -> Self {
        Self {
            server_info: ServerInfo::default(),
            ip_address: None,
            dns: Ok(None),
            robots: Ok(None),
            sitemap: Ok(None),
            hidden_dirs: Vec::new(),
            exposed_files: Vec::new(),
        }
    }
}
