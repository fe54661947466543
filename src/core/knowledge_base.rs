//! Static, read-only data the scanner works from: the path word lists probed
//! during footprinting and API discovery, the worker caps used for each
//! fan-out, and a description of every vulnerability the scanner can report.
//! Keeping this data in one place lets the probes stay small and uniform.

use crate::core::models::Vulnerability;
use std::fmt;

/// Worker cap for path probes (hidden directories, exposed files, API paths).
pub const PATH_PROBE_WORKERS: usize = 10;

/// Paths probed for hidden directories. A `200` is a hit.
pub const COMMON_DIRS: &[&str] = &[
    "/admin",
    "/backup",
    "/wp-admin",
    "/administrator",
    "/.git",
    "/.svn",
    "/.env",
    "/config",
];

/// Sensitive files probed during footprinting. A `200` with a body is a hit.
pub const COMMON_FILES: &[&str] = &[
    "/.env",
    "/config.php",
    "/wp-config.php",
    "/phpinfo.php",
    "/.htaccess",
    "/web.config",
];

/// Substrings that mark a link or script call as an API endpoint.
pub const API_PATTERNS: &[&str] = &["/api/", "/graphql", "/rest/", "/v1/", "/v2/", "/oauth/"];

/// API roots probed directly.
pub const COMMON_API_ENDPOINTS: &[&str] = &["/api", "/graphql", "/rest", "/oauth2", "/auth", "/v1"];

/// Content-Type fragments that identify an API-style response.
pub const API_CONTENT_TYPES: &[&str] = &["json", "xml", "graphql", "text/plain", "octet-stream"];

/// Maximum number of robots.txt `Disallow:` lines echoed to the console.
pub const ROBOTS_PREVIEW_LIMIT: usize = 5;

/// High-level grouping of vulnerability findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingCategory {
    Injection,
    Disclosure,
}

impl fmt::Display for FindingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingCategory::Injection => write!(f, "Injection"),
            FindingCategory::Disclosure => write!(f, "Information Disclosure"),
        }
    }
}

/// Human-readable context for a single vulnerability label.
pub struct FindingDetail {
    pub vulnerability: Vulnerability,
    pub category: FindingCategory,
    pub description: &'static str,
    pub remediation: &'static str,
}

static FINDINGS: &[FindingDetail] = &[
    FindingDetail {
        vulnerability: Vulnerability::SqlInjection,
        category: FindingCategory::Injection,
        description: "A quote injected into a query parameter produced a response mentioning SQL or a syntax error, which suggests the parameter reaches a database query unescaped.",
        remediation: "Use parameterized queries or prepared statements and stop echoing database errors to clients.",
    },
    FindingDetail {
        vulnerability: Vulnerability::Xss,
        category: FindingCategory::Injection,
        description: "A script tag sent in a query parameter was reflected verbatim in the page.",
        remediation: "HTML-encode user input on output and deploy a Content-Security-Policy.",
    },
    FindingDetail {
        vulnerability: Vulnerability::DirectoryListing,
        category: FindingCategory::Disclosure,
        description: "The server returns an auto-generated index for a directory, exposing its file names.",
        remediation: "Disable automatic directory indexes (e.g. `Options -Indexes` on Apache, `autoindex off` on Nginx).",
    },
    FindingDetail {
        vulnerability: Vulnerability::ExposedSourceMap,
        category: FindingCategory::Disclosure,
        description: "The JavaScript source map for the main bundle is publicly downloadable, revealing original front-end sources.",
        remediation: "Do not deploy `.map` files to production, or restrict access to them.",
    },
];

/// Looks up the detail entry for a vulnerability.
pub fn get_finding_detail(vulnerability: Vulnerability) -> Option<&'static FindingDetail> {
    FINDINGS.iter().find(|f| f.vulnerability == vulnerability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_vulnerability_has_a_detail_entry() {
        for v in Vulnerability::iter() {
            assert!(get_finding_detail(v).is_some(), "missing detail for {v}");
        }
    }

    #[test]
    fn path_lists_are_rooted() {
        for path in COMMON_DIRS.iter().chain(COMMON_FILES).chain(COMMON_API_ENDPOINTS) {
            assert!(path.starts_with('/'), "{path} should start with '/'");
        }
    }
}
