// src/core/scanner/tech_scanner.rs

use crate::core::http::{self, CHECK_TIMEOUT, ProbeError};
use crate::core::models::Technology;
use crate::core::scanner::probe_all;
use crate::core::target::join_path;
use crate::ui::{self, Status};
use futures::StreamExt;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

static SCRIPT: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());
static REACT_ATTRS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-reactroot], [data-reactid]").unwrap());
static VUE_ATTRS: Lazy<Selector> = Lazy::new(|| Selector::parse("[v-bind], [v-model]").unwrap());

/// One independent signature check. Each check issues its own request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechCheck {
    WordPress,
    Joomla,
    React,
    Angular,
    Vue,
    Static,
}

impl TechCheck {
    pub const ALL: [TechCheck; 6] = [
        TechCheck::WordPress,
        TechCheck::Joomla,
        TechCheck::React,
        TechCheck::Angular,
        TechCheck::Vue,
        TechCheck::Static,
    ];

    fn technology(self) -> Technology {
        match self {
            TechCheck::WordPress => Technology::WordPress,
            TechCheck::Joomla => Technology::Joomla,
            TechCheck::React => Technology::React,
            TechCheck::Angular => Technology::Angular,
            TechCheck::Vue => Technology::VueJs,
            TechCheck::Static => Technology::Static,
        }
    }

    /// Path requested by the check, relative to the target.
    fn path(self) -> &'static str {
        match self {
            TechCheck::WordPress => "/wp-login.php",
            TechCheck::Joomla => "/administrator",
            _ => "",
        }
    }
}

/// Runs a single check against the target.
///
/// Returns `Ok(Some(tech))` on a match, `Ok(None)` when the page was fetched
/// but the signature is absent.
pub async fn run_check(
    client: &Client,
    target: &str,
    check: TechCheck,
) -> Result<Option<Technology>, ProbeError> {
    let url = join_path(target, check.path());
    let page = http::fetch(client, &url, CHECK_TIMEOUT).await?;

    let matched = match check {
        TechCheck::WordPress => page.is_ok() && page.body.contains("wp-login.php"),
        TechCheck::Joomla => page.is_ok() && page.body.to_lowercase().contains("joomla"),
        TechCheck::React => has_react_signature(&page.body),
        TechCheck::Angular => has_angular_signature(&page.body),
        TechCheck::Vue => has_vue_signature(&page.body),
        TechCheck::Static => looks_static(&page.body),
    };
    debug!(check = ?check, matched, "Technology check finished.");

    Ok(matched.then(|| check.technology()))
}

/// Adds `tech` to `found` unless it is already listed. Returns whether it was added.
pub fn record_unique(found: &mut Vec<Technology>, tech: Technology) -> bool {
    if found.contains(&tech) {
        return false;
    }
    found.push(tech);
    true
}

/// Runs every technology check concurrently against the target.
///
/// Each check issues its own request; a failed check is reported and does
/// not stop the others.
///
/// # Arguments
/// * `client` - The shared HTTP client.
/// * `target` - The normalised target URL, without a trailing slash.
///
/// # Returns
/// The distinct technologies found, in the order their checks completed.
pub async fn detect_technologies(client: &Client, target: &str) -> Vec<Technology> {
    info!(target, "Starting technology detection.");
    let mut found: Vec<Technology> = Vec::new();

    let mut results = std::pin::pin!(probe_all(TechCheck::ALL, TechCheck::ALL.len(), |check| {
        run_check(client, target, check)
    }));

    while let Some((check, outcome)) = results.next().await {
        match outcome {
            Some(Some(tech)) => {
                if record_unique(&mut found, tech) {
                    ui::line(Status::Found, format!("Found: {}", tech));
                }
            }
            Some(None) => {}
            None => ui::line(Status::Alert, format!("Error in {:?} detection", check)),
        }
    }

    info!(count = found.len(), "Technology detection finished.");
    found
}

/// React devtools hooks in scripts, or React's server-rendering attributes.
pub fn has_react_signature(body: &str) -> bool {
    let document = Html::parse_document(body);
    let devtools = document.select(&SCRIPT).any(|script| {
        script.value().attr("src").unwrap_or("").contains("react-devtools")
            || script.text().collect::<String>().contains("__REACT_DEVTOOLS_")
    });
    devtools || document.select(&REACT_ATTRS).next().is_some()
}

pub fn has_angular_signature(body: &str) -> bool {
    body.contains("ng-app") || body.to_lowercase().contains("angular")
}

/// A Vue bundle or inline `new Vue`, or Vue directive attributes.
pub fn has_vue_signature(body: &str) -> bool {
    let document = Html::parse_document(body);
    let script = document.select(&SCRIPT).any(|script| {
        script.value().attr("src").unwrap_or("").to_lowercase().contains("vue")
            || script.text().collect::<String>().contains("new Vue")
    });
    script || document.select(&VUE_ATTRS).next().is_some()
}

/// Fewer than three scripts, none of them WordPress assets.
pub fn looks_static(body: &str) -> bool {
    let document = Html::parse_document(body);
    let scripts: Vec<_> = document.select(&SCRIPT).collect();
    scripts.len() < 3 && !scripts.iter().any(|s| s.html().contains("wp-"))
}
