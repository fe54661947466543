// src/core/scanner/dns_scanner.rs

use tracing::{debug, info, warn};

use crate::core::models::{DnsResults, MxRecord, ScanResult};
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use std::net::IpAddr;

/// Builds a resolver from the system configuration, falling back to the
/// library defaults when it cannot be read.
fn build_resolver() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        warn!(error = %e, "Could not read system resolver config, using defaults.");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}

/// Enumerates A, MX and TXT records for `host`.
///
/// MX and TXT are looked up in parallel once the A lookup succeeds. They are
/// best-effort: a failure there yields an empty list.
///
/// # Arguments
/// * `host` - The host name of the target, without scheme or port.
///
/// # Returns
/// * `Ok(Some(results))` with the records found.
/// * `Ok(None)` when `host` is an IP literal, which has no records to enumerate.
/// * `Err(message)` when the A lookup fails.
pub async fn run_dns_scan(host: &str) -> ScanResult<DnsResults> {
    if host.parse::<IpAddr>().is_ok() {
        debug!(host, "Target is an IP literal, skipping DNS enumeration.");
        return Ok(None);
    }

    info!(host, "Starting DNS scan.");
    let resolver = build_resolver();

    let a = lookup_a(&resolver, host).await?;

    // MX and TXT do not depend on each other.
    let (mx, txt) = tokio::join!(lookup_mx(&resolver, host), lookup_txt(&resolver, host));

    info!(a = a.len(), mx = mx.len(), txt = txt.len(), "DNS scan finished.");
    Ok(Some(DnsResults { a, mx, txt }))
}

async fn lookup_a(resolver: &TokioAsyncResolver, host: &str) -> Result<Vec<String>, String> {
    debug!(host, "Looking up A records.");
    match resolver.ipv4_lookup(host).await {
        Ok(lookup) => Ok(lookup.iter().map(|a| a.to_string()).collect()),
        Err(e) => {
            warn!(host, error = %e, "A lookup failed.");
            Err(format!("DNS Error: {}", e))
        }
    }
}

async fn lookup_mx(resolver: &TokioAsyncResolver, host: &str) -> Vec<MxRecord> {
    debug!(host, "Looking up MX records.");
    match resolver.mx_lookup(host).await {
        Ok(lookup) => lookup
            .iter()
            .map(|mx| MxRecord {
                exchange: mx.exchange().to_string(),
                preference: mx.preference(),
            })
            .collect(),
        Err(e) => {
            debug!(host, error = %e, "MX lookup failed.");
            Vec::new()
        }
    }
}

async fn lookup_txt(resolver: &TokioAsyncResolver, host: &str) -> Vec<String> {
    debug!(host, "Looking up TXT records.");
    match resolver.txt_lookup(host).await {
        Ok(lookup) => lookup.iter().map(|txt| txt.to_string()).collect(),
        Err(e) => {
            debug!(host, error = %e, "TXT lookup failed.");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ip_literals_are_skipped() {
        assert!(matches!(run_dns_scan("127.0.0.1").await, Ok(None)));
        assert!(matches!(run_dns_scan("::1").await, Ok(None)));
    }
}
