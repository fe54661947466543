// src/core/scanner/mod.rs

// Every scan phase lives in its own sub-module. They share the bounded
// fan-out helper below.
pub mod api_scanner;
pub mod dns_scanner;
pub mod footprint_scanner;
pub mod tech_scanner;
pub mod vuln_scanner;

use futures::stream::{self, Stream, StreamExt};
use std::fmt::{Debug, Display};
use std::future::Future;
use tracing::warn;

/// Runs `probe` over every item with at most `limit` probes in flight.
///
/// Results are yielded in completion order as `(item, outcome)`. A probe that
/// returns an error yields `None` for its item; the failure is logged and the
/// rest of the batch keeps running.
///
/// The returned stream is not `Unpin`; pin it before polling:
///
/// ```ignore
/// let mut hits = std::pin::pin!(probe_all(paths, 10, |p| check(p)));
/// while let Some((path, found)) = hits.next().await { /* ... */ }
/// ```
pub fn probe_all<I, T, E, F, Fut>(
    items: I,
    limit: usize,
    probe: F,
) -> impl Stream<Item = (I::Item, Option<T>)>
where
    I: IntoIterator,
    I::Item: Clone + Debug,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    stream::iter(items.into_iter().map(move |item| {
        let pending = probe(item.clone());
        async move {
            match pending.await {
                Ok(value) => (item, Some(value)),
                Err(e) => {
                    warn!(item = ?item, error = %e, "Probe failed, treating as negative.");
                    (item, None)
                }
            }
        }
    }))
    .buffer_unordered(limit.max(1))
}
