// src/core/mod.rs

/// Data structures shared by the scan phases: technology and vulnerability
/// labels, footprint results, DNS records.
pub mod models;

/// The scan phases and the bounded fan-out helper they share.
pub mod scanner;

/// Word lists, worker caps and vulnerability descriptions.
pub mod knowledge_base;

pub mod http;
pub mod report;
pub mod target;
