// src/lib.rs

//! Unauthenticated reconnaissance of a single website: technology
//! fingerprinting, footprinting, signature-based vulnerability checks and a
//! JSON report.

pub mod app;
pub mod core;
pub mod logging;
pub mod ui;
