// src/logging.rs

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "gscan-rs", env!("CARGO_PKG_NAME"))
}

/// Per-user data directory, or `./.data` when the platform has none.
pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Path of the log file inside the data directory.
pub fn log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE.clone())
}

/// Sends tracing output to a log file, keeping stdout for the scan report.
///
/// The level comes from `RUST_LOG`, then `GSCAN_RS_LOGLEVEL`, and defaults to
/// `info` for this crate.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)
        .wrap_err_with(|| format!("Failed to create {}", directory.display()))?;
    let path = log_path();
    let log_file = std::fs::File::create(&path)
        .wrap_err_with(|| format!("Failed to create {}", path.display()))?;

    let file_log_level = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.clone()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(file_log_level));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_env_is_derived_from_crate_name() {
        assert_eq!(LOG_ENV.as_str(), "GSCAN_RS_LOGLEVEL");
        assert!(log_path().ends_with("gscan-rs.log"));
    }
}
