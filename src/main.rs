// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use gscan_rs::app::{App, ScanOptions};
use gscan_rs::{logging, ui};
use std::path::PathBuf;

/// Web technology scanner and footprinting tool.
#[derive(Parser, Debug)]
#[command(name = "gscan-rs", version, about, long_about = None)]
struct Cli {
    /// URL of the target website (scheme defaults to http://)
    target: String,

    /// Output file name for the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable colored console output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Logging is a convenience; a scan without a log file is still a scan.
    if let Err(e) = logging::initialize_logging() {
        eprintln!("warning: file logging disabled: {:#}", e);
    }

    ui::set_color_enabled(!cli.no_color);
    ui::print_banner();

    let mut app = App::new(ScanOptions {
        target: cli.target,
        output: cli.output,
    })?;
    app.run().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_flag_is_optional() {
        let cli = Cli::try_parse_from(["gscan-rs", "example.com"]).unwrap();
        assert_eq!(cli.target, "example.com");
        assert!(cli.output.is_none());
        assert!(!cli.no_color);

        let cli = Cli::try_parse_from(["gscan-rs", "example.com", "--output", "r.json", "--no-color"])
            .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("r.json")));
        assert!(cli.no_color);
    }
}
