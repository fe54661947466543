// src/ui/banner.rs

use super::paint;
use crossterm::style::Color;

const LOGO: &str = r"
           _____
   ____ _ / ___/_________ _____
  / __ `/ \__ \/ ___/ __ `/ __ \
 / /_/ / ___/ / /__/ /_/ / / / /
 \__, / /____/\___/\__,_/_/ /_/
/____/
";

/// Prints the start-up banner.
pub fn print_banner() {
    println!("{}", paint(LOGO, Color::Cyan));
    println!("{}", paint("Web Technology Scanner & Footprinting Tool", Color::Yellow));
    println!(
        "{}\n",
        paint(format!("Version: {}", env!("CARGO_PKG_VERSION")), Color::Yellow)
    );
}
