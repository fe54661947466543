// src/ui/mod.rs

//! Console presentation. Every phase prints its progress as lines tagged with
//! a `Status`, which maps to a color. Probes print as they complete, so the
//! order of lines inside a fan-out is not deterministic.

use crossterm::style::{Color, Stylize};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

mod banner;

pub use banner::print_banner;

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Turns ANSI colors on or off for the rest of the run.
pub fn set_color_enabled(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
}

/// The kind of a console line, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Something was discovered.
    Found,
    /// Neutral detail (header values, record contents).
    Info,
    /// Nothing was discovered.
    Missing,
    /// A potential vulnerability or a failed check.
    Alert,
    /// Summaries and headlines.
    Highlight,
}

impl Status {
    fn color(self) -> Color {
        match self {
            Status::Found => Color::Green,
            Status::Info => Color::Yellow,
            Status::Missing | Status::Alert => Color::Red,
            Status::Highlight => Color::Cyan,
        }
    }
}

/// Applies a color to text unless colors are disabled.
pub fn paint(text: impl Display, color: Color) -> String {
    let text = text.to_string();
    if COLOR_ENABLED.load(Ordering::Relaxed) {
        text.with(color).to_string()
    } else {
        text
    }
}

/// Prints a phase header such as `[+] FOOTPRINTING PHASE`.
pub fn phase(title: &str) {
    println!("{}", paint(format!("\n[+] {}", title), Color::Magenta));
}

/// Prints a section header inside a phase.
pub fn section(title: &str) {
    println!("{}", paint(format!("\n  {}:", title), Color::Blue));
}

/// Prints a top-level line inside a phase (two-space indent).
pub fn line(status: Status, message: impl Display) {
    println!("{}", paint(format!("  {}", message), status.color()));
}

/// Prints a line belonging to a section (four-space indent).
pub fn detail(status: Status, message: impl Display) {
    println!("{}", paint(format!("    {}", message), status.color()));
}

/// Prints raw text in the given status color without indentation.
pub fn raw(status: Status, message: impl Display) {
    println!("{}", paint(message, status.color()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_without_color_returns_plain_text() {
        set_color_enabled(false);
        assert_eq!(paint("hello", Color::Red), "hello");
        set_color_enabled(true);
    }
}
