//! Symbol-prefixed console lines for human-readable run output.
//!
//! Progress and diagnostics go through `tracing`; the lines here are the
//! user-facing per-item results and summary blocks the pipelines print to
//! stdout.

use crate::report::RunSummary;
use anstyle::{AnsiColor, Style};

const GREEN: Style = AnsiColor::Green.on_default();
const YELLOW: Style = AnsiColor::Yellow.on_default();
const RED: Style = AnsiColor::Red.on_default();

/// Print a green-check line for a passed check or completed item.
pub fn success(message: impl std::fmt::Display) {
    println!("{GREEN}✓{GREEN:#} {message}");
}

/// Print a yellow-warning line. Warnings never fail a run.
pub fn warning(message: impl std::fmt::Display) {
    println!("{YELLOW}⚠{YELLOW:#} {message}");
}

/// Print a red-cross line for a failed item or check.
pub fn error(message: impl std::fmt::Display) {
    println!("{RED}✗{RED:#} {message}");
}

/// Print an indented continuation line under an item result.
pub fn detail(message: impl std::fmt::Display) {
    println!("    {message}");
}

/// Print a section heading.
pub fn heading(title: impl std::fmt::Display) {
    println!("\n{title}");
}

/// Print the closing summary block for one pipeline run.
pub fn summary(title: &str, summary: &RunSummary) {
    println!("\n=== {title} ===");
    if summary.is_empty() {
        println!("nothing to do");
    } else {
        println!("{summary}");
    }
}
