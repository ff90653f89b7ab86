//! Colored terminal output for install progress

use colored::Colorize;
use takeoff_core::Reporter;

/// [`Reporter`] printing `=> message` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn info(&self, message: &str) {
        println!("{} {}", "=>".green().bold(), message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", "=>".yellow().bold(), message);
    }
}
