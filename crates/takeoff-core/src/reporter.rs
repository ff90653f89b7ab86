//! User-facing progress messages

/// Receives the one-line progress messages of an install run.
pub trait Reporter {
    fn info(&self, message: &str);

    /// Problems that skip part of the work without aborting the run.
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

pub fn provider_installed(package: &str) -> String {
    format!("{package}: Successfully installed provider")
}

pub fn run_command_hint(package: &str, command: &str) -> String {
    format!("{package}: Please run '{command}' to finish the installation")
}

pub fn take_off_successful(package: &str) -> String {
    format!("{package}: Take off successful")
}

pub fn package_cleaned(package: &str) -> String {
    format!("{package}: Installation package cleaned")
}

pub fn anchor_not_found(package: &str, anchor: &str, bootstrap: &str) -> String {
    format!("{package}: Could not find '{anchor}' in {bootstrap}, provider not installed")
}
