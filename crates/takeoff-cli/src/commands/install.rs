//! Install command

use std::path::Path;

use colored::Colorize;
use takeoff_core::{ModuleInstaller, ShellRunner};
use takeoff_fs::ProjectStore;

use super::open_project;
use crate::error::Result;
use crate::reporter::TerminalReporter;

/// Run the install command
pub fn run_install(root: &Path, config: Option<&Path>) -> Result<()> {
    let (store, config) = open_project(root, config)?;
    let runner = ShellRunner::new(store.root().clone());
    let reporter = TerminalReporter;

    let report = ModuleInstaller::new(&store, &runner, &reporter, config).install()?;

    if report.is_empty() {
        println!("{}", "No take-off modules to install.".dimmed());
    } else {
        println!(
            "{} {} of {} modules installed",
            "Done:".dimmed(),
            report.installed_count(),
            report.modules.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use takeoff_test_utils::{BOOTSTRAP, TestProject};

    #[test]
    fn test_install_registers_provider() {
        let project = TestProject::new();
        project.write_manifest(&json!({ "dependencies": { "vendor/foo-take-off": "^1.0" } }));
        project.write_module("vendor/foo-take-off", &json!({ "provider": "Foo\\Provider" }));
        project.write_bootstrap(BOOTSTRAP);

        run_install(project.root(), None).unwrap();

        project.assert_file_contains("configs/providers.php", "\\Foo\\Provider::class,");
    }

    #[test]
    fn test_install_missing_root_is_user_error() {
        let project = TestProject::new();
        let err = run_install(&project.root().join("missing"), None).unwrap_err();
        assert!(matches!(err, crate::error::CliError::User { .. }));
    }
}
