//! [`TestProject`] builder for installer scenarios on disk.

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

/// A freshly generated bootstrap file with no providers registered.
pub const BOOTSTRAP: &str = "<?php\n\
defined( 'ABSPATH' ) || exit;\n\
\n\
use RocketLauncherCore\\AppBuilder;\n\
\n\
require_once __DIR__ . '/../vendor/autoload.php';\n\
\n\
AppBuilder::init(__DIR__ . '/../');\n";

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use takeoff_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_manifest(&serde_json::json!({"dependencies": {"vendor/foo-take-off": "^1.0"}}));
/// project.write_module("vendor/foo-take-off", &serde_json::json!({"provider": "Foo\\Provider"}));
/// project.write_bootstrap(takeoff_test_utils::BOOTSTRAP);
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `path` (relative to root), creating directories.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Read `path` (relative to root).
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Write the project `composer.json`.
    pub fn write_manifest(&self, manifest: &Value) {
        self.write("composer.json", &pretty(manifest));
    }

    /// Write `vendor/<package>/composer.json` carrying `descriptor` under
    /// `extra.rocket-launcher`.
    pub fn write_module(&self, package: &str, descriptor: &Value) {
        let manifest = json!({
            "name": package,
            "extra": { "rocket-launcher": descriptor }
        });
        self.write(&format!("vendor/{package}/composer.json"), &pretty(&manifest));
    }

    /// Write `configs/providers.php`.
    pub fn write_bootstrap(&self, content: &str) {
        self.write("configs/providers.php", content);
    }

    pub fn manifest(&self) -> Value {
        serde_json::from_str(&self.read("composer.json")).unwrap()
    }

    pub fn bootstrap(&self) -> String {
        self.read("configs/providers.php")
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }

    /// Assert that the file at `path` does **not** contain `content`.
    pub fn assert_file_not_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            !file_content.contains(content),
            "File {} unexpectedly contains: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}

fn pretty(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).unwrap();
    text.push('\n');
    text
}
