//! Layered configuration resolution

use std::fs;

use pretty_assertions::assert_eq;
use takeoff_core::{Error, InstallerConfig};
use tempfile::TempDir;

#[test]
fn defaults_without_any_file() {
    let temp = TempDir::new().unwrap();
    let config = InstallerConfig::resolve(temp.path(), None).unwrap();
    assert_eq!(config, InstallerConfig::default());
}

#[test]
fn explicit_file_overrides_project_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("takeoff.toml"),
        "bootstrap_file = \"plugin.php\"\nanchor = \"Project::boot\"\n",
    )
    .unwrap();
    let explicit = temp.path().join("ci.toml");
    fs::write(&explicit, "anchor = \"Ci::boot\"\n").unwrap();

    let config = InstallerConfig::resolve(temp.path(), Some(explicit.as_path())).unwrap();

    assert_eq!(config.bootstrap_file, "plugin.php");
    assert_eq!(config.anchor, "Ci::boot");
    assert_eq!(config.manifest_file, "composer.json");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = InstallerConfig::resolve(temp.path(), Some(temp.path().join("nope.toml").as_path()));
    assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
}

#[test]
fn invalid_project_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("takeoff.toml"), "anchor = [").unwrap();

    let result = InstallerConfig::resolve(temp.path(), None);
    assert!(matches!(result, Err(Error::ConfigParse { .. })));
}
