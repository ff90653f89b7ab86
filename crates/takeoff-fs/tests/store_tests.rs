//! Tests for the disk-backed project store

use std::fs;

use pretty_assertions::assert_eq;
use rstest::rstest;
use takeoff_fs::{DiskStore, Error, ProjectStore};
use tempfile::TempDir;

#[test]
fn has_reports_existing_files_only() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("composer.json"), "{}").unwrap();
    fs::create_dir_all(temp.path().join("vendor")).unwrap();

    let store = DiskStore::new(temp.path()).unwrap();

    assert!(store.has("composer.json"));
    assert!(!store.has("vendor"), "directories are not files");
    assert!(!store.has("missing.json"));
}

#[test]
fn update_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    store
        .update("configs/providers.php", "<?php\nreturn [];\n")
        .unwrap();

    let content = fs::read_to_string(temp.path().join("configs/providers.php")).unwrap();
    assert_eq!(content, "<?php\nreturn [];\n");
}

#[test]
fn update_leaves_no_temp_files_behind() {
    let temp = TempDir::new().unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    store.update("composer.json", "{}").unwrap();
    store.update("composer.json", "{\"name\":\"x\"}").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left: {:?}", leftovers);
    assert_eq!(store.read("composer.json").unwrap(), "{\"name\":\"x\"}");
}

#[test]
fn failed_update_removes_temp_file() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("composer.json/keep")).unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    let result = store.update("composer.json", "{}");

    assert!(matches!(result, Err(Error::Io { .. })), "got {:?}", result);
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left: {:?}", leftovers);
    assert!(temp.path().join("composer.json/keep").is_dir());
}

#[test]
fn read_optional_distinguishes_missing_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("composer.json"), "{}").unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    assert_eq!(store.read_optional("composer.json").unwrap().as_deref(), Some("{}"));
    assert_eq!(store.read_optional("nope.json").unwrap(), None);
}

#[test]
fn read_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    let err = store.read("composer.json").unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
}

#[test]
fn root_is_absolute() {
    let temp = TempDir::new().unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    assert!(store.root().to_native().is_absolute());
}

#[test]
fn new_fails_for_missing_root() {
    let temp = TempDir::new().unwrap();
    let result = DiskStore::new(temp.path().join("does-not-exist"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[rstest]
#[case("../outside.json")]
#[case("vendor/../../outside.json")]
#[case("/etc/passwd")]
fn paths_outside_root_are_rejected(#[case] path: &str) {
    let temp = TempDir::new().unwrap();
    let store = DiskStore::new(temp.path()).unwrap();

    assert!(!store.has(path));
    assert!(matches!(store.read(path), Err(Error::OutsideRoot { .. })));
    assert!(matches!(
        store.update(path, "x"),
        Err(Error::OutsideRoot { .. })
    ));
}
