//! Command implementations for takeoff-cli

pub mod install;
pub mod list;

pub use install::run_install;
pub use list::run_list;

use std::path::Path;

use takeoff_core::InstallerConfig;
use takeoff_fs::{DiskStore, ProjectStore};

use crate::error::{CliError, Result};

/// Open the project at `root` and resolve its configuration.
pub(crate) fn open_project(
    root: &Path,
    config: Option<&Path>,
) -> Result<(DiskStore, InstallerConfig)> {
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Project root {} is not a directory",
            root.display()
        )));
    }
    let store = DiskStore::new(root)?;
    let config = InstallerConfig::resolve(&store.root().to_native(), config)?;
    tracing::debug!(root = %store.root(), "opened project");
    Ok((store, config))
}
