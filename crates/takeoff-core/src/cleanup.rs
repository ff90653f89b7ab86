//! Removal of an installed module from the project

use takeoff_fs::ProjectStore;
use takeoff_patch::{PatchOutcome, unregister};

use crate::discovery::load_project_manifest;
use crate::{InstallerConfig, Result};

/// What a cleanup removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub provider_removed: bool,
    pub dependency_removed: bool,
}

/// Remove the entry of `provider` from the bootstrap file and the
/// `package` entry from the project dependency map.
///
/// Each file is written only if it changed. Other lines of the bootstrap
/// file and other manifest keys are left as they were.
pub fn clean_module(
    store: &dyn ProjectStore,
    config: &InstallerConfig,
    package: &str,
    provider: &str,
) -> Result<CleanupSummary> {
    let mut summary = CleanupSummary::default();

    if let Some(text) = store.read_optional(&config.bootstrap_file)? {
        match unregister(&text, provider) {
            PatchOutcome::Patched(updated) => {
                store.update(&config.bootstrap_file, &updated)?;
                summary.provider_removed = true;
            }
            _ => tracing::debug!(package, provider, "provider entry not found"),
        }
    }

    if let Some(mut manifest) = load_project_manifest(store, config)? {
        if manifest.remove_dependency(&config.dependencies_key, package) {
            store.update(
                &config.manifest_file,
                &manifest.to_json_string(&config.manifest_file)?,
            )?;
            summary.dependency_removed = true;
        }
    }

    Ok(summary)
}
