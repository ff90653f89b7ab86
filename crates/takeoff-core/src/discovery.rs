//! Module candidate discovery

use takeoff_fs::ProjectStore;
use takeoff_patch::is_registered;

use crate::manifest::constraint_text;
use crate::{InstallerConfig, ModuleDescriptor, ProjectManifest, Result};

/// A dependency that names a take-off module with a usable descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Dependency name, e.g. `vendor/foo-take-off`.
    pub package: String,
    /// Version constraint as declared in the project manifest.
    pub constraint: String,
    pub descriptor: ModuleDescriptor,
}

/// Installation state of one module dependency, for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStatus {
    pub package: String,
    pub constraint: String,
    /// `None` when the module manifest is missing or declares nothing.
    pub descriptor: Option<ModuleDescriptor>,
    /// Whether the provider already appears in the bootstrap file.
    pub registered: bool,
}

/// Read and parse the project manifest. Missing or unparsable manifests
/// yield `None`.
pub fn load_project_manifest(
    store: &dyn ProjectStore,
    config: &InstallerConfig,
) -> Result<Option<ProjectManifest>> {
    load_manifest(store, &config.manifest_file)
}

/// Read the descriptor of `package` from its own manifest.
///
/// Returns `None` when the module manifest is missing, unparsable, or has no
/// descriptor section.
pub fn load_descriptor(
    store: &dyn ProjectStore,
    config: &InstallerConfig,
    package: &str,
) -> Result<Option<ModuleDescriptor>> {
    let path = config.module_manifest_path(package);
    let Some(manifest) = load_manifest(store, &path)? else {
        tracing::debug!(package, path = %path, "module manifest not found");
        return Ok(None);
    };
    Ok(manifest
        .get(&[config.extra_key.as_str(), config.namespace_key.as_str()])
        .map(ModuleDescriptor::from_value))
}

/// Find the modules to install, in manifest dependency order.
///
/// A dependency is a candidate when its name ends with the module suffix and
/// its descriptor is present and not empty. A missing project manifest or
/// dependency map yields no candidates.
pub fn discover(store: &dyn ProjectStore, config: &InstallerConfig) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for (package, constraint) in module_dependencies(store, config)? {
        match load_descriptor(store, config, &package)? {
            Some(descriptor) if !descriptor.is_empty() => candidates.push(Candidate {
                package,
                constraint,
                descriptor,
            }),
            _ => tracing::debug!(package = %package, "no descriptor, skipping"),
        }
    }
    Ok(candidates)
}

/// Describe every module dependency, including ones without a descriptor.
pub fn scan(store: &dyn ProjectStore, config: &InstallerConfig) -> Result<Vec<ModuleStatus>> {
    let bootstrap = store.read_optional(&config.bootstrap_file)?;
    let mut statuses = Vec::new();
    for (package, constraint) in module_dependencies(store, config)? {
        let descriptor = load_descriptor(store, config, &package)?.filter(|d| !d.is_empty());
        let registered = match (&bootstrap, &descriptor) {
            (Some(text), Some(d)) if d.has_provider() => {
                is_registered(
                    Some(text.as_str()),
                    &config.anchor,
                    &config.provider_id(&d.provider),
                )
            }
            _ => false,
        };
        statuses.push(ModuleStatus {
            package,
            constraint,
            descriptor,
            registered,
        });
    }
    Ok(statuses)
}

fn module_dependencies(
    store: &dyn ProjectStore,
    config: &InstallerConfig,
) -> Result<Vec<(String, String)>> {
    let Some(manifest) = load_project_manifest(store, config)? else {
        tracing::debug!(path = %config.manifest_file, "project manifest not found");
        return Ok(Vec::new());
    };
    let Some(deps) = manifest.dependencies(&config.dependencies_key) else {
        tracing::debug!(key = %config.dependencies_key, "no dependency map");
        return Ok(Vec::new());
    };
    Ok(deps
        .iter()
        .filter(|(name, _)| name.ends_with(&config.module_suffix))
        .map(|(name, constraint)| (name.clone(), constraint_text(constraint)))
        .collect())
}

fn load_manifest(store: &dyn ProjectStore, path: &str) -> Result<Option<ProjectManifest>> {
    let Some(text) = store.read_optional(path)? else {
        return Ok(None);
    };
    let manifest = ProjectManifest::parse(&text);
    if manifest.is_none() {
        tracing::debug!(path, "manifest is not a JSON object, ignoring");
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use takeoff_fs::MemoryStore;

    const FOO_MANIFEST: &str = r#"{"extra": {"rocket-launcher": {"provider": "Foo\\Provider"}}}"#;

    #[test]
    fn discovers_suffixed_dependencies_in_order() {
        let store = MemoryStore::default()
            .with_file(
                "composer.json",
                r#"{"dependencies": {"vendor/zed-take-off": "^1", "vendor/lib": "^2", "vendor/foo-take-off": "dev-main"}}"#,
            )
            .with_file("vendor/zed-take-off/composer.json", FOO_MANIFEST)
            .with_file("vendor/foo-take-off/composer.json", FOO_MANIFEST)
            .with_file("vendor/lib/composer.json", FOO_MANIFEST);

        let candidates = discover(&store, &InstallerConfig::default()).unwrap();
        let names: Vec<_> = candidates.iter().map(|c| c.package.as_str()).collect();
        assert_eq!(names, vec!["vendor/zed-take-off", "vendor/foo-take-off"]);
        assert_eq!(candidates[1].constraint, "dev-main");
    }

    #[test]
    fn missing_or_empty_descriptors_are_skipped() {
        let store = MemoryStore::default()
            .with_file(
                "composer.json",
                r#"{"dependencies": {"a-take-off": "1", "b-take-off": "1", "c-take-off": "1"}}"#,
            )
            .with_file("vendor/b-take-off/composer.json", r#"{"extra": {}}"#)
            .with_file(
                "vendor/c-take-off/composer.json",
                r#"{"extra": {"rocket-launcher": {}}}"#,
            );

        assert!(discover(&store, &InstallerConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn missing_manifest_yields_nothing() {
        let store = MemoryStore::default();
        assert!(discover(&store, &InstallerConfig::default()).unwrap().is_empty());
        assert!(scan(&store, &InstallerConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn scan_reports_registration() {
        let store = MemoryStore::default()
            .with_file(
                "composer.json",
                r#"{"dependencies": {"foo-take-off": "1", "bare-take-off": "1"}}"#,
            )
            .with_file("vendor/foo-take-off/composer.json", FOO_MANIFEST)
            .with_file(
                "configs/providers.php",
                "AppBuilder::init(__DIR__, [\n    \\Foo\\Provider::class,\n]);\n",
            );

        let statuses = scan(&store, &InstallerConfig::default()).unwrap();
        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].registered);
        assert!(statuses[0].descriptor.is_some());
        assert!(!statuses[1].registered);
        assert_eq!(statuses[1].descriptor, None);
    }
}
