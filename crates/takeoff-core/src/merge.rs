//! Library merging into the project manifest

use serde_json::Value;

use crate::{InstallerConfig, Library, ProjectManifest};

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Libraries added to the dependency map.
    pub dependencies_added: Vec<String>,
    /// Libraries appended to the bundling package list.
    pub packages_added: Vec<String>,
    /// The manifest had no dependency map, so nothing was merged.
    pub skipped: bool,
}

impl MergeSummary {
    pub fn changed(&self) -> bool {
        !self.dependencies_added.is_empty() || !self.packages_added.is_empty()
    }
}

/// Merge `libraries` into the dependency map and the package list.
///
/// A library already present in the dependency map keeps its existing
/// constraint; one already in the package list is not appended again. The
/// package list is only extended, never created. A manifest without a
/// dependency map is left untouched.
pub fn merge_libraries(
    manifest: &mut ProjectManifest,
    libraries: &[Library],
    config: &InstallerConfig,
) -> MergeSummary {
    let mut summary = MergeSummary::default();

    let Some(deps) = manifest.dependencies_mut(&config.dependencies_key) else {
        tracing::warn!(key = %config.dependencies_key, "no dependency map, libraries not merged");
        summary.skipped = true;
        return summary;
    };
    for library in libraries {
        if !deps.contains_key(&library.name) {
            deps.insert(
                library.name.clone(),
                Value::String(library.constraint.clone()),
            );
            summary.dependencies_added.push(library.name.clone());
        }
    }

    match manifest
        .get_mut(&config.packages_segments())
        .and_then(Value::as_array_mut)
    {
        Some(packages) => {
            for library in libraries {
                let listed = packages
                    .iter()
                    .any(|p| p.as_str() == Some(library.name.as_str()));
                if !listed {
                    packages.push(Value::String(library.name.clone()));
                    summary.packages_added.push(library.name.clone());
                }
            }
        }
        None => tracing::debug!(path = %config.packages_path, "no package list to extend"),
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn library(name: &str, constraint: &str) -> Library {
        Library {
            name: name.to_string(),
            constraint: constraint.to_string(),
        }
    }

    #[test]
    fn adds_new_libraries_to_both_sections() {
        let mut manifest = ProjectManifest::parse(
            r#"{"dependencies": {"x": "1"}, "extra": {"mozart": {"packages": ["x"]}}}"#,
        )
        .unwrap();

        let summary = merge_libraries(
            &mut manifest,
            &[library("vendor/a", "^1.0")],
            &InstallerConfig::default(),
        );

        assert_eq!(summary.dependencies_added, vec!["vendor/a"]);
        assert_eq!(summary.packages_added, vec!["vendor/a"]);
        assert_eq!(
            manifest.get(&["dependencies", "vendor/a"]),
            Some(&Value::String("^1.0".into()))
        );
        assert_eq!(
            manifest.get(&["extra", "mozart", "packages"]),
            Some(&serde_json::json!(["x", "vendor/a"]))
        );
    }

    #[test]
    fn existing_constraint_is_kept() {
        let mut manifest =
            ProjectManifest::parse(r#"{"dependencies": {"vendor/a": "^0.9"}}"#).unwrap();

        let summary = merge_libraries(
            &mut manifest,
            &[library("vendor/a", "^1.0")],
            &InstallerConfig::default(),
        );

        assert!(!summary.changed());
        assert_eq!(
            manifest.get(&["dependencies", "vendor/a"]),
            Some(&Value::String("^0.9".into()))
        );
    }

    #[test]
    fn package_list_is_not_created() {
        let mut manifest = ProjectManifest::parse(r#"{"dependencies": {}}"#).unwrap();

        let summary = merge_libraries(
            &mut manifest,
            &[library("vendor/a", "^1.0")],
            &InstallerConfig::default(),
        );

        assert_eq!(summary.dependencies_added, vec!["vendor/a"]);
        assert!(summary.packages_added.is_empty());
        assert_eq!(manifest.get(&["extra"]), None);
    }

    #[test]
    fn missing_dependency_map_skips_merge() {
        let mut manifest = ProjectManifest::parse(r#"{"name": "x"}"#).unwrap();
        let before = manifest.clone();

        let summary = merge_libraries(
            &mut manifest,
            &[library("vendor/a", "^1.0")],
            &InstallerConfig::default(),
        );

        assert!(summary.skipped);
        assert_eq!(manifest, before);
    }

    #[test]
    fn merging_twice_adds_nothing_new() {
        let mut manifest = ProjectManifest::parse(
            r#"{"dependencies": {}, "extra": {"mozart": {"packages": []}}}"#,
        )
        .unwrap();
        let libs = [library("vendor/a", "^1.0"), library("vendor/b", "^2.0")];
        let config = InstallerConfig::default();

        merge_libraries(&mut manifest, &libs, &config);
        let once = manifest.clone();
        let second = merge_libraries(&mut manifest, &libs, &config);

        assert!(!second.changed());
        assert_eq!(manifest, once);
    }
}
