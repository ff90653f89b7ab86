//! Installer configuration with layered resolution
//!
//! Every setting has a default matching the conventional project layout, so
//! most projects need no configuration file at all. Settings can be
//! overridden in `takeoff.toml` at the project root and in a file passed
//! explicitly on the command line:
//!
//! ```toml
//! bootstrap_file = "plugin.php"
//! dependencies_key = "require-dev"
//! provider_namespace = "MyPlugin\\Dependencies"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use takeoff_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Settings that locate the files and keys the installer works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    /// Project manifest file name, also used for module manifests.
    pub manifest_file: String,
    /// Manifest key holding the dependency map.
    pub dependencies_key: String,
    /// Manifest key holding the extension map.
    pub extra_key: String,
    /// Key under the extension map holding a module's descriptor.
    pub namespace_key: String,
    /// Dependency names ending with this suffix are module candidates.
    pub module_suffix: String,
    /// Directory holding installed dependencies.
    pub vendor_dir: String,
    /// Generated bootstrap file receiving provider registrations.
    pub bootstrap_file: String,
    /// Call expression whose argument list receives the providers.
    pub anchor: String,
    /// Dotted path of the bundling package list in the project manifest.
    pub packages_path: String,
    /// Project-local entry point that finishing commands are passed to.
    pub builder_path: String,
    /// Namespace prepended to every provider identifier, if any.
    pub provider_namespace: Option<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            manifest_file: "composer.json".to_string(),
            dependencies_key: "dependencies".to_string(),
            extra_key: "extra".to_string(),
            namespace_key: "rocket-launcher".to_string(),
            module_suffix: "-take-off".to_string(),
            vendor_dir: "vendor".to_string(),
            bootstrap_file: "configs/providers.php".to_string(),
            anchor: "AppBuilder::init".to_string(),
            packages_path: "extra.mozart.packages".to_string(),
            builder_path: "bin/generator".to_string(),
            provider_namespace: None,
        }
    }
}

impl InstallerConfig {
    /// File name of the project-level configuration layer.
    pub const FILE_NAME: &'static str = "takeoff.toml";

    /// Parse a single configuration file. Missing keys take their defaults.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        let table = parse_table(content, path)?;
        Self::from_table(table, path)
    }

    /// Resolve configuration for the project at `root`.
    ///
    /// Layers, later ones replacing whole keys of earlier ones:
    /// 1. Built-in defaults
    /// 2. `<root>/takeoff.toml`, if present
    /// 3. `explicit`, which must exist when given
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();
        let mut last_path = root.join(Self::FILE_NAME);

        let project_file = NormalizedPath::new(&last_path);
        if project_file.is_file() {
            tracing::debug!(path = %project_file, "Loading project config");
            merged.extend(parse_table(&io::read_text(&project_file)?, &last_path)?);
        }

        if let Some(path) = explicit {
            let file = NormalizedPath::new(path);
            if !file.is_file() {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            tracing::debug!(path = %file, "Loading explicit config");
            merged.extend(parse_table(&io::read_text(&file)?, path)?);
            last_path = path.to_path_buf();
        }

        Self::from_table(merged, &last_path)
    }

    /// Path of a module's own manifest, relative to the project root.
    pub fn module_manifest_path(&self, package: &str) -> String {
        format!(
            "{}/{}/{}",
            self.vendor_dir.trim_end_matches('/'),
            package,
            self.manifest_file
        )
    }

    /// Segments of [`packages_path`](Self::packages_path).
    pub fn packages_segments(&self) -> Vec<&str> {
        self.packages_path
            .split('.')
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Fully qualified provider identifier, with the configured namespace.
    pub fn provider_id(&self, provider: &str) -> String {
        let provider = provider.trim();
        match self.provider_namespace.as_deref().map(|ns| ns.trim_matches('\\')) {
            Some(ns) if !ns.is_empty() && !provider.is_empty() => {
                format!("{}\\{}", ns, provider.trim_start_matches('\\'))
            }
            _ => provider.to_string(),
        }
    }

    fn from_table(table: toml::Table, path: &Path) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| config_parse(path, e.to_string()))
    }
}

fn parse_table(content: &str, path: &Path) -> Result<toml::Table> {
    content
        .parse::<toml::Table>()
        .map_err(|e| config_parse(path, e.to_string()))
}

fn config_parse(path: &Path, message: String) -> Error {
    Error::ConfigParse {
        path: PathBuf::from(path),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = InstallerConfig::default();
        assert_eq!(config.module_manifest_path("foo-take-off"), "vendor/foo-take-off/composer.json");
        assert_eq!(config.packages_segments(), vec!["extra", "mozart", "packages"]);
        assert_eq!(config.provider_id("Foo\\Provider"), "Foo\\Provider");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = InstallerConfig::from_toml(
            "bootstrap_file = \"plugin.php\"\n",
            Path::new("takeoff.toml"),
        )
        .unwrap();
        assert_eq!(config.bootstrap_file, "plugin.php");
        assert_eq!(config.anchor, "AppBuilder::init");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = InstallerConfig::from_toml("bootstrap = \"x\"\n", Path::new("takeoff.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got: {err:?}");
    }

    #[test]
    fn provider_namespace_is_prepended() {
        let config = InstallerConfig {
            provider_namespace: Some("\\MyPlugin\\Dependencies\\".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.provider_id("\\Foo\\Provider"),
            "MyPlugin\\Dependencies\\Foo\\Provider"
        );
        assert_eq!(config.provider_id(""), "");
    }
}
