//! Project and module manifests (`composer.json`)
//!
//! A manifest is kept as an ordered JSON object so that a read, modify, write
//! cycle preserves key order and every key the installer does not know about.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// A parsed manifest document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectManifest {
    root: Map<String, Value>,
}

impl ProjectManifest {
    /// Parse manifest text.
    ///
    /// Returns `None` when the text is not JSON or its top level is not an
    /// object. Callers treat such manifests as absent.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(root)) => Some(Self { root }),
            Ok(_) => {
                tracing::debug!("manifest top level is not an object");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "manifest is not valid JSON");
                None
            }
        }
    }

    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Value at a nested key path, e.g. `["extra", "rocket-launcher"]`.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root.get(*first)?, |value, key| value.get(key))
    }

    /// Mutable value at a nested key path.
    pub fn get_mut(&mut self, path: &[&str]) -> Option<&mut Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.root.get_mut(*first)?, |value, key| value.get_mut(key))
    }

    /// The dependency map under `key`, if it is an object.
    pub fn dependencies(&self, key: &str) -> Option<&Map<String, Value>> {
        self.root.get(key).and_then(Value::as_object)
    }

    pub fn dependencies_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(key).and_then(Value::as_object_mut)
    }

    /// Remove `name` from the dependency map under `key`, keeping the order
    /// of the remaining entries. Returns whether an entry was removed.
    pub fn remove_dependency(&mut self, key: &str, name: &str) -> bool {
        self.dependencies_mut(key)
            .is_some_and(|deps| deps.shift_remove(name).is_some())
    }

    /// Serialize with four-space indentation and a trailing newline.
    ///
    /// `path` is only used in the error.
    pub fn to_json_string(&self, path: &str) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut serializer)
            .map_err(|source| Error::ManifestSerialize {
                path: path.to_string(),
                source,
            })?;
        let mut text = String::from_utf8_lossy(&buf).into_owned();
        text.push('\n');
        Ok(text)
    }
}

/// Render a dependency constraint for display.
pub(crate) fn constraint_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
