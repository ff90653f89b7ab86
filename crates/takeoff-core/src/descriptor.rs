//! Module descriptors
//!
//! A module declares what it needs from the host project under
//! `extra.rocket-launcher` in its own manifest:
//!
//! ```json
//! {
//!     "extra": {
//!         "rocket-launcher": {
//!             "provider": "Foo\\Provider",
//!             "command": "foo:setup",
//!             "install": true,
//!             "clean": true,
//!             "libraries": { "vendor/lib": "^1.0" }
//!         }
//!     }
//! }
//! ```
//!
//! Decoding never fails. A key that is missing or has the wrong type takes
//! its default, so a sloppy descriptor degrades to doing less.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One library a module asks the host project to depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
    pub constraint: String,
}

/// Decoded `rocket-launcher` section of a module manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModuleDescriptor {
    /// Provider identifier to register in the bootstrap file.
    #[serde(deserialize_with = "lenient_string")]
    pub provider: String,

    /// Command that finishes the installation.
    #[serde(deserialize_with = "lenient_string")]
    pub command: String,

    /// Run `command` automatically instead of asking the user to.
    #[serde(rename = "install", alias = "auto_install", deserialize_with = "lenient_bool")]
    pub auto_install: bool,

    /// Remove the module from the project once installed.
    #[serde(deserialize_with = "lenient_bool")]
    pub clean: bool,

    /// Libraries to merge into the project, in declaration order.
    #[serde(deserialize_with = "lenient_libraries")]
    pub libraries: Vec<Library>,
}

impl ModuleDescriptor {
    /// Decode a descriptor value. Anything that is not an object yields the
    /// empty descriptor.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::deserialize(value).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "descriptor could not be decoded");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// A descriptor with nothing to do.
    pub fn is_empty(&self) -> bool {
        self.provider.is_empty()
            && self.command.is_empty()
            && !self.auto_install
            && !self.clean
            && self.libraries.is_empty()
    }

    pub fn has_provider(&self) -> bool {
        !self.provider.is_empty()
    }

    pub fn has_command(&self) -> bool {
        !self.command.is_empty()
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        _ => String::new(),
    })
}

/// Loose truthiness: `true`, non-zero numbers, and strings other than
/// `""`, `"0"` and `"false"`.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        _ => false,
    })
}

fn lenient_libraries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Library>, D::Error> {
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(name, constraint)| match constraint {
            Value::String(constraint) if !name.trim().is_empty() => Some(Library {
                name,
                constraint,
            }),
            _ => None,
        })
        .collect())
}
