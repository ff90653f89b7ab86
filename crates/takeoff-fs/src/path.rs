//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Project files are addressed with forward slashes regardless of platform
/// (`vendor/foo-take-off/composer.json`). The native form is only produced at
/// I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    ///
    /// Leading slashes on `segment` are dropped so the result always stays
    /// under `self`.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        if segment.is_empty() {
            return self.clone();
        }
        let inner = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Whether a relative path would leave the directory it is joined onto.
    ///
    /// Absolute paths, drive prefixes and any `..` segment count as escaping.
    pub fn escapes_root(relative: &str) -> bool {
        let normalized = relative.replace('\\', "/");
        if normalized.starts_with('/') || Path::new(relative).is_absolute() {
            return true;
        }
        if normalized.len() >= 2 && normalized.as_bytes()[1] == b':' {
            return true;
        }
        normalized.split('/').any(|segment| segment == "..")
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_uses_forward_slashes() {
        let root = NormalizedPath::new("C:\\project");
        assert_eq!(root.join("vendor\\foo").as_str(), "C:/project/vendor/foo");
    }

    #[test]
    fn join_never_produces_double_slash() {
        let root = NormalizedPath::new("/project/");
        assert_eq!(root.join("/bin/generator").as_str(), "/project/bin/generator");
    }

    #[test]
    fn parent_and_file_name() {
        let path = NormalizedPath::new("/project/configs/providers.php");
        assert_eq!(path.file_name(), Some("providers.php"));
        assert_eq!(path.parent().unwrap().as_str(), "/project/configs");
        assert_eq!(NormalizedPath::new("/project").parent().unwrap().as_str(), "/");
    }

    #[test]
    fn escaping_paths_are_detected() {
        assert!(NormalizedPath::escapes_root("../composer.json"));
        assert!(NormalizedPath::escapes_root("vendor/../../etc/passwd"));
        assert!(NormalizedPath::escapes_root("/etc/passwd"));
        assert!(NormalizedPath::escapes_root("C:\\Windows"));
        assert!(!NormalizedPath::escapes_root("vendor/foo-take-off/composer.json"));
        assert!(!NormalizedPath::escapes_root("configs/..providers.php"));
    }
}
