//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Replace the file at `path` with `content`.
///
/// The bytes land in a locked sibling temp file that is synced and renamed
/// over the target. Readers see the old or the new content, never a mix. On
/// failure the temp file is removed and the target is left as it was.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory keeps the rename on one filesystem.
    let temp_name = format!(
        ".{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(&temp_name);

    let written = write_locked(&temp_path, &target, content)
        .and_then(|()| fs::rename(&temp_path, &target).map_err(|e| Error::io(&target, e)));
    if let Err(e) = written {
        match fs::remove_file(&temp_path) {
            Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "temp file left behind");
            }
            _ => {}
        }
        return Err(e);
    }

    tracing::debug!(path = %path, bytes = content.len(), "replaced file");
    Ok(())
}

fn write_locked(temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    let lock_failed = |_: std::io::Error| Error::LockFailed {
        path: target.to_path_buf(),
    };
    file.lock_exclusive().map_err(lock_failed)?;
    file.write_all(content).map_err(|e| Error::io(temp_path, e))?;
    file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    file.unlock().map_err(lock_failed)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
