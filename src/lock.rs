//! Advisory per-file write lock around read-modify-write cycles.
//!
//! The lock is an exclusive `flock` on the target file itself, held from
//! before the read until after the rewrite. It serializes writers across
//! threads and processes that go through this crate; it does not stop other
//! programs that ignore advisory locks.
//!
//! Writes replace the target by renaming a new file over it, so a waiter may
//! end up locking a file that is no longer linked at the path. After locking,
//! the held file is compared with the one at the path and the lock is taken
//! again on a mismatch.

use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::EditError;

/// RAII guard; the lock is released on drop.
#[derive(Debug)]
pub struct TargetLock {
    file: File,
    path: PathBuf,
}

impl TargetLock {
    /// Block until an exclusive lock on `path` is held.
    pub fn acquire(path: &Path) -> Result<Self, EditError> {
        let read_err = |source| EditError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        loop {
            let file = File::open(path).map_err(read_err)?;
            FileExt::lock_exclusive(&file).map_err(read_err)?;
            if is_current(&file, path).map_err(read_err)? {
                tracing::trace!(path = %path.display(), "acquired write lock");
                return Ok(Self {
                    file,
                    path: path.to_path_buf(),
                });
            }
            tracing::trace!(path = %path.display(), "target replaced while waiting, relocking");
        }
    }
}

/// Whether `file` is still the file linked at `path`.
#[cfg(unix)]
fn is_current(file: &File, path: &Path) -> std::io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let (held, linked) = (file.metadata()?, std::fs::metadata(path)?);
    Ok(held.dev() == linked.dev() && held.ino() == linked.ino())
}

#[cfg(not(unix))]
fn is_current(_file: &File, _path: &Path) -> std::io::Result<bool> {
    Ok(true)
}

impl Drop for TargetLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release write lock");
        }
    }
}
