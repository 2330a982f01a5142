//! # Store File Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::errors::BackendError;

/// Exclusive lock on one named store.
///
/// Acquired when the backend opens, released on drop (RAII).
#[derive(Debug)]
pub struct StoreLock {
    /// Kept open to maintain the lock.
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Take the lock without waiting.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Locked` if another handle already holds it.
    pub fn acquire(lock_path: &Path) -> Result<Self, BackendError> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(lock_path)?;

        if file.try_lock_exclusive().is_err() {
            return Err(BackendError::Locked {
                path: lock_path.to_path_buf(),
            });
        }

        // Record the owner for operators inspecting a stuck store.
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
        })
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
        let _ = std::fs::remove_file(&self.path);
    }
}
