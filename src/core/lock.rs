//! Registry lock.
//!
//! Serializes registry read-modify-write cycles across processes with an
//! exclusive `flock` on a dedicated lock file. On non-unix targets the lock
//! is a no-op and registry writes are last-writer-wins.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RegistryError;

#[cfg(unix)]
mod imp {
    use std::fs::{File, OpenOptions};
    use std::io;
    use std::os::raw::c_int;
    use std::os::unix::io::AsRawFd;
    use std::path::Path;

    const LOCK_EX: c_int = 2;
    const LOCK_UN: c_int = 8;

    extern "C" {
        fn flock(fd: c_int, operation: c_int) -> c_int;
    }

    pub fn open(path: &Path) -> io::Result<File> {
        use std::os::unix::fs::OpenOptionsExt;

        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .mode(crate::core::constants::SECURE_FILE_MODE)
            .open(path)
    }

    pub fn lock_exclusive(file: &File) -> io::Result<()> {
        loop {
            // SAFETY: the descriptor is owned by `file` and stays open for
            // the duration of the call.
            let result = unsafe { flock(file.as_raw_fd(), LOCK_EX) };
            if result == 0 {
                return Ok(());
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }

    pub fn unlock(file: &File) -> io::Result<()> {
        // SAFETY: as above.
        let result = unsafe { flock(file.as_raw_fd(), LOCK_UN) };
        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use std::fs::{File, OpenOptions};
    use std::io;
    use std::path::Path;

    pub fn open(path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
    }

    pub fn lock_exclusive(_file: &File) -> io::Result<()> {
        Ok(())
    }

    pub fn unlock(_file: &File) -> io::Result<()> {
        Ok(())
    }
}

/// Exclusive advisory lock on a file path.
#[derive(Debug, Clone)]
pub struct RegistryLock {
    path: PathBuf,
}

/// Held lock; released on drop.
#[derive(Debug)]
pub struct RegistryLockGuard {
    file: std::fs::File,
}

impl RegistryLock {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the exclusive lock is held.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Lock` if the lock file cannot be opened or
    /// the lock cannot be taken.
    pub fn acquire(&self) -> Result<RegistryLockGuard, RegistryError> {
        let to_err = |source| RegistryError::Lock {
            path: self.path.clone(),
            source,
        };

        let file = imp::open(&self.path).map_err(to_err)?;
        imp::lock_exclusive(&file).map_err(to_err)?;
        debug!(path = %self.path.display(), "registry lock acquired");

        Ok(RegistryLockGuard { file })
    }
}

impl Drop for RegistryLockGuard {
    fn drop(&mut self) {
        let _ = imp::unlock(&self.file);
    }
}
