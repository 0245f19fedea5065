//! Log file persistence with cross-process advisory locking
//!
//! Every line is persisted with a full open/lock/write/unlock/close cycle.
//! Holding no file handle between lines is what lets independent processes
//! share one log path: the exclusive `flock` is taken on a fresh descriptor
//! around exactly one write, so concurrent writers interleave at line
//! granularity and never inside a line.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends rendered lines to a shared log file under an exclusive lock.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink for the given log file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file path this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` plus a newline to the log file.
    ///
    /// The file is opened in append mode (created if absent), locked
    /// exclusively for the duration of the single write, then unlocked and
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SinkOpen`], [`Error::SinkLock`], or
    /// [`Error::SinkWrite`] for the corresponding stage. A failure to
    /// release the lock after a successful write is reported as a
    /// diagnostic only; the line has already been persisted.
    pub fn persist(&self, line: &str) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::SinkOpen {
                path: self.path.clone(),
                source,
            })?;

        let _lock = FileLock::exclusive(&file, &self.path)?;

        let mut out = &file;
        out.write_all(line.as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .map_err(|source| Error::SinkWrite {
                path: self.path.clone(),
                source,
            })
    }
}

/// Exclusive advisory lock held for the duration of one write.
///
/// Released on drop; the descriptor is closed right after by the caller
/// dropping the `File`.
struct FileLock<'a> {
    file: &'a File,
    path: &'a Path,
}

impl<'a> FileLock<'a> {
    /// Block until an exclusive lock on `file` is acquired.
    fn exclusive(file: &'a File, path: &'a Path) -> Result<Self> {
        flock_exclusive(file).map_err(|source| Error::SinkLock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file, path })
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        if let Err(e) = flock_release(self.file) {
            tracing::warn!("unable to unlock '{}' after logging: {e}", self.path.display());
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        fn flock_exclusive(file: &File) -> std::io::Result<()> {
            use std::os::unix::io::AsRawFd;

            // flock(2) blocks until any other holder releases.
            #[allow(unsafe_code)]
            let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
            if rc == 0 {
                Ok(())
            } else {
                Err(std::io::Error::last_os_error())
            }
        }

        fn flock_release(file: &File) -> std::io::Result<()> {
            use std::os::unix::io::AsRawFd;

            #[allow(unsafe_code)]
            let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
            if rc == 0 {
                Ok(())
            } else {
                Err(std::io::Error::last_os_error())
            }
        }
    } else {
        // Advisory locking is unix-only; other targets append unlocked.
        fn flock_exclusive(_file: &File) -> std::io::Result<()> {
            Ok(())
        }

        fn flock_release(_file: &File) -> std::io::Result<()> {
            Ok(())
        }
    }
}
