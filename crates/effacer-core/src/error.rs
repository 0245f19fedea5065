//! Error types for the Effacer logging core

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for logging operations
#[derive(Error, Debug)]
pub enum Error {
    /// Log file could not be opened for appending
    #[error("unable to open '{path}' for logging: {source}")]
    SinkOpen {
        /// Path of the log file
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// Exclusive advisory lock on the log file could not be acquired
    #[error("unable to lock '{path}' for logging: {source}")]
    SinkLock {
        /// Path of the log file
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// Writing the rendered line to the log file failed
    #[error("unable to write '{path}': {source}")]
    SinkWrite {
        /// Path of the log file
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// The in-memory line store could not grow to hold another line
    #[error("log store allocation failed: {0}")]
    StoreGrowth(#[from] TryReserveError),
}

/// Result type alias using the logging error type
pub type Result<T> = std::result::Result<T, Error>;
