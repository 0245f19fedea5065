//! # Effacer Core
//!
//! Logging and reporting core for the Effacer disk wiping tool.
//!
//! ## Modules
//!
//! - `engine`: Thread-safe log engine serializing all appends
//! - `format`: Log levels and capped line rendering
//! - `store`: Append-only in-memory line store with a display cursor
//! - `sink`: Log file persistence under a cross-process advisory lock
//! - `report`: End-of-run wipe summary table
//! - `units`: Fixed-width duration and throughput formatting
//! - `config`: Runtime options consumed by the engine and reporter
//! - `settings`: Persistent user settings from configuration file
//! - `error`: Error types and result aliases
//!
//! ## Example
//!
//! ```ignore
//! use effacer_core::{log_summary, LogEngine, LogLevel, RunOptions, wipe_log};
//!
//! let options = RunOptions::new().log_file("/var/log/effacer.log");
//! let engine = LogEngine::new(&options);
//!
//! wipe_log!(engine, LogLevel::Notice, "Wipe started on {}", "/dev/sdb");
//!
//! // ... worker threads log through &engine while wiping ...
//!
//! log_summary(&engine, &results, &options, false);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod report;
pub mod settings;
pub mod sink;
pub mod store;
pub mod units;

pub use config::{RunOptions, VerifyMode};
pub use engine::LogEngine;
pub use error::{Error, Result};
pub use format::{LogLevel, MAX_LINE_CHARS};
pub use report::{log_summary, DeviceWipeResult};
pub use settings::{LogSettings, Settings, SettingsError, WipeSettings};
pub use sink::FileSink;
pub use store::LogStore;
pub use units::{seconds_to_hms, throughput_label};
