//! The serialized append path shared by all logging threads
//!
//! Worker threads (one per device under wipe), the orchestrator, and the
//! reporting code all funnel through [`LogEngine::append`]. One mutex covers
//! rendering, store growth, console echo, and file persistence, so at most
//! one append is in flight process-wide at any time. This also serializes
//! the blocking file lock and I/O behind it: a slow or contended log file
//! delays every concurrent logger. That cost is accepted for correctness;
//! callers must treat `append` as a blocking call.

use crate::config::RunOptions;
use crate::format::{render_line, LogLevel, MAX_LINE_CHARS};
use crate::sink::FileSink;
use crate::store::LogStore;
use chrono::Local;
use std::fmt;
use std::sync::Mutex;

/// Thread-safe logging engine for a single wipe run.
///
/// Initialized with an empty store and a zeroed display cursor; owned line
/// storage is released on drop. Pass it by reference (or inside an `Arc`)
/// to every thread that logs.
#[derive(Debug)]
pub struct LogEngine {
    store: Mutex<LogStore>,
    sink: Option<FileSink>,
    no_gui: bool,
}

impl LogEngine {
    /// Create an engine from the run options.
    ///
    /// A configured log file enables persistence through [`FileSink`];
    /// without one, lines stay in memory and are echoed to stdout only when
    /// `no_gui` is set (otherwise the UI is expected to poll them).
    pub fn new(options: &RunOptions) -> Self {
        Self {
            store: Mutex::new(LogStore::new()),
            sink: options.log_file.as_ref().map(FileSink::new),
            no_gui: options.no_gui,
        }
    }

    /// Render, store, and surface one log line.
    ///
    /// The whole operation runs inside a single critical section. Every
    /// failure short of a poisoned mutex degrades rather than propagates:
    /// an over-long message is truncated, a store growth failure drops the
    /// line, and a persistence failure skips the file copy — the caller is
    /// never interrupted. A poisoned mutex aborts the append with no trace
    /// beyond a diagnostic.
    pub fn append(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let mut store = match self.store.lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::error!("log mutex poisoned; log line discarded");
                return;
            }
        };

        let rendered = render_line(&Local::now(), level, args);
        if rendered.truncated {
            tracing::warn!("log line has been truncated as it exceeded {MAX_LINE_CHARS} characters");
        }

        if let Err(e) = store.push(rendered.text) {
            tracing::error!("{e}; log line dropped");
            return;
        }

        match &self.sink {
            Some(sink) => {
                if let Err(e) = sink.persist(store.last().unwrap_or_default()) {
                    tracing::warn!("{e}");
                }
            }
            None => {
                if self.no_gui {
                    println!("{}", store.last().unwrap_or_default());
                    store.note_displayed();
                }
            }
        }
    }

    /// Log an OS-level error with its origin, `"<scope>: <context>: <cause>"`.
    pub fn append_os_error(&self, err: &std::io::Error, scope: &str, context: &str) {
        self.append(LogLevel::Error, format_args!("{scope}: {context}: {err}"));
    }

    /// Number of lines appended so far.
    pub fn line_count(&self) -> usize {
        self.store.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Number of lines already surfaced to a consumer.
    pub fn displayed_count(&self) -> usize {
        self.store.lock().map(|s| s.displayed()).unwrap_or(0)
    }

    /// Snapshot of every stored line, oldest first.
    ///
    /// Does not advance the display cursor; intended for inspection and
    /// tests rather than the UI poll loop.
    pub fn lines(&self) -> Vec<String> {
        self.store
            .lock()
            .map(|s| s.lines().to_vec())
            .unwrap_or_default()
    }

    /// Lines appended since the last poll, advancing the display cursor.
    ///
    /// This is the accessor a UI thread calls to drain fresh output; each
    /// line is returned exactly once.
    pub fn poll_new_lines(&self) -> Vec<String> {
        self.store
            .lock()
            .map(|mut s| s.take_undisplayed())
            .unwrap_or_default()
    }
}

/// Append a formatted line to a [`LogEngine`].
///
/// ```ignore
/// wipe_log!(engine, LogLevel::Notice, "Invoking method on {}", device);
/// ```
#[macro_export]
macro_rules! wipe_log {
    ($engine:expr, $level:expr, $($arg:tt)*) => {
        $engine.append($level, ::core::format_args!($($arg)*))
    };
}
