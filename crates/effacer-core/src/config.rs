//! Runtime options consumed by the logging core
//!
//! These are owned by the wipe orchestrator and passed in read-only; the
//! engine consumes the log destination fields and the summary reporter
//! consumes the wipe-parameter fields.

use std::path::PathBuf;

/// Whether wiped data is read back and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyMode {
    /// No verification.
    #[default]
    None,
    /// Verify the last pass only.
    Last,
    /// Verify every pass.
    All,
}

impl VerifyMode {
    /// Short code used in the summary footer.
    pub fn code(self) -> &'static str {
        match self {
            VerifyMode::None => "NV",
            VerifyMode::Last => "VL",
            VerifyMode::All => "VA",
        }
    }
}

/// Run-wide options for the logging and reporting core.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Log file to persist lines to; `None` keeps lines in memory only.
    pub log_file: Option<PathBuf>,

    /// Running without the interactive UI; gates console echo when no log
    /// file is configured.
    pub no_gui: bool,

    /// Whether a final blanking pass runs after the wipe rounds.
    pub blanking_enabled: bool,

    /// Verification mode for this run.
    pub verify_mode: VerifyMode,

    /// Number of times the wipe method runs; always at least 1.
    pub rounds: u32,

    /// Display label of the wipe method, opaque to this crate.
    pub method_label: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            log_file: None,
            no_gui: false,
            blanking_enabled: true,
            verify_mode: VerifyMode::default(),
            rounds: 1,
            method_label: String::new(),
        }
    }
}

impl RunOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log file path.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set whether the run has no interactive UI.
    pub fn no_gui(mut self, no_gui: bool) -> Self {
        self.no_gui = no_gui;
        self
    }

    /// Set whether a final blanking pass runs.
    pub fn blanking(mut self, enabled: bool) -> Self {
        self.blanking_enabled = enabled;
        self
    }

    /// Set the verification mode.
    pub fn verify_mode(mut self, mode: VerifyMode) -> Self {
        self.verify_mode = mode;
        self
    }

    /// Set the round count (clamped to at least 1).
    pub fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    /// Set the wipe method display label.
    pub fn method_label(mut self, label: impl Into<String>) -> Self {
        self.method_label = label.into();
        self
    }

    /// Short code for the blanking setting, as shown in the summary footer.
    pub fn blanking_code(&self) -> &'static str {
        if self.blanking_enabled {
            "B"
        } else {
            "NB"
        }
    }
}
