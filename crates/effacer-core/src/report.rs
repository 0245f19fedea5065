//! End-of-run wipe summary table
//!
//! Renders one fixed-width row per wiped device plus a totals footer, and
//! emits the whole table through the log engine at the `NoTimestamp` level
//! so the rows land in the log (and on screen) exactly as formatted here.
//! Downstream consumers parse these rows byte-for-byte; the column layout
//! is a compatibility contract.

use crate::config::RunOptions;
use crate::engine::LogEngine;
use crate::format::LogLevel;
use crate::units::{seconds_to_hms, throughput_label};
use crate::wipe_log;
use chrono::{DateTime, Local};

// Keep maximum columns to 80 characters for use with 80x30 terminals.
const SUMMARY_BORDER: &str =
    "********************************************************************************";
const SUMMARY_RULE: &str =
    "--------------------------------------------------------------------------------";
const SUMMARY_HEADER: &str = "! Device | Status | Thru-put | HH:MM:SS | Model/Serial Number";

/// Widths of the clipped identity columns.
const MODEL_CHARS: usize = 17;
const SERIAL_CHARS: usize = 20;

/// Final outcome record for one device's erase operation.
///
/// Produced by the wipe orchestrator and consumed read-only by
/// [`log_summary`].
#[derive(Debug, Clone)]
pub struct DeviceWipeResult {
    /// Device path, e.g. `/dev/sdb`.
    pub device_name: String,

    /// Overall result code; negative means the wipe failed outright.
    pub result_code: i32,

    /// Number of pass errors; any nonzero count is a failure.
    pub pass_errors: u64,

    /// When the wipe of this device started, if it started at all.
    pub start_time: Option<DateTime<Local>>,

    /// When the wipe finished; `None` with a start time means the run was
    /// cut short by a shutdown.
    pub end_time: Option<DateTime<Local>>,

    /// Cached duration, used only when no start time is available.
    pub duration_seconds: u64,

    /// Average throughput in bytes per second.
    pub throughput: u64,

    /// Device model, clipped to 17 characters in the table.
    pub device_model: String,

    /// Device serial number, clipped to 20 characters in the table.
    pub device_serial: String,
}

impl DeviceWipeResult {
    /// Create a result record for the named device.
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            result_code: 0,
            pass_errors: 0,
            start_time: None,
            end_time: None,
            duration_seconds: 0,
            throughput: 0,
            device_model: String::new(),
            device_serial: String::new(),
        }
    }

    /// Set the overall result code.
    pub fn with_result(mut self, code: i32) -> Self {
        self.result_code = code;
        self
    }

    /// Set the pass error count.
    pub fn with_pass_errors(mut self, errors: u64) -> Self {
        self.pass_errors = errors;
        self
    }

    /// Set the wipe start and end timestamps.
    pub fn with_times(
        mut self,
        start: Option<DateTime<Local>>,
        end: Option<DateTime<Local>>,
    ) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Set the cached duration used when no start time is known.
    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Set the average throughput in bytes per second.
    pub fn with_throughput(mut self, bytes_per_sec: u64) -> Self {
        self.throughput = bytes_per_sec;
        self
    }

    /// Set the device model and serial number.
    pub fn with_identity(mut self, model: impl Into<String>, serial: impl Into<String>) -> Self {
        self.device_model = model.into();
        self.device_serial = serial.into();
        self
    }

    /// Duration of the wipe in whole seconds, as of `now`.
    ///
    /// Finished wipes use their recorded span; a missing end time means the
    /// run was interrupted, so the span to `now` is reported instead. With
    /// no start time at all, the cached value stands.
    pub fn duration_seconds_at(&self, now: DateTime<Local>) -> u64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => u64::try_from((end - start).num_seconds()).unwrap_or(0),
            (Some(start), None) => u64::try_from((now - start).num_seconds()).unwrap_or(0),
            (None, _) => self.duration_seconds,
        }
    }

    /// The alert flag and 8-character status cell for this result.
    ///
    /// A negative result code outranks pass errors, which outrank a
    /// user abort; only a fully clean result reads `" Erased "`.
    fn status_cell(&self, user_aborted: bool) -> (&'static str, &'static str) {
        if self.result_code < 0 || self.pass_errors != 0 {
            ("!", "-FAILED-")
        } else if user_aborted {
            ("!", "UABORTED")
        } else {
            (" ", " Erased ")
        }
    }
}

/// Emit the end-of-run summary table through the engine.
///
/// One row per result, in input order, framed by 80-column borders, with a
/// totals footer carrying the wall-clock time, aggregate throughput, the
/// wipe method label, and the rounds/blanking/verify codes. Does nothing
/// when `results` is empty.
pub fn log_summary(
    engine: &LogEngine,
    results: &[DeviceWipeResult],
    options: &RunOptions,
    user_aborted: bool,
) {
    if results.is_empty() {
        return;
    }

    let now = Local::now();

    wipe_log!(engine, LogLevel::NoTimestamp, "");
    wipe_log!(engine, LogLevel::NoTimestamp, "{SUMMARY_BORDER}");
    wipe_log!(engine, LogLevel::NoTimestamp, "{SUMMARY_HEADER}");
    wipe_log!(engine, LogLevel::NoTimestamp, "{SUMMARY_RULE}");

    let mut total_throughput: u64 = 0;
    for result in results {
        let (flag, status) = result.status_cell(user_aborted);
        let (hours, minutes, seconds) = seconds_to_hms(result.duration_seconds_at(now));
        total_throughput = total_throughput.saturating_add(result.throughput);

        wipe_log!(
            engine,
            LogLevel::NoTimestamp,
            "{flag} {device} |{status}| {throughput}/s | {hours:02}:{minutes:02}:{seconds:02} | {model}/{serial}",
            device = device_column(&result.device_name),
            throughput = throughput_label(result.throughput),
            model = clip(&result.device_model, MODEL_CHARS),
            serial = clip(&result.device_serial, SERIAL_CHARS),
        );
    }

    wipe_log!(engine, LogLevel::NoTimestamp, "{SUMMARY_RULE}");
    wipe_log!(
        engine,
        LogLevel::NoTimestamp,
        "[{stamp}] Total Throughput {total}/s, {method}, {rounds}R+{blank}+{verify}",
        stamp = now.format("%Y/%m/%d %H:%M:%S"),
        total = throughput_label(total_throughput),
        method = options.method_label,
        rounds = options.rounds,
        blank = options.blanking_code(),
        verify = options.verify_mode.code(),
    );
    wipe_log!(engine, LogLevel::NoTimestamp, "{SUMMARY_BORDER}");
    wipe_log!(engine, LogLevel::NoTimestamp, "");
}

/// The 6-character device cell: trailing path component, right-justified.
///
/// Longer names keep their last 6 characters, matching the right-to-left
/// scan the table layout was built around.
fn device_column(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    let chars: Vec<char> = base.chars().collect();
    let start = chars.len().saturating_sub(6);
    let tail: String = chars[start..].iter().collect();
    format!("{tail:>6}")
}

/// Clip a cell value to at most `max` characters; over-length values are
/// truncated, not rejected.
fn clip(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
