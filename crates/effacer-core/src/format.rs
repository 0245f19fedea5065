//! Log levels and on-wire line rendering
//!
//! Every log line is rendered exactly once, at append time, into the form
//! `[YYYY/MM/DD HH:MM:SS] <prefix>: <message>`. The `None` and `NoTimestamp`
//! levels carry neither the date nor a prefix and are used for pre-formatted
//! output such as the wipe summary table.

use chrono::{DateTime, Local};
use std::fmt::{self, Write};

/// Maximum rendered length of a single log line, in bytes.
///
/// Lines that would exceed this are truncated and a diagnostic is emitted
/// once per offending append.
pub const MAX_LINE_CHARS: usize = 512;

/// Severity of a log line.
///
/// Declaration order runs from least to most severe, so `Ord` comparisons
/// like `level >= LogLevel::Warning` behave as expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// No severity; the message is rendered bare.
    None,
    /// Very verbose diagnostics.
    Debug,
    /// Verbose progress information.
    Info,
    /// Most logging happens at this level.
    Notice,
    /// Things the user should know about.
    Warning,
    /// Non-fatal errors that result in failure.
    Error,
    /// Errors that cause the program to exit.
    Fatal,
    /// Programming errors.
    Sanity,
    /// Pre-formatted output; rendered without the date or a prefix.
    NoTimestamp,
}

impl LogLevel {
    /// The `<prefix>: ` fragment for this level, if it carries one.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            LogLevel::None | LogLevel::NoTimestamp => None,
            LogLevel::Debug => Some("debug: "),
            LogLevel::Info => Some("info: "),
            LogLevel::Notice => Some("notice: "),
            LogLevel::Warning => Some("warning: "),
            LogLevel::Error => Some("error: "),
            LogLevel::Fatal => Some("fatal: "),
            LogLevel::Sanity => Some("sanity: "),
        }
    }

    /// Whether lines at this level carry the bracketed date.
    fn timestamped(self) -> bool {
        !matches!(self, LogLevel::None | LogLevel::NoTimestamp)
    }
}

/// A log line rendered to its final text.
#[derive(Debug)]
pub(crate) struct Rendered {
    /// The complete line, without a trailing newline.
    pub(crate) text: String,
    /// Set when the line hit [`MAX_LINE_CHARS`] and lost content.
    pub(crate) truncated: bool,
}

/// A `fmt::Write` sink that stops accepting input at [`MAX_LINE_CHARS`].
///
/// Overflowing writes are cut at a character boundary rather than failing,
/// so a too-long message still produces a usable line.
struct CappedBuffer {
    buf: String,
    overflowed: bool,
}

impl CappedBuffer {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(128),
            overflowed: false,
        }
    }
}

impl Write for CappedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = MAX_LINE_CHARS - self.buf.len();
        if s.len() <= remaining {
            self.buf.push_str(s);
        } else {
            let mut end = remaining;
            while end > 0 && !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buf.push_str(&s[..end]);
            self.overflowed = true;
        }
        Ok(())
    }
}

/// Render one log line: date, level prefix, then the formatted message.
pub(crate) fn render_line(
    now: &DateTime<Local>,
    level: LogLevel,
    args: fmt::Arguments<'_>,
) -> Rendered {
    let mut out = CappedBuffer::new();

    if level.timestamped() {
        // Writes through the cap; a CappedBuffer never errors.
        let _ = write!(out, "{}", now.format("[%Y/%m/%d %H:%M:%S] "));
    }
    if let Some(prefix) = level.prefix() {
        let _ = out.write_str(prefix);
    }
    let _ = out.write_fmt(args);

    Rendered {
        text: out.buf,
        truncated: out.overflowed,
    }
}
