//! System inventory logging for Effacer
//!
//! Audit logs for a wipe run should record what machine did the wiping, so
//! this crate shells out to the SMBIOS inventory tool (`dmidecode`) once per
//! inventory keyword and folds every `key = value` pair into the log stream
//! at Notice level.
//!
//! The tool is behind the [`InventoryTool`] trait so tests (and platforms
//! without `dmidecode`) can substitute a fake; [`Dmidecode`] is the real
//! invocation.

#![warn(missing_docs)]
#![warn(clippy::all)]

use effacer_core::{wipe_log, LogEngine, LogLevel};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

#[cfg(test)]
use mockall::automock;

/// Inventory keywords queried, in order.
///
/// Trim or extend this list to control what ends up in the log.
pub const INVENTORY_KEYS: [&str; 21] = [
    "bios-version",
    "bios-release-date",
    "system-manufacturer",
    "system-product-name",
    "system-version",
    "system-serial-number",
    "system-uuid",
    "baseboard-manufacturer",
    "baseboard-product-name",
    "baseboard-version",
    "baseboard-serial-number",
    "baseboard-asset-tag",
    "chassis-manufacturer",
    "chassis-type",
    "chassis-version",
    "chassis-serial-number",
    "chassis-asset-tag",
    "processor-family",
    "processor-manufacturer",
    "processor-version",
    "processor-frequency",
];

/// Candidate locations probed for the tool, in order. The bare name is
/// resolved against `PATH`.
const TOOL_CANDIDATES: [&str; 3] = ["dmidecode", "/sbin/dmidecode", "/usr/bin/dmidecode"];

/// Output of one inventory tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Stdout split into lines, terminators stripped.
    pub lines: Vec<String>,
    /// Exit code of the invocation; 0 is success.
    pub exit_code: i32,
}

/// Interface to the external inventory tool.
///
/// Returns a sequence of output lines plus an exit status per keyword, so
/// the collector can be driven by a fake in tests without invoking a real
/// process.
#[cfg_attr(test, automock)]
pub trait InventoryTool {
    /// Run the tool for one inventory keyword.
    fn query(&self, keyword: &str) -> io::Result<ToolOutput>;

    /// The command line for diagnostics, e.g. `/sbin/dmidecode -s bios-version`.
    fn command_string(&self, keyword: &str) -> String;
}

/// The real `dmidecode` invocation.
#[derive(Debug, Clone)]
pub struct Dmidecode {
    program: PathBuf,
}

impl Dmidecode {
    /// Probe the candidate locations for an installed `dmidecode`.
    pub fn locate() -> Option<Self> {
        let program = locate_among(&TOOL_CANDIDATES)?;
        tracing::debug!("inventory tool found at {}", program.display());
        Some(Self { program })
    }
}

impl InventoryTool for Dmidecode {
    fn query(&self, keyword: &str) -> io::Result<ToolOutput> {
        let output = Command::new(&self.program).args(["-s", keyword]).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(ToolOutput {
            lines: stdout.lines().map(str::to_string).collect(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    fn command_string(&self, keyword: &str) -> String {
        format!("{} -s {}", self.program.display(), keyword)
    }
}

/// Locate the inventory tool and log the full inventory through `engine`.
///
/// When no tool is installed, a single Warning line is logged and nothing
/// is collected.
pub fn log_system_inventory(engine: &LogEngine) {
    match Dmidecode::locate() {
        Some(tool) => collect_with(engine, &tool),
        None => wipe_log!(
            engine,
            LogLevel::Warning,
            "Command not found. Install dmidecode !"
        ),
    }
}

/// Log the inventory using the provided tool.
///
/// Each keyword is queried once, in [`INVENTORY_KEYS`] order, and every
/// output line is logged as `"<keyword> = <value>"` at Notice level. A
/// spawn failure or non-zero exit status is logged as a Warning and halts
/// the remaining keywords; output read before a failing status is kept.
pub fn collect_with(engine: &LogEngine, tool: &dyn InventoryTool) {
    for keyword in INVENTORY_KEYS {
        let output = match tool.query(keyword) {
            Ok(output) => output,
            Err(e) => {
                wipe_log!(
                    engine,
                    LogLevel::Warning,
                    "Failed to run \"{}\": {e}",
                    tool.command_string(keyword)
                );
                return;
            }
        };

        for line in &output.lines {
            wipe_log!(engine, LogLevel::Notice, "{keyword} = {line}");
        }

        if output.exit_code != 0 {
            wipe_log!(
                engine,
                LogLevel::Warning,
                "dmidecode failed, \"{}\" exit status = {}",
                tool.command_string(keyword),
                output.exit_code
            );
            return;
        }
    }
}

/// First candidate that resolves to an existing file.
fn locate_among(candidates: &[&str]) -> Option<PathBuf> {
    for candidate in candidates {
        let path = Path::new(candidate);
        if path.is_absolute() {
            if path.is_file() {
                return Some(path.to_path_buf());
            }
        } else if let Some(found) = search_path(candidate) {
            return Some(found);
        }
    }
    None
}

/// Resolve a bare program name against the `PATH` directories.
fn search_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use effacer_core::RunOptions;
    use mockall::Sequence;

    fn memory_engine() -> LogEngine {
        LogEngine::new(&RunOptions::new())
    }

    fn output(lines: &[&str], exit_code: i32) -> ToolOutput {
        ToolOutput {
            lines: lines.iter().map(|s| (*s).to_string()).collect(),
            exit_code,
        }
    }

    #[test]
    fn test_collect_logs_key_value_pairs_in_order() {
        let engine = memory_engine();
        let mut tool = MockInventoryTool::new();
        let mut seq = Sequence::new();
        for keyword in INVENTORY_KEYS {
            tool.expect_query()
                .withf(move |k| k == keyword)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(output(&["value"], 0)));
        }

        collect_with(&engine, &tool);

        let lines = engine.lines();
        assert_eq!(lines.len(), INVENTORY_KEYS.len());
        assert!(lines[0].ends_with("notice: bios-version = value"));
        assert!(lines[20].ends_with("notice: processor-frequency = value"));
    }

    #[test]
    fn test_multi_line_output_logs_one_line_per_value() {
        let engine = memory_engine();
        let mut tool = MockInventoryTool::new();
        let mut seq = Sequence::new();
        tool.expect_query()
            .withf(|k| k == "bios-version")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(output(&["1.2.3", "beta"], 0)));
        // The failing second keyword stops the run after its warning.
        tool.expect_query()
            .withf(|k| k == "bios-release-date")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "gone")));
        tool.expect_command_string()
            .withf(|k| k == "bios-release-date")
            .returning(|k| format!("dmidecode -s {k}"));

        collect_with(&engine, &tool);

        let lines = engine.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("notice: bios-version = 1.2.3"));
        assert!(lines[1].ends_with("notice: bios-version = beta"));
        assert!(lines[2].contains("warning: Failed to run \"dmidecode -s bios-release-date\""));
    }

    #[test]
    fn test_nonzero_exit_halts_remaining_keywords() {
        let engine = memory_engine();
        let mut tool = MockInventoryTool::new();
        let mut seq = Sequence::new();
        tool.expect_query()
            .withf(|k| k == "bios-version")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(output(&["2.07"], 0)));
        tool.expect_query()
            .withf(|k| k == "bios-release-date")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(output(&["# dmidecode requires root"], 1)));
        tool.expect_command_string()
            .withf(|k| k == "bios-release-date")
            .returning(|k| format!("/sbin/dmidecode -s {k}"));

        collect_with(&engine, &tool);
        // No expectation exists for the third keyword: reaching it would
        // panic inside the mock.

        let lines = engine.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("notice: bios-version = 2.07"));
        // Output read before the failing status is kept.
        assert!(lines[1].ends_with("notice: bios-release-date = # dmidecode requires root"));
        assert!(lines[2]
            .contains("warning: dmidecode failed, \"/sbin/dmidecode -s bios-release-date\" exit status = 1"));
    }

    #[test]
    fn test_locate_among_prefers_earlier_candidates() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = dir.path().join("dmidecode");
        let second = dir.path().join("other-dmidecode");
        std::fs::write(&first, "").unwrap();
        std::fs::write(&second, "").unwrap();

        let candidates = [
            "/nonexistent/dmidecode",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ];
        assert_eq!(locate_among(&candidates), Some(first));
    }

    #[test]
    fn test_locate_among_reports_missing_tool() {
        let candidates = ["/nonexistent/a/dmidecode", "/nonexistent/b/dmidecode"];
        assert_eq!(locate_among(&candidates), None);
    }
}
