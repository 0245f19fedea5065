//! Integration tests for effacer-sysinfo
//!
//! These drive the collector through the public API with a scripted tool,
//! checking what actually lands in the engine's log stream.

use effacer_core::{LogEngine, RunOptions};
use effacer_sysinfo::{collect_with, InventoryTool, ToolOutput, INVENTORY_KEYS};
use std::collections::HashMap;
use std::io;

/// A scripted inventory tool: canned output per keyword, everything else
/// succeeds with a placeholder value.
struct ScriptedTool {
    canned: HashMap<&'static str, ToolOutput>,
}

impl ScriptedTool {
    fn new() -> Self {
        Self {
            canned: HashMap::new(),
        }
    }

    fn with_output(mut self, keyword: &'static str, lines: &[&str], exit_code: i32) -> Self {
        self.canned.insert(
            keyword,
            ToolOutput {
                lines: lines.iter().map(|s| (*s).to_string()).collect(),
                exit_code,
            },
        );
        self
    }
}

impl InventoryTool for ScriptedTool {
    fn query(&self, keyword: &str) -> io::Result<ToolOutput> {
        Ok(self.canned.get(keyword).cloned().unwrap_or(ToolOutput {
            lines: vec!["unset".to_string()],
            exit_code: 0,
        }))
    }

    fn command_string(&self, keyword: &str) -> String {
        format!("dmidecode -s {keyword}")
    }
}

#[test]
fn test_full_inventory_sweep() {
    let engine = LogEngine::new(&RunOptions::new());
    let tool = ScriptedTool::new()
        .with_output("bios-version", &["2.07"], 0)
        .with_output("system-manufacturer", &["LENOVO"], 0);

    collect_with(&engine, &tool);

    let lines = engine.lines();
    assert_eq!(lines.len(), INVENTORY_KEYS.len());
    assert!(lines[0].ends_with("notice: bios-version = 2.07"));
    assert!(lines[2].ends_with("notice: system-manufacturer = LENOVO"));

    // Keyword order in the log matches the query order.
    for (line, keyword) in lines.iter().zip(INVENTORY_KEYS) {
        assert!(line.contains(&format!("{keyword} = ")), "out of order: {line}");
    }
}

#[test]
fn test_failed_tool_cuts_sweep_short() {
    let engine = LogEngine::new(&RunOptions::new());
    let tool = ScriptedTool::new()
        .with_output("bios-version", &["2.07"], 0)
        .with_output("bios-release-date", &[], 1);

    collect_with(&engine, &tool);

    let lines = engine.lines();
    // One value, then the warning; the other nineteen keywords never ran.
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("warning: dmidecode failed"));
    assert!(lines[1].contains("exit status = 1"));
}
