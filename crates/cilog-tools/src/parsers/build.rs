//! Fallback for generic `Error:` / `ERROR:` lines.
//!
//! A line is skipped when a known tool name appears in the 50 characters
//! before the marker (case-insensitive, across line breaks). This heuristic
//! can both over- and under-suppress; it is kept as-is.

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, TOOLS, severity};

const TOOL_NAME_WINDOW: usize = 50;
const MAX_MESSAGE_CHARS: usize = 500;
const BUILD_LOG_FILE: &str = "log";

static RE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:Error|ERROR):").unwrap());

pub struct BuildError;

impl BuildError {
    fn attributed_to_tool(text: &str, marker: usize) -> bool {
        let start = text[..marker]
            .char_indices()
            .rev()
            .take(TOOL_NAME_WINDOW)
            .last()
            .map_or(marker, |(i, _)| i);
        let window = text[start..marker].to_lowercase();
        TOOLS
            .iter()
            .filter(|tool| **tool != "build")
            .any(|tool| window.contains(tool))
    }
}

impl FormatParser for BuildError {
    fn tool(&self) -> &'static str {
        "build"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut offset = 0usize;

        for (idx, raw_line) in text.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += raw_line.len();
            let line = raw_line.trim_end_matches('\n');

            let Some(m) = RE_MARKER.find(line) else {
                continue;
            };
            if Self::attributed_to_tool(text, line_start + m.start()) {
                continue;
            }
            let message: String = line.trim().chars().take(MAX_MESSAGE_CHARS).collect();
            findings.push(Finding::new(
                self.tool(),
                "build_error",
                severity::classify(self.tool(), m.as_str()),
                BUILD_LOG_FILE,
                (idx + 1).to_string(),
                message,
            ));
        }
        findings
    }
}
