//! sqlfluff lint output.
//!
//! ```text
//! == [models/orders.sql] FAIL
//! L:  12 | P:   5 | RF04 | Keywords should not be used as identifiers.
//! ```

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

static RE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:==\s*)?\[(?P<file>[^\]]+)\]\s+(?P<status>FAIL|PASS)\b").unwrap()
});

static RE_VIOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*L:\s*(?P<line>\d+)\s*\|\s*P:\s*(?P<pos>\d+)\s*\|\s*(?P<code>\w+)\s*\|\s*(?P<msg>.+?)\s*$",
    )
    .unwrap()
});

pub struct Sqlfluff;

impl FormatParser for Sqlfluff {
    fn tool(&self) -> &'static str {
        "sqlfluff"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut current: Option<&str> = None;

        for line in text.lines() {
            if let Some(caps) = RE_FILE.captures(line) {
                current = match &caps["status"] {
                    "FAIL" => caps.name("file").map(|m| m.as_str()),
                    _ => None,
                };
                continue;
            }
            let Some(file) = current else { continue };
            let Some(caps) = RE_VIOLATION.captures(line) else {
                continue;
            };
            let code = &caps["code"];
            findings.push(
                Finding::new(
                    self.tool(),
                    "lint_error",
                    severity::classify(self.tool(), code),
                    file,
                    &caps["line"],
                    &caps["msg"],
                )
                .with_column(&caps["pos"])
                .with_code(code)
                .with_fix(format!("sqlfluff fix {file}")),
            );
        }
        findings
    }
}
