//! eslint "stylish" output: a file path line followed by indented issues.
//!
//! ```text
//! /home/runner/work/app/src/index.ts
//!    1:10  error    'foo' is defined but never used  @typescript-eslint/no-unused-vars
//!   12:3   warning  Unexpected console statement     no-console
//! ```

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

static RE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<file>\S+\.(?:js|jsx|mjs|cjs|ts|tsx|mts|cts|vue|svelte))\s*$").unwrap()
});

static RE_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s+(?P<line>\d+):(?P<col>\d+)\s+(?P<level>error|warning)\s+(?P<msg>.+?)(?:\s{2,}(?P<rule>[\w@/-]+))?\s*$",
    )
    .unwrap()
});

pub struct Eslint;

impl FormatParser for Eslint {
    fn tool(&self) -> &'static str {
        "eslint"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut current: Option<&str> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                current = None;
                continue;
            }
            if let Some(m) = RE_FILE.captures(line).and_then(|c| c.name("file")) {
                current = Some(m.as_str());
                continue;
            }
            let Some(file) = current else { continue };
            let Some(caps) = RE_ISSUE.captures(line) else {
                continue;
            };
            let mut finding = Finding::new(
                self.tool(),
                "lint_error",
                severity::classify(self.tool(), &caps["level"]),
                file,
                &caps["line"],
                &caps["msg"],
            )
            .with_column(&caps["col"]);
            if let Some(rule) = caps.name("rule") {
                finding = finding.with_code(rule.as_str());
            }
            findings.push(finding);
        }
        findings
    }
}
