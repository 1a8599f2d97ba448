//! stylelint output, inside a `--- stylelint ---` section.
//!
//! ```text
//! --- stylelint ---
//! src/a.css
//!   3:5  ✖  Expected lowercase  color-no-invalid-hex
//! ```

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

static RE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*---\s*(?P<name>[\w.-]+)\s*---\s*$").unwrap());

static RE_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<file>[^\s:]+\.[A-Za-z0-9]+)$").unwrap());

static RE_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<line>\d+):(?P<col>\d+)\s+✖\s+(?P<msg>.+?)\s{2,}(?P<rule>\S+)\s*$").unwrap()
});

pub struct Stylelint;

impl FormatParser for Stylelint {
    fn tool(&self) -> &'static str {
        "stylelint"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut in_section = false;
        let mut current: Option<&str> = None;

        for line in text.lines() {
            if let Some(caps) = RE_SECTION.captures(line) {
                in_section = caps["name"].eq_ignore_ascii_case("stylelint");
                current = None;
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some(m) = RE_FILE.captures(line.trim()).and_then(|c| c.name("file")) {
                current = Some(m.as_str());
                continue;
            }
            let Some(caps) = RE_ISSUE.captures(line) else {
                continue;
            };
            let (msg, rule) = (&caps["msg"], &caps["rule"]);
            findings.push(
                Finding::new(
                    self.tool(),
                    "lint_error",
                    severity::classify(self.tool(), &format!("{rule} {msg}")),
                    current.unwrap_or("unknown"),
                    &caps["line"],
                    msg,
                )
                .with_column(&caps["col"])
                .with_code(rule),
            );
        }
        findings
    }
}
