//! markdownlint output: `README.md:3:81 MD013/line-length Line length [Expected: 80; Actual: 120]`.

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

static RE_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<file>[^\s:]+):(?P<line>\d+)(?::(?P<col>\d+))?\s+(?P<code>MD\d{3})(?:/[\w/-]+)?\s+(?P<msg>.+?)\s*$",
    )
    .unwrap()
});

pub struct Markdownlint;

impl FormatParser for Markdownlint {
    fn tool(&self) -> &'static str {
        "markdownlint"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        text.lines()
            .filter_map(|line| RE_ISSUE.captures(line))
            .map(|caps| {
                let code = &caps["code"];
                let finding = Finding::new(
                    self.tool(),
                    "markdown_lint",
                    severity::classify(self.tool(), code),
                    &caps["file"],
                    &caps["line"],
                    &caps["msg"],
                )
                .with_code(code);
                match caps.name("col") {
                    Some(col) => finding.with_column(col.as_str()),
                    None => finding,
                }
            })
            .collect()
    }
}
