//! commitlint output: `✖   subject may not be empty [subject-empty]`.

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

/// Commit messages have no source file; findings point at git's message file.
const COMMIT_MESSAGE_FILE: &str = "COMMIT_EDITMSG";

static RE_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*✖\s+(?P<msg>.+?)\s+\[(?P<rule>[\w-]+)\]\s*$").unwrap()
});

pub struct Commitlint;

impl FormatParser for Commitlint {
    fn tool(&self) -> &'static str {
        "commitlint"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        text.lines()
            .filter_map(|line| RE_ISSUE.captures(line))
            .map(|caps| {
                let rule = &caps["rule"];
                Finding::new(
                    self.tool(),
                    "commit_message",
                    severity::classify(self.tool(), rule),
                    COMMIT_MESSAGE_FILE,
                    "0",
                    &caps["msg"],
                )
                .with_code(rule)
            })
            .collect()
    }
}
