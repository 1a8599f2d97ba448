//! Auto-formatter check output: prettier, black, isort.
//!
//! Each reports only file names; the finding's fix suggestion is the
//! command that rewrites the file.

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

static RE_PRETTIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[warn\]\s+(?P<file>\S+)\s*$").unwrap());

static RE_BLACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"would reformat (?P<file>\S+\.pyi?)\b").unwrap());

static RE_ISORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ERROR:\s+(?P<file>\S+\.pyi?)\s+Imports are incorrectly sorted").unwrap()
});

fn file_findings(
    re: &Regex,
    text: &str,
    tool: &'static str,
    kind: &str,
    message: &str,
    fix: impl Fn(&str) -> String,
) -> Vec<Finding> {
    text.lines()
        .filter_map(|line| re.captures(line))
        .map(|caps| {
            let file = &caps["file"];
            Finding::new(
                tool,
                kind,
                severity::classify(tool, ""),
                file,
                "0",
                message,
            )
            .with_fix(fix(file))
        })
        .collect()
}

pub struct Prettier;

impl FormatParser for Prettier {
    fn tool(&self) -> &'static str {
        "prettier"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        file_findings(
            &RE_PRETTIER,
            text,
            self.tool(),
            "formatting",
            "needs formatting",
            |file| format!("prettier --write {file}"),
        )
    }
}

pub struct Black;

impl FormatParser for Black {
    fn tool(&self) -> &'static str {
        "black"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        file_findings(
            &RE_BLACK,
            text,
            self.tool(),
            "formatting",
            "would reformat",
            |file| format!("black {file}"),
        )
    }
}

pub struct Isort;

impl FormatParser for Isort {
    fn tool(&self) -> &'static str {
        "isort"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        file_findings(
            &RE_ISORT,
            text,
            self.tool(),
            "import_order",
            "Imports are incorrectly sorted",
            |file| format!("isort {file}"),
        )
    }
}
