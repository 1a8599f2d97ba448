//! Python toolchain output: ruff, mypy, pytest.

use regex::Regex;
use std::sync::LazyLock;

use cilog_protocol::Finding;

use super::{FormatParser, severity};

// app.py:12:5: F401 [*] `os` imported but unused
static RE_RUFF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<file>[^\s:]+):(?P<line>\d+):(?P<col>\d+):\s+(?P<code>[A-Z]{1,4}\d{1,4})\s+(?P<fixable>\[\*\]\s+)?(?P<msg>.+?)\s*$",
    )
    .unwrap()
});

// app.py:12: error: Incompatible return value type  [return-value]
static RE_MYPY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<file>[^\s:]+\.pyi?):(?P<line>\d+):(?:(?P<col>\d+):)?\s+(?P<level>error|warning|note):\s+(?P<msg>.+?)(?:\s+\[(?P<code>[\w-]+)\])?\s*$",
    )
    .unwrap()
});

// FAILED tests/test_x.py::test_foo - AssertionError: bad
static RE_PYTEST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*FAILED\s+(?P<file>[^\s:]+)::(?P<test>\S+)(?:\s+-\s+(?P<reason>.+?))?\s*$")
        .unwrap()
});

pub struct Ruff;

impl FormatParser for Ruff {
    fn tool(&self) -> &'static str {
        "ruff"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        text.lines()
            .filter_map(|line| RE_RUFF.captures(line))
            .map(|caps| {
                let (file, code) = (&caps["file"], &caps["code"]);
                let finding = Finding::new(
                    self.tool(),
                    "lint_error",
                    severity::classify(self.tool(), code),
                    file,
                    &caps["line"],
                    &caps["msg"],
                )
                .with_column(&caps["col"])
                .with_code(code);
                if caps.name("fixable").is_some() {
                    finding.with_fix(format!("ruff check --fix {file}"))
                } else {
                    finding
                }
            })
            .collect()
    }
}

pub struct Mypy;

impl FormatParser for Mypy {
    fn tool(&self) -> &'static str {
        "mypy"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        text.lines()
            .filter_map(|line| RE_MYPY.captures(line))
            .map(|caps| {
                let mut finding = Finding::new(
                    self.tool(),
                    "type_check",
                    severity::classify(self.tool(), &caps["level"]),
                    &caps["file"],
                    &caps["line"],
                    &caps["msg"],
                );
                if let Some(col) = caps.name("col") {
                    finding = finding.with_column(col.as_str());
                }
                if let Some(code) = caps.name("code") {
                    finding = finding.with_code(code.as_str());
                }
                finding
            })
            .collect()
    }
}

pub struct Pytest;

impl FormatParser for Pytest {
    fn tool(&self) -> &'static str {
        "pytest"
    }

    fn parse(&self, text: &str) -> Vec<Finding> {
        text.lines()
            .filter_map(|line| RE_PYTEST.captures(line))
            .map(|caps| {
                let test = &caps["test"];
                let message = match caps.name("reason") {
                    Some(reason) => format!("{test} failed: {}", reason.as_str()),
                    None => format!("{test} failed"),
                };
                Finding::new(
                    self.tool(),
                    "test_failure",
                    severity::classify(self.tool(), test),
                    &caps["file"],
                    "0",
                    message,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cilog_protocol::Severity;

    #[test]
    fn ruff_severity_by_code_prefix() {
        let text = "\
app/main.py:1:8: F401 [*] `os` imported but unused
app/main.py:40:89: E501 Line too long (120 > 88)
app/util.py:3:1: W291 Trailing whitespace
app/util.py:7:1: I001 [*] Import block is un-sorted or un-formatted
Found 4 errors.
";
        let findings = Ruff.parse(text);
        assert_eq!(findings.len(), 4);
        let sev: Vec<Severity> = findings.iter().map(|f| f.severity).collect();
        assert_eq!(
            sev,
            vec![
                Severity::Critical,
                Severity::Critical,
                Severity::Warning,
                Severity::Warning
            ]
        );
        assert_eq!(findings[0].message, "`os` imported but unused");
        assert_eq!(findings[0].column.as_deref(), Some("8"));
        assert_eq!(
            findings[0].fix_suggestion.as_deref(),
            Some("ruff check --fix app/main.py")
        );
        assert!(findings[1].fix_suggestion.is_none());
    }

    #[test]
    fn mypy_levels() {
        let text = "\
app/models.py:12: error: Incompatible return value type (got \"int\", expected \"str\")  [return-value]
app/models.py:30:5: warning: Unused \"type: ignore\" comment
app/models.py:31: note: See https://mypy.rtfd.io for more info
Found 1 error in 1 file (checked 10 source files)
";
        let findings = Mypy.parse(text);
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].code.as_deref(), Some("return-value"));
        assert_eq!(
            findings[0].message,
            "Incompatible return value type (got \"int\", expected \"str\")"
        );
        assert_eq!(findings[1].severity, Severity::Warning);
        assert_eq!(findings[1].column.as_deref(), Some("5"));
        assert_eq!(findings[2].severity, Severity::Info);
    }

    #[test]
    fn pytest_failed_lines() {
        let text = "\
=========================== short test summary info ============================
FAILED tests/test_x.py::test_foo - AssertionError: bad
FAILED tests/test_y.py::TestApi::test_get
========================= 2 failed, 10 passed in 1.23s =========================
";
        let findings = Pytest.parse(text);
        assert_eq!(findings.len(), 2);
        let f = &findings[0];
        assert_eq!(f.tool, "pytest");
        assert_eq!(f.severity, Severity::Critical);
        assert_eq!(f.file, "tests/test_x.py");
        assert!(f.message.contains("test_foo"));
        assert!(f.message.contains("AssertionError: bad"));
        assert_eq!(findings[1].message, "TestApi::test_get failed");
    }
}
