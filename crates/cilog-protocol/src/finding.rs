use serde::{Deserialize, Serialize};

/// Severity bucket a finding is reported under.
///
/// Declaration order matters: `#[derive(Ord)]` uses it,
/// so Info < Warning < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Observation only (formatting drift, notes).
    Info,
    /// Should be fixed but does not fail the run.
    Warning,
    /// Blocks the merge.
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured defect or observation extracted from a CI log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Tool that produced the output (e.g., "ruff", "eslint").
    pub tool: String,
    /// Finding kind (e.g., "lint_error", "test_failure").
    #[serde(rename = "type")]
    pub kind: String,
    /// Severity assigned at parse time.
    pub severity: Severity,
    /// Source file the finding points at.
    pub file: String,
    /// 1-based line as a decimal string; "0" when the tool reports none.
    pub line: String,
    /// 1-based column as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Tool-specific rule or error code (e.g., "E501", "no-unused-vars").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Command that fixes the finding automatically, if one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        tool: impl Into<String>,
        kind: impl Into<String>,
        severity: Severity,
        file: impl Into<String>,
        line: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            kind: kind.into(),
            severity,
            file: file.into(),
            line: line.into(),
            column: None,
            message: message.into(),
            code: None,
            fix_suggestion: None,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix_suggestion = Some(fix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn severity_serialization() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            r#""critical""#
        );
        assert_eq!(serde_json::to_string(&Severity::Info).unwrap(), r#""info""#);
    }

    #[test]
    fn finding_kind_serializes_as_type() {
        let f = Finding::new("ruff", "lint_error", Severity::Critical, "a.py", "3", "bad")
            .with_column("7")
            .with_code("E501");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["type"], "lint_error");
        assert_eq!(json["line"], "3");
        assert_eq!(json["column"], "7");
        assert_eq!(json["code"], "E501");
        assert!(json.get("kind").is_none());
        assert!(json.get("fix_suggestion").is_none());
    }
}
