//! Per-tool CI output parsers, run in a fixed order over normalized text.
//!
//! Every parser is a pure `(text) -> [Finding]` behind [`FormatParser`].
//! Normalization (ANSI stripping and friends) happens once in
//! [`parse_log`] before any parser runs.

pub mod build;
pub mod commit;
pub mod css;
pub mod formatters;
pub mod javascript;
pub mod markdown;
pub mod python;
pub mod severity;
pub mod sql;

use cilog_protocol::Finding;

use crate::preprocess;

/// Tool names in parser order. Ties in root-cause ranking go to the
/// earlier entry.
pub const TOOLS: [&str; 12] = [
    "sqlfluff",
    "stylelint",
    "markdownlint",
    "commitlint",
    "prettier",
    "black",
    "isort",
    "ruff",
    "eslint",
    "mypy",
    "pytest",
    "build",
];

/// Tools whose findings an auto-formatter fixes.
pub const AUTO_FIXABLE: [&str; 3] = ["prettier", "black", "isort"];

/// A stateless extractor for one tool's output.
pub trait FormatParser: Send + Sync {
    /// Tool name stamped on every finding.
    fn tool(&self) -> &'static str;

    /// Extract findings from normalized text. Unrecognized lines are skipped.
    fn parse(&self, text: &str) -> Vec<Finding>;
}

/// All parsers, in `TOOLS` order.
pub fn all_parsers() -> Vec<Box<dyn FormatParser>> {
    vec![
        Box::new(sql::Sqlfluff),
        Box::new(css::Stylelint),
        Box::new(markdown::Markdownlint),
        Box::new(commit::Commitlint),
        Box::new(formatters::Prettier),
        Box::new(formatters::Black),
        Box::new(formatters::Isort),
        Box::new(python::Ruff),
        Box::new(javascript::Eslint),
        Box::new(python::Mypy),
        Box::new(python::Pytest),
        Box::new(build::BuildError),
    ]
}

/// Position of a tool in parser order; unknown tools sort last.
pub fn tool_rank(tool: &str) -> usize {
    TOOLS.iter().position(|t| *t == tool).unwrap_or(TOOLS.len())
}

/// Run every parser over already-normalized text, in order.
pub fn run_all(text: &str) -> Vec<Finding> {
    all_parsers()
        .iter()
        .flat_map(|parser| {
            let found = parser.parse(text);
            if !found.is_empty() {
                tracing::debug!(tool = parser.tool(), count = found.len(), "parser matched");
            }
            found
        })
        .collect()
}

/// Normalize raw log text once, then run every parser over it.
pub fn parse_log(raw: &str) -> Vec<Finding> {
    run_all(&preprocess::normalize(raw))
}
