use serde::{Deserialize, Serialize};

/// A single search hit with its surrounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Job folder the log belongs to.
    pub job: String,
    /// Pattern as supplied by the caller.
    pub pattern: String,
    /// 1-based line number of the matching line.
    pub line_number: usize,
    /// The matching line, trimmed.
    pub matched_line: String,
    /// Context lines before, the match, and context lines after, joined by '\n'.
    pub context_block: String,
}
