//! Core access-policy types and the LogTool trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LogResult;
use crate::pipeline::AnalysisOptions;
use crate::source::ResultsRoot;

// ── Size Class ────────────────────────────────────────────────

/// Logs under this size are safe to read fully (50 KB).
pub const SMALL_LOG_THRESHOLD: u64 = 50 * 1024;
/// Logs at or above this size must be searched or read with a bound (200 KB).
pub const MEDIUM_LOG_THRESHOLD: u64 = 200 * 1024;

/// Size classification of a log, driving how it may be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Under 50 KB: read fully.
    Small,
    /// Under 200 KB: read with caution.
    Medium,
    /// 200 KB and up: search, or read with an explicit line cap.
    Large,
}

impl SizeClass {
    pub fn from_bytes(bytes: u64) -> Self {
        if bytes < SMALL_LOG_THRESHOLD {
            Self::Small
        } else if bytes < MEDIUM_LOG_THRESHOLD {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// How a consumer should access a log of this class.
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Small => "safe to read fully with read_full_log",
            Self::Medium => {
                "read with caution: check the job summary first, then use search_log for specific errors"
            }
            Self::Large => {
                "do not read fully: use search_log (e.g. 'error', 'failed', 'exception', 'traceback') or read_full_log with max_lines"
            }
        }
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Tool Result ───────────────────────────────────────────────

/// Result of executing a log tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that produced this result.
    pub tool_name: String,
    /// Whether the tool execution succeeded.
    pub success: bool,
    /// Structured result data (JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Error message if success is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(
        tool_name: impl Into<String>,
        data: serde_json::Value,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            data: Some(data),
            summary: Some(summary.into()),
            error: None,
        }
    }

    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            data: None,
            summary: None,
            error: Some(error.into()),
        }
    }
}

// ── Tool Context ──────────────────────────────────────────────

/// Everything a tool needs besides its arguments.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub root: ResultsRoot,
    pub options: AnalysisOptions,
}

impl ToolContext {
    pub fn new(root: ResultsRoot, options: AnalysisOptions) -> Self {
        Self { root, options }
    }
}

// ── LogTool Trait ─────────────────────────────────────────────

/// Trait for tools an orchestrator can invoke by name with JSON arguments.
#[async_trait]
pub trait LogTool: Send + Sync {
    /// Tool name (e.g., "search_log").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema describing accepted arguments.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with JSON arguments against a results root.
    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(SizeClass::from_bytes(0), SizeClass::Small);
        assert_eq!(SizeClass::from_bytes(50 * 1024 - 1), SizeClass::Small);
        assert_eq!(SizeClass::from_bytes(50 * 1024), SizeClass::Medium);
        assert_eq!(SizeClass::from_bytes(200 * 1024 - 1), SizeClass::Medium);
        assert_eq!(SizeClass::from_bytes(200 * 1024), SizeClass::Large);
        assert_eq!(SizeClass::from_bytes(u64::MAX), SizeClass::Large);
    }

    #[test]
    fn size_class_serialization() {
        assert_eq!(
            serde_json::to_string(&SizeClass::Large).unwrap(),
            r#""large""#
        );
    }

    #[test]
    fn tool_result_failure_has_no_data() {
        let r = ToolResult::failure("search_log", "boom");
        assert!(!r.success);
        assert!(r.data.is_none());
        assert_eq!(r.error.as_deref(), Some("boom"));
    }
}
