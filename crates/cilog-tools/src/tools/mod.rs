//! Named tools an orchestrator invokes with JSON arguments.

pub mod check_log_size;
pub mod log_stats;
pub mod parse_ci_output;
pub mod read_full_log;
pub mod read_job_index;
pub mod read_job_summary;
pub mod read_workspace_file;
pub mod search_log;

use serde_json::Value;

use crate::error::{LogError, LogResult};
use crate::types::{LogTool, ToolResult};

/// Every tool, in the order they are usually called.
pub fn all_tools() -> Vec<Box<dyn LogTool>> {
    vec![
        Box::new(read_job_index::ReadJobIndex),
        Box::new(check_log_size::CheckLogSize),
        Box::new(read_job_summary::ReadJobSummary),
        Box::new(log_stats::LogStatsTool),
        Box::new(search_log::SearchLog),
        Box::new(read_full_log::ReadFullLog),
        Box::new(read_workspace_file::ReadWorkspaceFile),
        Box::new(parse_ci_output::ParseCiOutput),
    ]
}

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> LogResult<&'a str> {
    args[key]
        .as_str()
        .ok_or_else(|| LogError::Other(format!("missing '{key}' argument")))
}

pub(crate) fn optional_usize(args: &Value, key: &str) -> LogResult<Option<usize>> {
    match &args[key] {
        Value::Null => Ok(None),
        v => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| LogError::Other(format!("'{key}' must be a non-negative integer"))),
    }
}

pub(crate) fn no_log(tool: &str, folder: &str) -> ToolResult {
    ToolResult::failure(tool, format!("no log found for job '{folder}'"))
}

/// Map a missing file to a failed result; other errors propagate.
pub(crate) fn or_missing<T>(
    result: LogResult<T>,
    on_missing: impl FnOnce() -> ToolResult,
) -> LogResult<Result<T, ToolResult>> {
    match result {
        Ok(v) => Ok(Ok(v)),
        Err(LogError::NotFound(_)) => Ok(Err(on_missing())),
        Err(e) => Err(e),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn tool_names_unique() {
        let tools = all_tools();
        let names: HashSet<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 8);
    }

    #[test]
    fn schemas_are_objects() {
        for tool in all_tools() {
            let schema = tool.parameters_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(!tool.description().is_empty());
        }
    }

    #[test]
    fn argument_helpers() {
        let args = json!({"folder": "core-ci", "n": 5, "bad": -1});
        assert_eq!(required_str(&args, "folder").unwrap(), "core-ci");
        assert!(required_str(&args, "missing").is_err());
        assert_eq!(optional_usize(&args, "n").unwrap(), Some(5));
        assert_eq!(optional_usize(&args, "missing").unwrap(), None);
        assert!(optional_usize(&args, "bad").is_err());
    }
}
