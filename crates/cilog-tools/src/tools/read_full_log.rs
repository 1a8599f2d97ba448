//! read_full_log: a job log in full, or its first `max_lines` lines.

use async_trait::async_trait;
use serde_json::json;

use crate::accessor;
use crate::error::{LogError, LogResult};
use crate::tools::{no_log, optional_usize, required_str};
use crate::types::{LogTool, SizeClass, ToolContext, ToolResult};

pub struct ReadFullLog;

#[async_trait]
impl LogTool for ReadFullLog {
    fn name(&self) -> &str {
        "read_full_log"
    }

    fn description(&self) -> &str {
        "Read a job log. Large logs (200 KB+) require max_lines; prefer search_log for them"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "folder": {
                    "type": "string",
                    "description": "Job folder from the job index"
                },
                "max_lines": {
                    "type": "integer",
                    "description": "Return at most this many lines"
                }
            },
            "required": ["folder"]
        })
    }

    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        let folder = required_str(&args, "folder")?;
        let max_lines = optional_usize(&args, "max_lines")?;
        let path = ctx.root.log_path(folder)?;

        let content = match accessor::read_full(&path, max_lines) {
            Ok(content) => content,
            Err(LogError::NotFound(_)) => return Ok(no_log(self.name(), folder)),
            Err(e @ LogError::TooLarge { .. }) => {
                tracing::debug!(folder, "refused unbounded read of large log");
                return Ok(ToolResult::failure(self.name(), e.to_string()));
            }
            Err(e) => return Err(e),
        };

        let bytes = std::fs::metadata(&path)
            .map_err(|e| LogError::from_io(&path, e))?
            .len();
        let returned_lines = content.lines().count();
        let summary = match max_lines {
            Some(limit) => format!(
                "{folder}: first {returned_lines} line(s) (limit {limit}) of a {bytes}-byte log"
            ),
            None => format!("{folder}: {bytes} bytes, {returned_lines} line(s)"),
        };

        let data = json!({
            "folder": folder,
            "bytes": bytes,
            "size_class": SizeClass::from_bytes(bytes),
            "max_lines": max_lines,
            "lines_returned": returned_lines,
            "content": content,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
