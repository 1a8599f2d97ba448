//! read_job_summary: a job's step summary, truncated like any workspace file.

use async_trait::async_trait;
use serde_json::json;

use crate::accessor;
use crate::error::LogResult;
use crate::tools::{or_missing, required_str};
use crate::types::{LogTool, ToolContext, ToolResult};

pub struct ReadJobSummary;

#[async_trait]
impl LogTool for ReadJobSummary {
    fn name(&self) -> &str {
        "read_job_summary"
    }

    fn description(&self) -> &str {
        "Read a job's step summary (summary.md). Read summaries before logs"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "folder": {
                    "type": "string",
                    "description": "Job folder from the job index"
                }
            },
            "required": ["folder"]
        })
    }

    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        let folder = required_str(&args, "folder")?;
        let path = ctx.root.summary_path(folder)?;
        let read = accessor::read_workspace_file(&path, &ctx.options.workspace);
        let read = match or_missing(read, || {
            ToolResult::failure(self.name(), format!("no summary found for job '{folder}'"))
        })? {
            Ok(read) => read,
            Err(missing) => return Ok(missing),
        };

        let summary = if read.truncated {
            format!("{folder} summary ({})", read.notice)
        } else {
            format!("{folder} summary, {} bytes", read.original_bytes)
        };
        let data = json!({
            "folder": folder,
            "content": read,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
