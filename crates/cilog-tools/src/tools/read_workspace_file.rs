//! read_workspace_file: any file under the results root, head + tail when big.

use async_trait::async_trait;
use serde_json::json;

use crate::accessor;
use crate::error::{LogError, LogResult};
use crate::tools::required_str;
use crate::types::{LogTool, ToolContext, ToolResult};

pub struct ReadWorkspaceFile;

#[async_trait]
impl LogTool for ReadWorkspaceFile {
    fn name(&self) -> &str {
        "read_workspace_file"
    }

    fn description(&self) -> &str {
        "Read a file under the results root; files over 100 KB are cut to head and tail with a notice"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path relative to the results root (e.g. \"core-ci/metadata.json\")"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        let relative = required_str(&args, "path")?;
        let path = ctx.root.workspace_file(relative)?;

        let read = match accessor::read_workspace_file(&path, &ctx.options.workspace) {
            Ok(read) => read,
            Err(LogError::NotFound(_)) => {
                tracing::warn!(path = relative, "workspace file not found");
                return Ok(ToolResult::failure(
                    self.name(),
                    format!("workspace file not found: {relative}"),
                ));
            }
            Err(e) => return Err(e),
        };

        let summary = if read.truncated {
            read.notice.clone()
        } else {
            format!("{relative}: {} bytes", read.original_bytes)
        };
        let data = json!({
            "path": relative,
            "head": read.head,
            "tail": read.tail,
            "notice": read.notice,
            "truncated": read.truncated,
            "original_bytes": read.original_bytes,
            "shown_bytes": read.shown_bytes,
            "omitted_bytes": read.omitted_bytes,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
