//! log_stats: keyword counts for a job log without reading it into context.

use async_trait::async_trait;
use serde_json::json;

use crate::error::LogResult;
use crate::stats;
use crate::tools::{no_log, or_missing, required_str};
use crate::types::{LogTool, ToolContext, ToolResult};

pub struct LogStatsTool;

#[async_trait]
impl LogTool for LogStatsTool {
    fn name(&self) -> &str {
        "log_stats"
    }

    fn description(&self) -> &str {
        "Count error, warning, failed and exception lines in a job log"
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
        let path = ctx.root.log_path(folder)?;
        let stats = match or_missing(stats::log_stats(&path), || no_log(self.name(), folder))? {
            Ok(stats) => stats,
            Err(missing) => return Ok(missing),
        };

        let summary = format!(
            "{folder}: {} lines, {} error, {} warning, {} failed, {} exception",
            stats.total_lines, stats.errors, stats.warnings, stats.failed, stats.exceptions
        );
        let data = serde_json::to_value(&stats).map_err(|e| {
            crate::error::LogError::Other(format!("cannot serialize stats: {e}"))
        })?;
        Ok(ToolResult::success(self.name(), data, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::Fixture;

    #[tokio::test]
    async fn stats_for_failing_job() {
        let fx = Fixture::new().file(
            "core-ci/log.txt",
            "Run pytest\nFAILED tests/test_x.py::test_foo\nERROR: boom\n",
        );
        let result = LogStatsTool
            .execute(json!({"folder": "core-ci"}), &fx.ctx())
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["total_lines"], 3);
        assert_eq!(data["failed"], 1);
        assert_eq!(data["errors"], 1);
        assert!(data["recommendation"].as_str().unwrap().contains("search_log"));
    }

    #[tokio::test]
    async fn missing_log() {
        let fx = Fixture::new();
        let result = LogStatsTool
            .execute(json!({"folder": "core-ci"}), &fx.ctx())
            .await
            .unwrap();
        assert!(!result.success);
    }
}
