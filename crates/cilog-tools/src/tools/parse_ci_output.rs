//! parse_ci_output: run the full pipeline and return the report.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{LogError, LogResult};
use crate::pipeline;
use crate::types::{LogTool, ToolContext, ToolResult};

pub struct ParseCiOutput;

#[async_trait]
impl LogTool for ParseCiOutput {
    fn name(&self) -> &str {
        "parse_ci_output"
    }

    fn description(&self) -> &str {
        "Parse every job log into findings and return the aggregated CI report"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "baseline": {
                    "type": "string",
                    "description": "Overall CI result before parsing (e.g. \"success\", \"failure\")"
                },
                "parallel": {
                    "type": "boolean",
                    "description": "Analyze jobs concurrently (default: false)",
                    "default": false
                }
            }
        })
    }

    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        let baseline = args["baseline"]
            .as_str()
            .unwrap_or(&ctx.options.default_baseline);
        let parallel = args["parallel"].as_bool().unwrap_or(false);

        let report = if parallel {
            pipeline::analyze_parallel(&ctx.root, baseline, &ctx.options).await?
        } else {
            pipeline::analyze(&ctx.root, baseline, &ctx.options)
        };

        let summary = report.summary.clone();
        let data = serde_json::to_value(&report)
            .map_err(|e| LogError::Other(format!("cannot serialize report: {e}")))?;
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
