//! read_job_index: which jobs ran, their conclusions, and how big their logs are.

use async_trait::async_trait;
use serde_json::json;

use crate::discovery;
use crate::error::LogResult;
use crate::types::{LogTool, SizeClass, ToolContext, ToolResult};

pub struct ReadJobIndex;

#[async_trait]
impl LogTool for ReadJobIndex {
    fn name(&self) -> &str {
        "read_job_index"
    }

    fn description(&self) -> &str {
        "List CI jobs with conclusions and log sizes. Call this first."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        if !ctx.root.exists() {
            return Ok(ToolResult::failure(
                self.name(),
                format!(
                    "no CI results at {}; CI data may not have been collected",
                    ctx.root.path().display()
                ),
            ));
        }

        let (run_id, run_number, source) = match discovery::read_index(&ctx.root) {
            Ok(Some(index)) => (index.run_id, index.run_number, "index"),
            Ok(None) => (None, None, "scan"),
            Err(e) => {
                tracing::warn!(error = %e, "job index unusable, scanning folders");
                (None, None, "scan")
            }
        };
        let jobs = discovery::discover_jobs(&ctx.root);

        let entries: Vec<_> = jobs
            .iter()
            .map(|job| {
                let class = SizeClass::from_bytes(job.log_size_bytes);
                json!({
                    "job_name": job.job_name,
                    "job_folder": job.job_folder,
                    "conclusion": job.conclusion,
                    "log_size_bytes": job.log_size_bytes,
                    "size_class": class,
                    "timestamp": job.timestamp,
                })
            })
            .collect();
        let failed = jobs.iter().filter(|j| j.conclusion == "failure").count();

        let data = json!({
            "run_id": run_id,
            "run_number": run_number,
            "source": source,
            "jobs": entries,
        });

        Ok(ToolResult::success(
            self.name(),
            data,
            format!("{} job(s), {failed} failed", jobs.len()),
        ))
    }
}
