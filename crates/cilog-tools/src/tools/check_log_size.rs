//! check_log_size: size, line count and a safe way to read a job log.

use async_trait::async_trait;
use serde_json::json;

use crate::accessor;
use crate::error::LogResult;
use crate::tools::{no_log, or_missing, required_str};
use crate::types::{LogTool, ToolContext, ToolResult};

pub struct CheckLogSize;

#[async_trait]
impl LogTool for CheckLogSize {
    fn name(&self) -> &str {
        "check_log_size"
    }

    fn description(&self) -> &str {
        "Check a job log's size before reading it; recommends full read, caution, or search"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "folder": {
                    "type": "string",
                    "description": "Job folder from the job index (e.g. \"core-ci\")"
                }
            },
            "required": ["folder"]
        })
    }

    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        let folder = required_str(&args, "folder")?;
        let path = ctx.root.log_path(folder)?;
        let size = match or_missing(accessor::size(&path), || no_log(self.name(), folder))? {
            Ok(size) => size,
            Err(missing) => return Ok(missing),
        };

        let data = json!({
            "folder": folder,
            "bytes": size.bytes,
            "lines": size.lines,
            "size_class": size.size_class,
            "recommendation": size.size_class.recommendation(),
        });

        Ok(ToolResult::success(
            self.name(),
            data,
            format!(
                "{folder}: {} bytes, {} lines ({})",
                size.bytes, size.lines, size.size_class
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::Fixture;

    #[tokio::test]
    async fn small_log() {
        let fx = Fixture::new().file("core-ci/log.txt", "a\nb\nc");
        let result = CheckLogSize
            .execute(json!({"folder": "core-ci"}), &fx.ctx())
            .await
            .unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["bytes"], 5);
        assert_eq!(data["lines"], 3);
        assert_eq!(data["size_class"], "small");
        assert!(data["recommendation"].as_str().unwrap().contains("read_full_log"));
    }

    #[tokio::test]
    async fn large_log_recommends_search() {
        let fx = Fixture::new().file("big/log.txt", &"x".repeat(200 * 1024));
        let result = CheckLogSize
            .execute(json!({"folder": "big"}), &fx.ctx())
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["size_class"], "large");
        assert!(data["recommendation"].as_str().unwrap().contains("search_log"));
    }

    #[tokio::test]
    async fn missing_log() {
        let fx = Fixture::new();
        let result = CheckLogSize
            .execute(json!({"folder": "ghost"}), &fx.ctx())
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("no log found for job 'ghost'"));
    }

    #[tokio::test]
    async fn missing_argument_is_error() {
        let fx = Fixture::new();
        assert!(CheckLogSize.execute(json!({}), &fx.ctx()).await.is_err());
    }
}
