//! Tool registry: name-indexed dispatch over the log tools.

use std::collections::HashMap;

use serde::Serialize;

use cilog_tools::{LogTool, ToolContext, ToolResult};

/// Metadata about a registered tool (used by `cilog tools`).
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
}

/// Holds every log tool, indexed by name for O(1) dispatch.
pub struct ToolRegistry {
    tools: Vec<Box<dyn LogTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn LogTool>>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, index }
    }

    /// Build with the default set of tools.
    pub fn with_defaults() -> Self {
        Self::new(cilog_tools::all_tools())
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn LogTool> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    /// Run a tool by name. Unknown names and tool errors become failed results.
    pub async fn execute(
        &self,
        name: &str,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> ToolResult {
        let Some(tool) = self.lookup(name) else {
            return ToolResult::failure(name, format!("unknown tool: {name}"));
        };
        match tool.execute(args, ctx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool execution failed");
                ToolResult::failure(name, e.to_string())
            }
        }
    }

    /// All registered tools with metadata, in registration order.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                schema: tool.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cilog_tools::{AnalysisOptions, ResultsRoot};
    use serde_json::json;

    fn ctx(dir: &std::path::Path) -> ToolContext {
        ToolContext::new(ResultsRoot::new(dir), AnalysisOptions::default())
    }

    #[test]
    fn registry_with_defaults() {
        let reg = ToolRegistry::with_defaults();
        assert_eq!(reg.len(), 8);
        assert!(!reg.is_empty());
    }

    #[test]
    fn lookup_known_and_unknown() {
        let reg = ToolRegistry::with_defaults();
        assert_eq!(reg.lookup("search_log").unwrap().name(), "search_log");
        assert!(reg.lookup("nonexistent_tool").is_none());
    }

    #[test]
    fn list_tools_has_all() {
        let reg = ToolRegistry::with_defaults();
        let names: Vec<String> = reg.list_tools().into_iter().map(|t| t.name).collect();
        for expected in [
            "read_job_index",
            "check_log_size",
            "read_job_summary",
            "log_stats",
            "search_log",
            "read_full_log",
            "read_workspace_file",
            "parse_ci_output",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn execute_dispatches_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("core-ci")).unwrap();
        std::fs::write(dir.path().join("core-ci/log.txt"), "ok\n").unwrap();

        let reg = ToolRegistry::with_defaults();
        let result = reg
            .execute("check_log_size", json!({"folder": "core-ci"}), &ctx(dir.path()))
            .await;
        assert!(result.success);
        assert_eq!(result.tool_name, "check_log_size");
    }

    #[tokio::test]
    async fn unknown_tool_fails() {
        let dir = tempfile::tempdir().unwrap();
        let reg = ToolRegistry::with_defaults();
        let result = reg.execute("nope", json!({}), &ctx(dir.path())).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("unknown tool: nope"));
    }

    #[tokio::test]
    async fn tool_error_becomes_failure() {
        let dir = tempfile::tempdir().unwrap();
        let reg = ToolRegistry::with_defaults();
        let result = reg
            .execute(
                "search_log",
                json!({"folder": "core-ci", "pattern": "[bad"}),
                &ctx(dir.path()),
            )
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("invalid regex"));
    }
}
