//! search_log: case-insensitive grep with context over a job log.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{LogError, LogResult};
use crate::search::{self, SearchOptions};
use crate::tools::{no_log, optional_usize, or_missing, required_str};
use crate::types::{LogTool, ToolContext, ToolResult};

pub struct SearchLog;

#[async_trait]
impl LogTool for SearchLog {
    fn name(&self) -> &str {
        "search_log"
    }

    fn description(&self) -> &str {
        "Search a job log for a regex (case-insensitive) with surrounding context; safe for large logs"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "folder": {
                    "type": "string",
                    "description": "Job folder from the job index"
                },
                "pattern": {
                    "type": "string",
                    "description": "Regex pattern, e.g. \"error\", \"FAILED\", \"traceback\""
                },
                "context_lines": {
                    "type": "integer",
                    "description": "Lines of context before and after each match (default: 3, max: 200)",
                    "default": 3
                },
                "max_matches": {
                    "type": "integer",
                    "description": "Maximum number of matches (default: 50)",
                    "default": 50
                }
            },
            "required": ["folder", "pattern"]
        })
    }

    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext) -> LogResult<ToolResult> {
        let folder = required_str(&args, "folder")?;
        let pattern = required_str(&args, "pattern")?;
        let defaults = ctx.options.search;
        let opts = SearchOptions {
            context_lines: optional_usize(&args, "context_lines")?.unwrap_or(defaults.context_lines),
            max_matches: optional_usize(&args, "max_matches")?.unwrap_or(defaults.max_matches),
        };
        let path = ctx.root.log_path(folder)?;

        let found = search::search(&path, folder, pattern, &opts);
        let matches = match or_missing(found, || no_log(self.name(), folder))? {
            Ok(matches) => matches,
            Err(missing) => return Ok(missing),
        };

        let limit_reached = matches.len() == opts.max_matches && opts.max_matches > 0;
        let summary = if matches.is_empty() {
            format!("no matches for '{pattern}' in {folder}")
        } else if limit_reached {
            format!(
                "{} matches for '{pattern}' in {folder} (limit reached, pattern may occur more often)",
                matches.len()
            )
        } else {
            format!("{} matches for '{pattern}' in {folder}", matches.len())
        };

        let data = json!({
            "folder": folder,
            "pattern": pattern,
            "count": matches.len(),
            "limit_reached": limit_reached,
            "matches": serde_json::to_value(&matches)
                .map_err(|e| LogError::Other(format!("cannot serialize matches: {e}")))?,
        });
        Ok(ToolResult::success(self.name(), data, summary))
    }
}
