//! Subcommand implementations, independent of argument parsing and stdout.

use std::path::PathBuf;

use anyhow::anyhow;
use cilog_protocol::Report;
use cilog_tools::{ResultsRoot, ToolContext, ToolResult, pipeline};

use crate::config::AnalyzerConfig;
use crate::registry::{ToolInfo, ToolRegistry};

/// Flags that override configuration for one invocation.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub baseline: Option<String>,
    pub parallel: bool,
}

impl Overrides {
    pub fn apply(self, mut config: AnalyzerConfig) -> AnalyzerConfig {
        if let Some(root) = self.root {
            config.results_root = root;
        }
        if let Some(baseline) = self.baseline {
            config.baseline = Some(baseline);
        }
        config.parallel |= self.parallel;
        config
    }
}

/// Run the full pipeline.
pub async fn analyze(config: &AnalyzerConfig) -> anyhow::Result<Report> {
    let root = ResultsRoot::new(&config.results_root);
    let options = config.analysis_options();
    tracing::info!(
        root = %config.results_root.display(),
        baseline = config.baseline(),
        parallel = config.parallel,
        "analyze"
    );
    let report = if config.parallel {
        pipeline::analyze_parallel(&root, config.baseline(), &options).await?
    } else {
        pipeline::analyze(&root, config.baseline(), &options)
    };
    Ok(report)
}

pub fn list_tools() -> Vec<ToolInfo> {
    ToolRegistry::with_defaults().list_tools()
}

/// Run one tool. `args` must be a JSON object.
pub async fn run_tool(config: &AnalyzerConfig, tool: &str, args: &str) -> anyhow::Result<ToolResult> {
    let args: serde_json::Value = serde_json::from_str(args)?;
    if !args.is_object() {
        return Err(anyhow!("tool arguments must be a JSON object, got: {args}"));
    }
    let registry = ToolRegistry::with_defaults();
    if registry.lookup(tool).is_none() {
        return Err(anyhow!("unknown tool: {tool} (see `cilog tools`)"));
    }
    let ctx = ToolContext::new(
        ResultsRoot::new(&config.results_root),
        config.analysis_options(),
    );
    Ok(registry.execute(tool, args, &ctx).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("core-ci")).unwrap();
        std::fs::write(
            dir.path().join("core-ci/log.txt"),
            "app/main.py:3:1: F401 `sys` imported but unused\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn flags_override_config() {
        let config = AnalyzerConfig {
            baseline: Some("failure".into()),
            ..AnalyzerConfig::default()
        };
        let config = Overrides {
            root: Some(PathBuf::from("/ci")),
            baseline: None,
            parallel: true,
        }
        .apply(config);
        assert_eq!(config.results_root, PathBuf::from("/ci"));
        assert_eq!(config.baseline(), "failure");
        assert!(config.parallel);
    }

    #[tokio::test]
    async fn analyze_uses_config() {
        let dir = fixture();
        let config = Overrides {
            root: Some(dir.path().to_path_buf()),
            ..Overrides::default()
        }
        .apply(AnalyzerConfig::default());
        let report = analyze(&config).await.unwrap();
        assert_eq!(report.status, "failure");
        assert_eq!(report.critical_errors.len(), 1);
    }

    #[tokio::test]
    async fn run_tool_parses_args() {
        let dir = fixture();
        let config = AnalyzerConfig {
            results_root: dir.path().to_path_buf(),
            ..AnalyzerConfig::default()
        };
        let result = run_tool(&config, "log_stats", r#"{"folder": "core-ci"}"#)
            .await
            .unwrap();
        assert!(result.success);
        assert!(run_tool(&config, "log_stats", "not json").await.is_err());
        assert!(run_tool(&config, "log_stats", "[1]").await.is_err());
        assert!(run_tool(&config, "no_such_tool", "{}").await.is_err());
    }

    #[test]
    fn lists_tools() {
        assert_eq!(list_tools().len(), 8);
    }
}
