//! Analyzer configuration: TOML file, then environment, then CLI flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use cilog_tools::{AnalysisOptions, SearchOptions, TruncationPolicy};

/// Environment variable naming the results root.
pub const ENV_RESULTS_DIR: &str = "CI_RESULTS_DIR";
/// Environment variable carrying the baseline CI result.
pub const ENV_BASELINE: &str = "CORE_CI_RESULT";
/// Environment variable enabling parallel job analysis.
pub const ENV_PARALLEL: &str = "CILOG_PARALLEL";

/// Top-level configuration for the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory holding one folder per CI job.
    #[serde(default = "default_results_root")]
    pub results_root: PathBuf,
    /// CI result before parsing. Defaults to "success" when unset.
    #[serde(default)]
    pub baseline: Option<String>,
    #[serde(default)]
    pub search: SearchOptions,
    /// Line cap applied when a job log is too large to read whole.
    #[serde(default = "default_large_log_max_lines")]
    pub large_log_max_lines: usize,
    #[serde(default)]
    pub workspace: TruncationPolicy,
    #[serde(default)]
    pub parallel: bool,
}

fn default_results_root() -> PathBuf {
    PathBuf::from("ci_results")
}

fn default_large_log_max_lines() -> usize {
    AnalysisOptions::default().large_log_max_lines
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            results_root: default_results_root(),
            baseline: None,
            search: SearchOptions::default(),
            large_log_max_lines: default_large_log_max_lines(),
            workspace: TruncationPolicy::default(),
            parallel: false,
        }
    }
}

impl AnalyzerConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path` when given, else defaults; then apply the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Apply `CI_RESULTS_DIR`, `CORE_CI_RESULT` and `CILOG_PARALLEL`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(dir) = get(ENV_RESULTS_DIR) {
            self.results_root = PathBuf::from(dir);
        }
        if let Some(baseline) = get(ENV_BASELINE) {
            self.baseline = Some(baseline.trim().to_string());
        }
        if let Some(flag) = get(ENV_PARALLEL) {
            self.parallel = flag.eq_ignore_ascii_case("true") || flag == "1";
        }
        self
    }

    /// Baseline to use, falling back to "success".
    pub fn baseline(&self) -> &str {
        self.baseline.as_deref().unwrap_or("success")
    }

    /// Options handed to the pipeline and tools.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            search: self.search,
            large_log_max_lines: self.large_log_max_lines,
            workspace: self.workspace,
            default_baseline: self.baseline().to_string(),
        }
    }
}
