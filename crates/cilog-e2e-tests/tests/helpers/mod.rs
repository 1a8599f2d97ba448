//! Shared test harness for E2E integration tests.
//!
//! Builds a results root on disk, then drives it through the pipeline,
//! the tool registry and the CLI runners exactly as the binary does.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use cilog_agent::config::AnalyzerConfig;
use cilog_agent::registry::ToolRegistry;
use cilog_protocol::Report;
use cilog_tools::{AnalysisOptions, ResultsRoot, ToolContext, ToolResult, pipeline};
use serde_json::Value;

/// Lint job output mixing several tools, with runner timestamps and colors.
pub const LINT_LOG: &str = "\
2024-01-15T12:00:00.0000000Z ##[group]Run pre-commit
--- stylelint ---
src/a.css
  3:5  \x1b[31m✖\x1b[39m  Expected lowercase  color-no-invalid-hex
--- done ---
[warn] src/app.tsx
would reformat app/main.py
app/main.py:1:8: F401 [*] `os` imported but unused
README.md:3:81 MD013/line-length Line length
";

/// Test job output with one failing test.
pub const TEST_LOG: &str = "\
============================= test session starts ==============================
collected 12 items

tests/test_x.py .....F......                                             [100%]

=========================== short test summary info ============================
FAILED tests/test_x.py::test_foo - AssertionError: bad
========================= 1 failed, 11 passed in 0.42s =========================
";

/// Clean job output.
pub const DOCS_LOG: &str = "Building docs...\nbuild succeeded.\n";

/// End-to-end harness around a temporary results root.
pub struct TestHarness {
    dir: tempfile::TempDir,
    pub registry: ToolRegistry,
}

impl TestHarness {
    /// Empty results root.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
            registry: ToolRegistry::with_defaults(),
        }
    }

    /// Results root with lint, tests and docs jobs (no index).
    pub fn with_sample_jobs() -> Self {
        let h = Self::new();
        h.add_job("lint", LINT_LOG);
        h.add_job("tests", TEST_LOG);
        h.add_job("docs", DOCS_LOG);
        h
    }

    pub fn root_path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> ResultsRoot {
        ResultsRoot::new(self.dir.path())
    }

    /// Write `<folder>/log.txt`.
    pub fn add_job(&self, folder: &str, log: &str) -> PathBuf {
        self.write(&format!("{folder}/log.txt"), log)
    }

    /// Write any file under the root, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, content).expect("write fixture");
        path
    }

    /// Write `_job_index.json` from a JSON value.
    pub fn write_index(&self, index: &Value) {
        self.write("_job_index.json", &index.to_string());
    }

    pub fn config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            results_root: self.dir.path().to_path_buf(),
            ..AnalyzerConfig::default()
        }
    }

    pub fn ctx(&self) -> ToolContext {
        ToolContext::new(self.root(), AnalysisOptions::default())
    }

    /// Sequential pipeline run.
    pub fn analyze(&self, baseline: &str) -> Report {
        pipeline::analyze(&self.root(), baseline, &AnalysisOptions::default())
    }

    /// Run a tool through the registry.
    pub async fn tool(&self, name: &str, args: Value) -> ToolResult {
        self.registry.execute(name, args, &self.ctx()).await
    }
}

/// A log of at least `min_bytes` with `marker` lines every `every` lines.
pub fn large_log(min_bytes: usize, marker: &str, every: usize) -> String {
    let mut log = String::with_capacity(min_bytes + 128);
    let mut n = 0usize;
    while log.len() < min_bytes {
        n += 1;
        if n % every == 0 {
            log.push_str(&format!("step {n}: {marker}\n"));
        } else {
            log.push_str(&format!("step {n}: compiling module_{n}\n"));
        }
    }
    log
}
