//! Discovery → (accessor → parsers) per job → aggregator.

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use cilog_protocol::{Finding, JobAnalysis, JobRecord, Report};

use crate::accessor::{self, TruncationPolicy};
use crate::aggregator;
use crate::discovery;
use crate::error::{LogError, LogResult};
use crate::parsers;
use crate::search::SearchOptions;
use crate::source::ResultsRoot;

/// Tunables shared by the pipeline and the tool surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default)]
    pub search: SearchOptions,
    /// Line cap used when a job log is too large to read in full.
    #[serde(default = "default_large_log_max_lines")]
    pub large_log_max_lines: usize,
    #[serde(default)]
    pub workspace: TruncationPolicy,
    /// Baseline status when a caller does not supply one.
    #[serde(default = "default_baseline")]
    pub default_baseline: String,
}

fn default_large_log_max_lines() -> usize {
    5000
}

fn default_baseline() -> String {
    "success".to_string()
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            large_log_max_lines: default_large_log_max_lines(),
            workspace: TruncationPolicy::default(),
            default_baseline: default_baseline(),
        }
    }
}

/// Findings and report line for one job.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub analysis: JobAnalysis,
    pub findings: Vec<Finding>,
}

/// Log text for a job, capped at `max_lines` when the log is large.
fn load_log(path: &std::path::Path, max_lines: usize) -> LogResult<String> {
    match accessor::read_full(path, None) {
        Err(e) if e.is_too_large() => {
            tracing::debug!(path = %path.display(), max_lines, "large log, reading with line cap");
            accessor::read_full(path, Some(max_lines))
        }
        other => other,
    }
}

/// Read and parse one job's log. `None` when the job has no log.
pub fn analyze_job(
    root: &ResultsRoot,
    job: &JobRecord,
    options: &AnalysisOptions,
) -> Option<JobOutcome> {
    let path = match root.log_path(&job.job_folder) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(job = %job.job_name, error = %e, "skipping job");
            return None;
        }
    };
    let log_size = match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => {
            tracing::debug!(job = %job.job_name, path = %path.display(), "no log for job");
            return None;
        }
    };

    let content = match load_log(&path, options.large_log_max_lines) {
        Ok(content) => content,
        Err(LogError::NotFound(_)) => return None,
        Err(e) => {
            tracing::warn!(job = %job.job_name, error = %e, "log unreadable, treating as empty");
            String::new()
        }
    };

    let findings = parsers::parse_log(&content);
    tracing::debug!(job = %job.job_name, findings = findings.len(), log_size, "job parsed");

    Some(JobOutcome {
        analysis: JobAnalysis {
            name: job.job_name.clone(),
            conclusion: job.conclusion.clone(),
            errors_found: findings.len(),
            log_size,
        },
        findings,
    })
}

fn into_report(baseline: &str, outcomes: impl IntoIterator<Item = JobOutcome>) -> Report {
    let mut findings = Vec::new();
    let mut jobs = Vec::new();
    for outcome in outcomes {
        findings.extend(outcome.findings);
        jobs.push(outcome.analysis);
    }
    aggregator::aggregate(baseline, findings, jobs)
}

/// Analyze every discovered job in order.
pub fn analyze(root: &ResultsRoot, baseline: &str, options: &AnalysisOptions) -> Report {
    let jobs = discovery::discover_jobs(root);
    tracing::info!(root = %root.path().display(), jobs = jobs.len(), "analysis started");
    let outcomes: Vec<JobOutcome> = jobs
        .iter()
        .filter_map(|job| analyze_job(root, job, options))
        .collect();
    into_report(baseline, outcomes)
}

/// Same result as [`analyze`], with per-job work on the blocking pool.
pub async fn analyze_parallel(
    root: &ResultsRoot,
    baseline: &str,
    options: &AnalysisOptions,
) -> LogResult<Report> {
    let jobs = discovery::discover_jobs(root);
    tracing::info!(
        root = %root.path().display(),
        jobs = jobs.len(),
        "parallel analysis started"
    );

    let mut set = JoinSet::new();
    for (idx, job) in jobs.into_iter().enumerate() {
        let root = root.clone();
        let options = options.clone();
        set.spawn_blocking(move || (idx, analyze_job(&root, &job, &options)));
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (idx, outcome) = joined.map_err(|e| LogError::Other(format!("job task failed: {e}")))?;
        if let Some(outcome) = outcome {
            outcomes.push((idx, outcome));
        }
    }
    outcomes.sort_by_key(|(idx, _)| *idx);

    Ok(into_report(baseline, outcomes.into_iter().map(|(_, o)| o)))
}
