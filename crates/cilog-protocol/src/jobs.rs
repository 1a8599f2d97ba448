use serde::{Deserialize, Serialize};

/// Name of the optional job index written at the results root.
pub const JOB_INDEX_FILE: &str = "_job_index.json";
/// Raw job log inside each job folder.
pub const JOB_LOG_FILE: &str = "log.txt";
/// Step summary inside each job folder.
pub const JOB_SUMMARY_FILE: &str = "summary.md";

/// One CI job whose log is subject to parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_name: String,
    /// Folder under the results root holding `log.txt`.
    pub job_folder: String,
    /// "success", "failure", ... or "unknown" when discovered by scanning.
    #[serde(default = "default_conclusion")]
    pub conclusion: String,
    #[serde(default)]
    pub log_size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn default_conclusion() -> String {
    "unknown".to_string()
}

/// On-disk shape of `_job_index.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobIndex {
    /// Workflow run id (number or string, passed through as-is).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_number: Option<serde_json::Value>,
    pub jobs: Vec<JobRecord>,
}

/// Per-job line in the report's `jobs_analyzed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub name: String,
    pub conclusion: String,
    /// Findings extracted from this job's log (all severities).
    pub errors_found: usize,
    /// Log size in bytes.
    pub log_size: u64,
}
