//! Job discovery: which job folders exist under a results root.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use cilog_protocol::{JOB_LOG_FILE, JobIndex, JobRecord};

use crate::error::{LogError, LogResult};
use crate::source::ResultsRoot;

/// Parse `_job_index.json`. `Ok(None)` when the file is absent.
pub fn read_index(root: &ResultsRoot) -> LogResult<Option<JobIndex>> {
    let path = root.index_path();
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LogError::from_io(&path, e)),
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| LogError::Index(format!("{}: {e}", path.display())))
}

/// Jobs to analyze, from the index when usable, else by scanning.
///
/// A missing root yields an empty list.
pub fn discover_jobs(root: &ResultsRoot) -> Vec<JobRecord> {
    if !root.exists() {
        tracing::debug!(root = %root.path().display(), "results root missing");
        return Vec::new();
    }

    match read_index(root) {
        Ok(Some(index)) => {
            tracing::debug!(jobs = index.jobs.len(), "jobs loaded from index");
            return index.jobs;
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "job index unusable, scanning folders"),
    }

    scan_job_folders(root.path())
}

fn scan_job_folders(root: &Path) -> Vec<JobRecord> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "cannot list results root");
            return Vec::new();
        }
    };

    let mut folders: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    folders.sort();

    let jobs: Vec<JobRecord> = folders
        .into_iter()
        .filter_map(|folder| {
            let meta = fs::metadata(root.join(&folder).join(JOB_LOG_FILE)).ok()?;
            if !meta.is_file() {
                return None;
            }
            let timestamp = meta.modified().ok().map(|mtime| {
                DateTime::<Utc>::from(mtime).to_rfc3339_opts(SecondsFormat::Secs, true)
            });
            Some(JobRecord {
                job_name: folder.clone(),
                job_folder: folder,
                conclusion: "unknown".to_string(),
                log_size_bytes: meta.len(),
                timestamp,
            })
        })
        .collect();

    tracing::debug!(jobs = jobs.len(), "jobs discovered by scan");
    jobs
}
