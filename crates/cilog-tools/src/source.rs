//! Results root: the directory tree CI job outputs are collected into.
//!
//! Every operation takes the root explicitly; nothing resolves paths
//! against the working directory.

use std::path::{Component, Path, PathBuf};

use cilog_protocol::{JOB_INDEX_FILE, JOB_LOG_FILE, JOB_SUMMARY_FILE};

use crate::error::{LogError, LogResult};

/// A results root containing one folder per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsRoot {
    root: PathBuf,
}

impl ResultsRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(JOB_INDEX_FILE)
    }

    /// Folder for a job. Rejects names that would escape the root.
    pub fn job_dir(&self, folder: &str) -> LogResult<PathBuf> {
        let rel = Path::new(folder);
        let single_normal = {
            let mut comps = rel.components();
            matches!(comps.next(), Some(Component::Normal(_))) && comps.next().is_none()
        };
        if !single_normal {
            return Err(LogError::Other(format!("invalid job folder name: {folder:?}")));
        }
        Ok(self.root.join(rel))
    }

    pub fn log_path(&self, folder: &str) -> LogResult<PathBuf> {
        Ok(self.job_dir(folder)?.join(JOB_LOG_FILE))
    }

    pub fn summary_path(&self, folder: &str) -> LogResult<PathBuf> {
        Ok(self.job_dir(folder)?.join(JOB_SUMMARY_FILE))
    }

    /// Resolve a workspace-relative file (may be nested), staying under the root.
    pub fn workspace_file(&self, relative: &str) -> LogResult<PathBuf> {
        let rel = Path::new(relative);
        let all_normal = rel.components().all(|c| matches!(c, Component::Normal(_)));
        if relative.is_empty() || !all_normal {
            return Err(LogError::Other(format!("invalid workspace path: {relative:?}")));
        }
        Ok(self.root.join(rel))
    }
}
