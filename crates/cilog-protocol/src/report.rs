use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::finding::{Finding, Severity};
use crate::jobs::JobAnalysis;

/// Aggregated analysis of one CI run: the subsystem's output contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// "success", "failure", "warning", or the baseline passed through.
    pub status: String,
    pub passed: bool,
    pub summary: String,
    /// Distinct tools that produced at least one finding.
    pub checks_performed: Vec<String>,
    pub critical_errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
    pub jobs_analyzed: Vec<JobAnalysis>,
    pub issue_analysis: IssueAnalysis,
}

impl Report {
    /// Total findings across all severity buckets.
    pub fn total_findings(&self) -> usize {
        self.critical_errors.len() + self.warnings.len() + self.info.len()
    }

    /// Findings in the given severity bucket.
    pub fn bucket(&self, severity: Severity) -> &[Finding] {
        match severity {
            Severity::Critical => &self.critical_errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.info,
        }
    }
}

/// Root-cause summary attached to a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueAnalysis {
    /// Tool with the most findings, or "none".
    pub root_cause: String,
    /// Findings an auto-formatter can fix (prettier, black, isort).
    pub fix_applied: usize,
    pub recommendation: String,
    /// Finding count per tool.
    pub tool_breakdown: BTreeMap<String, usize>,
}
