//! Merges parser findings into one run report.

use std::collections::BTreeMap;

use cilog_protocol::{Finding, IssueAnalysis, JobAnalysis, Report, Severity};

use crate::parsers::{AUTO_FIXABLE, tool_rank};

const STATUS_SUCCESS: &str = "success";
const STATUS_FAILURE: &str = "failure";
const STATUS_WARNING: &str = "warning";
const NO_ROOT_CAUSE: &str = "none";

/// Final run status. Criticals always fail the run; warnings alone only
/// downgrade a non-success baseline.
pub fn resolve_status(baseline: &str, criticals: usize, warnings: usize) -> String {
    let status = if baseline == STATUS_SUCCESS && criticals == 0 {
        STATUS_SUCCESS
    } else if criticals > 0 {
        STATUS_FAILURE
    } else if warnings > 0 {
        STATUS_WARNING
    } else {
        baseline
    };
    status.to_string()
}

/// Tool with the most findings; ties go to the earlier parser.
fn root_cause(breakdown: &BTreeMap<String, usize>) -> String {
    breakdown
        .iter()
        .max_by(|(a_tool, a_n), (b_tool, b_n)| {
            a_n.cmp(b_n)
                .then_with(|| tool_rank(b_tool).cmp(&tool_rank(a_tool)))
        })
        .map_or_else(|| NO_ROOT_CAUSE.to_string(), |(tool, _)| tool.clone())
}

fn recommendation(criticals: usize, warnings: usize) -> String {
    match (criticals, warnings) {
        (0, 0) => "No blocking issues found.".to_string(),
        (c, w) => format!("Resolve {c} critical error(s) and {w} warning(s) before merging."),
    }
}

fn summary(status: &str, criticals: usize, warnings: usize, info: usize) -> String {
    if status == STATUS_SUCCESS && criticals + warnings + info == 0 {
        return "All CI checks passed".to_string();
    }
    format!("CI {status}: {criticals} critical error(s), {warnings} warning(s), {info} info")
}

/// Build the report for one run.
///
/// `findings` is the concatenation of every job's parser output;
/// `jobs` is in discovery order.
pub fn aggregate(baseline: &str, findings: Vec<Finding>, jobs: Vec<JobAnalysis>) -> Report {
    let mut tool_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut fix_applied = 0;
    let (mut critical_errors, mut warnings, mut info) = (Vec::new(), Vec::new(), Vec::new());

    for finding in findings {
        *tool_breakdown.entry(finding.tool.clone()).or_default() += 1;
        if AUTO_FIXABLE.contains(&finding.tool.as_str()) {
            fix_applied += 1;
        }
        match finding.severity {
            Severity::Critical => critical_errors.push(finding),
            Severity::Warning => warnings.push(finding),
            Severity::Info => info.push(finding),
        }
    }

    let mut checks_performed: Vec<String> = tool_breakdown.keys().cloned().collect();
    checks_performed.sort_by_key(|tool| tool_rank(tool));

    let status = resolve_status(baseline, critical_errors.len(), warnings.len());
    let passed = status == STATUS_SUCCESS;

    tracing::info!(
        status = %status,
        critical = critical_errors.len(),
        warnings = warnings.len(),
        info = info.len(),
        jobs = jobs.len(),
        "run aggregated"
    );

    Report {
        summary: summary(&status, critical_errors.len(), warnings.len(), info.len()),
        passed,
        checks_performed,
        jobs_analyzed: jobs,
        issue_analysis: IssueAnalysis {
            root_cause: root_cause(&tool_breakdown),
            fix_applied,
            recommendation: recommendation(critical_errors.len(), warnings.len()),
            tool_breakdown,
        },
        status,
        critical_errors,
        warnings,
        info,
    }
}
