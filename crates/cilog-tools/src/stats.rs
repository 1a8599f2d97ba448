//! Keyword line counts for a quick read on a log before opening it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::LazyLock;

use crate::accessor::{MAX_LINE_BYTES, read_line_capped};
use crate::error::{LogError, LogResult};

static RE_ERROR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\berror\b").unwrap());
static RE_WARNING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bwarning\b").unwrap());
static RE_FAILED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bfailed\b").unwrap());
static RE_EXCEPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexception\b").unwrap());

/// Lines mentioning each keyword. A line can count toward several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    pub total_lines: u64,
    pub size_bytes: u64,
    pub errors: u64,
    pub warnings: u64,
    pub failed: u64,
    pub exceptions: u64,
    pub recommendation: String,
}

impl LogStats {
    pub fn has_failures(&self) -> bool {
        self.errors > 0 || self.failed > 0 || self.exceptions > 0
    }
}

fn recommendation(stats: &LogStats) -> String {
    if stats.has_failures() {
        "log contains errors or failures: investigate with search_log (e.g. pattern 'error')"
            .to_string()
    } else if stats.warnings > 0 {
        "log has warnings but may have passed: check the job summary first".to_string()
    } else {
        "log appears clean: review the job summary for details".to_string()
    }
}

/// Stream a log and count keyword lines. Only the first
/// [`MAX_LINE_BYTES`] of each line are examined.
pub fn log_stats(path: &Path) -> LogResult<LogStats> {
    let file = File::open(path).map_err(|e| LogError::from_io(path, e))?;
    let size_bytes = file
        .metadata()
        .map_err(|e| LogError::from_io(path, e))?
        .len();
    let mut reader = BufReader::new(file);

    let mut stats = LogStats {
        total_lines: 0,
        size_bytes,
        errors: 0,
        warnings: 0,
        failed: 0,
        exceptions: 0,
        recommendation: String::new(),
    };
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = read_line_capped(&mut reader, &mut buf, MAX_LINE_BYTES)
            .map_err(|e| LogError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        stats.total_lines += 1;
        let line = String::from_utf8_lossy(&buf);
        stats.errors += u64::from(RE_ERROR.is_match(&line));
        stats.warnings += u64::from(RE_WARNING.is_match(&line));
        stats.failed += u64::from(RE_FAILED.is_match(&line));
        stats.exceptions += u64::from(RE_EXCEPTION.is_match(&line));
    }
    stats.recommendation = recommendation(&stats);

    tracing::debug!(
        path = %path.display(),
        lines = stats.total_lines,
        errors = stats.errors,
        "log stats computed"
    );
    Ok(stats)
}
