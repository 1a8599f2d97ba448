//! Bounded regex search with context over a single log file.
//!
//! The file is streamed line by line, each line cut to
//! [`MAX_LINE_BYTES`]. Only `context_lines` prior lines and the blocks of
//! matches still collecting trailing context are held, so memory is
//! O(max_matches × context_lines) whatever the file size.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use cilog_protocol::SearchMatch;

use crate::accessor::{MAX_LINE_BYTES, read_line_capped};
use crate::error::{LogError, LogResult};

/// Upper bound on context lines per side; larger requests are clamped.
pub const MAX_CONTEXT_LINES: usize = 200;

/// Context and match limits for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

fn default_context_lines() -> usize {
    3
}

fn default_max_matches() -> usize {
    50
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            max_matches: default_max_matches(),
        }
    }
}

/// Compile a case-insensitive pattern, mapping failures to `InvalidPattern`.
pub fn compile(pattern: &str) -> LogResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| LogError::InvalidPattern(e.to_string()))
}

struct Pending {
    line_number: usize,
    matched_line: String,
    block: Vec<String>,
    remaining_after: usize,
}

impl Pending {
    fn finish(self, job: &str, pattern: &str) -> SearchMatch {
        SearchMatch {
            job: job.to_string(),
            pattern: pattern.to_string(),
            line_number: self.line_number,
            matched_line: self.matched_line,
            context_block: self.block.join("\n"),
        }
    }
}

/// Search `path` for `pattern`, returning at most `opts.max_matches` hits.
///
/// `opts.context_lines` is clamped to [`MAX_CONTEXT_LINES`].
/// The pattern is validated before the file is opened, so an invalid
/// pattern never yields partial output. Lines are decoded lossily.
pub fn search(
    path: &Path,
    job: &str,
    pattern: &str,
    opts: &SearchOptions,
) -> LogResult<Vec<SearchMatch>> {
    let re = compile(pattern)?;
    let file = File::open(path).map_err(|e| LogError::from_io(path, e))?;
    let mut reader = BufReader::new(file);

    let mut results = Vec::new();
    let mut open: VecDeque<Pending> = VecDeque::new();
    let context_lines = opts.context_lines.min(MAX_CONTEXT_LINES);
    let mut before: VecDeque<String> = VecDeque::with_capacity(context_lines + 1);
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    while results.len() + open.len() < opts.max_matches || !open.is_empty() {
        buf.clear();
        let n = read_line_capped(&mut reader, &mut buf, MAX_LINE_BYTES)
            .map_err(|e| LogError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        line_number += 1;
        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();

        // Feed trailing context to matches still collecting it.
        for pending in open.iter_mut() {
            pending.block.push(line.clone());
            pending.remaining_after -= 1;
        }
        while open.front().is_some_and(|p| p.remaining_after == 0) {
            if let Some(done) = open.pop_front() {
                results.push(done.finish(job, pattern));
            }
        }

        if results.len() + open.len() < opts.max_matches && re.is_match(&line) {
            let mut block: Vec<String> = before.iter().cloned().collect();
            block.push(line.clone());
            let pending = Pending {
                line_number,
                matched_line: line.trim().to_string(),
                block,
                remaining_after: context_lines,
            };
            if context_lines == 0 {
                results.push(pending.finish(job, pattern));
            } else {
                open.push_back(pending);
            }
        }

        if context_lines > 0 {
            if before.len() == context_lines {
                before.pop_front();
            }
            before.push_back(line);
        }
    }

    // End of file: remaining matches keep whatever trailing context exists.
    results.extend(open.into_iter().map(|p| p.finish(job, pattern)));

    tracing::debug!(
        path = %path.display(),
        pattern,
        matches = results.len(),
        lines_scanned = line_number,
        "search complete"
    );
    Ok(results)
}
