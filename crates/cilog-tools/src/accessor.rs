//! Size classification and bounded reads over a single file.
//!
//! Every read here has a ceiling that does not depend on the file's size:
//! full reads are refused for `large` logs unless a line cap is given, lines
//! longer than [`MAX_LINE_BYTES`] are cut, and workspace files over the
//! truncation threshold are cut to head + tail.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{LogError, LogResult};
use crate::types::SizeClass;

/// Default threshold above which workspace files are truncated (100 KB).
pub const WORKSPACE_TRUNCATE_THRESHOLD: u64 = 100 * 1024;

/// Longest line kept by streaming readers; the rest of the line is skipped.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Append one line to `buf`, keeping at most `max_bytes` of it.
///
/// The remainder of an over-long line is consumed and dropped, and a cut
/// never splits a UTF-8 character. The newline is kept when the line had
/// one. Returns the bytes consumed from the reader, 0 at end of file.
pub(crate) fn read_line_capped<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> io::Result<usize> {
    let start = buf.len();
    let mut consumed = 0;
    let mut kept = 0;
    let mut cut = false;
    let mut ended = false;
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        let (len, newline) = match available.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (available.len(), false),
        };
        let take = len.min(max_bytes - kept);
        buf.extend_from_slice(&available[..take]);
        kept += take;
        cut |= take < len;
        reader.consume(len);
        consumed += len;
        if newline {
            ended = true;
            break;
        }
    }

    if cut {
        if let Err(e) = std::str::from_utf8(&buf[start..])
            && e.error_len().is_none()
        {
            buf.truncate(start + e.valid_up_to());
        }
        if ended {
            buf.push(b'\n');
        }
    }
    Ok(consumed)
}

/// Byte size and line count of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSize {
    pub bytes: u64,
    pub lines: u64,
    pub size_class: SizeClass,
}

/// Head + tail view of a file with a machine-readable truncation notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedRead {
    pub head: String,
    pub tail: String,
    /// Empty when nothing was omitted.
    pub notice: String,
    pub truncated: bool,
    pub original_bytes: u64,
    pub shown_bytes: u64,
    pub omitted_bytes: u64,
}

/// When and how much of a workspace file to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationPolicy {
    #[serde(default = "default_threshold")]
    pub threshold_bytes: u64,
    #[serde(default = "default_head")]
    pub head_bytes: u64,
    #[serde(default = "default_tail")]
    pub tail_bytes: u64,
}

fn default_threshold() -> u64 {
    WORKSPACE_TRUNCATE_THRESHOLD
}

fn default_head() -> u64 {
    50 * 1024
}

fn default_tail() -> u64 {
    20 * 1024
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            threshold_bytes: default_threshold(),
            head_bytes: default_head(),
            tail_bytes: default_tail(),
        }
    }
}

fn open(path: &Path) -> LogResult<File> {
    File::open(path).map_err(|e| LogError::from_io(path, e))
}

fn file_len(path: &Path) -> LogResult<u64> {
    let meta = std::fs::metadata(path).map_err(|e| LogError::from_io(path, e))?;
    if !meta.is_file() {
        return Err(LogError::NotFound(path.display().to_string()));
    }
    Ok(meta.len())
}

/// Byte size and line count, streamed without loading the file.
///
/// A trailing line without a terminator counts as a line.
pub fn size(path: &Path) -> LogResult<LogSize> {
    let bytes = file_len(path)?;
    let mut reader = BufReader::new(open(path)?);
    let mut lines = 0u64;
    let mut last = None;
    loop {
        let buf = reader.fill_buf().map_err(|e| LogError::from_io(path, e))?;
        if buf.is_empty() {
            break;
        }
        lines += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        last = buf.last().copied();
        let n = buf.len();
        reader.consume(n);
    }
    if matches!(last, Some(b) if b != b'\n') {
        lines += 1;
    }
    Ok(LogSize {
        bytes,
        lines,
        size_class: SizeClass::from_bytes(bytes),
    })
}

/// Read a log, refusing `large` files unless `max_lines` is supplied.
///
/// Without a cap the content is byte-identical to the file. With a cap at
/// most `max_lines` lines are returned (terminators kept), each cut to
/// [`MAX_LINE_BYTES`], and the rest of the file is never read.
pub fn read_full(path: &Path, max_lines: Option<usize>) -> LogResult<String> {
    let bytes = file_len(path)?;
    let Some(limit) = max_lines else {
        let class = SizeClass::from_bytes(bytes);
        if class == SizeClass::Large {
            return Err(LogError::TooLarge {
                path: path.display().to_string(),
                size_bytes: bytes,
            });
        }
        if class == SizeClass::Medium {
            tracing::debug!(path = %path.display(), bytes, "reading medium-sized log in full");
        }
        let raw = std::fs::read(path).map_err(|e| LogError::from_io(path, e))?;
        return decode(path, raw);
    };

    let mut reader = BufReader::new(open(path)?);
    let mut raw = Vec::new();
    for _ in 0..limit {
        let n = read_line_capped(&mut reader, &mut raw, MAX_LINE_BYTES)
            .map_err(|e| LogError::from_io(path, e))?;
        if n == 0 {
            break;
        }
    }
    decode(path, raw)
}

fn decode(path: &Path, raw: Vec<u8>) -> LogResult<String> {
    String::from_utf8(raw).map_err(|e| LogError::Decode {
        path: path.display().to_string(),
        message: e.utf8_error().to_string(),
    })
}

/// First `head_bytes` and last `tail_bytes` of a file plus a notice.
///
/// Byte cuts may split a multi-byte character; the cut edges are decoded
/// lossily. If head + tail already covers the file it is returned whole.
pub fn read_bounded(path: &Path, head_bytes: u64, tail_bytes: u64) -> LogResult<BoundedRead> {
    let original = file_len(path)?;
    if head_bytes.saturating_add(tail_bytes) >= original {
        return read_whole(path, original);
    }

    let mut file = open(path)?;
    let mut head = Vec::with_capacity(head_bytes as usize);
    (&mut file)
        .take(head_bytes)
        .read_to_end(&mut head)
        .map_err(|e| LogError::from_io(path, e))?;

    let mut tail = Vec::with_capacity(tail_bytes as usize);
    if tail_bytes > 0 {
        file.seek(SeekFrom::Start(original - tail_bytes))
            .map_err(|e| LogError::from_io(path, e))?;
        file.take(tail_bytes)
            .read_to_end(&mut tail)
            .map_err(|e| LogError::from_io(path, e))?;
    }

    let shown = (head.len() + tail.len()) as u64;
    let omitted = original - shown;
    Ok(BoundedRead {
        head: String::from_utf8_lossy(&head).into_owned(),
        tail: String::from_utf8_lossy(&tail).into_owned(),
        notice: truncation_notice(original, head.len() as u64, tail.len() as u64),
        truncated: true,
        original_bytes: original,
        shown_bytes: shown,
        omitted_bytes: omitted,
    })
}

/// Read a general workspace file, truncating only above the policy threshold.
pub fn read_workspace_file(path: &Path, policy: &TruncationPolicy) -> LogResult<BoundedRead> {
    let original = file_len(path)?;
    if original <= policy.threshold_bytes {
        return read_whole(path, original);
    }
    tracing::debug!(
        path = %path.display(),
        bytes = original,
        threshold = policy.threshold_bytes,
        "truncating workspace file"
    );
    read_bounded(path, policy.head_bytes, policy.tail_bytes)
}

fn read_whole(path: &Path, original: u64) -> LogResult<BoundedRead> {
    let raw = std::fs::read(path).map_err(|e| LogError::from_io(path, e))?;
    Ok(BoundedRead {
        head: String::from_utf8_lossy(&raw).into_owned(),
        tail: String::new(),
        notice: String::new(),
        truncated: false,
        original_bytes: original,
        shown_bytes: original,
        omitted_bytes: 0,
    })
}

/// Notice text for a truncated read. Field order and wording are stable.
pub fn truncation_notice(original: u64, head: u64, tail: u64) -> String {
    let shown = head + tail;
    format!(
        "[TRUNCATED] original size: {original} bytes; shown: {shown} bytes \
         (first {head} + last {tail}); omitted: {} bytes",
        original.saturating_sub(shown)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    fn lines(count: usize, width: usize) -> String {
        let mut s = String::new();
        for i in 0..count {
            let body = format!("line {i} ");
            s.push_str(&body);
            s.push_str(&"x".repeat(width.saturating_sub(body.len())));
            s.push('\n');
        }
        s
    }

    #[test]
    fn size_counts_lines_and_bytes() {
        let f = file_with(b"a\nb\nc");
        let sz = size(f.path()).unwrap();
        assert_eq!(sz.bytes, 5);
        assert_eq!(sz.lines, 3);
        assert_eq!(sz.size_class, SizeClass::Small);

        let f = file_with(b"a\nb\n");
        assert_eq!(size(f.path()).unwrap().lines, 2);

        let f = file_with(b"");
        assert_eq!(size(f.path()).unwrap().lines, 0);
    }

    #[test]
    fn size_missing_file() {
        let err = size(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, LogError::NotFound(_)));
    }

    #[test]
    fn small_read_is_byte_identical() {
        let content = "first\r\nsecond\n\tthird ✖ unicode\nno newline at end";
        let f = file_with(content.as_bytes());
        assert_eq!(read_full(f.path(), None).unwrap(), content);
    }

    #[test]
    fn medium_read_allowed_without_limit() {
        let content = lines(1500, 100); // ~150 KB
        let f = file_with(content.as_bytes());
        assert_eq!(size(f.path()).unwrap().size_class, SizeClass::Medium);
        assert_eq!(read_full(f.path(), None).unwrap().len(), content.len());
    }

    #[test]
    fn large_read_without_limit_is_refused() {
        let content = lines(2100, 100); // ~210 KB
        let f = file_with(content.as_bytes());
        for _ in 0..2 {
            let err = read_full(f.path(), None).unwrap_err();
            assert!(err.is_too_large());
        }
    }

    #[test]
    fn large_read_with_limit_returns_capped_lines() {
        let content = lines(2100, 100);
        let f = file_with(content.as_bytes());
        let out = read_full(f.path(), Some(10)).unwrap();
        assert_eq!(out.lines().count(), 10);
        assert!(out.starts_with("line 0 "));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn limit_larger_than_file() {
        let f = file_with(b"one\ntwo");
        assert_eq!(read_full(f.path(), Some(100)).unwrap(), "one\ntwo");
        assert_eq!(read_full(f.path(), Some(0)).unwrap(), "");
    }

    #[test]
    fn line_cap_bounds_log_without_newlines() {
        let f = file_with(&vec![b'x'; 5 * 1024 * 1024]);
        let out = read_full(f.path(), Some(1)).unwrap();
        assert_eq!(out.len(), MAX_LINE_BYTES);
    }

    #[test]
    fn over_long_line_cut_on_char_boundary() {
        let content = format!("x{}\nnext\n", "é".repeat(40_000));
        let f = file_with(content.as_bytes());
        let out = read_full(f.path(), Some(2)).unwrap();
        let (first, rest) = out.split_once('\n').unwrap();
        assert_eq!(first.len(), MAX_LINE_BYTES - 1);
        assert_eq!(rest, "next\n");
    }

    #[test]
    fn capped_line_reader_skips_rest_of_line() {
        let mut reader = std::io::Cursor::new(b"abcdef\nxy".to_vec());
        let mut buf = Vec::new();
        assert_eq!(read_line_capped(&mut reader, &mut buf, 3).unwrap(), 7);
        assert_eq!(buf, b"abc\n");
        buf.clear();
        assert_eq!(read_line_capped(&mut reader, &mut buf, 3).unwrap(), 2);
        assert_eq!(buf, b"xy");
        buf.clear();
        assert_eq!(read_line_capped(&mut reader, &mut buf, 3).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        let f = file_with(&[b'o', b'k', b'\n', 0xff, 0xfe]);
        let err = read_full(f.path(), None).unwrap_err();
        assert!(matches!(err, LogError::Decode { .. }));
    }

    #[test]
    fn bounded_read_reports_truncation() {
        let content: String = (0..1000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let f = file_with(content.as_bytes());
        let r = read_bounded(f.path(), 100, 50).unwrap();
        assert!(r.truncated);
        assert_eq!(r.head, &content[..100]);
        assert_eq!(r.tail, &content[950..]);
        assert_eq!(r.original_bytes, 1000);
        assert_eq!(r.shown_bytes, 150);
        assert_eq!(r.omitted_bytes, 850);
        assert!(r.notice.contains("original size: 1000 bytes"));
        assert!(r.notice.contains("shown: 150 bytes"));
        assert!(r.notice.contains("omitted: 850 bytes"));
    }

    #[test]
    fn bounded_read_covering_file_is_whole() {
        let f = file_with(b"short file");
        let r = read_bounded(f.path(), 8, 8).unwrap();
        assert!(!r.truncated);
        assert_eq!(r.head, "short file");
        assert!(r.tail.is_empty());
        assert!(r.notice.is_empty());
    }

    #[test]
    fn workspace_file_under_threshold_is_whole() {
        let content = "y".repeat(90 * 1024);
        let f = file_with(content.as_bytes());
        let r = read_workspace_file(f.path(), &TruncationPolicy::default()).unwrap();
        assert!(!r.truncated);
        assert_eq!(r.head.len(), content.len());
    }

    #[test]
    fn workspace_file_over_threshold_is_truncated() {
        let content = "z".repeat(150 * 1024);
        let f = file_with(content.as_bytes());
        let policy = TruncationPolicy::default();
        let r = read_workspace_file(f.path(), &policy).unwrap();
        assert!(r.truncated);
        assert_eq!(r.head.len() as u64, policy.head_bytes);
        assert_eq!(r.tail.len() as u64, policy.tail_bytes);
        assert_eq!(r.omitted_bytes, 150 * 1024 - policy.head_bytes - policy.tail_bytes);
    }
}
