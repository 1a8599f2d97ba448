//! Text normalization applied once to a log before any parser sees it.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// CSI sequences (colors, cursor moves), OSC sequences (hyperlinks, titles),
// and two-byte escapes.
static RE_ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[@-Z\\-_])").unwrap()
});

// Timestamp prefix GitHub Actions adds to every downloaded log line.
static RE_RUNNER_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z ").unwrap()
});

/// Remove ANSI escape sequences.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    RE_ANSI.replace_all(text, "")
}

/// Normalize raw log text for parsing: strip ANSI escapes, carriage
/// returns, and runner timestamp prefixes.
pub fn normalize(text: &str) -> String {
    let no_ansi = strip_ansi(text);
    let no_cr: Cow<'_, str> = if no_ansi.contains('\r') {
        Cow::Owned(no_ansi.replace('\r', ""))
    } else {
        no_ansi
    };
    RE_RUNNER_TS.replace_all(&no_cr, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_codes() {
        assert_eq!(
            strip_ansi("\x1b[31merror\x1b[0m: \x1b[1;4mbad\x1b[22m"),
            "error: bad"
        );
    }

    #[test]
    fn strips_osc_hyperlinks() {
        let linked = "\x1b]8;;file:///src/a.css\x07src/a.css\x1b]8;;\x07";
        assert_eq!(strip_ansi(linked), "src/a.css");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(strip_ansi("  3:5  ✖  msg  rule"), "  3:5  ✖  msg  rule");
    }

    #[test]
    fn normalize_removes_cr_and_timestamps() {
        let raw = "2024-01-15T12:00:01.1234567Z   1:1  error  bad  semi\r\n\
                   2024-01-15T12:00:02Z \x1b[33m[warn]\x1b[39m src/a.js\r\n";
        assert_eq!(normalize(raw), "  1:1  error  bad  semi\n[warn] src/a.js\n");
    }

    #[test]
    fn timestamp_only_stripped_at_line_start() {
        let raw = "built at 2024-01-15T12:00:01Z ok";
        assert_eq!(normalize(raw), raw);
    }
}
