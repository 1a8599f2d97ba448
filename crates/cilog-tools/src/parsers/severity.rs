//! Per-tool severity rules, kept in one table keyed by tool name.

use cilog_protocol::Severity;

/// How a tool's raw signal (rule, code, or level) maps to a severity.
#[derive(Debug, Clone, Copy)]
pub enum SeverityRule {
    /// Every finding from the tool has this severity.
    Fixed(Severity),
    /// Critical if the signal contains any keyword (case-insensitive), else warning.
    KeywordCritical(&'static [&'static str]),
    /// Critical if the signal starts with any prefix, else warning.
    PrefixCritical(&'static [&'static str]),
    /// Exact level lookup, with a fallback for anything else.
    Levels {
        levels: &'static [(&'static str, Severity)],
        otherwise: Severity,
    },
}

impl SeverityRule {
    pub fn apply(&self, signal: &str) -> Severity {
        match *self {
            Self::Fixed(sev) => sev,
            Self::KeywordCritical(keywords) => {
                let lower = signal.to_lowercase();
                if keywords.iter().any(|k| lower.contains(k)) {
                    Severity::Critical
                } else {
                    Severity::Warning
                }
            }
            Self::PrefixCritical(prefixes) => {
                if prefixes.iter().any(|p| signal.starts_with(p)) {
                    Severity::Critical
                } else {
                    Severity::Warning
                }
            }
            Self::Levels { levels, otherwise } => levels
                .iter()
                .find(|(level, _)| *level == signal)
                .map(|(_, sev)| *sev)
                .unwrap_or(otherwise),
        }
    }
}

static RULES: &[(&str, SeverityRule)] = &[
    ("sqlfluff", SeverityRule::Fixed(Severity::Warning)),
    (
        "stylelint",
        SeverityRule::KeywordCritical(&["invalid", "error", "fail"]),
    ),
    ("markdownlint", SeverityRule::Fixed(Severity::Info)),
    ("commitlint", SeverityRule::Fixed(Severity::Warning)),
    ("prettier", SeverityRule::Fixed(Severity::Info)),
    ("black", SeverityRule::Fixed(Severity::Info)),
    ("isort", SeverityRule::Fixed(Severity::Warning)),
    ("ruff", SeverityRule::PrefixCritical(&["E", "F"])),
    (
        "eslint",
        SeverityRule::Levels {
            levels: &[("error", Severity::Critical)],
            otherwise: Severity::Warning,
        },
    ),
    (
        "mypy",
        SeverityRule::Levels {
            levels: &[
                ("error", Severity::Critical),
                ("warning", Severity::Warning),
                ("note", Severity::Info),
            ],
            otherwise: Severity::Warning,
        },
    ),
    ("pytest", SeverityRule::Fixed(Severity::Critical)),
    ("build", SeverityRule::Fixed(Severity::Critical)),
];

pub fn rule_for(tool: &str) -> Option<SeverityRule> {
    RULES
        .iter()
        .find(|(name, _)| *name == tool)
        .map(|(_, rule)| *rule)
}

/// Severity for a finding from `tool` given its raw signal.
///
/// Unknown tools are reported as warnings.
pub fn classify(tool: &str, signal: &str) -> Severity {
    match rule_for(tool) {
        Some(rule) => rule.apply(signal),
        None => {
            tracing::debug!(tool, "no severity rule registered, defaulting to warning");
            Severity::Warning
        }
    }
}
