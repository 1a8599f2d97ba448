//! Log access and analysis error types.

use thiserror::Error;

/// Errors that can occur during log access and analysis operations.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("log not found: {0}")]
    NotFound(String),

    /// A full read was refused because the file is in the `large` size class.
    #[error(
        "{path} is {size_bytes} bytes - too large to read without a limit; \
         pass max_lines or use search_log to find specific patterns"
    )]
    TooLarge { path: String, size_bytes: u64 },

    #[error("invalid regex pattern: {0}")]
    InvalidPattern(String),

    #[error("{path} is not valid UTF-8: {message}")]
    Decode { path: String, message: String },

    #[error("invalid job index: {0}")]
    Index(String),

    #[error("{0}")]
    Other(String),
}

impl LogError {
    /// Map an I/O error on `path`, keeping not-found distinct.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.display().to_string())
        } else {
            Self::Io(format!("{}: {err}", path.display()))
        }
    }

    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }
}

/// Convenience alias for log analysis results.
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn not_found_is_distinct() {
        let err = LogError::from_io(
            Path::new("/nope/log.txt"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, LogError::NotFound(ref p) if p == "/nope/log.txt"));
    }

    #[test]
    fn too_large_names_remediation() {
        let err = LogError::TooLarge {
            path: "core-ci/log.txt".into(),
            size_bytes: 300_000,
        };
        assert!(err.is_too_large());
        let msg = err.to_string();
        assert!(msg.contains("max_lines"));
        assert!(msg.contains("search_log"));
    }
}
