//! Result and error types for Culprit.

use std::path::Path;
use thiserror::Error;

/// Result type for Culprit operations
pub type CulpritResult<T> = Result<T, CulpritError>;

/// Errors that can occur in Culprit
///
/// Arithmetic edge cases (a formula dividing by zero) are never errors; they
/// surface as `NaN` scores.
#[derive(Debug, Error)]
pub enum CulpritError {
    /// Matrix or spectra text could not be parsed
    #[error("Malformed input{}: {message}", location(.line))]
    MalformedInput {
        /// 1-based line number in the offending input, if line-specific
        line: Option<usize>,
        /// Error message
        message: String,
    },

    /// Technique name is not one of the known techniques
    #[error("{name} is not a valid technique. Possible arguments: {}", .valid.join(", "))]
    UnsupportedTechnique {
        /// The name that was requested
        name: String,
        /// Every accepted technique name
        valid: Vec<&'static str>,
    },

    /// Output limits were combined or out of range
    #[error("Conflicting output limit: {message}")]
    ConflictingLimit {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CulpritError {
    /// Create a malformed input error for a given 1-based line
    #[must_use]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Create a malformed input error that is not tied to one line
    #[must_use]
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: None,
            message: message.into(),
        }
    }

    /// Create a conflicting limit error
    #[must_use]
    pub fn conflicting_limit(message: impl Into<String>) -> Self {
        Self::ConflictingLimit {
            message: message.into(),
        }
    }
}

/// Read a text input file.
///
/// Bytes that are not UTF-8 are a content error, reported as
/// [`CulpritError::MalformedInput`] at the line holding the first bad byte.
pub(crate) fn read_text(path: &Path) -> CulpritResult<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        CulpritError::malformed(
            line,
            format!("{} is not valid UTF-8", path.display()),
        )
    })
}

fn location(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_names_line() {
        let err = CulpritError::malformed(7, "bad marker");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("bad marker"));
    }

    #[test]
    fn test_malformed_without_line() {
        let err = CulpritError::malformed_input("3 labels for 4 elements");
        assert_eq!(
            err.to_string(),
            "Malformed input: 3 labels for 4 elements"
        );
    }

    #[test]
    fn test_unsupported_technique_lists_valid_set() {
        let err = CulpritError::UnsupportedTechnique {
            name: "barinel".to_string(),
            valid: vec!["ochiai", "tarantula"],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("barinel is not a valid technique"));
        assert!(msg.contains("ochiai, tarantula"));
    }

    #[test]
    fn test_conflicting_limit() {
        let err = CulpritError::conflicting_limit("both given");
        assert!(err.to_string().contains("Conflicting output limit"));
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8_with_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.txt");
        std::fs::write(&path, b"1 0 +\n1 0 \xff +\n").unwrap();
        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, CulpritError::MalformedInput { line: Some(2), .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_read_text_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, CulpritError::Io(_)));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CulpritError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
