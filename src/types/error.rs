//! Unified Error Type System
//!
//! Centralized error types for the whole application.
//!
//! ## Design Principles
//!
//! - Single unified error type (`SkelError`) for the entire crate
//! - Structured variants with context (path, line, column) for debugging
//! - Every failure path still produces a well-formed report: errors are
//!   rendered into the `analysis_error` field, never left as a panic

use thiserror::Error;

// =============================================================================
// Parse Failure
// =============================================================================

/// A terminal parse failure with the offending position when available.
///
/// Produced by the tree parser when the source text is not valid Python.
/// Extraction never proceeds past one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Human-readable description of the failure
    pub message: String,
    /// Path of the file that failed to parse
    pub path: String,
    /// 1-based line of the first offending node, if known
    pub line: Option<usize>,
    /// 0-based column of the first offending node, if known
    pub column: Option<usize>,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(
                f,
                "Syntax error: invalid Python syntax in '{}' near line {} column {}: {}",
                self.path, line, column, self.message
            ),
            (Some(line), None) => write!(
                f,
                "Syntax error: invalid Python syntax in '{}' near line {}: {}",
                self.path, line, self.message
            ),
            _ => write!(
                f,
                "Syntax error: invalid Python syntax in '{}': {}",
                self.path, self.message
            ),
        }
    }
}

impl std::error::Error for ParseFailure {}

impl ParseFailure {
    /// Create a parse failure with a known position.
    pub fn at(
        path: impl Into<String>,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Create a parse failure without position information.
    pub fn from_message(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
            line: None,
            column: None,
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum SkelError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("File not found at '{0}'")]
    FileNotFound(String),

    #[error("Input path '{0}' is a directory, not a file")]
    NotAFile(String),

    #[error("Input path '{0}' does not appear to be a Python file (.py extension)")]
    NotPythonSource(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Parse(ParseFailure),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl From<ParseFailure> for SkelError {
    fn from(err: ParseFailure) -> Self {
        SkelError::Parse(err)
    }
}

pub type Result<T> = std::result::Result<T, SkelError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_display_with_position() {
        let err = ParseFailure::at("bad.py", "unexpected indent", 4, 2);
        assert_eq!(
            err.to_string(),
            "Syntax error: invalid Python syntax in 'bad.py' near line 4 column 2: unexpected indent"
        );
    }

    #[test]
    fn test_parse_failure_display_without_position() {
        let err = ParseFailure::from_message("bad.py", "parser produced no tree");
        assert_eq!(
            err.to_string(),
            "Syntax error: invalid Python syntax in 'bad.py': parser produced no tree"
        );
    }

    #[test]
    fn test_file_not_found_display() {
        let err = SkelError::FileNotFound("missing.py".to_string());
        assert_eq!(err.to_string(), "File not found at 'missing.py'");
    }

    #[test]
    fn test_parse_failure_converts_to_skel_error() {
        let err: SkelError = ParseFailure::at("x.py", "bad", 1, 0).into();
        assert!(matches!(err, SkelError::Parse(_)));
    }
}
