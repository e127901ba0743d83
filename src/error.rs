//! Error types for publication-list processing.
//!
//! This module defines a structured error hierarchy that provides detailed
//! information about input failures, including line/column positions and
//! source-specific context.

use crate::InputFormat;
use thiserror::Error;

/// A byte-offset span into the original source text.
///
/// Both `start` and `end` are byte offsets (not character indices) from the
/// beginning of the source string.  `start` is inclusive, `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpan {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SourceSpan {
    /// Create a new `SourceSpan`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Top-level error type for publication-list operations.
#[derive(Error, Debug)]
pub enum PublistError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Failed to read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse error with detailed location and context information.
#[derive(Error, Debug)]
#[error("Error in {format} input{}: {error}",
    match (line, column) {
        (Some(l), Some(c)) => format!(" at line {} column {}", l, c),
        (Some(l), None) => format!(" at line {}", l),
        (None, Some(c)) => format!(" at column {}", c),
        (None, None) => String::new(),
    }
)]
pub struct ParseError {
    /// Line number where the error occurred (1-based, None if not available)
    pub line: Option<usize>,
    /// Column number where the error occurred (1-based, None if not available)
    pub column: Option<usize>,
    /// Byte-offset span into the source text, for rich diagnostic rendering.
    pub span: Option<SourceSpan>,
    /// The input format being parsed
    pub format: InputFormat,
    /// The specific error that occurred
    pub error: ValueError,
}

impl ParseError {
    /// Create a new ParseError.
    pub fn new(
        line: Option<usize>,
        column: Option<usize>,
        format: InputFormat,
        error: ValueError,
    ) -> Self {
        Self {
            line,
            column,
            span: None,
            format,
            error,
        }
    }

    /// Attach a byte-offset span to this error, returning `self` (builder style).
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Create a ParseError with just line information.
    pub fn at_line(line: usize, format: InputFormat, error: ValueError) -> Self {
        Self::new(Some(line), None, format, error)
    }

    /// Create a ParseError with line and column information.
    pub fn at_position(
        line: usize,
        column: usize,
        format: InputFormat,
        error: ValueError,
    ) -> Self {
        Self::new(Some(line), Some(column), format, error)
    }

    /// Create a ParseError without position information.
    pub fn without_position(format: InputFormat, error: ValueError) -> Self {
        Self::new(None, None, format, error)
    }
}

/// Specific value-level errors that can occur during parsing.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("Bad syntax: {0}")]
    Syntax(String),

    #[error("Record has more fields ({fields}) than headers ({headers})")]
    TooManyFields { fields: usize, headers: usize },

    #[error("Record contains no meaningful content")]
    EmptyRecord,
}

/// Errors produced while building or saving the output document.
///
/// The document package is assembled entirely in memory, so a `Save` failure
/// never leaves a truncated file behind.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to encode document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to write document part: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to assemble document package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to save document to {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// Conversion implementations for external error types

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        let (line, column) = if let Some(position) = err.position() {
            (
                Some(position.line() as usize),
                Some(position.byte() as usize),
            )
        } else {
            (None, None)
        };

        ParseError::new(
            line,
            column,
            InputFormat::Csv,
            ValueError::Syntax(err.to_string()),
        )
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let line = (err.line() > 0).then_some(err.line());
        let column = (err.column() > 0).then_some(err.column());
        ParseError::new(
            line,
            column,
            InputFormat::Settings,
            ValueError::Syntax(err.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::at_line(
            42,
            InputFormat::Csv,
            ValueError::Syntax("Invalid record".to_string()),
        );

        let display = format!("{}", error);
        assert!(display.contains("line 42"));
        assert!(display.contains("CSV input"));
        assert!(display.contains("Invalid record"));
    }

    #[test]
    fn test_parse_error_with_position() {
        let error = ParseError::at_position(
            10,
            25,
            InputFormat::Csv,
            ValueError::TooManyFields {
                fields: 4,
                headers: 3,
            },
        );

        let display = format!("{}", error);
        assert!(display.contains("line 10 column 25"));
        assert!(display.contains("CSV input"));
    }

    #[test]
    fn test_parse_error_without_position() {
        let error = ParseError::without_position(
            InputFormat::Settings,
            ValueError::Syntax("expected value at end of input".to_string()),
        );

        let display = format!("{}", error);
        assert!(display.contains("settings input"));
        assert!(!display.contains("line"));
        assert!(!display.contains("column"));
    }

    #[test]
    fn test_value_error_display() {
        let error = ValueError::TooManyFields {
            fields: 4,
            headers: 3,
        };
        assert_eq!(
            format!("{}", error),
            "Record has more fields (4) than headers (3)"
        );

        assert_eq!(
            format!("{}", ValueError::EmptyRecord),
            "Record contains no meaningful content"
        );
    }

    #[test]
    fn test_csv_error_conversion() {
        let csv_content = "invalid,csv\nwith,extra,field";
        let mut reader = csv::Reader::from_reader(csv_content.as_bytes());
        let result = reader.records().next();

        if let Some(Err(csv_err)) = result {
            let parse_err: ParseError = csv_err.into();
            assert_eq!(parse_err.format, InputFormat::Csv);
            assert!(matches!(parse_err.error, ValueError::Syntax(_)));
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{ bad json").unwrap_err();
        let parse_err: ParseError = err.into();
        assert_eq!(parse_err.format, InputFormat::Settings);
        assert!(parse_err.line.is_some());
    }
}
