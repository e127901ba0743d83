//! Delimited publication-list reader.
//!
//! This module provides functionality to read publication lists from CSV (or
//! other delimited) files with configurable headers and enhanced error
//! handling.
//!
//! # Example
//!
//! ```
//! use publist::csv::CsvParser;
//!
//! let input = "Authors,Title,Year\n\"Smith, John\",Example Paper,2023";
//!
//! let parser = CsvParser::new();
//! let publications = parser.parse(input).unwrap();
//! assert_eq!(publications[0].title, "Example Paper");
//! assert_eq!(publications[0].year, 2023);
//! ```

mod config;
mod parse;
mod structure;

use crate::Publication;
use crate::error::ParseError;
pub use config::CsvConfig;
use parse::csv_parse;

/// Parser for delimited publication-list data with configurable mappings.
///
/// Provides flexible parsing of CSV files containing publication rows, with
/// support for custom column mappings and different CSV dialects.
///
/// # Features
///
/// - Custom header mappings with O(1) lookup performance
/// - Configurable delimiters, quotes, and trimming
/// - Automatic delimiter detection
/// - Enhanced error reporting with line numbers and source spans
///
/// # Examples
///
/// Basic usage:
/// ```
/// use publist::csv::CsvParser;
///
/// let input = "Authors,Title,Year\nSmith J,Example Paper,2023";
/// let parser = CsvParser::new();
/// let publications = parser.parse(input).unwrap();
/// ```
///
/// With custom configuration:
/// ```
/// use publist::csv::{CsvParser, CsvConfig};
///
/// let mut config = CsvConfig::new();
/// config.set_delimiter(b'\t');
///
/// let parser = CsvParser::with_config(config);
/// ```
///
/// Auto-detection of format:
/// ```
/// use publist::csv::CsvParser;
///
/// let parser = CsvParser::with_auto_detection();
/// // Will automatically detect delimiter and header presence
/// ```
#[derive(Debug, Clone)]
pub struct CsvParser {
    config: CsvConfig,
    auto_detect: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParser {
    /// Creates a new CSV parser with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CsvConfig::new(),
            auto_detect: false,
        }
    }

    /// Creates a new CSV parser with custom configuration
    #[must_use]
    pub fn with_config(config: CsvConfig) -> Self {
        Self {
            config,
            auto_detect: false,
        }
    }

    /// Creates a new CSV parser with automatic format detection
    #[must_use]
    pub fn with_auto_detection() -> Self {
        Self {
            config: CsvConfig::new(),
            auto_detect: true,
        }
    }

    /// Sets the configuration for this parser
    pub fn set_config(&mut self, config: CsvConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Gets a reference to the current configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Gets a mutable reference to the current configuration
    pub fn config_mut(&mut self) -> &mut CsvConfig {
        &mut self.config
    }

    /// Enables or disables automatic format detection
    pub fn set_auto_detection(&mut self, enabled: bool) -> &mut Self {
        self.auto_detect = enabled;
        self
    }

    /// Auto-detects CSV format parameters from the input
    fn auto_detect_format(&self, input: &str) -> CsvConfig {
        let mut config = self.config.clone();

        if self.auto_detect {
            let delimiter = parse::detect_csv_delimiter(input);
            let has_headers = parse::detect_csv_headers(input, delimiter);

            config.set_delimiter(delimiter);
            config.set_has_header(has_headers);
        }

        config
    }

    /// Parses a string containing delimited publication data.
    ///
    /// # Arguments
    ///
    /// * `input` - The delimited text to parse
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with detailed context including line numbers for
    /// malformed records and configuration validation errors.  Value-level
    /// problems within a row (missing fields, non-numeric years) do not
    /// error: they degrade to field defaults.
    pub fn parse(&self, input: &str) -> Result<Vec<Publication>, ParseError> {
        let config = self.auto_detect_format(input);
        let rows = csv_parse(input, &config)?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_publication())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_csv() {
        let input = "\
Authors,Title,Publication,Year,Volume,Pages
Smith J,Test Paper,Test Journal,2023,5,10-20
\"Doe, Jane\",Another Paper,Another Journal,2022,3,33-41";

        let parser = CsvParser::new();
        let publications = parser.parse(input).unwrap();
        assert_eq!(publications.len(), 2);
        assert_eq!(publications[0].title, "Test Paper");
        assert_eq!(publications[0].authors, "Smith J");
        assert_eq!(publications[0].journal, "Test Journal");
        assert_eq!(publications[0].year, 2023);
        assert_eq!(publications[0].volume, 5);
        assert_eq!(publications[1].pages, "33-41");
    }

    #[test]
    fn test_custom_headers() {
        let input = "\
Paper Name,Writers,Published,Source
Test Paper,Smith J,2023,Test Journal";

        let mut config = CsvConfig::new();
        config
            .set_header_mapping("title", vec!["Paper Name".to_string()])
            .set_header_mapping("authors", vec!["Writers".to_string()])
            .set_header_mapping("year", vec!["Published".to_string()])
            .set_header_mapping("journal", vec!["Source".to_string()]);

        let parser = CsvParser::with_config(config);
        let publications = parser.parse(input).unwrap();
        assert_eq!(publications[0].title, "Test Paper");
        assert_eq!(publications[0].authors, "Smith J");
        assert_eq!(publications[0].year, 2023);
        assert_eq!(publications[0].journal, "Test Journal");
    }

    #[test]
    fn test_author_list_preserved_verbatim() {
        let input = "\
Title,Authors,Year
Test Paper,\"Smith, John; Doe, Jane\",2023";

        let parser = CsvParser::new();
        let publications = parser.parse(input).unwrap();

        // Normalization happens at render time, not read time.
        assert_eq!(publications[0].authors, "Smith, John; Doe, Jane");
    }

    #[test]
    fn test_custom_delimiter() {
        let input = "Title;Authors;Year\nTest Paper;Smith J;2023";

        let mut config = CsvConfig::new();
        config.set_delimiter(b';');

        let parser = CsvParser::with_config(config);
        let publications = parser.parse(input).unwrap();
        assert_eq!(publications[0].title, "Test Paper");
        assert_eq!(publications[0].year, 2023);
    }

    #[test]
    fn test_auto_detection() {
        let input = "\
title;authors;year
Test Paper;Smith J;2023
Another Paper;Doe J;2024";

        let parser = CsvParser::with_auto_detection();
        let publications = parser.parse(input).unwrap();

        assert_eq!(publications.len(), 2);
        assert_eq!(publications[0].title, "Test Paper");
        assert_eq!(publications[1].year, 2024);
    }

    #[test]
    fn test_missing_year_defaults_to_zero() {
        let input = "Title,Authors,Year\nNo Year Paper,Smith J,";

        let parser = CsvParser::new();
        let publications = parser.parse(input).unwrap();
        assert_eq!(publications[0].year, 0);
    }

    #[test]
    fn test_improved_validation_errors() {
        // Test empty field name validation
        let mut config = CsvConfig::new();
        config.set_header_mapping("", vec!["test".to_string()]);

        let parser = CsvParser::with_config(config);
        let result = parser.parse("test\nvalue");
        assert!(result.is_err());

        // Test invalid delimiter validation
        let mut config2 = CsvConfig::new();
        config2.set_delimiter(b'\n');

        let parser2 = CsvParser::with_config(config2);
        let result2 = parser2.parse("test,value\ntest2,value2");
        assert!(result2.is_err());
    }

    #[test]
    fn test_empty_input() {
        let parser = CsvParser::new();
        let result = parser.parse("");
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_blank_rows_error_in_strict_mode() {
        let input = "Title,Authors\n,\n  ,  ";

        let parser = CsvParser::new();
        let result = parser.parse(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_parser_configuration_methods() {
        let mut parser = CsvParser::new();

        // Test configuration access
        assert_eq!(parser.config().delimiter, b',');

        // Test mutable configuration
        parser.config_mut().set_delimiter(b';');
        assert_eq!(parser.config().delimiter, b';');

        // Test setting new config
        let new_config = CsvConfig::new();
        parser.set_config(new_config);
        assert_eq!(parser.config().delimiter, b','); // Back to default

        // Test auto-detection toggle
        parser.set_auto_detection(true);
        assert!(parser.auto_detect);
    }

    /// A structural CSV error on the second data row (line 3) must produce
    /// an error whose `line` field equals 3.
    #[test]
    fn test_structural_error_reports_line() {
        // header = line 1, first data row = line 2, second data row = line 3
        let input = "Title,Authors\nFirst Paper,Smith J\nSecond Paper";
        let err = CsvParser::new().parse(input).unwrap_err();
        assert_eq!(err.line, Some(3));
    }
}
