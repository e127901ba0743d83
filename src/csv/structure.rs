//! CSV format data structures.
//!
//! This module defines intermediate data structures used while reading a
//! publication list.

use crate::csv::config::CsvConfig;
use crate::error::{ParseError, SourceSpan, ValueError};
use crate::{InputFormat, Publication};
use csv::StringRecord;
use std::collections::HashMap;

/// The approximate byte extent of a record in the source text, for
/// diagnostic labels.  Trimming and quoting can make the on-disk record
/// wider than the field text it yields.
pub(crate) fn record_span(record: &StringRecord, byte_offset: usize) -> SourceSpan {
    let text_len: usize = record.iter().map(str::len).sum();
    let separators = record.len().saturating_sub(1);
    SourceSpan::new(byte_offset, byte_offset + text_len + separators)
}

/// Structured raw data for one row of a publication-list file.
#[derive(Debug, Clone)]
pub(crate) struct RawRecord {
    /// Raw field data from the CSV record, keyed by mapped field name
    pub(crate) fields: HashMap<String, String>,
    /// Line number for error reporting
    pub(crate) line_number: usize,
}

impl RawRecord {
    /// Create a new RawRecord from a CSV record and headers.
    pub(crate) fn from_record(
        headers: &[String],
        record: &StringRecord,
        config: &CsvConfig,
        line_number: usize,
        byte_offset: usize,
    ) -> Result<Self, ParseError> {
        let mut fields = HashMap::new();

        for (i, value) in record.iter().enumerate() {
            if i >= headers.len() {
                if !config.flexible {
                    return Err(ParseError::at_line(
                        line_number,
                        InputFormat::Csv,
                        ValueError::TooManyFields {
                            fields: record.len(),
                            headers: headers.len(),
                        },
                    )
                    .with_span(record_span(record, byte_offset)));
                }
                break;
            }

            let header = &headers[i];
            let value = if config.trim { value.trim() } else { value };

            if value.is_empty() {
                continue;
            }

            if let Some(field) = config.get_field_for_header(header) {
                fields.insert(field.to_string(), value.to_string());
            } else {
                // Store unknown fields as-is
                fields.insert(header.clone(), value.to_string());
            }
        }

        Ok(RawRecord {
            fields,
            line_number,
        })
    }

    /// Convert to a [`Publication`].
    ///
    /// Missing text fields default to the empty string; `year` and `volume`
    /// default to `0` when missing or non-numeric.  Row conversion never
    /// fails: malformed values degrade rather than halting the batch.
    pub(crate) fn into_publication(self) -> Publication {
        Publication {
            authors: self.take_field("authors"),
            title: self.get_field("title").cloned().unwrap_or_default(),
            journal: self.get_field("journal").cloned().unwrap_or_default(),
            year: self.parse_integer_field("year"),
            volume: self.parse_integer_field("volume"),
            pages: self.get_field("pages").cloned().unwrap_or_default(),
        }
    }

    /// Get a field value by name.
    pub(crate) fn get_field(&self, field: &str) -> Option<&String> {
        self.fields.get(field)
    }

    fn take_field(&self, field: &str) -> String {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    /// Parse an integer field, defaulting to 0 when missing or non-numeric.
    fn parse_integer_field(&self, field: &str) -> i32 {
        self.get_field(field)
            .and_then(|value| value.trim().parse::<i32>().ok())
            .unwrap_or(0)
    }

    /// Check if the record has any meaningful content.
    pub(crate) fn has_content(&self) -> bool {
        !self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use pretty_assertions::assert_eq;

    fn create_test_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_from_record_basic() {
        let headers = vec!["Title".to_string(), "Authors".to_string()];
        let record = create_test_record(&["Test Article", "Smith, John"]);
        let config = CsvConfig::new();

        let raw = RawRecord::from_record(&headers, &record, &config, 1, 0).unwrap();

        assert_eq!(raw.get_field("title"), Some(&"Test Article".to_string()));
        assert_eq!(raw.get_field("authors"), Some(&"Smith, John".to_string()));
        assert!(raw.has_content());
    }

    #[test]
    fn test_from_record_too_many_fields_strict() {
        let headers = vec!["Title".to_string()];
        let record = create_test_record(&["Test Article", "Extra Field"]);
        let config = CsvConfig::new(); // flexible = false by default

        let err = RawRecord::from_record(&headers, &record, &config, 1, 0).unwrap_err();
        assert!(matches!(
            err.error,
            ValueError::TooManyFields {
                fields: 2,
                headers: 1
            }
        ));
    }

    /// Structural errors carry a span anchored at the record's byte offset.
    #[test]
    fn test_too_many_fields_error_carries_span() {
        let headers = vec!["Title".to_string()];
        let record = create_test_record(&["A", "B"]);
        let config = CsvConfig::new();

        let err = RawRecord::from_record(&headers, &record, &config, 2, 14).unwrap_err();
        let span = err.span.unwrap();
        assert_eq!(span.start, 14);
        assert_eq!(span.end, 17); // "A,B"
    }

    #[test]
    fn test_record_span_extent() {
        let record = create_test_record(&["Title", "Smith J"]);
        let span = record_span(&record, 10);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 10 + "Title,Smith J".len());
    }

    #[test]
    fn test_from_record_too_many_fields_flexible() {
        let headers = vec!["Title".to_string()];
        let record = create_test_record(&["Test Article", "Extra Field"]);
        let mut config = CsvConfig::new();
        config.set_flexible(true);

        let raw = RawRecord::from_record(&headers, &record, &config, 1, 0).unwrap();
        assert_eq!(raw.get_field("title"), Some(&"Test Article".to_string()));
    }

    #[test]
    fn test_conversion_to_publication() {
        let headers = vec![
            "Authors".to_string(),
            "Title".to_string(),
            "Publication".to_string(),
            "Year".to_string(),
            "Volume".to_string(),
            "Pages".to_string(),
        ];
        let record = create_test_record(&[
            "Smith, John; Doe, Jane",
            "Test Article",
            "Nature",
            "2023",
            "12",
            "100-110",
        ]);
        let config = CsvConfig::new();

        let raw = RawRecord::from_record(&headers, &record, &config, 2, 0).unwrap();
        let publication = raw.into_publication();

        assert_eq!(publication.authors, "Smith, John; Doe, Jane");
        assert_eq!(publication.title, "Test Article");
        assert_eq!(publication.journal, "Nature");
        assert_eq!(publication.year, 2023);
        assert_eq!(publication.volume, 12);
        assert_eq!(publication.pages, "100-110");
    }

    #[test]
    fn test_missing_fields_default() {
        let headers = vec!["Title".to_string()];
        let record = create_test_record(&["Orphan Paper"]);
        let config = CsvConfig::new();

        let raw = RawRecord::from_record(&headers, &record, &config, 2, 0).unwrap();
        let publication = raw.into_publication();

        assert_eq!(publication.title, "Orphan Paper");
        assert_eq!(publication.authors, "");
        assert_eq!(publication.journal, "");
        assert_eq!(publication.year, 0);
        assert_eq!(publication.volume, 0);
        assert_eq!(publication.pages, "");
    }

    #[test]
    fn test_non_numeric_year_and_volume_default_to_zero() {
        let headers = vec![
            "Title".to_string(),
            "Year".to_string(),
            "Volume".to_string(),
        ];
        let record = create_test_record(&["Paper", "in press", "n/a"]);
        let config = CsvConfig::new();

        let raw = RawRecord::from_record(&headers, &record, &config, 2, 0).unwrap();
        let publication = raw.into_publication();

        assert_eq!(publication.year, 0);
        assert_eq!(publication.volume, 0);
    }
}
