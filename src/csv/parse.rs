//! CSV format parsing implementation.
//!
//! This module handles the low-level parsing of delimited publication lists.

use crate::InputFormat;
use crate::csv::config::CsvConfig;
use crate::csv::structure::{RawRecord, record_span};
use crate::error::{ParseError, ValueError};
use csv::ReaderBuilder;

/// Parse the content of a delimited publication list, returning structured rows.
pub(crate) fn csv_parse<S: AsRef<str>>(
    csv_text: S,
    config: &CsvConfig,
) -> Result<Vec<RawRecord>, ParseError> {
    let text = csv_text.as_ref();

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    // Validate configuration
    config.validate().map_err(|msg| {
        ParseError::without_position(
            InputFormat::Csv,
            ValueError::Syntax(format!("Invalid CSV configuration: {}", msg)),
        )
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_header)
        .quote(config.quote)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .flexible(config.flexible)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = if config.has_header {
        reader
            .headers()
            .map_err(|e| {
                ParseError::without_position(
                    InputFormat::Csv,
                    ValueError::Syntax(format!("Header parsing error: {}", e)),
                )
            })?
            .iter()
            .map(String::from)
            .collect()
    } else {
        // Use column numbers as headers if no headers present
        let first_record = reader.headers().map_err(|e| {
            ParseError::without_position(
                InputFormat::Csv,
                ValueError::Syntax(format!("Failed to read first record: {}", e)),
            )
        })?;
        (0..first_record.len())
            .map(|i| format!("Column{}", i + 1))
            .collect()
    };

    if headers.is_empty() {
        return Err(ParseError::without_position(
            InputFormat::Csv,
            ValueError::Syntax("No headers found in CSV".to_string()),
        ));
    }

    let mut rows = Vec::new();
    let mut line_number = if config.has_header { 2 } else { 1 }; // Start counting from data lines

    for result in reader.records() {
        let record = result.map_err(|e| {
            // Extract position information from csv::Error if available
            if let Some(position) = e.position() {
                ParseError::at_line(
                    position.line() as usize,
                    InputFormat::Csv,
                    ValueError::Syntax(format!("CSV parsing error: {}", e)),
                )
            } else {
                ParseError::at_line(
                    line_number,
                    InputFormat::Csv,
                    ValueError::Syntax(format!("CSV parsing error: {}", e)),
                )
            }
        })?;

        if record.is_empty() {
            line_number += 1;
            continue;
        }

        let byte_offset = record.position().map(|p| p.byte() as usize).unwrap_or(0);

        let row = RawRecord::from_record(&headers, &record, config, line_number, byte_offset)?;

        if row.has_content() {
            rows.push(row);
        } else if !config.flexible {
            return Err(ParseError::at_line(
                line_number,
                InputFormat::Csv,
                ValueError::EmptyRecord,
            )
            .with_span(record_span(&record, byte_offset)));
        }

        line_number += 1;
    }

    Ok(rows)
}

/// Detect CSV delimiter by analyzing the content.
pub(crate) fn detect_csv_delimiter(content: &str) -> u8 {
    let delimiters = [b',', b';', b'\t', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(5).collect();

    if sample_lines.is_empty() {
        return b','; // Default to comma
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delimiter in &delimiters {
        let mut score = 0;
        let mut consistent = true;
        let mut expected_fields = None;

        for line in &sample_lines {
            let field_count = line.split(delimiter as char).count();

            if let Some(expected) = expected_fields {
                if field_count != expected {
                    consistent = false;
                    break;
                }
            } else {
                expected_fields = Some(field_count);
            }

            score += field_count;
        }

        if consistent && score > best_score {
            best_score = score;
            best_delimiter = delimiter;
        }
    }

    best_delimiter
}

/// Detect if CSV has headers by analyzing the first few lines.
pub(crate) fn detect_csv_headers(content: &str, delimiter: u8) -> bool {
    let lines: Vec<&str> = content.lines().take(3).collect();

    if lines.len() < 2 {
        return true; // Assume headers if we can't analyze
    }

    let first_line_fields: Vec<&str> = lines[0].split(delimiter as char).collect();
    let second_line_fields: Vec<&str> = lines[1].split(delimiter as char).collect();

    // Check if first line contains typical header patterns
    for field in &first_line_fields {
        let field_lower = field.to_lowercase();
        if field_lower.contains("title")
            || field_lower.contains("author")
            || field_lower.contains("year")
            || field_lower.contains("journal")
            || field_lower.contains("publication")
            || field_lower.contains("volume")
            || field_lower.contains("page")
        {
            return true;
        }
    }

    // Improved heuristic: Check if first line looks more like headers than data
    // Headers typically contain more text and fewer pure numbers
    let first_line_text_ratio = first_line_fields
        .iter()
        .filter(|f| !f.trim().is_empty())
        .filter(|f| f.parse::<f64>().is_err() && f.len() > 3)
        .count() as f64
        / first_line_fields.len().max(1) as f64;

    let second_line_numeric_ratio = second_line_fields
        .iter()
        .filter(|f| !f.trim().is_empty())
        .filter(|f| f.parse::<f64>().is_ok() || f.len() <= 3)
        .count() as f64
        / second_line_fields.len().max(1) as f64;

    // If first line has more text-like fields and second line has more data-like fields,
    // likely has headers
    first_line_text_ratio > 0.5 && second_line_numeric_ratio > 0.3
}
