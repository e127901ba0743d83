//! CSV header mapping definitions and configuration.
//!
//! This module defines the default header mappings and configuration
//! structures for reading publication lists.

use std::collections::HashMap;

/// Default header mappings for common CSV column names
pub(crate) const DEFAULT_HEADERS: &[(&str, &[&str])] = &[
    ("authors", &["authors", "author", "creator", "creators"]),
    ("title", &["title", "article title", "publication title"]),
    (
        "journal",
        &["publication", "journal", "journal title", "source title"],
    ),
    ("year", &["year", "publication year", "pub year"]),
    ("volume", &["volume", "vol"]),
    ("pages", &["pages", "page numbers", "page range"]),
];

/// Configuration for CSV parsing with custom header mappings.
///
/// Allows customization of how CSV columns are mapped to publication fields,
/// along with general CSV parsing options like delimiters and header presence.
///
/// # Default Mappings
///
/// The default configuration includes mappings for common column names:
/// - "authors" → ["authors", "author", "creator", "creators"]
/// - "journal" → ["publication", "journal", "journal title", "source title"]
/// - "year" → ["year", "publication year", "pub year"]
///   etc.
///
/// # Examples
///
/// ```
/// use publist::csv::CsvConfig;
///
/// let mut config = CsvConfig::new();
/// config.set_header_mapping("title", vec!["Paper Name".to_string()]);
/// config.set_delimiter(b';');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Custom header mappings for CSV columns
    pub(crate) header_map: HashMap<String, Vec<String>>,
    /// Reverse lookup map for O(1) header-to-field mapping
    pub(crate) reverse_map: HashMap<String, String>,
    /// Delimiter to use for parsing the CSV
    pub(crate) delimiter: u8,
    /// Whether the CSV has headers
    pub(crate) has_header: bool,
    /// Quote character
    pub(crate) quote: u8,
    /// Whether to trim whitespace
    pub(crate) trim: bool,
    /// Flexible parsing (ignore some errors)
    pub(crate) flexible: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvConfig {
    /// Creates a new CSV configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        let mut config = Self {
            header_map: HashMap::new(),
            reverse_map: HashMap::new(),
            delimiter: b',',
            has_header: true,
            quote: b'"',
            trim: true,
            flexible: false,
        };
        config.set_default_headers();
        config
    }

    /// Sets the default header mappings
    fn set_default_headers(&mut self) {
        for (field, aliases) in DEFAULT_HEADERS {
            self.header_map.insert(
                field.to_string(),
                aliases.iter().map(|s| s.to_string()).collect(),
            );
        }
        self.rebuild_reverse_map();
    }

    /// Rebuild the reverse lookup map after header mappings change
    fn rebuild_reverse_map(&mut self) {
        self.reverse_map.clear();
        for (field, aliases) in &self.header_map {
            for alias in aliases {
                self.reverse_map.insert(alias.to_lowercase(), field.clone());
            }
        }
    }

    /// Sets a custom header mapping
    pub fn set_header_mapping(&mut self, field: &str, aliases: Vec<String>) -> &mut Self {
        self.header_map.insert(field.to_string(), aliases);
        self.rebuild_reverse_map();
        self
    }

    /// Adds additional aliases to an existing field mapping
    pub fn add_header_aliases(&mut self, field: &str, aliases: Vec<String>) -> &mut Self {
        self.header_map
            .entry(field.to_string())
            .or_default()
            .extend(aliases);
        self.rebuild_reverse_map();
        self
    }

    /// Sets the delimiter character
    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the CSV has headers
    pub fn set_has_header(&mut self, has_header: bool) -> &mut Self {
        self.has_header = has_header;
        self
    }

    /// Sets the quote character
    pub fn set_quote(&mut self, quote: u8) -> &mut Self {
        self.quote = quote;
        self
    }

    /// Sets whether to trim whitespace from fields
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    /// Sets whether to use flexible parsing (ignore some errors)
    pub fn set_flexible(&mut self, flexible: bool) -> &mut Self {
        self.flexible = flexible;
        self
    }

    /// Finds the field name for a given header using O(1) lookup
    pub(crate) fn get_field_for_header(&self, header: &str) -> Option<&str> {
        let header_lower = header.to_lowercase();
        self.reverse_map.get(&header_lower).map(|s| s.as_str())
    }

    /// Gets all available field mappings
    pub fn get_field_mappings(&self) -> &HashMap<String, Vec<String>> {
        &self.header_map
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.header_map.is_empty() {
            return Err("No header mappings defined".to_string());
        }

        // Check for empty field names
        for (field, aliases) in &self.header_map {
            if field.is_empty() {
                return Err("Empty field name found in mappings".to_string());
            }
            if aliases.is_empty() {
                return Err(format!("Field '{}' has no aliases defined", field));
            }
            for alias in aliases {
                if alias.is_empty() {
                    return Err(format!("Empty alias found for field '{}'", field));
                }
            }
        }

        // Check for invalid delimiter characters
        if self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err("Delimiter cannot be a newline character".to_string());
        }

        // Check for duplicate aliases across different fields
        let mut all_aliases = HashMap::new();
        for (field, aliases) in &self.header_map {
            for alias in aliases {
                let alias_lower = alias.to_lowercase();
                if let Some(existing_field) = all_aliases.get(&alias_lower)
                    && existing_field != field
                {
                    return Err(format!(
                        "Alias '{}' is mapped to both '{}' and '{}'",
                        alias, existing_field, field
                    ));
                }
                all_aliases.insert(alias_lower, field.clone());
            }
        }

        Ok(())
    }
}
