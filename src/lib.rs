//! A library for formatting publication lists into Word bibliographies.
//!
//! `publist` reads a delimited table of publications, normalizes author-name
//! formatting, and renders a numbered bibliography into a `.docx` document,
//! optionally highlighting one designated author's name in bold/underline.
//!
//! The pipeline is linear: load → transform → render → save.
//!
//! # Features
//!
//! - `diagnostics` - Pretty error reports with source context (via `ariadne`)
//!
//! # Key Characteristics
//!
//! - **Author-name normalization**: every author entry, whether written as
//!   `"Last, First Middle"`, `"First Middle Last"`, or a bare surname, is
//!   reduced to the uniform `"Last, I. M."` rendering.  Normalization is
//!   pure and total: malformed entries degrade to a best-effort rendering
//!   instead of failing.
//! - **Target-author highlighting**: occurrences of a configured author
//!   string are located inside the formatted author list and rendered as
//!   emphasized runs.
//! - **Flexible input**: configurable column mappings, delimiter and header
//!   auto-detection, detailed line/column error reporting.
//! - **Single-shot output**: the Word package is assembled in memory and
//!   saved in one call; a failed write never leaves a truncated document.
//!
//! # Basic Usage
//!
//! ```rust
//! use publist::csv::CsvParser;
//! use publist::render;
//! use publist::settings::Settings;
//!
//! let input = "\
//! Authors,Title,Publication,Year,Volume,Pages
//! \"Smith, John Paul\",A Study of Things,Nature,2023,7,1-10";
//!
//! let publications = CsvParser::new().parse(input).unwrap();
//! let settings = Settings::default();
//! let entries = render::compose(publications, &settings);
//!
//! assert_eq!(
//!     entries[0].plain_text(),
//!     "1)  Smith, J. P. A Study of Things. Nature, 2023, 7, 1-10."
//! );
//! ```
//!
//! # Highlighting
//!
//! ```rust
//! use publist::author::{InitialsRule, normalize};
//! use publist::highlight;
//!
//! let formatted = normalize("Smith, John; Xxx, Xavier", InitialsRule::PerSegment);
//! let spans = highlight::locate(&formatted, "Xxx, X.");
//! assert_eq!(spans.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! The library uses [`PublistError`] for consistent error handling across
//! all operations:
//!
//! ```rust
//! use publist::csv::CsvParser;
//!
//! let result = CsvParser::new().parse("Title,Authors\nonly-one-field-too-few,x,y");
//! match result {
//!     Ok(publications) => println!("Read {} publications", publications.len()),
//!     Err(e) => eprintln!("Read error: {}", e),
//! }
//! ```
//!
//! # Thread Safety
//!
//! All stages are pure functions over owned data with no shared mutable
//! state; records could be processed in parallel, though the batch sizes
//! this tool targets never require it.

use serde::{Deserialize, Serialize};

pub mod author;
pub mod csv;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod docx;
pub mod error;
pub mod highlight;
pub mod render;
pub mod settings;

// Reexports
pub use author::InitialsRule;
pub use csv::CsvParser;
pub use docx::DocxWriter;
pub use error::{DocumentError, ParseError, PublistError, SourceSpan, ValueError};
pub use settings::Settings;

/// Input sources read by the tool.
#[derive(Debug, Clone, PartialEq)]
pub enum InputFormat {
    /// The delimited publication list.
    Csv,
    /// The JSON settings file.
    Settings,
}

impl InputFormat {
    /// Convert the format to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Csv => "CSV",
            InputFormat::Settings => "settings",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single publication row, as read from the input file.
///
/// Text fields default to the empty string when the source column is
/// missing; `year` and `volume` default to `0` when missing or non-numeric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Raw semicolon-separated author list, normalized at render time
    pub authors: String,
    /// Title of the work
    pub title: String,
    /// Journal name
    pub journal: String,
    /// Publication year
    pub year: i32,
    /// Volume number
    pub volume: i32,
    /// Page range
    pub pages: String,
}

impl Publication {
    /// Create a new empty Publication.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_defaults() {
        let publication = Publication::new();
        assert_eq!(publication.authors, "");
        assert_eq!(publication.year, 0);
        assert_eq!(publication.volume, 0);
    }

    #[test]
    fn test_input_format_display() {
        assert_eq!(format!("{}", InputFormat::Csv), "CSV");
        assert_eq!(format!("{}", InputFormat::Settings), "settings");
    }
}
