//! Rendering configuration loaded from a JSON settings file.
//!
//! The key layout is compatible with the original `config.json` consumed by
//! earlier versions of this tool: `target_author` plus the
//! `document_settings`, `paragraph_formats`, and `text_styles` sections.
//! Every field carries a default, so a partial settings file (or none at
//! all) is valid; malformed JSON is fatal at load time.
//!
//! # Example
//!
//! ```
//! use publist::settings::Settings;
//!
//! let settings = Settings::from_json(r#"{
//!     "target_author": "Smith, J.",
//!     "text_styles": { "year_bold": false }
//! }"#).unwrap();
//!
//! assert_eq!(settings.target_author, "Smith, J.");
//! assert!(!settings.styles.year_bold);
//! assert!(settings.styles.journal_italic);
//! ```

use crate::author::InitialsRule;
use crate::error::{ParseError, PublistError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Paragraph alignment choices supported by the output document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Complete rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The author string to highlight, in rendered form (`"Last, I."`).
    /// Empty means no highlighting.
    pub target_author: String,
    /// How initials are derived from given names.  See [`InitialsRule`].
    pub initials_rule: InitialsRule,
    #[serde(rename = "document_settings")]
    pub document: DocumentSettings,
    #[serde(rename = "paragraph_formats")]
    pub paragraph: ParagraphFormat,
    #[serde(rename = "text_styles")]
    pub styles: TextStyles,
}

/// Document-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub default_font_name: String,
    pub default_font_size_pt: f32,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            default_font_name: "Times New Roman".to_string(),
            default_font_size_pt: 12.0,
        }
    }
}

/// Per-paragraph layout applied to every bibliography entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphFormat {
    pub alignment: Alignment,
    /// Line spacing as a multiple of single spacing (1.0 = single).
    #[serde(rename = "line_spacing_pt")]
    pub line_spacing: f32,
    pub space_after_pt: f32,
    pub left_indent_inches: f32,
    /// Negative values produce a hanging indent.
    pub first_line_indent_inches: f32,
}

impl Default for ParagraphFormat {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            line_spacing: 1.0,
            space_after_pt: 6.0,
            left_indent_inches: 0.0,
            first_line_indent_inches: -0.3,
        }
    }
}

/// Which fields receive bold/italic/underline styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyles {
    pub target_author_bold: bool,
    pub target_author_underline: bool,
    pub journal_italic: bool,
    pub year_bold: bool,
    pub volume_italic: bool,
}

impl Default for TextStyles {
    fn default() -> Self {
        Self {
            target_author_bold: true,
            target_author_underline: true,
            journal_italic: true,
            year_bold: true,
            volume_italic: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        serde_json::from_str(text).map_err(Into::into)
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file or malformed JSON is a fatal load-time error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PublistError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PublistError::Input {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_json(&text)?)
    }

    /// Whether a target author is configured for highlighting.
    pub fn has_target_author(&self) -> bool {
        !self.target_author.is_empty()
    }
}
