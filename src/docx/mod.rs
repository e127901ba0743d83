//! Word document output.
//!
//! A `.docx` file is an OPC package: a zip archive of WordprocessingML XML
//! parts.  [`DocxWriter`] assembles the five parts this tool needs — content
//! types, the two relationship files, the document body, and the style
//! defaults — into an in-memory buffer, then saves it in a single filesystem
//! call.  A failed save therefore never leaves a truncated document behind.
//!
//! # Example
//!
//! ```no_run
//! use publist::docx::DocxWriter;
//! use publist::render;
//! use publist::settings::Settings;
//!
//! let settings = Settings::default();
//! let entries = render::compose(Vec::new(), &settings);
//! DocxWriter::new(&settings).save(&entries, "bibliography.docx").unwrap();
//! ```

mod xml;

use crate::error::DocumentError;
use crate::render::Entry;
use crate::settings::Settings;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes composed bibliography entries as a Word document.
#[derive(Debug, Clone)]
pub struct DocxWriter<'a> {
    settings: &'a Settings,
}

impl<'a> DocxWriter<'a> {
    /// Create a writer using the given rendering settings.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Assemble the complete `.docx` package in memory.
    pub fn write_package(&self, entries: &[Entry]) -> Result<Vec<u8>, DocumentError> {
        let document = xml::document_xml(entries, &self.settings.paragraph)?;
        let styles = xml::styles_xml(&self.settings.document)?;

        let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, &[u8]); 5] = [
            ("[Content_Types].xml", xml::CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", xml::PACKAGE_RELS_XML.as_bytes()),
            ("word/document.xml", &document),
            ("word/_rels/document.xml.rels", xml::DOCUMENT_RELS_XML.as_bytes()),
            ("word/styles.xml", &styles),
        ];
        for (name, bytes) in parts {
            archive.start_file(name, options)?;
            archive.write_all(bytes)?;
        }

        Ok(archive.finish()?.into_inner())
    }

    /// Assemble the package and save it to `path` in one call.
    pub fn save<P: AsRef<Path>>(&self, entries: &[Entry], path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let package = self.write_package(entries)?;
        std::fs::write(path, package).map_err(|source| DocumentError::Save {
            path: path.display().to_string(),
            source,
        })
    }
}
