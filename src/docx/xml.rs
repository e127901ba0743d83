//! WordprocessingML part generation.
//!
//! Emits the XML parts of the output package with [`quick_xml`]'s event
//! writer: the document body (one `w:p` per bibliography entry, one `w:r`
//! per styled run) and the style defaults carrying the configured font.
//!
//! WordprocessingML measures in awkward units: font sizes in half-points,
//! spacing in twentieths of a point, line heights in 240ths of a line, and
//! indentation in twips (1/1440 inch).  The conversions live here so the
//! rest of the crate can stay in points and inches.

use crate::error::DocumentError;
use crate::render::{Entry, RunStyle};
use crate::settings::{Alignment, DocumentSettings, ParagraphFormat};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Fixed package parts.
pub(crate) const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

pub(crate) const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub(crate) const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Twentieths of a point, the unit of `w:spacing` values.
fn twentieths(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

/// Half-points, the unit of `w:sz`.
fn half_points(points: f32) -> i64 {
    (points * 2.0).round() as i64
}

/// Twips (1/1440 inch), the unit of `w:ind` values.
fn twips(inches: f32) -> i64 {
    (inches * 1440.0).round() as i64
}

/// Line height in 240ths of a single-spaced line, the unit of `w:line`.
fn line_units(multiple: f32) -> i64 {
    (multiple * 240.0).round() as i64
}

fn alignment_value(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

/// Generate `word/document.xml` for the given bibliography entries.
pub(crate) fn document_xml(
    entries: &[Entry],
    paragraph: &ParagraphFormat,
) -> Result<Vec<u8>, DocumentError> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut document = BytesStart::new("w:document");
    document.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(document))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for entry in entries {
        write_paragraph(&mut writer, entry, paragraph)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write_paragraph(
    writer: &mut Writer<Vec<u8>>,
    entry: &Entry,
    paragraph: &ParagraphFormat,
) -> Result<(), DocumentError> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    write_paragraph_properties(writer, paragraph)?;

    for run in &entry.runs {
        if run.text.is_empty() {
            continue;
        }
        write_run(writer, &run.text, run.style)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_paragraph_properties(
    writer: &mut Writer<Vec<u8>>,
    paragraph: &ParagraphFormat,
) -> Result<(), DocumentError> {
    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

    let mut jc = BytesStart::new("w:jc");
    jc.push_attribute(("w:val", alignment_value(paragraph.alignment)));
    writer.write_event(Event::Empty(jc))?;

    let mut spacing = BytesStart::new("w:spacing");
    spacing.push_attribute(("w:after", twentieths(paragraph.space_after_pt).to_string().as_str()));
    spacing.push_attribute(("w:line", line_units(paragraph.line_spacing).to_string().as_str()));
    spacing.push_attribute(("w:lineRule", "auto"));
    writer.write_event(Event::Empty(spacing))?;

    let mut indent = BytesStart::new("w:ind");
    indent.push_attribute(("w:left", twips(paragraph.left_indent_inches).to_string().as_str()));
    let first_line = twips(paragraph.first_line_indent_inches);
    if first_line < 0 {
        // Word models a negative first-line indent as a hanging indent.
        indent.push_attribute(("w:hanging", (-first_line).to_string().as_str()));
    } else if first_line > 0 {
        indent.push_attribute(("w:firstLine", first_line.to_string().as_str()));
    }
    writer.write_event(Event::Empty(indent))?;

    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    Ok(())
}

fn write_run(
    writer: &mut Writer<Vec<u8>>,
    text: &str,
    style: RunStyle,
) -> Result<(), DocumentError> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    if style != RunStyle::PLAIN {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if style.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
        }
        if style.italic {
            writer.write_event(Event::Empty(BytesStart::new("w:i")))?;
        }
        if style.underline {
            let mut underline = BytesStart::new("w:u");
            underline.push_attribute(("w:val", "single"));
            writer.write_event(Event::Empty(underline))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    let mut text_element = BytesStart::new("w:t");
    // Runs carry leading/trailing spaces that Word would otherwise strip.
    text_element.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text_element))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Generate `word/styles.xml` carrying the document-default font.
pub(crate) fn styles_xml(document: &DocumentSettings) -> Result<Vec<u8>, DocumentError> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut styles = BytesStart::new("w:styles");
    styles.push_attribute(("xmlns:w", W_NS));
    writer.write_event(Event::Start(styles))?;
    writer.write_event(Event::Start(BytesStart::new("w:docDefaults")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPrDefault")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

    let font = document.default_font_name.as_str();
    let mut fonts = BytesStart::new("w:rFonts");
    fonts.push_attribute(("w:ascii", font));
    fonts.push_attribute(("w:hAnsi", font));
    fonts.push_attribute(("w:cs", font));
    writer.write_event(Event::Empty(fonts))?;

    let size = half_points(document.default_font_size_pt).to_string();
    let mut sz = BytesStart::new("w:sz");
    sz.push_attribute(("w:val", size.as_str()));
    writer.write_event(Event::Empty(sz))?;
    let mut sz_cs = BytesStart::new("w:szCs");
    sz_cs.push_attribute(("w:val", size.as_str()));
    writer.write_event(Event::Empty(sz_cs))?;

    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    writer.write_event(Event::End(BytesEnd::new("w:rPrDefault")))?;
    writer.write_event(Event::Empty(BytesStart::new("w:pPrDefault")))?;
    writer.write_event(Event::End(BytesEnd::new("w:docDefaults")))?;
    writer.write_event(Event::End(BytesEnd::new("w:styles")))?;

    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StyledRun;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn entry(runs: Vec<StyledRun>) -> Entry {
        Entry { number: 1, runs }
    }

    fn run(text: &str, style: RunStyle) -> StyledRun {
        StyledRun {
            text: text.to_string(),
            style,
        }
    }

    fn xml_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(6.0, 120)]
    #[case(8.5, 170)]
    fn test_twentieths(#[case] points: f32, #[case] expected: i64) {
        assert_eq!(twentieths(points), expected);
    }

    #[rstest]
    #[case(12.0, 24)]
    #[case(11.0, 22)]
    #[case(10.5, 21)]
    fn test_half_points(#[case] points: f32, #[case] expected: i64) {
        assert_eq!(half_points(points), expected);
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(-0.3, -432)]
    #[case(0.5, 720)]
    fn test_twips(#[case] inches: f32, #[case] expected: i64) {
        assert_eq!(twips(inches), expected);
    }

    #[rstest]
    #[case(1.0, 240)]
    #[case(1.5, 360)]
    #[case(2.0, 480)]
    fn test_line_units(#[case] multiple: f32, #[case] expected: i64) {
        assert_eq!(line_units(multiple), expected);
    }

    #[test]
    fn test_document_xml_plain_run() {
        let entries = vec![entry(vec![run("1)  Hello", RunStyle::PLAIN)])];
        let xml = xml_string(document_xml(&entries, &ParagraphFormat::default()).unwrap());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("<w:body><w:p>"));
        assert!(xml.contains("<w:t xml:space=\"preserve\">1)  Hello</w:t>"));
        // Plain runs carry no run properties at all.
        assert!(!xml.contains("<w:rPr>"));
    }

    #[test]
    fn test_document_xml_styled_runs() {
        let entries = vec![entry(vec![
            run(
                "Xxx, X.",
                RunStyle {
                    bold: true,
                    italic: false,
                    underline: true,
                },
            ),
            run(
                "Nature",
                RunStyle {
                    bold: false,
                    italic: true,
                    underline: false,
                },
            ),
        ])];
        let xml = xml_string(document_xml(&entries, &ParagraphFormat::default()).unwrap());

        assert!(xml.contains("<w:rPr><w:b/><w:u w:val=\"single\"/></w:rPr>"));
        assert!(xml.contains("<w:rPr><w:i/></w:rPr>"));
    }

    #[test]
    fn test_document_xml_default_paragraph_properties() {
        let entries = vec![entry(vec![run("x", RunStyle::PLAIN)])];
        let xml = xml_string(document_xml(&entries, &ParagraphFormat::default()).unwrap());

        assert!(xml.contains("<w:jc w:val=\"left\"/>"));
        assert!(xml.contains("<w:spacing w:after=\"120\" w:line=\"240\" w:lineRule=\"auto\"/>"));
        // -0.3in first-line indent becomes a 432-twip hanging indent.
        assert!(xml.contains("<w:ind w:left=\"0\" w:hanging=\"432\"/>"));
    }

    #[test]
    fn test_document_xml_positive_first_line_indent() {
        let paragraph = ParagraphFormat {
            first_line_indent_inches: 0.25,
            ..ParagraphFormat::default()
        };
        let entries = vec![entry(vec![run("x", RunStyle::PLAIN)])];
        let xml = xml_string(document_xml(&entries, &paragraph).unwrap());

        assert!(xml.contains("w:firstLine=\"360\""));
        assert!(!xml.contains("w:hanging"));
    }

    #[test]
    fn test_document_xml_escapes_text() {
        let entries = vec![entry(vec![run("Q <i> & A", RunStyle::PLAIN)])];
        let xml = xml_string(document_xml(&entries, &ParagraphFormat::default()).unwrap());

        assert!(xml.contains("Q &lt;i&gt; &amp; A"));
    }

    #[test]
    fn test_document_xml_skips_empty_runs() {
        let entries = vec![entry(vec![
            run("", RunStyle::PLAIN),
            run("kept", RunStyle::PLAIN),
        ])];
        let xml = xml_string(document_xml(&entries, &ParagraphFormat::default()).unwrap());

        assert_eq!(xml.matches("<w:r>").count(), 1);
    }

    #[test]
    fn test_document_xml_one_paragraph_per_entry() {
        let entries = vec![
            entry(vec![run("first", RunStyle::PLAIN)]),
            entry(vec![run("second", RunStyle::PLAIN)]),
        ];
        let xml = xml_string(document_xml(&entries, &ParagraphFormat::default()).unwrap());

        assert_eq!(xml.matches("<w:p>").count(), 2);
    }

    #[test]
    fn test_styles_xml_carries_font_defaults() {
        let xml = xml_string(styles_xml(&DocumentSettings::default()).unwrap());

        assert!(xml.contains(
            "<w:rFonts w:ascii=\"Times New Roman\" w:hAnsi=\"Times New Roman\" w:cs=\"Times New Roman\"/>"
        ));
        assert!(xml.contains("<w:sz w:val=\"24\"/>"));
        assert!(xml.contains("<w:szCs w:val=\"24\"/>"));
    }

    #[test]
    fn test_fixed_parts_reference_each_other() {
        assert!(CONTENT_TYPES_XML.contains("/word/document.xml"));
        assert!(CONTENT_TYPES_XML.contains("/word/styles.xml"));
        assert!(PACKAGE_RELS_XML.contains("Target=\"word/document.xml\""));
        assert!(DOCUMENT_RELS_XML.contains("Target=\"styles.xml\""));
    }
}
