//! Bibliography assembly.
//!
//! Turns parsed [`Publication`] rows into an ordered list of styled-run
//! paragraphs: sorted by year descending (stable for ties), reverse-numbered,
//! with the target author spliced in as emphasized runs.  The output is
//! backend-neutral; the [`crate::docx`] writer consumes it, but any renderer
//! that understands `(text, style)` runs could.

use crate::settings::Settings;
use crate::{Publication, author, highlight};

/// Character formatting applied to one run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunStyle {
    /// No formatting.
    pub const PLAIN: RunStyle = RunStyle {
        bold: false,
        italic: false,
        underline: false,
    };

    fn bold(value: bool) -> Self {
        RunStyle {
            bold: value,
            ..Self::PLAIN
        }
    }

    fn italic(value: bool) -> Self {
        RunStyle {
            italic: value,
            ..Self::PLAIN
        }
    }
}

/// A contiguous styled span of text within a rendered paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

impl StyledRun {
    fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunStyle::PLAIN)
    }
}

/// One numbered bibliography paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The reverse-order label: the newest publication of `N` gets `N`.
    pub number: usize,
    pub runs: Vec<StyledRun>,
}

impl Entry {
    /// The paragraph text with styling stripped.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Compose the full bibliography from parsed publications.
///
/// Publications are sorted by year descending; the sort is stable, so rows
/// with equal years keep their original file order.  Labels count down from
/// the total, matching the original tool's reverse numbering.
pub fn compose(mut publications: Vec<Publication>, settings: &Settings) -> Vec<Entry> {
    publications.sort_by_key(|publication| std::cmp::Reverse(publication.year));

    let total = publications.len();
    publications
        .iter()
        .enumerate()
        .map(|(index, publication)| compose_entry(publication, total - index, settings))
        .collect()
}

/// Build the styled runs for a single publication.
///
/// Layout: `"{number})  {authors} {title}. {journal}, {year}, {volume},
/// {pages}."` — separator punctuation stays plain, and the closing period is
/// emitted even when pages are empty.
fn compose_entry(publication: &Publication, number: usize, settings: &Settings) -> Entry {
    let styles = &settings.styles;
    let mut runs = Vec::new();

    runs.push(StyledRun::plain(format!("{number})  ")));

    let authors = author::normalize(&publication.authors, settings.initials_rule);
    let spans = highlight::locate(&authors, &settings.target_author);
    let target_style = RunStyle {
        bold: styles.target_author_bold,
        italic: false,
        underline: styles.target_author_underline,
    };
    for segment in highlight::segments(&authors, &spans) {
        let style = if segment.highlighted {
            target_style
        } else {
            RunStyle::PLAIN
        };
        runs.push(StyledRun::new(segment.text, style));
    }

    runs.push(StyledRun::plain(format!(" {}. ", publication.title)));
    runs.push(StyledRun::new(
        &publication.journal,
        RunStyle::italic(styles.journal_italic),
    ));
    runs.push(StyledRun::plain(", "));
    runs.push(StyledRun::new(
        publication.year.to_string(),
        RunStyle::bold(styles.year_bold),
    ));
    runs.push(StyledRun::plain(", "));
    runs.push(StyledRun::new(
        publication.volume.to_string(),
        RunStyle::italic(styles.volume_italic),
    ));
    if publication.pages.is_empty() {
        runs.push(StyledRun::plain("."));
    } else {
        runs.push(StyledRun::plain(format!(", {}.", publication.pages)));
    }

    Entry { number, runs }
}
