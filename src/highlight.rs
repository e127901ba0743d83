//! Locating a target author inside a formatted author string.
//!
//! The renderer needs to know where the highlighted author's name occurs so
//! it can splice the string into plain and emphasized runs.  [`locate`]
//! produces the match spans and [`segments`] turns them into a complete
//! covering of the string, which any rendering backend can consume.

/// A byte-offset span of one target-author occurrence.
///
/// `start` is inclusive, `end` is exclusive.  Spans returned by [`locate`]
/// are non-overlapping and ordered left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// One contiguous piece of a formatted author string, tagged with whether it
/// falls inside a target-author match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Find every occurrence of `needle` in `haystack`.
///
/// The search is exact and case-sensitive.  Matches consume their matched
/// text: the cursor advances to the end of each match, so overlapping
/// occurrences are not double-counted.  An empty needle means no
/// highlighting is configured and yields no spans.
pub fn locate(haystack: &str, needle: &str) -> Vec<Span> {
    if needle.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = haystack[cursor..].find(needle) {
        let start = cursor + offset;
        let end = start + needle.len();
        spans.push(Span { start, end });
        cursor = end;
    }
    spans
}

/// Split `haystack` into an ordered sequence of segments exactly covering
/// the whole string, alternating between plain text and the matched spans.
///
/// Empty gaps between adjacent matches are not emitted, so every returned
/// segment has non-empty text (except when `haystack` itself is empty, in
/// which case the result is empty).
///
/// `spans` must come from [`locate`] over the same `haystack`.
pub fn segments<'a>(haystack: &'a str, spans: &[Span]) -> Vec<Segment<'a>> {
    let mut parts = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start > cursor {
            parts.push(Segment {
                text: &haystack[cursor..span.start],
                highlighted: false,
            });
        }
        parts.push(Segment {
            text: &haystack[span.start..span.end],
            highlighted: true,
        });
        cursor = span.end;
    }

    if cursor < haystack.len() {
        parts.push(Segment {
            text: &haystack[cursor..],
            highlighted: false,
        });
    }

    parts
}
