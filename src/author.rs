//! Author-name normalization for bibliography rendering.
//!
//! Raw author lists arrive as semicolon-separated strings where each entry
//! may be in `"Last, First Middle"` form, `"First Middle Last"` form, or a
//! bare single token.  Every entry is reduced to the rendered form
//! `"LastName, I. M."` (one period-terminated initial per given-name
//! segment) and the entries are re-joined with `"; "` in their original
//! order.
//!
//! Normalization is a pure function: deterministic, total over all string
//! inputs, and never failing.  Malformed entries degrade to a best-effort
//! rendering rather than raising an error.

use compact_str::CompactString;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// How initials are derived from the given-name part of an author entry.
///
/// Historical output of this tool exists under both rules, so the choice is
/// exposed rather than hard-coded.  [`InitialsRule::PerSegment`] is the
/// default: it is the more general rule and reduces to the same output as
/// [`InitialsRule::FirstOnly`] when only one given name is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialsRule {
    /// One initial per whitespace-separated given-name segment:
    /// `"Smith, John Paul"` renders as `"Smith, J. P."`.
    #[default]
    PerSegment,
    /// A single initial from the first given-name segment only:
    /// `"Smith, John Paul"` renders as `"Smith, J."`.
    FirstOnly,
}

/// An author entry reduced to its last name and ordered initials.
///
/// `last_name` is non-empty whenever the source entry was non-empty; the
/// initials may be empty only when no given-name tokens were present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAuthor {
    last_name: String,
    initials: CompactString,
}

impl NormalizedAuthor {
    /// Parse a single trimmed, non-empty author entry.
    fn parse(entry: &str, rule: InitialsRule) -> Self {
        if let Some((last, given)) = entry.split_once(',') {
            return Self {
                last_name: last.trim().to_string(),
                initials: initials_of(given, rule),
            };
        }

        let tokens: Vec<&str> = entry.split_whitespace().collect();
        match tokens.as_slice() {
            // Unreachable for non-empty entries, but the fallback keeps the
            // function total.
            [] => Self {
                last_name: entry.trim().to_string(),
                initials: CompactString::const_new(""),
            },
            // Bare single token: the token doubles as its own initial source.
            [only] => Self {
                last_name: (*only).to_string(),
                initials: initials_of(only, rule),
            },
            [given @ .., last] => Self {
                last_name: (*last).to_string(),
                initials: initials_of(&given.join(" "), rule),
            },
        }
    }

    /// Render as `"LastName, I. M."`, or `"LastName."` when no initials exist.
    fn render(&self) -> String {
        if self.initials.is_empty() {
            format!("{}.", self.last_name)
        } else {
            let initials = self.initials.chars().map(|i| format!("{i}.")).join(" ");
            format!("{}, {}", self.last_name, initials)
        }
    }
}

/// Derive upper-cased initials from a given-name string.
///
/// Periods are treated as segment separators so `"J.M."` yields `J` and `M`.
fn initials_of(given: &str, rule: InitialsRule) -> CompactString {
    let cleaned = given.replace('.', " ");
    let initials = cleaned
        .split_whitespace()
        .filter_map(|segment| segment.chars().next())
        .flat_map(char::to_uppercase);
    match rule {
        InitialsRule::PerSegment => CompactString::from_iter(initials),
        InitialsRule::FirstOnly => CompactString::from_iter(initials.take(1)),
    }
}

/// Normalize a raw semicolon-separated author list into its rendered form.
///
/// # Examples
///
/// ```
/// use publist::author::{InitialsRule, normalize};
///
/// let formatted = normalize("Smith, John Paul; Doe", InitialsRule::PerSegment);
/// assert_eq!(formatted, "Smith, J. P.; Doe, D.");
/// ```
pub fn normalize(raw_list: &str, rule: InitialsRule) -> String {
    raw_list
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| NormalizedAuthor::parse(entry, rule).render())
        .join("; ")
}
