//! Heuristic classification of a single cell token.
//!
//! The rules are intentionally simple and order-sensitive: the phone check
//! runs first, and a token classified as a phone is never reconsidered as a
//! name. Short row serials (1, 2, 3…) never classify as phones — the
//! ≥8-digits-after-stripping rule is the single source of truth for that
//! distinction.

use once_cell::sync::Lazy;
use regex::Regex;

/// What a single table cell appears to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A student name (Arabic or Latin run of length ≥ 5).
    Name,
    /// A phone number (≥ 8 digits after stripping separators).
    Phone,
    /// A grade label. No per-cell heuristic fills this slot; grades are
    /// assigned via manual-mode import. Kept for format extensions.
    Grade,
    /// A class/section label. Same status as `Grade`.
    Class,
    /// Anything else.
    Unknown,
}

/// A run of phone characters (digits, plus, space, hyphen) of plausible
/// phone length, anywhere in the token.
static PHONE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9+\s\-]{8,15}").expect("phone pattern"));

/// Full-token Arabic name: right-to-left letters and spaces, length ≥ 5.
static ARABIC_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[؀-ۿ\s]{5,}$").expect("arabic name pattern"));

/// Full-token Latin name: ASCII letters and spaces, length ≥ 5.
static LATIN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]{5,}$").expect("latin name pattern"));

/// Header keywords that mark a row as a column-header row.
pub const NAME_HEADER_KEYWORDS: [&str; 2] = ["الاسم", "Name"];

/// Classify one trimmed cell token.
///
/// First-match-wins in the order phone, then name; everything else is
/// [`FieldKind::Unknown`].
#[must_use]
pub fn classify(token: &str) -> FieldKind {
    if PHONE_RUN.is_match(token) && digits_only(token).len() >= 8 {
        return FieldKind::Phone;
    }
    if ARABIC_NAME.is_match(token) || LATIN_NAME.is_match(token) {
        return FieldKind::Name;
    }
    FieldKind::Unknown
}

/// Strip every non-digit character from a token.
#[must_use]
pub fn digits_only(token: &str) -> String {
    token.chars().filter(char::is_ascii_digit).collect()
}

/// True when any cell of the row contains a name header keyword.
///
/// Header rows are skipped entirely, never classified.
#[must_use]
pub fn is_header_row(cells: &[String]) -> bool {
    cells
        .iter()
        .any(|cell| NAME_HEADER_KEYWORDS.iter().any(|kw| cell.contains(kw)))
}
