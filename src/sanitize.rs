// 🧼 String Sanitizer
// Every other normalizer starts here: scraped text arrives with stray
// encoding artifacts and arbitrary whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// TABLES
// ============================================================================

/// Code points remapped before whitespace handling
const CHAR_TABLE: &[(char, char)] = &[
    ('\u{200B}', ' '),  // zero-width space
    ('\u{2019}', '\''), // right single quotation mark
    ('\u{00C2}', ' '),  // non-breaking space when ISO-8859-1 leaks into UTF-8
];

/// Any run of whitespace except newline
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid whitespace regex"));

/// Spaces hugging a newline
static NEWLINE_PADDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *\n *").expect("valid newline regex"));

// ============================================================================
// SANITIZE
// ============================================================================

fn remap(c: char) -> char {
    CHAR_TABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Clean a scraped string
///
/// Remaps problem code points, collapses whitespace runs (newlines survive),
/// trims the whole string and removes spaces next to newlines.
///
/// Total and idempotent: `sanitize(&sanitize(s)) == sanitize(s)`.
pub fn sanitize(s: &str) -> String {
    let remapped: String = s.chars().map(remap).collect();
    let collapsed = WHITESPACE_RE.replace_all(&remapped, " ");
    NEWLINE_PADDING_RE
        .replace_all(collapsed.trim(), "\n")
        .into_owned()
}

/// Sanitize an optional value, treating a blank result as absent
pub fn sanitize_opt(s: Option<&str>) -> Option<String> {
    s.map(sanitize).filter(|v| !v.is_empty())
}

// ============================================================================
// TESTS
// ============================================================================
