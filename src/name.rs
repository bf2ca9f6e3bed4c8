// 🪪 Name Normalizer
// Strips honorifics from display names: "Councillor Jane Smith" → "Jane Smith"

use crate::sanitize::sanitize;
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading titles removed from names (each may carry a period)
pub const HONORIFIC_PREFIXES: &[&str] = &[
    "Councillor", "Dr", "Hon", "M", "Mayor", "Mme", "Mr", "Mrs", "Ms", "Miss",
];

static HONORIFIC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives = HONORIFIC_PREFIXES.join("|");
    Regex::new(&format!(r"\A(?:{})\.? ", alternatives)).expect("valid honorific prefix regex")
});

static HONORIFIC_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r", Ph\.D\z").expect("valid honorific suffix regex"));

/// Sanitize a person's name and drop at most one honorific prefix and one
/// ", Ph.D" suffix.
pub fn normalize_name(s: &str) -> String {
    let cleaned = sanitize(s);
    let without_prefix = HONORIFIC_PREFIX_RE.replace(&cleaned, "");
    HONORIFIC_SUFFIX_RE.replace(&without_prefix, "").into_owned()
}
