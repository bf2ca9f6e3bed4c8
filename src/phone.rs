// ☎️ Telephone Normalizer
// Canonical North American form: 1-604-555-1212 x204
//
// @see http://www.noslangues-ourlanguages.gc.ca/bien-well/fra-eng/typographie-typography/telephone-eng.html

use crate::sanitize::sanitize;
use tracing::debug;

// ============================================================================
// EXTENSION MARKERS
// ============================================================================

/// Words that introduce an extension, matched case-insensitively.
/// Order matters: earlier markers win at the same position.
const EXTENSION_MARKERS: &[&str] = &["/", "x", "ext", "poste"];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length (in chars) of `marker` at `chars[at..]`, ignoring ASCII case
fn marker_len(chars: &[char], at: usize, marker: &str) -> Option<usize> {
    let len = marker.chars().count();
    let candidate = chars.get(at..at + len)?;
    candidate
        .iter()
        .zip(marker.chars())
        .all(|(c, m)| c.to_ascii_lowercase() == m)
        .then_some(len)
}

/// A marker may only end where a word boundary or a digit follows
fn ends_cleanly(chars: &[char], end: usize) -> bool {
    let before = end.checked_sub(1).and_then(|i| chars.get(i)).copied();
    let after = chars.get(end).copied();

    if after.is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }

    before.is_some_and(is_word_char) != after.is_some_and(is_word_char)
}

/// Every way a marker could end when it starts at `at`, most greedy first
fn marker_ends(chars: &[char], at: usize) -> Vec<usize> {
    let mut ends = Vec::new();

    for marker in EXTENSION_MARKERS {
        let Some(len) = marker_len(chars, at, marker) else {
            continue;
        };
        let mut bodies = Vec::with_capacity(2);
        if *marker == "ext" && matches!(chars.get(at + len), Some('.') | Some(':')) {
            bodies.push(at + len + 1);
        }
        bodies.push(at + len);

        for body in bodies {
            if chars
                .get(body)
                .is_some_and(|c| c.is_whitespace() || *c == '-')
            {
                ends.push(body + 1);
            }
            ends.push(body);
        }
    }

    ends
}

/// Find the first extension marker at or after `from`, as a char range
fn find_marker(chars: &[char], from: usize) -> Option<(usize, usize)> {
    (from..chars.len()).find_map(|start| {
        marker_ends(chars, start)
            .into_iter()
            .find(|&end| ends_cleanly(chars, end))
            .map(|end| (start, end))
    })
}

/// Split on every extension marker, keeping the text between them
fn split_extensions(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some((start, end)) = find_marker(&chars, cursor) {
        segments.push(chars[cursor..start].iter().collect());
        cursor = end;
    }
    segments.push(chars[cursor..].iter().collect());

    segments
}

// ============================================================================
// NORMALIZE
// ============================================================================

/// Normalize a free-text phone number
///
/// Ten digits gain a leading country code `1`; eleven digits starting with
/// `1` are hyphenated as `D-DDD-DDD-DDDD`, with ` x<ext>` appended when a
/// single extension follows. Anything else, including input with more than
/// one extension marker, comes back sanitized but otherwise unchanged.
pub fn normalize_phone(s: &str) -> String {
    normalize_phone_in_area(s, None)
}

/// Like [`normalize_phone`], but a seven-digit local number is placed in
/// `area_code` when one is given.
pub fn normalize_phone_in_area(s: &str, area_code: Option<u16>) -> String {
    let cleaned = sanitize(s);
    let segments = split_extensions(&cleaned);

    let mut digits: String = segments[0].chars().filter(|c| c.is_ascii_digit()).collect();
    if let (7, Some(area_code)) = (digits.len(), area_code) {
        digits = format!("{}{}", area_code, digits);
    }
    if digits.len() == 10 {
        digits.insert(0, '1');
    }

    if digits.len() != 11 || !digits.starts_with('1') || segments.len() > 2 {
        debug!(value = %cleaned, segments = segments.len(), "phone number left as-is");
        return cleaned;
    }

    let formatted = format!(
        "{}-{}-{}-{}",
        &digits[0..1],
        &digits[1..4],
        &digits[4..7],
        &digits[7..11]
    );

    match segments.get(1) {
        Some(extension) => format!("{} x{}", formatted, extension),
        None => formatted,
    }
}

// ============================================================================
// TESTS
// ============================================================================
