//! Text normalization helpers shared by all extractors.
//!
//! Scanned notices arrive with OCR artifacts: non-breaking spaces, interpunct
//! variants instead of periods, inconsistent accents. Everything downstream
//! (plate search, date/time heuristics, filename handling) works on text that
//! went through these helpers first.

pub mod plate;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Collapse whitespace runs to single spaces and map interpunct variants to a
/// standard period. Idempotent; empty input yields empty output.
pub fn normalize(input: &str) -> String {
    let mapped: String = input
        .chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{2007}' | '\u{202F}' => ' ',
            '\u{00B7}' | '\u{2027}' => '.',
            c => c,
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip diacritics (decompose, drop combining marks) while keeping spaces
/// and every other character intact.
pub fn remove_diacritics(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Aggressive form for accent/spacing-insensitive comparisons: strip
/// diacritics, remove all whitespace, uppercase.
pub fn normalize_aggressive(input: &str) -> String {
    let stripped = remove_diacritics(input);
    stripped
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Contains comparison over the aggressive normal form.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize_aggressive(haystack).contains(&normalize_aggressive(needle))
}

/// Prefix comparison over the aggressive normal form.
pub fn starts_with_normalized(haystack: &str, prefix: &str) -> bool {
    normalize_aggressive(haystack).starts_with(&normalize_aggressive(prefix))
}

/// Case-insensitive contains over any of the given markers. Recognition
/// predicates list both accented and plain variants explicitly.
pub fn contains_any_ci(haystack: &str, needles: &[&str]) -> bool {
    let upper = haystack.to_uppercase();
    needles.iter().any(|n| upper.contains(&n.to_uppercase()))
}

/// Replace filesystem-invalid characters with `_` and collapse whitespace.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Slice `text` starting near byte `start` for up to `span` bytes, clamping
/// both ends to UTF-8 character boundaries.
pub(crate) fn window(text: &str, start: usize, span: usize) -> &str {
    let mut start = start.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = start.saturating_add(span).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}
