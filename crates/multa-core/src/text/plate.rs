//! Vehicle plate extraction.
//!
//! Spanish plates are 4 digits followed by 3 consonants (vowels and Q are
//! never issued). Notices usually carry the plate near a "MATRÍCULA" label,
//! but OCR output may insert spaces, dashes or stray separators anywhere, so
//! the search runs anchored first, then global, then over compacted text.

use lazy_static::lazy_static;
use regex::Regex;

use super::{normalize, remove_diacritics, window};

const WINDOW_BEFORE: usize = 120;
const WINDOW_SPAN: usize = 800;

lazy_static! {
    /// 4 digits + 3 plate consonants, tolerating a dash/space separator.
    static ref PLATE_CORE: Regex = Regex::new(
        r"\b\d{4}\s*-?\s*[BCDFGHJKLMNPRSTVWXYZ]{3}\b"
    ).unwrap();

    /// Loose form: arbitrary separators between every digit/letter.
    static ref PLATE_LOOSE: Regex = Regex::new(
        r"\d[\s.\-]*\d[\s.\-]*\d[\s.\-]*\d[\s.\-]*[BCDFGHJKLMNPRSTVWXYZ][\s.\-]*[BCDFGHJKLMNPRSTVWXYZ][\s.\-]*[BCDFGHJKLMNPRSTVWXYZ]"
    ).unwrap();

    /// Strict form over compacted (alphanumeric-only) text.
    static ref PLATE_COMPACT: Regex = Regex::new(
        r"\d{4}[BCDFGHJKLMNPRSTVWXYZ]{3}"
    ).unwrap();

    static ref PLATE_COMPACT_FULL: Regex = Regex::new(
        r"^\d{4}[BCDFGHJKLMNPRSTVWXYZ]{3}$"
    ).unwrap();
}

/// General extractor, good for most issuing authorities.
///
/// Tries windows around every MATRICULA/MATRÍCULA anchor, then a global
/// search, then the strict pattern over fully compacted text.
pub fn find_plate(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let norm = normalize(text).to_uppercase();

    for key in ["MATRICULA", "MATRÍCULA"] {
        for (idx, _) in norm.match_indices(key) {
            let slice = window(&norm, idx.saturating_sub(WINDOW_BEFORE), WINDOW_SPAN);
            if let Some(m) = PLATE_CORE.find(slice) {
                return Some(compact(m.as_str()));
            }
        }
    }

    if let Some(m) = PLATE_CORE.find(&norm) {
        return Some(compact(m.as_str()));
    }

    let compacted = compact(&norm);
    PLATE_COMPACT
        .find(&compacted)
        .map(|m| m.as_str().to_string())
}

/// Loose extractor for noisier layouts (Benalmádena notices scatter the
/// plate across separator characters).
///
/// Works on diacritic-stripped text so the MATRICULA label is found whatever
/// the typography did to the accent. Loose hits are only accepted when the
/// compacted candidate still matches the strict pattern.
pub fn find_plate_loose(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let norm = remove_diacritics(text).to_uppercase();

    // Line with the label and a clean plate on it.
    for raw in norm.lines() {
        let line = normalize(raw);
        if line.contains("MATRICULA") {
            if let Some(m) = PLATE_CORE.find(&line) {
                return Some(compact(m.as_str()));
            }
        }
    }

    // Window around the first label, separator-tolerant pattern.
    if let Some(idx) = norm.find("MATRICULA") {
        let slice = window(&norm, idx.saturating_sub(WINDOW_BEFORE), WINDOW_SPAN);
        if let Some(m) = PLATE_LOOSE.find(slice) {
            let candidate = compact(m.as_str());
            if PLATE_COMPACT_FULL.is_match(&candidate) {
                return Some(candidate);
            }
        }
    }

    // Global fallback over compacted text.
    let compacted = compact(&norm);
    PLATE_COMPACT
        .find(&compacted)
        .map(|m| m.as_str().to_string())
}

fn compact(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_plate_anchored() {
        let text = "NOTIFICACIÓN DE DENUNCIA Matrícula: 9371 MGF Lugar: Avda. del Mar";
        assert_eq!(find_plate(text), Some("9371MGF".to_string()));
    }

    #[test]
    fn test_find_plate_dash_separated() {
        assert_eq!(find_plate("vehículo 1234-BCD sancionado"), Some("1234BCD".to_string()));
    }

    #[test]
    fn test_find_plate_rejects_vowels_and_q() {
        assert_eq!(find_plate("matrícula 1234 AEI"), None);
        assert_eq!(find_plate("matrícula 1234 BQD"), None);
    }

    #[test]
    fn test_find_plate_global_without_anchor() {
        assert_eq!(find_plate("expediente 22/1234 vehículo 5678 KLM"), Some("5678KLM".to_string()));
    }

    #[test]
    fn test_find_plate_compacted_fallback() {
        // OCR glued everything together; only the compact pass can see it.
        assert_eq!(find_plate("exp:071234MGFdenuncia"), Some("1234MGF".to_string()));
    }

    #[test]
    fn test_find_plate_empty() {
        assert_eq!(find_plate(""), None);
        assert_eq!(find_plate("   "), None);
    }

    #[test]
    fn test_find_plate_loose_scattered_separators() {
        let text = "MATRÍCULA 9 3 7 1 - M G F expediente";
        assert_eq!(find_plate_loose(text), Some("9371MGF".to_string()));
    }

    #[test]
    fn test_find_plate_loose_label_line() {
        let text = "AYTO. DE BENALMÁDENA\nMATRICULA   4521 PRS\nimporte 200 EUR";
        assert_eq!(find_plate_loose(text), Some("4521PRS".to_string()));
    }

    #[test]
    fn test_find_plate_loose_rejects_invalid_after_compacting() {
        // Too few digits once compacted; the candidate must not be accepted.
        assert_eq!(find_plate_loose("MATRICULA 9 3 7 Q G F"), None);
    }
}
