//! Date/time extraction for Ayuntamiento de Benalmádena notices.

use crate::text;

use super::patterns::{DATE_DMY, DATE_NEAR_TIME_60, INSTITUTION, LABELED_DATE_TIME, TIME_HM};
use super::{accept_time, clean_date, DateTimeExtractor, ExtractedDateTime};

const MARKERS: &[&str] = &[
    "AYUNTAMIENTO DE BENALMÁDENA",
    "AYUNTAMIENTO DE BENALMADENA",
    "AYTO. DE BENALMÁDENA",
    "AYTO. DE BENALMADENA",
    "BENALMÁDENA",
    "BENALMADENA",
];

/// Benalmádena's layout varies the most: the label may sit on the same line
/// as the values, split across reader lines, or buried in a block after the
/// institution header. Strategies run from most to least specific.
pub struct BenalmadenaExtractor;

impl DateTimeExtractor for BenalmadenaExtractor {
    fn name(&self) -> &'static str {
        "Ayto Benalmádena"
    }

    fn recognizes(&self, file_name: &str) -> bool {
        text::contains_any_ci(file_name, MARKERS)
    }

    fn try_extract(&self, full_text: &str, lines: &[String]) -> Option<ExtractedDateTime> {
        // Label on the full text: "Fecha y hora 27/07/2025 11:34"
        if let Some(hit) = labeled_hit(full_text) {
            return Some(hit);
        }

        // Same label line by line, in case the reader grouped differently.
        for line in lines {
            if let Some(hit) = labeled_hit(line) {
                return Some(hit);
            }
        }

        // Bare date and time on the same line, no label.
        for line in lines {
            if let Some(d) = DATE_DMY.captures(line) {
                if let Some(time) = first_valid_time(line) {
                    return Some(ExtractedDateTime {
                        date: clean_date(&d[1]),
                        time,
                    });
                }
            }

            // Short window: date followed closely by a time.
            if let Some(c) = DATE_NEAR_TIME_60.captures(line) {
                if let Some(time) = accept_time(&c[2], &c[3]) {
                    return Some(ExtractedDateTime {
                        date: clean_date(&c[1]),
                        time,
                    });
                }
            }
        }

        // Window after the institution marker, where some runs put the whole
        // block in one stretch of text.
        if let Some(m) = INSTITUTION.find(full_text) {
            let window = text::window(full_text, m.start(), 1000);

            if let Some(hit) = labeled_hit(window) {
                return Some(hit);
            }

            if let Some(d) = DATE_DMY.find(window) {
                let after = &window[d.end()..];
                if let Some(t) = TIME_HM.captures(after) {
                    if let Some(time) = accept_time(&t[1], &t[2]) {
                        return Some(ExtractedDateTime {
                            date: clean_date(d.as_str()),
                            time,
                        });
                    }
                }
            }
        }

        None
    }
}

fn labeled_hit(text: &str) -> Option<ExtractedDateTime> {
    let c = LABELED_DATE_TIME.captures(text)?;
    let time = accept_time(&c[2], &c[3])?;
    Some(ExtractedDateTime {
        date: clean_date(&c[1]),
        time,
    })
}

/// First time candidate on the line with an in-range hour; invalid hours are
/// skipped, not accepted.
fn first_valid_time(line: &str) -> Option<String> {
    TIME_HM
        .captures_iter(line)
        .find_map(|t| accept_time(&t[1], &t[2]))
}
