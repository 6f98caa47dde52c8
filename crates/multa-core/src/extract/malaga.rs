//! Date/time extraction for Ayuntamiento de Málaga notices.
//!
//! Málaga prints no usable label, so everything rides on date/time
//! proximity: first per line, then over bounded windows in the full text.

use crate::text;

use super::patterns::{DATE_DMY, DATE_NEAR_TIME_40, TIME_HM};
use super::{accept_time, clean_date, DateTimeExtractor, ExtractedDateTime};

const MARKERS: &[&str] = &["AYUNTAMIENTO DE MÁLAGA", "AYUNTAMIENTO DE MALAGA"];

const FULL_TEXT_WINDOW: usize = 240;

pub struct MalagaExtractor;

impl DateTimeExtractor for MalagaExtractor {
    fn name(&self) -> &'static str {
        "Ayto Málaga"
    }

    fn recognizes(&self, file_name: &str) -> bool {
        text::contains_any_ci(file_name, MARKERS)
    }

    fn try_extract(&self, full_text: &str, lines: &[String]) -> Option<ExtractedDateTime> {
        for line in lines {
            if let Some(d) = DATE_DMY.captures(line) {
                if let Some(time) = TIME_HM
                    .captures_iter(line)
                    .find_map(|t| accept_time(&t[1], &t[2]))
                {
                    return Some(ExtractedDateTime {
                        date: clean_date(&d[1]),
                        time,
                    });
                }
            }

            if let Some(c) = DATE_NEAR_TIME_40.captures(line) {
                if let Some(time) = accept_time(&c[2], &c[3]) {
                    return Some(ExtractedDateTime {
                        date: clean_date(&c[1]),
                        time,
                    });
                }
            }
        }

        // Fallback: every date in the full text, with a bounded window after
        // it in which a time may appear.
        for d in DATE_DMY.find_iter(full_text) {
            let window = text::window(full_text, d.end(), FULL_TEXT_WINDOW);
            if let Some(time) = TIME_HM
                .captures_iter(window)
                .find_map(|t| accept_time(&t[1], &t[2]))
            {
                return Some(ExtractedDateTime {
                    date: clean_date(d.as_str()),
                    time,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_recognizes() {
        let ex = MalagaExtractor;
        assert!(ex.recognizes("AYUNTAMIENTO DE MÁLAGA_1234BCD.pdf"));
        assert!(ex.recognizes("ayuntamiento de malaga_2.pdf"));
        assert!(!ex.recognizes("AYUNTAMIENTO DE FUENGIROLA.pdf"));
    }

    #[test]
    fn test_same_line() {
        let ex = MalagaExtractor;
        let lines = lines_of("Denuncia 18/02/2025 10:05 Calle Larios");
        let hit = ex.try_extract("", &lines).unwrap();
        assert_eq!(hit.date, "18/02/2025");
        assert_eq!(hit.time, "10:05");
    }

    #[test]
    fn test_full_text_window() {
        let ex = MalagaExtractor;
        // Date and time separated by more than a line's worth of noise, but
        // within the window.
        let text = format!("denuncia 18/02/2025 {} 10:05 agente 4711", "x".repeat(100));
        let hit = ex.try_extract(&text, &[]).unwrap();
        assert_eq!(hit.date, "18/02/2025");
        assert_eq!(hit.time, "10:05");
    }

    #[test]
    fn test_window_is_bounded() {
        let ex = MalagaExtractor;
        // Time beyond the 240-char window must not be paired with the date.
        let text = format!("denuncia 18/02/2025 {} 10:05", "x".repeat(400));
        assert!(ex.try_extract(&text, &[]).is_none());
    }

    #[test]
    fn test_date_with_invalid_hour_skipped() {
        let ex = MalagaExtractor;
        let lines = lines_of("vencimiento 01/01/2025 31:00\nhecho 18/02/2025 a las 9.40");
        let hit = ex.try_extract("", &lines).unwrap();
        assert_eq!(hit.date, "18/02/2025");
        assert_eq!(hit.time, "09:40");
    }
}
