//! Date/time extraction for Ayuntamiento de Fuengirola notices.

use crate::text;

use super::patterns::{DATE_DMY, DATE_NEAR_TIME_60, INSTITUTION_FUENGIROLA, LABELED_DATE_TIME_TIGHT, TIME_HM};
use super::{accept_time, clean_date, DateTimeExtractor, ExtractedDateTime};

const MARKERS: &[&str] = &["AYUNTAMIENTO DE FUENGIROLA"];

pub struct FuengirolaExtractor;

impl DateTimeExtractor for FuengirolaExtractor {
    fn name(&self) -> &'static str {
        "Ayto Fuengirola"
    }

    fn recognizes(&self, file_name: &str) -> bool {
        text::contains_any_ci(file_name, MARKERS)
    }

    fn try_extract(&self, full_text: &str, lines: &[String]) -> Option<ExtractedDateTime> {
        if let Some(hit) = labeled_hit(full_text) {
            return Some(hit);
        }

        for line in lines {
            if line.to_uppercase().contains("FECHA Y HORA") {
                if let Some(hit) = labeled_hit(line) {
                    return Some(hit);
                }
            }

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

            if let Some(c) = DATE_NEAR_TIME_60.captures(line) {
                if let Some(time) = accept_time(&c[2], &c[3]) {
                    return Some(ExtractedDateTime {
                        date: clean_date(&c[1]),
                        time,
                    });
                }
            }
        }

        // Some runs keep everything in one block after the institution line.
        if let Some(m) = INSTITUTION_FUENGIROLA.find(full_text) {
            let window = text::window(full_text, m.start(), 800);
            if let Some(hit) = labeled_hit(window) {
                return Some(hit);
            }
        }

        None
    }
}

fn labeled_hit(text: &str) -> Option<ExtractedDateTime> {
    let c = LABELED_DATE_TIME_TIGHT.captures(text)?;
    let time = accept_time(&c[2], &c[3])?;
    Some(ExtractedDateTime {
        date: clean_date(&c[1]),
        time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_recognizes() {
        let ex = FuengirolaExtractor;
        assert!(ex.recognizes("AYUNTAMIENTO DE FUENGIROLA_4521PRS.pdf"));
        assert!(!ex.recognizes("DGT_4521PRS.pdf"));
    }

    #[test]
    fn test_labeled_full_text() {
        let ex = FuengirolaExtractor;
        let hit = ex
            .try_extract("Denuncia Fecha y hora 12/05/2025 16:45 Lugar Paseo Maritimo", &[])
            .unwrap();
        assert_eq!(hit.date, "12/05/2025");
        assert_eq!(hit.time, "16:45");
    }

    #[test]
    fn test_labeled_line_only() {
        let ex = FuengirolaExtractor;
        let lines = lines_of("Expediente 55/25\nFecha y hora 12/05/2025 7:05\nPrecepto art. 94");
        let hit = ex.try_extract("Expediente 55/25 Precepto art. 94", &lines).unwrap();
        assert_eq!(hit.time, "07:05");
    }

    #[test]
    fn test_same_line_fallback() {
        let ex = FuengirolaExtractor;
        let lines = lines_of("denunciado el 03/11/2024 a las 22.10 en C/ Mayor");
        let hit = ex.try_extract("", &lines).unwrap();
        assert_eq!(hit.date, "03/11/2024");
        assert_eq!(hit.time, "22:10");
    }

    #[test]
    fn test_institution_window() {
        let ex = FuengirolaExtractor;
        let text = format!(
            "{}Institución Ayuntamiento de Fuengirola Fecha y hora 30/09/2025 13:55",
            "relleno ".repeat(40)
        );
        let hit = ex.try_extract(&text, &[]).unwrap();
        assert_eq!(hit.date, "30/09/2025");
        assert_eq!(hit.time, "13:55");
    }

    #[test]
    fn test_rejects_out_of_range_hour() {
        let ex = FuengirolaExtractor;
        assert!(ex
            .try_extract("Fecha y hora 12/05/2025 44:45", &lines_of("Fecha y hora 12/05/2025 44:45"))
            .is_none());
    }
}
