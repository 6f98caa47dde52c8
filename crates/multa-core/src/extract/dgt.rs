//! Date/time extraction for DGT (national traffic authority) notices.
//!
//! DGT output is generated from a single template, so one strict anchored
//! pattern is the whole contract: no fallback chain on purpose.

use crate::text;

use super::patterns::DGT_DATE_TIME;
use super::{clean_date, clean_time, DateTimeExtractor, ExtractedDateTime};

const MARKERS: &[&str] = &["DIRECCIÓN GENERAL DE TRÁFICO", "DIRECCION GENERAL DE TRAFICO"];

pub struct DgtExtractor;

impl DateTimeExtractor for DgtExtractor {
    fn name(&self) -> &'static str {
        "DGT"
    }

    fn recognizes(&self, file_name: &str) -> bool {
        text::contains_any_ci(file_name, MARKERS)
    }

    fn try_extract(&self, full_text: &str, _lines: &[String]) -> Option<ExtractedDateTime> {
        let c = DGT_DATE_TIME.captures(full_text)?;

        let time = clean_time(&c[2]);
        let hour: u32 = time.split(':').next()?.parse().ok()?;
        if hour > 23 {
            return None;
        }

        Some(ExtractedDateTime {
            date: clean_date(&c[1]),
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognizes() {
        let ex = DgtExtractor;
        assert!(ex.recognizes("DIRECCIÓN GENERAL DE TRÁFICO_9371MGF.pdf"));
        assert!(ex.recognizes("direccion general de trafico_2.pdf"));
        assert!(!ex.recognizes("AYUNTAMIENTO DE MÁLAGA.pdf"));
    }

    #[test]
    fn test_strict_anchor() {
        let ex = DgtExtractor;
        let hit = ex
            .try_extract("FECHA Y HORA DE LA INFRACCIÓN: 05/01/2024 - 09:15 h", &[])
            .unwrap();
        assert_eq!(hit.date, "05/01/2024");
        assert_eq!(hit.time, "09:15");
    }

    #[test]
    fn test_tolerates_spacing_and_dash_variants() {
        let ex = DgtExtractor;
        let hit = ex
            .try_extract("fecha y hora de la infracción: 05 / 01 / 2024 – 09 : 15 h", &[])
            .unwrap();
        assert_eq!(hit.date, "05/01/2024");
        assert_eq!(hit.time, "09:15");
    }

    #[test]
    fn test_no_fallback_chain() {
        let ex = DgtExtractor;
        // A perfectly readable date/time without the anchor stays unresolved.
        assert!(ex.try_extract("El día 05/01/2024 a las 09:15", &[]).is_none());
    }

    #[test]
    fn test_rejects_out_of_range_hour() {
        let ex = DgtExtractor;
        assert!(ex
            .try_extract("FECHA Y HORA DE LA INFRACCIÓN: 05/01/2024 - 29:15 h", &[])
            .is_none());
    }
}
