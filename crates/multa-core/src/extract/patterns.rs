//! Common regex patterns for date/time extraction from infraction notices.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Bare date: dd/mm/yyyy
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2}/\d{2}/\d{4})\b"
    ).unwrap();

    // Bare time: h:mm or hh.mm, tolerant of a trailing single letter ("h")
    pub static ref TIME_HM: Regex = Regex::new(
        r"\b(\d{1,2})\s*[:.]\s*(\d{2})(?:\s*[A-Za-z])?\b"
    ).unwrap();

    // Label followed by date and time: "Fecha y hora 27/07/2025 11:34"
    pub static ref LABELED_DATE_TIME: Regex = Regex::new(
        r"(?i)Fecha\s*y\s*hora\s+(\d{2}/\d{2}/\d{4})\s+(\d{1,2})[:.](\d{2})(?:\s*[A-Za-z])?"
    ).unwrap();

    // Tighter label variant where the date may follow without a gap
    pub static ref LABELED_DATE_TIME_TIGHT: Regex = Regex::new(
        r"(?i)Fecha\s*y\s*hora\s*(\d{2}/\d{2}/\d{4})\s+(\d{1,2})[:.](\d{2})"
    ).unwrap();

    // Date followed by a time within a bounded span
    pub static ref DATE_NEAR_TIME_40: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4}).{0,40}?(\d{1,2})\s*[:.]\s*(\d{2})(?:\s*[A-Za-z])?\b"
    ).unwrap();

    pub static ref DATE_NEAR_TIME_60: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4}).{0,60}?(\d{1,2})\s*[:.]\s*(\d{2})(?:\s*[A-Za-z])?"
    ).unwrap();

    // National traffic authority header, one strict shape only
    pub static ref DGT_DATE_TIME: Regex = Regex::new(
        r"(?i)FECHA\s+Y\s+HORA\s+DE\s+LA\s+INFRACCI[ÓO]N:\s*(\d{2}\s*/\s*\d{2}\s*/\s*\d{4})\s*[-–—]\s*(\d{2}\s*:\s*\d{2})\s*h"
    ).unwrap();

    // Organization block markers used to narrow the search window
    pub static ref INSTITUTION: Regex = Regex::new(
        r"(?i)Instituci[óo]n"
    ).unwrap();

    pub static ref INSTITUTION_FUENGIROLA: Regex = Regex::new(
        r"(?i)Instituci[óo]n\s+Ayuntamiento\s+de\s+Fuengirola"
    ).unwrap();
}
