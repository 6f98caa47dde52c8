//! Per-authority date/time extraction.
//!
//! Every issuing authority lays its notices out differently, and the same
//! authority is not even consistent between print runs. Each extractor
//! encodes one authority's conventions as an ordered chain of strategies;
//! the [`Dispatcher`] picks the extractor matching the document's source and
//! falls back to trying all of them when that fails.

mod benalmadena;
mod dgt;
mod fuengirola;
mod malaga;
pub mod patterns;

pub use benalmadena::BenalmadenaExtractor;
pub use dgt::DgtExtractor;
pub use fuengirola::FuengirolaExtractor;
pub use malaga::MalagaExtractor;

use tracing::debug;

/// A date/time pair recovered from a notice, still in textual form
/// (`dd/mm/yyyy` and `HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDateTime {
    pub date: String,
    pub time: String,
}

/// Extraction outcome including which extractor produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub date: String,
    pub time: String,
    /// Name of the extractor that succeeded.
    pub extractor: &'static str,
}

/// Capability shared by all per-authority extractors.
///
/// `try_extract` never fails: malformed input simply yields `None`.
pub trait DateTimeExtractor: Send + Sync {
    /// Human-readable authority name.
    fn name(&self) -> &'static str;

    /// Whether this extractor handles documents from this source, judged by
    /// the file name the acquisition stage gave it.
    fn recognizes(&self, file_name: &str) -> bool;

    /// Attempt to derive the infraction date and time.
    fn try_extract(&self, full_text: &str, lines: &[String]) -> Option<ExtractedDateTime>;
}

/// The registered extractor set, strictest first so that fallback iteration
/// tries the least false-positive-prone heuristics before the lenient ones.
pub fn registry() -> Vec<Box<dyn DateTimeExtractor>> {
    vec![
        Box::new(DgtExtractor),
        Box::new(BenalmadenaExtractor),
        Box::new(FuengirolaExtractor),
        Box::new(MalagaExtractor),
    ]
}

/// Selects the extractor matching a document's declared source and falls
/// back to the whole registry in registration order.
pub struct Dispatcher {
    extractors: Vec<Box<dyn DateTimeExtractor>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::with_extractors(registry())
    }

    pub fn with_extractors(extractors: Vec<Box<dyn DateTimeExtractor>>) -> Self {
        Self { extractors }
    }

    /// Try the recognized extractor first, then every registered one in
    /// order. `None` means no extractor could resolve a date/time; the
    /// caller continues with placeholders rather than aborting.
    pub fn dispatch(
        &self,
        file_name: &str,
        full_text: &str,
        lines: &[String],
    ) -> Option<Extraction> {
        if let Some(extractor) = self.extractors.iter().find(|e| e.recognizes(file_name)) {
            if let Some(dt) = extractor.try_extract(full_text, lines) {
                return Some(Extraction {
                    date: dt.date,
                    time: dt.time,
                    extractor: extractor.name(),
                });
            }
            debug!(
                "recognized extractor {} failed on {}, trying all",
                extractor.name(),
                file_name
            );
        }

        for extractor in &self.extractors {
            if let Some(dt) = extractor.try_extract(full_text, lines) {
                debug!("fallback extractor {} succeeded on {}", extractor.name(), file_name);
                return Some(Extraction {
                    date: dt.date,
                    time: dt.time,
                    extractor: extractor.name(),
                });
            }
        }

        None
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove internal whitespace and normalize dash separators to slashes.
pub(crate) fn clean_date(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '-' { '/' } else { c })
        .collect()
}

/// Remove internal whitespace and normalize period separators to colons.
pub(crate) fn clean_time(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '.' { ':' } else { c })
        .collect()
}

/// Zero-padded `HH:MM`, accepted only for hours in [0, 23].
pub(crate) fn accept_time(hour: &str, minute: &str) -> Option<String> {
    let h: u32 = hour.parse().ok()?;
    if h <= 23 {
        Some(format!("{h:02}:{minute}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor {
        name: &'static str,
        marker: &'static str,
        result: Option<(&'static str, &'static str)>,
    }

    impl DateTimeExtractor for FixedExtractor {
        fn name(&self) -> &'static str {
            self.name
        }

        fn recognizes(&self, file_name: &str) -> bool {
            file_name.contains(self.marker)
        }

        fn try_extract(&self, _full_text: &str, _lines: &[String]) -> Option<ExtractedDateTime> {
            self.result.map(|(d, t)| ExtractedDateTime {
                date: d.to_string(),
                time: t.to_string(),
            })
        }
    }

    #[test]
    fn test_dispatch_prefers_recognized_extractor() {
        let dispatcher = Dispatcher::with_extractors(vec![
            Box::new(FixedExtractor {
                name: "first",
                marker: "AAA",
                result: Some(("01/01/2024", "10:00")),
            }),
            Box::new(FixedExtractor {
                name: "second",
                marker: "BBB",
                result: Some(("02/02/2024", "11:00")),
            }),
        ]);

        let result = dispatcher.dispatch("notice_BBB.pdf", "", &[]).unwrap();
        assert_eq!(result.extractor, "second");
        assert_eq!(result.date, "02/02/2024");
    }

    #[test]
    fn test_dispatch_falls_back_in_registration_order() {
        let dispatcher = Dispatcher::with_extractors(vec![
            Box::new(FixedExtractor {
                name: "first",
                marker: "AAA",
                result: None,
            }),
            Box::new(FixedExtractor {
                name: "second",
                marker: "ZZZ",
                result: Some(("02/02/2024", "11:00")),
            }),
        ]);

        // Recognized extractor fails; the registry is retried in order.
        let result = dispatcher.dispatch("notice_AAA.pdf", "", &[]).unwrap();
        assert_eq!(result.extractor, "second");
    }

    #[test]
    fn test_dispatch_none_when_all_fail() {
        let dispatcher = Dispatcher::with_extractors(vec![Box::new(FixedExtractor {
            name: "first",
            marker: "AAA",
            result: None,
        })]);

        assert!(dispatcher.dispatch("unknown.pdf", "", &[]).is_none());
    }

    #[test]
    fn test_clean_date() {
        assert_eq!(clean_date("27 / 07 / 2025"), "27/07/2025");
        assert_eq!(clean_date("05-01-2024"), "05/01/2024");
    }

    #[test]
    fn test_clean_time() {
        assert_eq!(clean_time("09 : 15"), "09:15");
        assert_eq!(clean_time("11.34"), "11:34");
    }

    #[test]
    fn test_accept_time_range() {
        assert_eq!(accept_time("9", "15"), Some("09:15".to_string()));
        assert_eq!(accept_time("23", "59"), Some("23:59".to_string()));
        assert_eq!(accept_time("24", "00"), None);
        assert_eq!(accept_time("99", "00"), None);
    }
}
