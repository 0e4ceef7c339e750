//! Purchase date extraction.

use chrono::NaiveDate;
use tracing::debug;

use super::patterns::date_patterns;
use super::{ExtractionMatch, FieldExtractor};
use crate::receipt::ScanText;

/// Concrete formats tried, in order, against a matched date substring.
///
/// Two-digit years come first so that `%Y` never reads "24" as year 24.
const DATE_FORMATS: [&str; 6] = [
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Purchase date extractor.
///
/// The first pattern with any match in the document decides: its first
/// matched substring is parsed, and if every format rejects it the date is
/// absent. Later patterns are not consulted.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract_all(&self, scan: &ScanText<'_>) -> Vec<Self::Output> {
        for pattern in date_patterns() {
            let Some(found) = pattern.find(scan.raw) else {
                continue;
            };

            let result = parse_receipt_date(found.as_str()).map(|date| {
                ExtractionMatch::new(date, "date", found.as_str())
                    .with_position(found.start(), found.end())
            });

            if result.is_none() {
                debug!("Date candidate {:?} matched no known format", found.as_str());
            }

            return result.into_iter().collect();
        }

        Vec::new()
    }
}

/// Parse a receipt date string against the known formats, first success wins.
pub fn parse_receipt_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
