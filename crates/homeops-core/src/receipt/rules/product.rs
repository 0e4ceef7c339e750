//! Product name extraction.

use super::patterns::{has_currency_symbol, looks_like_date};
use super::{char_len, ExtractionMatch, FieldExtractor};
use crate::receipt::ScanText;

/// Product name extractor.
///
/// Picks the first line that is not a total/tax/payment line, carries no
/// currency symbol, is not a date and has a plausible length. There is no
/// scoring: the first qualifying line wins.
pub struct ProductNameExtractor {
    exclusions: Vec<String>,
    min_len: usize,
    max_len: usize,
}

impl ProductNameExtractor {
    pub fn new() -> Self {
        Self {
            exclusions: ["total", "subtotal", "tax", "cash", "credit", "receipt", "store"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_len: 3,
            max_len: 99,
        }
    }

    /// Replace the exclusion words (matched case-insensitively as substrings).
    pub fn with_exclusions(mut self, words: &[String]) -> Self {
        self.exclusions = words.iter().map(|w| w.to_lowercase()).collect();
        self
    }

    /// Set the exclusive length bounds.
    pub fn with_length_bounds(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self
    }

    fn qualifies(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }

        let len = char_len(line);
        if len <= self.min_len || len >= self.max_len {
            return false;
        }

        let lower = line.to_lowercase();
        if self.exclusions.iter().any(|w| lower.contains(w.as_str())) {
            return false;
        }

        !has_currency_symbol(line) && !looks_like_date(line)
    }
}

impl Default for ProductNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ProductNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, scan: &ScanText<'_>) -> Option<Self::Output> {
        scan.lines
            .iter()
            .enumerate()
            .find(|(_, line)| self.qualifies(line))
            .map(|(i, line)| ExtractionMatch::new(line.to_string(), "product", *line).with_line(i))
    }

    fn extract_all(&self, scan: &ScanText<'_>) -> Vec<Self::Output> {
        scan.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.qualifies(line))
            .map(|(i, line)| ExtractionMatch::new(line.to_string(), "product", *line).with_line(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<String> {
        ProductNameExtractor::new()
            .extract(&ScanText::new(text))
            .map(|m| m.value)
    }

    #[test]
    fn test_first_qualifying_line() {
        let text = "Receipt #1234\n03/15/2024\nSony WH-1000XM5 Headphones\nUSB Cable\nTOTAL: $45.67";
        assert_eq!(extract(text).as_deref(), Some("Sony WH-1000XM5 Headphones"));
    }

    #[test]
    fn test_exclusions_are_case_insensitive() {
        assert_eq!(extract("SUBTOTAL\nSales Tax\nCASH\nVisa Credit\nToaster").as_deref(), Some("Toaster"));
        assert_eq!(extract("Main Street Store\nKettle").as_deref(), Some("Kettle"));
    }

    #[test]
    fn test_currency_and_date_lines_skipped() {
        assert_eq!(extract("€12\nMicrowave Oven").as_deref(), Some("Microwave Oven"));
        assert_eq!(extract("Sold 2024-03-15\nDrill Set").as_deref(), Some("Drill Set"));
    }

    #[test]
    fn test_length_bounds_are_exclusive() {
        // 3 characters is too short, 4 is fine.
        assert_eq!(extract("abc\nabcd").as_deref(), Some("abcd"));

        let long = "x".repeat(99);
        let ok = "y".repeat(98);
        assert_eq!(extract(&format!("{long}\n{ok}")), Some(ok));
    }

    #[test]
    fn test_absent_when_nothing_qualifies() {
        assert_eq!(extract("TOTAL $5.00\n12/01/23\nabc"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_custom_exclusions() {
        let extractor = ProductNameExtractor::new().with_exclusions(&["THANK".to_string()]);
        let result = extractor.extract(&ScanText::new("Thank you!\nTotal Sale Item"));
        assert_eq!(result.map(|m| m.value).as_deref(), Some("Total Sale Item"));
    }
}
