//! Price extraction.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::{PRICE_CURRENCY_WORD, PRICE_LABELED, PRICE_SYMBOL};
use super::{ExtractionMatch, FieldExtractor};
use crate::receipt::ScanText;

/// Price field extractor.
///
/// Patterns are tried most specific first. Within a pattern, matches are
/// scanned in document order and the first value in `(0, max_price)` wins;
/// a later pattern is only tried when the earlier one accepted nothing.
pub struct PriceExtractor {
    max_price: Decimal,
}

impl PriceExtractor {
    pub fn new() -> Self {
        Self {
            max_price: Decimal::from(100_000),
        }
    }

    /// Set the exclusive upper bound for accepted prices.
    pub fn with_max_price(mut self, max_price: Decimal) -> Self {
        self.max_price = max_price;
        self
    }

    fn rules() -> [(&'static str, &'static Regex); 3] {
        [
            ("labeled", &*PRICE_LABELED),
            ("symbol", &*PRICE_SYMBOL),
            ("currency_word", &*PRICE_CURRENCY_WORD),
        ]
    }

    fn accepts(&self, amount: Decimal) -> bool {
        amount > Decimal::ZERO && amount < self.max_price
    }

    /// Every in-range candidate of one rule, in document order.
    fn candidates(
        &self,
        rule: &'static str,
        pattern: &Regex,
        text: &str,
    ) -> Vec<ExtractionMatch<Decimal>> {
        let mut results = Vec::new();

        for caps in pattern.captures_iter(text) {
            let (Some(full), Some(integer), Some(fraction)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            // "12.345" is not a two-decimal amount
            if text[fraction.end()..].starts_with(|c: char| c.is_ascii_digit()) {
                continue;
            }

            let Some(amount) = parse_amount(integer.as_str(), fraction.as_str()) else {
                continue;
            };

            if !self.accepts(amount) {
                debug!("Rejecting out-of-range {} price {}", rule, amount);
                continue;
            }

            results.push(
                ExtractionMatch::new(amount, rule, full.as_str())
                    .with_position(full.start(), full.end()),
            );
        }

        results
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, scan: &ScanText<'_>) -> Option<Self::Output> {
        Self::rules()
            .into_iter()
            .find_map(|(rule, pattern)| self.candidates(rule, pattern, scan.raw).into_iter().next())
    }

    /// All in-range candidates, grouped by rule priority.
    fn extract_all(&self, scan: &ScanText<'_>) -> Vec<Self::Output> {
        Self::rules()
            .into_iter()
            .flat_map(|(rule, pattern)| self.candidates(rule, pattern, scan.raw))
            .collect()
    }
}

/// Build a decimal from an integer part (thousands commas allowed) and a
/// two-digit fraction.
pub fn parse_amount(integer: &str, fraction: &str) -> Option<Decimal> {
    let integer: String = integer.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&format!("{}.{}", integer, fraction)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Option<Decimal> {
        PriceExtractor::new()
            .extract(&ScanText::new(text))
            .map(|m| m.value)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_labeled_total() {
        assert_eq!(extract("TOTAL: $45.67"), Some(dec("45.67")));
    }

    #[test]
    fn test_labeled_wins_over_earlier_symbol() {
        let text = "Cable $9.99\nBattery $3.50\nTOTAL: $45.67";
        assert_eq!(extract(text), Some(dec("45.67")));
    }

    #[test]
    fn test_symbol_fallback() {
        assert_eq!(extract("Headphones\n$199.99"), Some(dec("199.99")));
        assert_eq!(extract("£1,299.00"), Some(dec("1299.00")));
    }

    #[test]
    fn test_currency_word_fallback() {
        assert_eq!(extract("Paid 19.99 USD"), Some(dec("19.99")));
        assert_eq!(extract("5.00 dollars"), Some(dec("5.00")));
    }

    #[test]
    fn test_rejects_zero_and_out_of_range() {
        // Zero total is skipped, the next labeled candidate is taken.
        assert_eq!(extract("Total 0.00\nAmount 12.50"), Some(dec("12.50")));

        // Out-of-range labeled value falls through to the symbol pattern.
        assert_eq!(extract("TOTAL 100000.00\nPaid $20.00"), Some(dec("20.00")));

        // Just below the bound is accepted.
        assert_eq!(extract("TOTAL 99999.99"), Some(dec("99999.99")));

        assert_eq!(extract("TOTAL $0.00"), None);
    }

    #[test]
    fn test_requires_two_fraction_digits() {
        assert_eq!(extract("$12.5"), None);
        assert_eq!(extract("$12.345"), None);
        assert_eq!(extract("$12"), None);
    }

    #[test]
    fn test_custom_max_price() {
        let extractor = PriceExtractor::new().with_max_price(Decimal::from(100));
        let result = extractor.extract(&ScanText::new("TOTAL $150.00\n$80.00"));
        assert_eq!(result.map(|m| m.value), Some(dec("80.00")));
    }

    #[test]
    fn test_extract_all_order() {
        let all = PriceExtractor::new().extract_all(&ScanText::new("$3.00\nTOTAL $4.00"));
        let rules: Vec<_> = all.iter().map(|m| (m.rule, m.value)).collect();
        assert_eq!(
            rules,
            vec![("labeled", dec("4.00")), ("symbol", dec("3.00")), ("symbol", dec("4.00"))]
        );
    }
}
