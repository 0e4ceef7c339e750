//! Receipt scanner: runs every field extractor and assembles a draft.

use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use super::rules::{
    DateExtractor, ExtractionMatch, FieldExtractor, PriceExtractor, ProductNameExtractor,
    StoreNameExtractor,
};
use super::ScanText;
use crate::models::config::ExtractionConfig;
use crate::models::draft::{DraftField, PurchaseDraft};

/// Result of scanning one receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Proposed purchase fields.
    pub draft: PurchaseDraft,
    /// Fields that could not be extracted.
    pub missing_fields: Vec<DraftField>,
    /// Human-readable notes about the extraction.
    pub warnings: Vec<String>,
    /// Number of non-empty lines in the scan.
    pub line_count: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Every candidate per field, in tie-break order. The first of each list is
/// what [`ReceiptScanner::scan`] picks.
#[derive(Debug, Clone, Default)]
pub struct FieldCandidates {
    pub product_names: Vec<ExtractionMatch<String>>,
    pub dates: Vec<ExtractionMatch<NaiveDate>>,
    pub prices: Vec<ExtractionMatch<Decimal>>,
    pub store_names: Vec<ExtractionMatch<String>>,
}

/// Trait for receipt parsing.
pub trait ReceiptParser {
    /// Parse a receipt from raw scanned text.
    fn parse(&self, text: &str) -> ScanResult;
}

/// Rule-based receipt scanner.
///
/// Holds no state between scans; the same text always yields the same draft.
pub struct ReceiptScanner {
    product: ProductNameExtractor,
    date: DateExtractor,
    price: PriceExtractor,
    store: StoreNameExtractor,
}

impl ReceiptScanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a scanner from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            product: ProductNameExtractor::new()
                .with_exclusions(&config.product_exclusions)
                .with_length_bounds(config.product_min_len, config.product_max_len),
            date: DateExtractor::new(),
            price: PriceExtractor::new().with_max_price(config.max_price),
            store: StoreNameExtractor::new()
                .with_keywords(&config.store_keywords)
                .with_header_lines(config.store_header_lines),
        }
    }

    /// Scan raw OCR text into a draft.
    pub fn scan(&self, text: &str) -> ScanResult {
        let start = Instant::now();
        let scan = ScanText::new(text);

        info!(
            "Scanning receipt: {} characters, {} lines",
            text.len(),
            scan.lines.len()
        );

        let draft = PurchaseDraft {
            product_name: self.product.extract(&scan).map(|m| m.value),
            purchase_date: self.date.extract(&scan).map(|m| m.value),
            price: self.price.extract(&scan).map(|m| m.value),
            store_name: self.store.extract(&scan).map(|m| m.value),
        };

        let missing_fields = draft.missing_fields();
        let mut warnings: Vec<String> = missing_fields
            .iter()
            .map(|f| format!("Could not extract {}", f))
            .collect();

        if scan.is_empty() {
            warnings.insert(0, "Scanned text is empty".to_string());
        }

        if let (Some(name), Some(store)) = (&draft.product_name, &draft.store_name) {
            if name == store {
                warnings.push(format!("Product name and store name are the same line: {}", name));
            }
        }

        debug!(
            "Extracted draft with {} of {} fields",
            DraftField::ALL.len() - missing_fields.len(),
            DraftField::ALL.len()
        );

        ScanResult {
            draft,
            missing_fields,
            warnings,
            line_count: scan.lines.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Collect every candidate for every field.
    pub fn candidates(&self, text: &str) -> FieldCandidates {
        let scan = ScanText::new(text);

        FieldCandidates {
            product_names: self.product.extract_all(&scan),
            dates: self.date.extract_all(&scan),
            prices: self.price.extract_all(&scan),
            store_names: self.store.extract_all(&scan),
        }
    }
}

impl Default for ReceiptScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser for ReceiptScanner {
    fn parse(&self, text: &str) -> ScanResult {
        self.scan(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const RECEIPT: &str = r#"
        BEST BUY STORE #412
        Receipt #88412
        03/15/2024 14:22
        Sony WH-1000XM5 Headphones
        SUBTOTAL $42.00
        TAX $3.67
        TOTAL: $45.67
        VISA CREDIT
    "#;

    #[test]
    fn test_scan_full_receipt() {
        let result = ReceiptScanner::new().scan(RECEIPT);

        assert_eq!(
            result.draft,
            PurchaseDraft {
                product_name: Some("Sony WH-1000XM5 Headphones".to_string()),
                purchase_date: NaiveDate::from_ymd_opt(2024, 3, 15),
                price: Some(Decimal::from_str("45.67").unwrap()),
                store_name: Some("BEST BUY STORE #412".to_string()),
            }
        );
        assert!(result.missing_fields.is_empty());
        assert_eq!(result.line_count, 8);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let scanner = ReceiptScanner::new();
        let first = scanner.scan(RECEIPT);
        let second = scanner.scan(RECEIPT);
        assert_eq!(first.draft, second.draft);
        assert_eq!(first.missing_fields, second.missing_fields);
    }

    #[test]
    fn test_scan_empty_text() {
        let result = ReceiptScanner::new().scan("");

        assert!(result.draft.is_empty());
        assert_eq!(result.missing_fields, DraftField::ALL.to_vec());
        assert_eq!(result.warnings[0], "Scanned text is empty");
        assert_eq!(result.line_count, 0);
    }

    #[test]
    fn test_partial_scan_reports_missing() {
        let result = ReceiptScanner::new().scan("$19.99\n$5.00");

        assert_eq!(result.draft.price, Some(Decimal::from_str("19.99").unwrap()));
        assert_eq!(
            result.missing_fields,
            vec![DraftField::ProductName, DraftField::PurchaseDate]
        );
        // A line without lowercase letters passes the upper-case store rule.
        assert_eq!(result.draft.store_name.as_deref(), Some("$19.99"));
        assert!(result
            .warnings
            .contains(&"Could not extract purchase date".to_string()));
    }

    #[test]
    fn test_candidates_first_matches_scan() {
        let scanner = ReceiptScanner::new();
        let candidates = scanner.candidates(RECEIPT);
        let draft = scanner.scan(RECEIPT).draft;

        assert_eq!(candidates.product_names.first().map(|m| m.value.clone()), draft.product_name);
        assert_eq!(candidates.dates.first().map(|m| m.value), draft.purchase_date);
        assert_eq!(candidates.prices.first().map(|m| m.value), draft.price);
        assert_eq!(candidates.store_names.first().map(|m| m.value.clone()), draft.store_name);
        assert!(candidates.prices.len() > 1);
    }

    #[test]
    fn test_config_changes_behaviour() {
        let config = ExtractionConfig {
            store_header_lines: 1,
            max_price: Decimal::from(40),
            ..Default::default()
        };
        let result = ReceiptScanner::from_config(&config).scan(RECEIPT);

        // TOTAL and SUBTOTAL exceed 40 so the first in-range symbol price wins.
        assert_eq!(result.draft.price, Some(Decimal::from_str("3.67").unwrap()));
        assert_eq!(result.draft.store_name.as_deref(), Some("BEST BUY STORE #412"));
    }
}
