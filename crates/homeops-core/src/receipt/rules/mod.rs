//! Rule-based field extractors for receipts.

pub mod dates;
pub mod patterns;
pub mod price;
pub mod product;
pub mod store;

pub use dates::{parse_receipt_date, DateExtractor};
pub use patterns::*;
pub use price::{parse_amount, PriceExtractor};
pub use product::ProductNameExtractor;
pub use store::StoreNameExtractor;

use super::ScanText;

/// Trait for field extractors.
///
/// Implementations are stateless: the same input always yields the same
/// candidates in the same order.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the winning candidate, if any.
    fn extract(&self, scan: &ScanText<'_>) -> Option<Self::Output> {
        self.extract_all(scan).into_iter().next()
    }

    /// Extract every acceptable candidate, in tie-break order.
    fn extract_all(&self, scan: &ScanText<'_>) -> Vec<Self::Output>;
}

/// A candidate value with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that produced the match.
    pub rule: &'static str,
    /// Source text that was matched.
    pub source: String,
    /// Index into the normalized lines, for line-based rules.
    pub line: Option<usize>,
    /// Byte range in the raw text, for pattern-based rules.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            source: source.into(),
            line: None,
            position: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Character length used by all line-length bounds.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
