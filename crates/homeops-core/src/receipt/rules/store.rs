//! Store name extraction.

use super::{char_len, ExtractionMatch, FieldExtractor};
use crate::receipt::ScanText;

/// Store name extractor.
///
/// Three rules, tried in order:
/// 1. a header line containing a store keyword,
/// 2. a fully upper-case header line of 4..=49 characters,
/// 3. any line (not just the header) of 3..=49 characters.
pub struct StoreNameExtractor {
    keywords: Vec<String>,
    header_lines: usize,
}

impl StoreNameExtractor {
    pub fn new() -> Self {
        Self {
            keywords: ["store", "shop", "market", "retail", "inc", "llc", "ltd", "co"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            header_lines: 5,
        }
    }

    /// Replace the store keywords (matched case-insensitively as substrings).
    pub fn with_keywords(mut self, keywords: &[String]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_lowercase()).collect();
        self
    }

    /// Set how many leading lines count as the receipt header.
    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    fn has_keyword(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    fn is_shouted(line: &str) -> bool {
        let len = char_len(line);
        (4..=49).contains(&len) && line.to_uppercase() == line
    }

    fn is_plausible(line: &str) -> bool {
        !line.is_empty() && (3..=49).contains(&char_len(line))
    }
}

impl Default for StoreNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StoreNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, scan: &ScanText<'_>) -> Vec<Self::Output> {
        let header = || scan.lines.iter().enumerate().take(self.header_lines);
        let found = |rule: &'static str, (i, line): (usize, &&str)| {
            ExtractionMatch::new(line.to_string(), rule, *line).with_line(i)
        };

        header()
            .filter(|(_, line)| self.has_keyword(line))
            .map(|m| found("keyword", m))
            .chain(
                header()
                    .filter(|(_, line)| Self::is_shouted(line))
                    .map(|m| found("uppercase", m)),
            )
            .chain(
                scan.lines
                    .iter()
                    .enumerate()
                    .filter(|(_, line)| Self::is_plausible(line))
                    .map(|m| found("fallback", m)),
            )
            .collect()
    }
}
