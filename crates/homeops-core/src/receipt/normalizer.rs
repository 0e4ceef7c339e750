//! Line normalization for scanned text.

/// Scanned text together with its normalized lines.
///
/// Extractors that reason about lines use `lines`; pattern matchers that
/// need the whole document use `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanText<'a> {
    pub raw: &'a str,
    pub lines: Vec<&'a str>,
}

impl<'a> ScanText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lines: normalize_lines(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Split text into trimmed, non-empty lines in their original order.
///
/// No content filtering happens here.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lines() {
        let text = "  BEST BUY  \n\n\t\nSony Headphones\r\n   TOTAL: $45.67 \n";
        assert_eq!(
            normalize_lines(text),
            vec!["BEST BUY", "Sony Headphones", "TOTAL: $45.67"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines("   \n \n").is_empty());
        assert!(ScanText::new("").is_empty());
    }

    #[test]
    fn test_keeps_noise_lines() {
        let lines = normalize_lines("***\n----\n12");
        assert_eq!(lines, vec!["***", "----", "12"]);
    }
}
