//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Characters treated as currency symbols.
pub const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

lazy_static! {
    // Month-first dates: 3/5/24, 03-15-2024
    pub static ref DATE_MDY: Regex = Regex::new(
        r"\b\d{1,2}[/\-]\d{1,2}[/\-](?:\d{4}|\d{2})\b"
    ).unwrap();

    // ISO-style dates: 2024-03-15, 2024/3/5
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b\d{4}[/\-]\d{1,2}[/\-]\d{1,2}\b"
    ).unwrap();

    // Labeled amount: "TOTAL: $45.67", "Amount 12.00", "price €3.50"
    pub static ref PRICE_LABELED: Regex = Regex::new(
        r"(?i)\b(?:total|amount|price)\b[ \t:]*[$€£¥]?[ \t]*(\d{1,3}(?:,\d{3})+|\d+)\.(\d{2})"
    ).unwrap();

    // Symbol-prefixed amount: "$19.99", "£ 1,299.00"
    pub static ref PRICE_SYMBOL: Regex = Regex::new(
        r"[$€£¥][ \t]*(\d{1,3}(?:,\d{3})+|\d+)\.(\d{2})"
    ).unwrap();

    // Amount followed by a currency word: "19.99 USD", "5.00 dollars"
    pub static ref PRICE_CURRENCY_WORD: Regex = Regex::new(
        r"(?i)(\d{1,3}(?:,\d{3})+|\d+)\.(\d{2})[ \t]*(?:USD|dollars?)\b"
    ).unwrap();
}

/// Date patterns in the order they are tried.
pub fn date_patterns() -> [&'static Regex; 2] {
    [&*DATE_MDY, &*DATE_YMD]
}

/// True if the text contains anything a date pattern would match.
pub fn looks_like_date(text: &str) -> bool {
    date_patterns().iter().any(|p| p.is_match(text))
}

/// True if the text contains a currency symbol character.
pub fn has_currency_symbol(text: &str) -> bool {
    text.contains(&CURRENCY_SYMBOLS[..])
}
