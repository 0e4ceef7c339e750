//! Receipt field extraction module.
//!
//! Raw OCR text goes through [`normalize_lines`], then four independent
//! rule-based extractors, and is assembled into a [`PurchaseDraft`] by the
//! [`ReceiptScanner`].
//!
//! [`PurchaseDraft`]: crate::models::draft::PurchaseDraft

mod normalizer;
pub mod rules;
mod scanner;

pub use normalizer::{normalize_lines, ScanText};
pub use scanner::{FieldCandidates, ReceiptParser, ReceiptScanner, ScanResult};
