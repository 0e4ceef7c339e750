//! Configuration structures for the extraction and warranty engine.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::CategoryInfo;
use crate::error::Result;

/// Main configuration for the homeops engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,

    /// Warranty lifecycle configuration.
    pub warranty: WarrantyConfig,

    /// Collection grouping and analytics configuration.
    pub collections: CollectionConfig,

    /// User-defined categories and tags.
    pub catalog: CatalogConfig,
}

/// Receipt field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Product name must be longer than this many characters.
    pub product_min_len: usize,

    /// Product name must be shorter than this many characters.
    pub product_max_len: usize,

    /// Lines containing any of these words (case-insensitive) are never product names.
    pub product_exclusions: Vec<String>,

    /// Number of leading lines searched for a store header.
    pub store_header_lines: usize,

    /// Words (case-insensitive) that mark a line as a store name.
    pub store_keywords: Vec<String>,

    /// Prices must be strictly below this value.
    pub max_price: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            product_min_len: 3,
            product_max_len: 99,
            product_exclusions: ["total", "subtotal", "tax", "cash", "credit", "receipt", "store"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            store_header_lines: 5,
            store_keywords: ["store", "shop", "market", "retail", "inc", "llc", "ltd", "co"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_price: Decimal::from(100_000),
        }
    }
}

/// Warranty lifecycle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarrantyConfig {
    /// Items with at most this many days left (and more than zero) are expiring soon.
    pub expiring_soon_days: i64,

    /// Secondary threshold used only for progress emphasis.
    pub attention_days: i64,

    /// Days before expiration at which alerts fire.
    pub alert_offsets_days: Vec<i64>,
}

impl Default for WarrantyConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: 30,
            attention_days: 90,
            alert_offsets_days: vec![30, 7],
        }
    }
}

/// Collection grouping and analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Items purchased within this many days are "recent".
    pub recent_days: i64,

    /// Items priced at or above this value are "high value".
    pub high_value_threshold: Decimal,

    /// Number of trailing months in the purchase histogram.
    pub monthly_window: u32,

    /// Number of items in the top-value list.
    pub top_value_count: usize,

    /// Average warranty below this many months triggers a suggestion.
    pub short_warranty_months: u32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            recent_days: 30,
            high_value_threshold: Decimal::from(500),
            monthly_window: 6,
            top_value_count: 5,
            short_warranty_months: 12,
        }
    }
}

/// User-defined catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub custom_categories: Vec<CategoryInfo>,
    pub custom_tags: Vec<String>,
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
