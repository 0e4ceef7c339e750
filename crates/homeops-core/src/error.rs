//! Error types for the homeops-core library.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::item::ItemId;

/// Main error type for the homeops library.
#[derive(Error, Debug)]
pub enum HomeOpsError {
    /// Item validation or lookup error.
    #[error("item error: {0}")]
    Item(#[from] ItemError),

    /// Category or tag catalog error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when creating or editing items.
#[derive(Error, Debug, PartialEq)]
pub enum ItemError {
    /// Warranty duration must be at least one month.
    #[error("warranty duration must be at least 1 month, got {0}")]
    InvalidWarrantyDuration(u32),

    /// Item name is empty or whitespace.
    #[error("item name must not be empty")]
    EmptyName,

    /// Purchase price is negative.
    #[error("purchase price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// No item with this id exists in the collection.
    #[error("item not found: {0}")]
    NotFound(ItemId),
}

/// Errors raised by the category and tag catalogs.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    /// A category with the same name already exists.
    #[error("category already exists: {0}")]
    DuplicateCategory(String),

    /// Category or tag name is empty.
    #[error("name must not be empty")]
    EmptyName,

    /// Predefined categories cannot be changed.
    #[error("category is predefined and cannot be modified: {0}")]
    NotCustom(String),

    /// No custom category with this id.
    #[error("unknown category id: {0}")]
    UnknownCategory(Uuid),
}

/// Result type for the homeops library.
pub type Result<T> = std::result::Result<T, HomeOpsError>;
