//! Core library for HomeOps warranty tracking.
//!
//! This crate provides:
//! - Receipt field extraction from raw OCR text (product name, date, price, store)
//! - Warranty lifecycle computation (expiration, days remaining, buckets, alerts)
//! - Collection analytics (filtering, sorting, smart groupings, statistics, insights)
//! - Item, category and tag models with explicit, injectable catalogs

pub mod error;
pub mod models;
pub mod receipt;
pub mod warranty;
pub mod collection;

pub use error::{HomeOpsError, ItemError, CatalogError, Result};
pub use models::item::{Item, ItemId, ReceiptImageRef};
pub use models::draft::{PurchaseDraft, DraftField};
pub use models::catalog::{CategoryCatalog, CategoryInfo, TagCatalog};
pub use models::config::EngineConfig;
pub use receipt::{ReceiptScanner, ScanResult, ScanText, normalize_lines};
pub use warranty::{WarrantyClock, WarrantyState, WarrantyBucket, AlertScheduler, WarrantyAlert};
pub use collection::{
    ItemAggregator, ItemFilter, SortOrder, CollectionBucket, CollectionKind,
    AnalyticsSnapshot, Insight, ItemLibrary, CollectionSnapshot,
};
