//! Tracked purchase items.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ItemError;

/// Opaque unique item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a receipt image owned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptImageRef(pub String);

/// A purchased item with warranty coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identity.
    #[serde(default)]
    pub id: ItemId,

    /// Product name.
    pub name: String,

    /// Category name (predefined or custom).
    pub category: String,

    /// Calendar date of purchase.
    pub purchase_date: NaiveDate,

    /// Warranty length in calendar months (at least 1).
    pub warranty_duration_months: u32,

    /// Price paid, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<Decimal>,

    /// Store the item was bought from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    /// Where the item lives (e.g. "Kitchen", "Garage").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Manufacturer serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Tags; order is irrelevant.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// Marked as favorite.
    #[serde(default)]
    pub is_favorite: bool,

    /// Receipt photo, deleted together with the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<ReceiptImageRef>,
}

impl Item {
    /// Create a validated item with a fresh id and no optional data.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        purchase_date: NaiveDate,
        warranty_duration_months: u32,
    ) -> Result<Self, ItemError> {
        let item = Self {
            id: ItemId::new(),
            name: name.into(),
            category: category.into(),
            purchase_date,
            warranty_duration_months,
            purchase_price: None,
            store_name: None,
            location: None,
            notes: None,
            serial_number: None,
            tags: BTreeSet::new(),
            is_favorite: false,
            receipt_image: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// Set the purchase price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// Set the store name.
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store_name = Some(store.into());
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Mark as favorite.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    /// Check the invariants enforced on create and edit.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.name.trim().is_empty() {
            return Err(ItemError::EmptyName);
        }
        if self.warranty_duration_months < 1 {
            return Err(ItemError::InvalidWarrantyDuration(self.warranty_duration_months));
        }
        if let Some(price) = self.purchase_price {
            if price < Decimal::ZERO {
                return Err(ItemError::NegativePrice(price));
            }
        }
        Ok(())
    }

    /// Price used for value sorting; absent counts as zero.
    pub fn price_or_zero(&self) -> Decimal {
        self.purchase_price.unwrap_or(Decimal::ZERO)
    }
}
