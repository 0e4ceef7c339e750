//! Purchase drafts proposed by receipt extraction.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};
use crate::error::ItemError;

/// A partial, user-reviewable purchase proposal.
///
/// Drafts are never stored; each present field is merged into an [`Item`]
/// only when the user saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}

/// The four fields a draft can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    ProductName,
    PurchaseDate,
    Price,
    StoreName,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::ProductName,
        DraftField::PurchaseDate,
        DraftField::Price,
        DraftField::StoreName,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::ProductName => "product name",
            DraftField::PurchaseDate => "purchase date",
            DraftField::Price => "price",
            DraftField::StoreName => "store name",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PurchaseDraft {
    /// Whether the given field was extracted.
    pub fn has(&self, field: DraftField) -> bool {
        match field {
            DraftField::ProductName => self.product_name.is_some(),
            DraftField::PurchaseDate => self.purchase_date.is_some(),
            DraftField::Price => self.price.is_some(),
            DraftField::StoreName => self.store_name.is_some(),
        }
    }

    /// Fields that could not be extracted, in display order.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        DraftField::ALL.into_iter().filter(|f| !self.has(*f)).collect()
    }

    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| !self.has(*f))
    }

    /// Copy every present field into `item`, leaving the rest untouched.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.product_name {
            item.name = name.clone();
        }
        if let Some(date) = self.purchase_date {
            item.purchase_date = date;
        }
        if let Some(price) = self.price {
            item.purchase_price = Some(price);
        }
        if let Some(store) = &self.store_name {
            item.store_name = Some(store.clone());
        }
    }
}

impl Item {
    /// Build a new item from a reviewed draft.
    ///
    /// `fallback_date` is used when the draft has no purchase date. A draft
    /// without a product name fails validation; the caller has to fill it in.
    pub fn from_draft(
        draft: &PurchaseDraft,
        category: impl Into<String>,
        warranty_duration_months: u32,
        fallback_date: NaiveDate,
    ) -> Result<Self, ItemError> {
        let mut item = Item {
            id: ItemId::new(),
            name: String::new(),
            category: category.into(),
            purchase_date: fallback_date,
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
        draft.apply_to(&mut item);
        item.validate()?;
        Ok(item)
    }
}
