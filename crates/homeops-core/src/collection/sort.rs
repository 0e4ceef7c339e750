//! Sort orders for item lists.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::item::Item;
use crate::warranty::WarrantyClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
    /// Days remaining ascending, ties by name.
    ExpiringFirst,
    PriceDesc,
    PriceAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 7] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::ExpiringFirst,
        SortOrder::PriceDesc,
        SortOrder::PriceAsc,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::ExpiringFirst => "expiring-first",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::PriceAsc => "price-asc",
        }
    }

    /// Sort `items` in place. The sort is stable.
    pub fn apply(&self, items: &mut [&Item], now: NaiveDateTime) {
        match self {
            SortOrder::DateDesc => items.sort_by(|a, b| b.purchase_date.cmp(&a.purchase_date)),
            SortOrder::DateAsc => items.sort_by(|a, b| a.purchase_date.cmp(&b.purchase_date)),
            SortOrder::NameAsc => items.sort_by(|a, b| compare_names(a, b)),
            SortOrder::NameDesc => items.sort_by(|a, b| compare_names(b, a)),
            SortOrder::ExpiringFirst => items.sort_by_cached_key(|item| {
                (days_remaining(item, now), item.name.to_lowercase())
            }),
            SortOrder::PriceDesc => items.sort_by(|a, b| b.price_or_zero().cmp(&a.price_or_zero())),
            SortOrder::PriceAsc => items.sort_by(|a, b| a.price_or_zero().cmp(&b.price_or_zero())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort order: {}", s))
    }
}

fn compare_names(a: &Item, b: &Item) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

fn days_remaining(item: &Item, now: NaiveDateTime) -> i64 {
    let expires = WarrantyClock::expiration_date(item.purchase_date, item.warranty_duration_months);
    WarrantyClock::days_remaining(expires, now)
}
