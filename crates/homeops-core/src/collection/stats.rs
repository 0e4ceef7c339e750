//! Analytics snapshot over a whole item collection.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::config::CollectionConfig;
use crate::models::item::{Item, ItemId};
use crate::warranty::{WarrantyBucket, WarrantyClock};

/// Item counts per warranty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub active: usize,
    pub expiring_soon: usize,
    pub expired: usize,
}

impl BucketCounts {
    pub fn get(&self, bucket: WarrantyBucket) -> usize {
        match bucket {
            WarrantyBucket::Active => self.active,
            WarrantyBucket::ExpiringSoon => self.expiring_soon,
            WarrantyBucket::Expired => self.expired,
        }
    }

    fn record(&mut self, bucket: WarrantyBucket) {
        match bucket {
            WarrantyBucket::Active => self.active += 1,
            WarrantyBucket::ExpiringSoon => self.expiring_soon += 1,
            WarrantyBucket::Expired => self.expired += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Purchases in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    /// Short month name, e.g. "Mar".
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuedItem {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
}

/// Point-in-time summary of an item collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_items: usize,
    /// Sum of known prices.
    pub total_value: Decimal,
    /// Mean over priced items only, zero when none are priced.
    pub average_value: Decimal,
    pub highest_value: Decimal,
    pub items_without_price: usize,
    /// Truncated mean warranty length.
    pub average_warranty_months: u32,
    pub added_this_month: usize,
    pub added_last_six_months: usize,
    pub buckets: BucketCounts,
    /// Ties go to the lexically smallest name.
    pub most_common_category: Option<String>,
    /// Count descending, then name ascending.
    pub category_histogram: Vec<CategoryCount>,
    /// Oldest month first, ending with the month of `now`.
    pub monthly_purchases: Vec<MonthlyCount>,
    pub top_value: Vec<ValuedItem>,
}

impl AnalyticsSnapshot {
    pub fn compute(
        items: &[Item],
        now: NaiveDateTime,
        clock: &WarrantyClock,
        config: &CollectionConfig,
    ) -> Self {
        let today = now.date();

        let prices: Vec<Decimal> = items.iter().filter_map(|item| item.purchase_price).collect();
        // Saturates instead of overflowing on absurd prices.
        let total_value = prices
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.checked_add(*p).unwrap_or(Decimal::MAX));
        let average_value = if prices.is_empty() {
            Decimal::ZERO
        } else {
            (total_value / Decimal::from(prices.len())).round_dp(2)
        };
        let highest_value = prices.iter().copied().max().unwrap_or(Decimal::ZERO);

        let average_warranty_months = if items.is_empty() {
            0
        } else {
            let total: u64 = items.iter().map(|i| u64::from(i.warranty_duration_months)).sum();
            (total / items.len() as u64) as u32
        };

        let mut buckets = BucketCounts::default();
        for item in items {
            buckets.record(clock.state(item, now).bucket);
        }

        let added_this_month = items
            .iter()
            .filter(|item| same_month(item.purchase_date, today))
            .count();

        let six_months_ago = today
            .checked_sub_months(Months::new(6))
            .unwrap_or(NaiveDate::MIN)
            .and_time(NaiveTime::MIN);
        let added_last_six_months = items
            .iter()
            .filter(|item| item.purchase_date.and_time(NaiveTime::MIN) >= six_months_ago)
            .count();

        let category_histogram = category_histogram(items);
        let most_common_category = category_histogram.first().map(|c| c.category.clone());

        let snapshot = Self {
            total_items: items.len(),
            total_value,
            average_value,
            highest_value,
            items_without_price: items.len() - prices.len(),
            average_warranty_months,
            added_this_month,
            added_last_six_months,
            buckets,
            most_common_category,
            category_histogram,
            monthly_purchases: monthly_purchases(items, today, config.monthly_window),
            top_value: top_value(items, config.top_value_count),
        };

        debug!(
            "Analytics over {} items: value {}, {} expiring soon",
            snapshot.total_items, snapshot.total_value, snapshot.buckets.expiring_soon
        );

        snapshot
    }

    /// Number of items in a category, zero when unknown.
    pub fn category_count(&self, category: &str) -> usize {
        self.category_histogram
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn category_histogram(items: &[Item]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.category.as_str()).or_default() += 1;
    }

    let mut histogram: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    histogram.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    histogram
}

fn monthly_purchases(items: &[Item], today: NaiveDate, window: u32) -> Vec<MonthlyCount> {
    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };

    (0..window)
        .rev()
        .filter_map(|offset| current.checked_sub_months(Months::new(offset)))
        .map(|month| MonthlyCount {
            year: month.year(),
            month: month.month(),
            label: month.format("%b").to_string(),
            count: items
                .iter()
                .filter(|item| same_month(item.purchase_date, month))
                .count(),
        })
        .collect()
}

fn top_value(items: &[Item], limit: usize) -> Vec<ValuedItem> {
    let mut priced: Vec<ValuedItem> = items
        .iter()
        .filter_map(|item| {
            item.purchase_price.map(|price| ValuedItem {
                id: item.id,
                name: item.name.clone(),
                price,
            })
        })
        .collect();
    priced.sort_by(|a, b| b.price.cmp(&a.price));
    priced.truncate(limit);
    priced
}
