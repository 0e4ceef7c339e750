//! Collection analytics: filtering, sorting, grouping, statistics and insights.
//!
//! Everything here is recomputed from the item slice handed in. Nothing is
//! cached between calls.

pub mod filter;
pub mod grouping;
pub mod insights;
pub mod sort;
pub mod stats;
mod snapshot;

pub use filter::ItemFilter;
pub use grouping::{CollectionBucket, CollectionKind};
pub use insights::{Insight, InsightSeverity};
pub use snapshot::{CollectionSnapshot, ItemLibrary};
pub use sort::SortOrder;
pub use stats::{AnalyticsSnapshot, BucketCounts, CategoryCount, MonthlyCount, ValuedItem};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::models::config::{CollectionConfig, EngineConfig};
use crate::models::item::Item;
use crate::warranty::WarrantyClock;

/// Pull-based aggregator over an item collection.
#[derive(Debug, Clone)]
pub struct ItemAggregator {
    clock: WarrantyClock,
    config: CollectionConfig,
}

impl ItemAggregator {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            clock: WarrantyClock::from_config(&config.warranty),
            config: config.collections.clone(),
        }
    }

    pub fn with_clock(mut self, clock: WarrantyClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> &WarrantyClock {
        &self.clock
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Filter, then sort the survivors.
    pub fn query<'a>(
        &self,
        items: &'a [Item],
        filter: &ItemFilter,
        order: SortOrder,
        now: NaiveDateTime,
    ) -> Vec<&'a Item> {
        let mut found = filter.apply(items);
        order.apply(&mut found, now);
        found
    }

    pub fn recent<'a>(&self, items: &'a [Item], now: NaiveDateTime) -> Vec<&'a Item> {
        grouping::recent(items, now, self.config.recent_days)
    }

    pub fn high_value<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        grouping::high_value(items, self.config.high_value_threshold)
    }

    /// Display-ordered buckets: favorites, recent and high value first,
    /// then categories, locations and tags, each alphabetical.
    pub fn smart_collections<'a>(
        &self,
        items: &'a [Item],
        now: NaiveDateTime,
    ) -> Vec<CollectionBucket<'a>> {
        let mut buckets = Vec::new();

        let (favorites, _) = grouping::by_favorite(items);
        if !favorites.is_empty() {
            buckets.push(CollectionBucket::new(CollectionKind::Favorites, "Favorites", favorites));
        }

        let mut recent = self.recent(items, now);
        SortOrder::DateDesc.apply(&mut recent, now);
        buckets.push(CollectionBucket::new(CollectionKind::Recent, "Recently Added", recent));

        let mut valuable = self.high_value(items);
        if !valuable.is_empty() {
            SortOrder::PriceDesc.apply(&mut valuable, now);
            buckets.push(CollectionBucket::new(CollectionKind::HighValue, "High Value", valuable));
        }

        buckets.extend(grouping::by_category(items));
        buckets.extend(grouping::by_location(items));
        buckets.extend(grouping::by_tag(items));

        debug!("Built {} smart collections over {} items", buckets.len(), items.len());
        buckets
    }

    pub fn analytics(&self, items: &[Item], now: NaiveDateTime) -> AnalyticsSnapshot {
        AnalyticsSnapshot::compute(items, now, &self.clock, &self.config)
    }

    pub fn insights(&self, snapshot: &AnalyticsSnapshot) -> Vec<Insight> {
        Insight::derive(snapshot, &self.config)
    }
}

impl Default for ItemAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDateTime {
        date(2024, 6, 15).and_time(NaiveTime::MIN)
    }

    fn scenario() -> Vec<Item> {
        vec![
            Item::new("A", "Electronics", date(2024, 6, 1), 24)
                .unwrap()
                .with_price(Decimal::from(600)),
            Item::new("B", "Electronics", date(2024, 6, 10), 12).unwrap(),
            Item::new("C", "Furniture", date(2023, 2, 1), 36)
                .unwrap()
                .with_price(Decimal::from(50)),
        ]
    }

    #[test]
    fn test_end_to_end_scenario() {
        let aggregator = ItemAggregator::new();
        let items = scenario();

        let valuable: Vec<_> = aggregator.high_value(&items).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(valuable, vec!["A"]);

        let snapshot = aggregator.analytics(&items, now());
        assert_eq!(snapshot.total_value, Decimal::from(650));
        assert_eq!(snapshot.average_value, Decimal::from(325));
        assert_eq!(snapshot.most_common_category.as_deref(), Some("Electronics"));
    }

    #[test]
    fn test_smart_collection_order() {
        let aggregator = ItemAggregator::new();
        let mut items = scenario();
        items[2] = items[2].clone().with_favorite(true).with_location("Study").with_tag("antique");

        let titles: Vec<_> = aggregator
            .smart_collections(&items, now())
            .into_iter()
            .map(|b| (b.kind, b.title, b.items.iter().map(|i| i.name.clone()).collect::<Vec<_>>()))
            .collect();

        assert_eq!(
            titles,
            vec![
                (CollectionKind::Favorites, "Favorites".to_string(), vec!["C".to_string()]),
                (CollectionKind::Recent, "Recently Added".to_string(), vec!["B".to_string(), "A".to_string()]),
                (CollectionKind::HighValue, "High Value".to_string(), vec!["A".to_string()]),
                (CollectionKind::Category, "Electronics".to_string(), vec!["A".to_string(), "B".to_string()]),
                (CollectionKind::Category, "Furniture".to_string(), vec!["C".to_string()]),
                (CollectionKind::Location, "Study".to_string(), vec!["C".to_string()]),
                (CollectionKind::Tag, "antique".to_string(), vec!["C".to_string()]),
            ]
        );
    }

    #[test]
    fn test_empty_collection_keeps_recent_bucket() {
        let buckets = ItemAggregator::new().smart_collections(&[], now());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].kind, CollectionKind::Recent);
        assert!(buckets[0].is_empty());
    }

    #[test]
    fn test_query_filters_then_sorts() {
        let items = scenario();
        let found = ItemAggregator::new().query(
            &items,
            &ItemFilter::new().with_category("Electronics"),
            SortOrder::NameDesc,
            now(),
        );
        let names: Vec<_> = found.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut config = EngineConfig::default();
        config.collections.high_value_threshold = Decimal::from(40);
        let aggregator = ItemAggregator::from_config(&config);
        let items = scenario();
        assert_eq!(aggregator.high_value(&items).len(), 2);
    }
}
