//! Grouping of items into named buckets.
//!
//! Category groups cover every item exactly once. Location and tag groups
//! are partial: items without a location or without tags are left out.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::item::Item;

/// What a bucket was grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Favorites,
    Recent,
    HighValue,
    Category,
    Location,
    Tag,
}

/// A titled, ordered view over a subset of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionBucket<'a> {
    pub kind: CollectionKind,
    pub title: String,
    pub items: Vec<&'a Item>,
}

impl<'a> CollectionBucket<'a> {
    pub fn new(kind: CollectionKind, title: impl Into<String>, items: Vec<&'a Item>) -> Self {
        Self {
            kind,
            title: title.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn keyed<'a, I>(kind: CollectionKind, entries: I) -> Vec<CollectionBucket<'a>>
where
    I: IntoIterator<Item = (&'a str, &'a Item)>,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a Item>> = BTreeMap::new();
    for (key, item) in entries {
        groups.entry(key).or_default().push(item);
    }

    groups
        .into_iter()
        .map(|(key, items)| CollectionBucket::new(kind, key, items))
        .collect()
}

/// One bucket per category, sorted by category name.
pub fn by_category(items: &[Item]) -> Vec<CollectionBucket<'_>> {
    keyed(
        CollectionKind::Category,
        items.iter().map(|item| (item.category.as_str(), item)),
    )
}

/// One bucket per location. Items without a location are skipped.
pub fn by_location(items: &[Item]) -> Vec<CollectionBucket<'_>> {
    keyed(
        CollectionKind::Location,
        items
            .iter()
            .filter_map(|item| item.location.as_deref().map(|loc| (loc, item))),
    )
}

/// One bucket per tag. An item with several tags appears in each of them.
pub fn by_tag(items: &[Item]) -> Vec<CollectionBucket<'_>> {
    keyed(
        CollectionKind::Tag,
        items
            .iter()
            .flat_map(|item| item.tags.iter().map(move |tag| (tag.as_str(), item))),
    )
}

/// Split into (favorites, everything else), preserving input order.
pub fn by_favorite(items: &[Item]) -> (Vec<&Item>, Vec<&Item>) {
    items.iter().partition(|item| item.is_favorite)
}

/// Items purchased within the last `days` days of `now`.
///
/// A window reaching past the start of the calendar covers every item.
pub fn recent(items: &[Item], now: NaiveDateTime, days: i64) -> Vec<&Item> {
    let cutoff = TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN.and_time(NaiveTime::MIN));
    items
        .iter()
        .filter(|item| item.purchase_date.and_time(NaiveTime::MIN) >= cutoff)
        .collect()
}

/// Items with a known price at or above `threshold`.
pub fn high_value(items: &[Item], threshold: Decimal) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| item.purchase_price.is_some_and(|price| price >= threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Item> {
        vec![
            Item::new("TV", "Electronics", date(2024, 5, 20), 24)
                .unwrap()
                .with_price(Decimal::from(899))
                .with_location("Living Room")
                .with_tag("gift")
                .with_tag("4k"),
            Item::new("Sofa", "Furniture", date(2023, 11, 2), 60)
                .unwrap()
                .with_location("Living Room")
                .with_favorite(true),
            Item::new("Toaster", "Kitchen", date(2024, 5, 2), 12)
                .unwrap()
                .with_price(Decimal::from(40))
                .with_tag("gift"),
            Item::new("Phone", "Electronics", date(2024, 1, 9), 12)
                .unwrap()
                .with_price(Decimal::from(500)),
        ]
    }

    fn titles(buckets: &[CollectionBucket<'_>]) -> Vec<(String, usize)> {
        buckets.iter().map(|b| (b.title.clone(), b.len())).collect()
    }

    #[test]
    fn test_categories_partition_all_items() {
        let items = sample();
        let buckets = by_category(&items);
        assert_eq!(
            titles(&buckets),
            vec![
                ("Electronics".to_string(), 2),
                ("Furniture".to_string(), 1),
                ("Kitchen".to_string(), 1),
            ]
        );

        let ids: Vec<_> = buckets.iter().flat_map(|b| b.items.iter().map(|i| i.id)).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), items.len());
        assert_eq!(unique.len(), items.len());
    }

    #[test]
    fn test_location_groups_skip_unplaced_items() {
        let items = sample();
        let buckets = by_location(&items);
        assert_eq!(titles(&buckets), vec![("Living Room".to_string(), 2)]);
    }

    #[test]
    fn test_tag_groups_allow_multiple_membership() {
        let items = sample();
        let buckets = by_tag(&items);
        assert_eq!(
            titles(&buckets),
            vec![("4k".to_string(), 1), ("gift".to_string(), 2)]
        );
    }

    #[test]
    fn test_favorite_split() {
        let items = sample();
        let (favorites, rest) = by_favorite(&items);
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Sofa");
        assert_eq!(rest.len(), 3);
    }

    #[test]
    fn test_recent_window() {
        let items = sample();
        let now = date(2024, 6, 1).and_hms_opt(9, 0, 0).unwrap();
        let names: Vec<_> = recent(&items, now, 30).iter().map(|i| i.name.as_str()).collect();
        // Toaster was bought 30 days and 9 hours earlier.
        assert_eq!(names, vec!["TV"]);
    }

    #[test]
    fn test_recent_window_out_of_range() {
        let items = sample();
        let now = date(2024, 6, 1).and_time(NaiveTime::MIN);
        assert_eq!(recent(&items, now, 1_000_000_000).len(), items.len());
        assert_eq!(recent(&items, now, i64::MAX).len(), items.len());
    }

    #[test]
    fn test_high_value_includes_threshold() {
        let items = sample();
        let names: Vec<_> = high_value(&items, Decimal::from(500))
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["TV", "Phone"]);
    }

    #[test]
    fn test_empty_collection() {
        assert!(by_category(&[]).is_empty());
        assert!(by_tag(&[]).is_empty());
        assert!(high_value(&[], Decimal::ZERO).is_empty());
    }
}
