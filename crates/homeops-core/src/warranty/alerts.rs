//! Warranty alert schedule handed to the notification collaborator.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::debug;

use super::clock::WarrantyClock;
use crate::models::config::WarrantyConfig;
use crate::models::item::{Item, ItemId};

/// One notification trigger for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarrantyAlert {
    /// Stable identifier the delivery side deduplicates on.
    pub identifier: String,
    pub item_id: ItemId,
    pub days_before: i64,
    pub fire_at: NaiveDate,
    pub title: String,
    pub body: String,
}

/// Builds alert triggers relative to each item's expiration date.
#[derive(Debug, Clone)]
pub struct AlertScheduler {
    offsets_days: Vec<i64>,
}

impl AlertScheduler {
    pub fn new() -> Self {
        Self::from_config(&WarrantyConfig::default())
    }

    pub fn from_config(config: &WarrantyConfig) -> Self {
        Self {
            offsets_days: config.alert_offsets_days.clone(),
        }
    }

    /// One alert per configured offset, `fire_at = expiration - offset`.
    /// Offsets that land outside the calendar produce no alert.
    pub fn schedule(&self, item: &Item) -> Vec<WarrantyAlert> {
        let expiration =
            WarrantyClock::expiration_date(item.purchase_date, item.warranty_duration_months);

        self.offsets_days
            .iter()
            .filter_map(|&days| {
                let fire_at = expiration.checked_sub_signed(TimeDelta::try_days(days)?)?;
                let (title, body) = alert_text(&item.name, days);
                Some(WarrantyAlert {
                    identifier: format!("{}-{}days", item.id, days),
                    item_id: item.id,
                    days_before: days,
                    fire_at,
                    title,
                    body,
                })
            })
            .collect()
    }

    /// Alerts for every item that have not fired yet as of `now`,
    /// ordered by fire date then identifier.
    pub fn upcoming(&self, items: &[Item], now: NaiveDateTime) -> Vec<WarrantyAlert> {
        let today = now.date();
        let mut alerts: Vec<WarrantyAlert> = items
            .iter()
            .flat_map(|item| self.schedule(item))
            .filter(|alert| alert.fire_at >= today)
            .collect();

        alerts.sort_by(|a, b| {
            a.fire_at
                .cmp(&b.fire_at)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });

        debug!("{} upcoming alerts for {} items", alerts.len(), items.len());
        alerts
    }
}

impl Default for AlertScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn alert_text(name: &str, days: i64) -> (String, String) {
    match days {
        30 => (
            "Warranty Expiring Soon!".to_string(),
            format!("The warranty for {} expires in 30 days.", name),
        ),
        7 => (
            "Final Warranty Notice!".to_string(),
            format!("The warranty for {} expires in just one week.", name),
        ),
        1 => (
            "Final Warranty Notice!".to_string(),
            format!("The warranty for {} expires tomorrow.", name),
        ),
        _ => (
            "Warranty Reminder".to_string(),
            format!("The warranty for {} expires in {} days.", name, days),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_default_offsets() {
        let item = Item::new("Dishwasher", "Appliances", date(2024, 1, 31), 1).unwrap();
        let alerts = AlertScheduler::new().schedule(&item);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].fire_at, date(2024, 1, 30));
        assert_eq!(alerts[0].title, "Warranty Expiring Soon!");
        assert_eq!(alerts[0].identifier, format!("{}-30days", item.id));
        assert_eq!(alerts[1].fire_at, date(2024, 2, 22));
        assert_eq!(alerts[1].body, "The warranty for Dishwasher expires in just one week.");
    }

    #[test]
    fn test_custom_offsets() {
        let scheduler = AlertScheduler::from_config(&WarrantyConfig {
            alert_offsets_days: vec![90],
            ..Default::default()
        });
        let item = Item::new("Mower", "Garden", date(2024, 1, 1), 12).unwrap();
        let alerts = scheduler.schedule(&item);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].fire_at, date(2024, 10, 3));
        assert_eq!(alerts[0].body, "The warranty for Mower expires in 90 days.");
    }

    #[test]
    fn test_out_of_range_offsets_are_skipped() {
        let scheduler = AlertScheduler::from_config(&WarrantyConfig {
            alert_offsets_days: vec![1_000_000_000, i64::MAX, 7],
            ..Default::default()
        });
        let item = Item::new("Mower", "Garden", date(2024, 1, 1), 12).unwrap();
        let alerts = scheduler.schedule(&item);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_before, 7);
        assert_eq!(alerts[0].fire_at, date(2024, 12, 25));
    }

    #[test]
    fn test_upcoming_drops_past_and_sorts() {
        let soon = Item::new("Kettle", "Kitchen", date(2023, 7, 1), 12).unwrap();
        let later = Item::new("TV", "Electronics", date(2024, 1, 1), 24).unwrap();
        let now = date(2024, 6, 10).and_time(NaiveTime::MIN);

        let alerts = AlertScheduler::new().upcoming(&[later.clone(), soon.clone()], now);
        let summary: Vec<_> = alerts.iter().map(|a| (a.item_id, a.fire_at)).collect();

        assert_eq!(
            summary,
            vec![
                (soon.id, date(2024, 6, 24)),
                (later.id, date(2025, 12, 2)),
                (later.id, date(2025, 12, 25)),
            ]
        );
    }
}
