//! Warranty clock: expiration dates, days remaining and lifecycle buckets.
//!
//! Nothing here is cached on the item. State is derived from the purchase
//! date, the warranty length and the caller's notion of "now" on every call.

use std::fmt;

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::config::WarrantyConfig;
use crate::models::item::Item;

/// Three-way warranty lifecycle classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyBucket {
    Active,
    ExpiringSoon,
    Expired,
}

impl WarrantyBucket {
    pub fn label(&self) -> &'static str {
        match self {
            WarrantyBucket::Active => "Active",
            WarrantyBucket::ExpiringSoon => "Expiring Soon",
            WarrantyBucket::Expired => "Expired",
        }
    }
}

impl fmt::Display for WarrantyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Emphasis for progress displays. Uses the finer attention threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTone {
    Critical,
    Attention,
    Healthy,
}

/// Badge shown next to list rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBadge {
    /// A week or less left (or already expired).
    Urgent,
    /// A month or less left.
    Soon,
    Normal,
}

/// Derived warranty state of one item at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WarrantyState {
    pub expiration_date: NaiveDate,
    pub days_remaining: i64,
    pub bucket: WarrantyBucket,
    /// Elapsed share of the warranty span, in `[0, 1]`.
    pub progress: f64,
    pub tone: ProgressTone,
}

/// Warranty lifecycle calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarrantyClock {
    expiring_soon_days: i64,
    attention_days: i64,
}

impl WarrantyClock {
    pub fn new() -> Self {
        Self::from_config(&WarrantyConfig::default())
    }

    pub fn from_config(config: &WarrantyConfig) -> Self {
        Self {
            expiring_soon_days: config.expiring_soon_days,
            attention_days: config.attention_days,
        }
    }

    pub fn expiring_soon_days(&self) -> i64 {
        self.expiring_soon_days
    }

    /// Purchase date advanced by `months` calendar months.
    ///
    /// The day of month is kept when valid and clamped to the last day of the
    /// target month otherwise (Jan 31 + 1 month is Feb 28 or 29).
    pub fn expiration_date(purchase_date: NaiveDate, months: u32) -> NaiveDate {
        purchase_date
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whole days from `now` until the start of the expiration day,
    /// truncated toward zero. Negative once the warranty has lapsed.
    pub fn days_remaining(expiration_date: NaiveDate, now: NaiveDateTime) -> i64 {
        (expiration_date.and_time(NaiveTime::MIN) - now).num_days()
    }

    /// Elapsed fraction of the warranty span, clamped to `[0, 1]`.
    /// A zero-length span counts as fully elapsed.
    pub fn progress(purchase_date: NaiveDate, expiration_date: NaiveDate, now: NaiveDateTime) -> f64 {
        let start = purchase_date.and_time(NaiveTime::MIN);
        let total = (expiration_date.and_time(NaiveTime::MIN) - start).num_seconds();
        if total <= 0 {
            return 1.0;
        }
        let elapsed = (now - start).num_seconds();
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// `<= 0` days is expired, up to the expiring-soon threshold is
    /// expiring soon, anything beyond is active.
    pub fn bucket(&self, days_remaining: i64) -> WarrantyBucket {
        if days_remaining <= 0 {
            WarrantyBucket::Expired
        } else if days_remaining <= self.expiring_soon_days {
            WarrantyBucket::ExpiringSoon
        } else {
            WarrantyBucket::Active
        }
    }

    pub fn tone(&self, days_remaining: i64) -> ProgressTone {
        if days_remaining <= self.expiring_soon_days {
            ProgressTone::Critical
        } else if days_remaining <= self.attention_days {
            ProgressTone::Attention
        } else {
            ProgressTone::Healthy
        }
    }

    pub fn urgency(days_remaining: i64) -> UrgencyBadge {
        if days_remaining <= 7 {
            UrgencyBadge::Urgent
        } else if days_remaining <= 30 {
            UrgencyBadge::Soon
        } else {
            UrgencyBadge::Normal
        }
    }

    /// Full derived state for an item.
    pub fn state(&self, item: &Item, now: NaiveDateTime) -> WarrantyState {
        let expiration_date =
            Self::expiration_date(item.purchase_date, item.warranty_duration_months);
        let days_remaining = Self::days_remaining(expiration_date, now);

        WarrantyState {
            expiration_date,
            days_remaining,
            bucket: self.bucket(days_remaining),
            progress: Self::progress(item.purchase_date, expiration_date, now),
            tone: self.tone(days_remaining),
        }
    }
}

impl Default for WarrantyClock {
    fn default() -> Self {
        Self::new()
    }
}
