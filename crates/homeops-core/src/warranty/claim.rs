//! Warranty claim letters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::clock::WarrantyState;
use crate::models::item::Item;

/// Why the item is being claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimReason {
    DefectiveProduct,
    StoppedWorking,
    DamagedInTransit,
    MissingParts,
    Other,
}

impl ClaimReason {
    pub const ALL: [ClaimReason; 5] = [
        ClaimReason::DefectiveProduct,
        ClaimReason::StoppedWorking,
        ClaimReason::DamagedInTransit,
        ClaimReason::MissingParts,
        ClaimReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClaimReason::DefectiveProduct => "Defective Product",
            ClaimReason::StoppedWorking => "Stopped Working",
            ClaimReason::DamagedInTransit => "Damaged in Transit",
            ClaimReason::MissingParts => "Missing Parts",
            ClaimReason::Other => "Other Issue",
        }
    }
}

impl fmt::Display for ClaimReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClaimReason {
    type Err = String;

    /// Accepts the label or a snake/kebab-case form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match key.as_str() {
            "defective" | "defectiveproduct" => Ok(ClaimReason::DefectiveProduct),
            "stoppedworking" => Ok(ClaimReason::StoppedWorking),
            "damaged" | "damagedintransit" => Ok(ClaimReason::DamagedInTransit),
            "missingparts" => Ok(ClaimReason::MissingParts),
            "other" | "otherissue" => Ok(ClaimReason::Other),
            _ => Err(format!("unknown claim reason: {}", s)),
        }
    }
}

/// A ready-to-send claim email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimLetter {
    pub subject: String,
    pub recipient: String,
    pub body: String,
    /// The warranty had already lapsed when the letter was written.
    /// The expiration day itself is still covered here, although
    /// [`WarrantyBucket`](crate::warranty::WarrantyBucket) already reports it as expired.
    pub expired: bool,
}

impl ClaimLetter {
    /// Compose a claim for `item` given its current warranty state.
    pub fn compose(
        item: &Item,
        reason: ClaimReason,
        description: &str,
        state: &WarrantyState,
    ) -> Self {
        let recipient = item
            .store_name
            .clone()
            .unwrap_or_else(|| "Customer Service".to_string());

        let mut details = vec![
            format!("Product: {}", item.name),
            format!("Purchase Date: {}", item.purchase_date.format("%B %-d, %Y")),
        ];
        if let Some(price) = item.purchase_price {
            details.push(format!("Purchase Price: ${:.2}", price));
        }
        if let Some(serial) = &item.serial_number {
            details.push(format!("Serial Number: {}", serial));
        }

        let expires = state.expiration_date.format("%B %-d, %Y");
        let expired = state.days_remaining < 0;
        let coverage = if expired {
            format!("The product's warranty expired on {}.", expires)
        } else {
            format!("The product is still under warranty (expires {}).", expires)
        };

        let body = format!(
            "Dear {recipient},\n\n\
             I am writing to file a warranty claim for the following product:\n\n\
             {details}\n\n\
             Reason for Claim: {reason}\n\n\
             Issue Description:\n{description}\n\n\
             {coverage} I have attached proof of purchase and photos documenting the issue.\n\n\
             Please advise on the next steps for processing this warranty claim.\n\n\
             Thank you for your assistance.\n\n\
             Best regards",
            recipient = recipient,
            details = details.join("\n"),
            reason = reason,
            description = description.trim(),
            coverage = coverage,
        );

        Self {
            subject: format!("Warranty Claim - {}", item.name),
            recipient,
            body,
            expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warranty::WarrantyClock;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compose_active_claim() {
        let mut item = Item::new("Espresso Machine", "Kitchen", date(2024, 3, 15), 24)
            .unwrap()
            .with_price(Decimal::new(34999, 2))
            .with_store("Kitchen Depot");
        item.serial_number = Some("EM-2211".to_string());

        let state = WarrantyClock::new().state(&item, date(2024, 9, 1).and_time(NaiveTime::MIN));
        let letter = ClaimLetter::compose(&item, ClaimReason::StoppedWorking, "  Pump is silent. ", &state);

        assert_eq!(letter.subject, "Warranty Claim - Espresso Machine");
        assert_eq!(letter.recipient, "Kitchen Depot");
        assert!(!letter.expired);
        assert!(letter.body.starts_with("Dear Kitchen Depot,"));
        assert!(letter.body.contains("Purchase Date: March 15, 2024"));
        assert!(letter.body.contains("Purchase Price: $349.99"));
        assert!(letter.body.contains("Serial Number: EM-2211"));
        assert!(letter.body.contains("Reason for Claim: Stopped Working"));
        assert!(letter.body.contains("Issue Description:\nPump is silent.\n"));
        assert!(letter.body.contains("still under warranty (expires March 15, 2026)"));
    }

    #[test]
    fn test_compose_expired_claim_without_store() {
        let item = Item::new("Fan", "Appliances", date(2020, 1, 1), 12).unwrap();
        let state = WarrantyClock::new().state(&item, date(2024, 1, 1).and_time(NaiveTime::MIN));
        let letter = ClaimLetter::compose(&item, ClaimReason::Other, "Noisy", &state);

        assert_eq!(letter.recipient, "Customer Service");
        assert!(letter.expired);
        assert!(letter.body.contains("expired on January 1, 2021"));
        assert!(!letter.body.contains("Purchase Price"));
    }

    #[test]
    fn test_expiration_day_is_still_covered() {
        let item = Item::new("Fan", "Appliances", date(2023, 5, 1), 12).unwrap();
        let state = WarrantyClock::new().state(&item, date(2024, 5, 1).and_time(NaiveTime::MIN));
        let letter = ClaimLetter::compose(&item, ClaimReason::Other, "Noisy", &state);

        assert_eq!(state.days_remaining, 0);
        assert_eq!(state.bucket, crate::warranty::WarrantyBucket::Expired);
        assert!(!letter.expired);
        assert!(letter.body.contains("still under warranty (expires May 1, 2024)"));
    }

    #[test]
    fn test_reason_parsing() {
        assert_eq!("stopped-working".parse(), Ok(ClaimReason::StoppedWorking));
        assert_eq!("Damaged in Transit".parse(), Ok(ClaimReason::DamagedInTransit));
        assert_eq!("DEFECTIVE".parse(), Ok(ClaimReason::DefectiveProduct));
        assert!("broken".parse::<ClaimReason>().is_err());
    }
}
