//! Warranty lifecycle: expiration math, alert schedules and claim letters.

pub mod alerts;
pub mod claim;
mod clock;

pub use alerts::{AlertScheduler, WarrantyAlert};
pub use claim::{ClaimLetter, ClaimReason};
pub use clock::{ProgressTone, UrgencyBadge, WarrantyBucket, WarrantyClock, WarrantyState};
