//! Threshold-based insights derived from an analytics snapshot.

use serde::Serialize;

use super::stats::AnalyticsSnapshot;
use crate::models::config::CollectionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    Warning,
    Info,
    Suggestion,
    DataQuality,
}

/// A single recommendation. Each rule fires independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Some warranties run out within the expiring-soon window.
    ExpiringSoon { count: usize },
    /// The most tracked category.
    TopCategory { category: String, count: usize },
    /// Average warranty is shorter than the configured threshold.
    ShortWarranty { average_months: u32 },
    /// Some items have no purchase price.
    MissingPrices { count: usize },
}

impl Insight {
    /// Evaluate every rule against `snapshot`, in display order.
    pub fn derive(snapshot: &AnalyticsSnapshot, config: &CollectionConfig) -> Vec<Insight> {
        let mut insights = Vec::new();

        if snapshot.buckets.expiring_soon > 0 {
            insights.push(Insight::ExpiringSoon {
                count: snapshot.buckets.expiring_soon,
            });
        }

        if let Some(category) = &snapshot.most_common_category {
            insights.push(Insight::TopCategory {
                category: category.clone(),
                count: snapshot.category_count(category),
            });
        }

        if snapshot.average_warranty_months < config.short_warranty_months {
            insights.push(Insight::ShortWarranty {
                average_months: snapshot.average_warranty_months,
            });
        }

        if snapshot.items_without_price > 0 {
            insights.push(Insight::MissingPrices {
                count: snapshot.items_without_price,
            });
        }

        insights
    }

    pub fn severity(&self) -> InsightSeverity {
        match self {
            Insight::ExpiringSoon { .. } => InsightSeverity::Warning,
            Insight::TopCategory { .. } => InsightSeverity::Info,
            Insight::ShortWarranty { .. } => InsightSeverity::Suggestion,
            Insight::MissingPrices { .. } => InsightSeverity::DataQuality,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Insight::ExpiringSoon { .. } => "Action Needed",
            Insight::TopCategory { .. } => "Top Category",
            Insight::ShortWarranty { .. } => "Tip",
            Insight::MissingPrices { .. } => "Complete Your Data",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Insight::ExpiringSoon { count } => format!(
                "{} item(s) have warranties expiring soon. Review them now.",
                count
            ),
            Insight::TopCategory { category, count } => format!(
                "{} is your most tracked category with {} items.",
                category, count
            ),
            Insight::ShortWarranty { .. } => {
                "Consider extended warranties for high-value electronics to increase protection."
                    .to_string()
            }
            Insight::MissingPrices { count } => format!(
                "{} item(s) don't have purchase prices. Add them for better value tracking.",
                count
            ),
        }
    }
}
