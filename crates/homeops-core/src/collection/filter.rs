//! Free-text and category filtering.

use serde::{Deserialize, Serialize};

use crate::models::item::Item;

/// Composable item filter. Every set criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    /// Case-insensitive substring matched against name or category.
    pub search: Option<String>,

    /// Exact category name.
    pub category: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether this filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.search_needle().is_none() && self.category.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = self.search_needle() {
            let hit = item.name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        match &self.category {
            Some(category) => item.category == *category,
            None => true,
        }
    }

    /// Matching items in input order.
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    // Blank search text is treated as no search.
    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn items() -> Vec<Item> {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        vec![
            Item::new("Laptop", "Electronics", d, 12).unwrap(),
            Item::new("Desk Lamp", "Furniture", d, 12).unwrap(),
            Item::new("Electric Kettle", "Kitchen", d, 12).unwrap(),
        ]
    }

    fn names(found: Vec<&Item>) -> Vec<&str> {
        found.into_iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let items = items();
        let filter = ItemFilter::new().with_search("ELECTRIC");
        assert_eq!(names(filter.apply(&items)), vec!["Laptop", "Electric Kettle"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let items = items();
        let filter = ItemFilter::new().with_search("electric").with_category("Kitchen");
        assert_eq!(names(filter.apply(&items)), vec!["Electric Kettle"]);
    }

    #[test]
    fn test_category_is_exact() {
        let items = items();
        assert!(ItemFilter::new().with_category("kitchen").apply(&items).is_empty());
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let items = items();
        let filter = ItemFilter::new().with_search("   ");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&items).len(), 3);
    }
}
