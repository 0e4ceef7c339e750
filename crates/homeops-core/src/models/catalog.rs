//! Category and tag catalogs.
//!
//! Both catalogs are plain values: build one at startup (optionally seeded
//! with the user's custom entries from config) and pass it to whatever needs it.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::CatalogError;

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryInfo {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// Symbol name used by presentation layers.
    pub icon: String,
    /// RGB color as six hex digits, without `#`.
    pub color_hex: String,
    #[serde(default)]
    pub is_custom: bool,
}

impl CategoryInfo {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color_hex: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            color_hex: color_hex.into(),
            is_custom: false,
        }
    }

    /// Parse `color_hex` into an RGB triple. Accepts 3- or 6-digit forms.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex: String = self.color_hex.chars().filter(|c| c.is_ascii_hexdigit()).collect();
        let value = u32::from_str_radix(&hex, 16).ok()?;
        match hex.len() {
            3 => Some((
                ((value >> 8) & 0xF) as u8 * 17,
                ((value >> 4) & 0xF) as u8 * 17,
                (value & 0xF) as u8 * 17,
            )),
            6 => Some(((value >> 16) as u8, (value >> 8) as u8, value as u8)),
            _ => None,
        }
    }
}

const PREDEFINED_CATEGORIES: [(&str, &str, &str); 16] = [
    ("Electronics", "desktopcomputer", "007AFF"),
    ("Appliances", "refrigerator.fill", "AF52DE"),
    ("Furniture", "chair.lounge.fill", "FF9500"),
    ("Clothing", "tshirt.fill", "FF2D55"),
    ("Kitchen", "fork.knife", "FF3B30"),
    ("Tools", "wrench.and.screwdriver.fill", "5856D6"),
    ("Sports", "figure.run", "34C759"),
    ("Garden", "leaf.fill", "32D74B"),
    ("Automotive", "car.fill", "8E8E93"),
    ("Home Decor", "lamp.table.fill", "FF9500"),
    ("Office", "keyboard", "5AC8FA"),
    ("Audio/Video", "hifispeaker.fill", "007AFF"),
    ("Gaming", "gamecontroller.fill", "AF52DE"),
    ("Baby & Kids", "figure.and.child.holdinghands", "FF2D55"),
    ("Pet Supplies", "pawprint.fill", "FF9500"),
    ("Other", "cube.box.fill", "8E8E93"),
];

/// Predefined plus user-defined categories.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    predefined: Vec<CategoryInfo>,
    custom: Vec<CategoryInfo>,
}

impl CategoryCatalog {
    /// Catalog with only the predefined categories.
    pub fn new() -> Self {
        Self {
            predefined: PREDEFINED_CATEGORIES
                .iter()
                .map(|(name, icon, color)| CategoryInfo::new(*name, *icon, *color))
                .collect(),
            custom: Vec::new(),
        }
    }

    /// Catalog seeded with previously saved custom categories.
    ///
    /// Entries that collide with an existing name are skipped.
    pub fn with_custom(custom: impl IntoIterator<Item = CategoryInfo>) -> Self {
        let mut catalog = Self::new();
        for category in custom {
            if let Err(e) = catalog.add_custom(category) {
                debug!("Skipping saved category: {}", e);
            }
        }
        catalog
    }

    /// Predefined categories followed by custom ones.
    pub fn all(&self) -> impl Iterator<Item = &CategoryInfo> {
        self.predefined.iter().chain(self.custom.iter())
    }

    pub fn names(&self) -> Vec<&str> {
        self.all().map(|c| c.name.as_str()).collect()
    }

    pub fn custom(&self) -> &[CategoryInfo] {
        &self.custom
    }

    /// Exact-name lookup.
    pub fn lookup(&self, name: &str) -> Option<&CategoryInfo> {
        self.all().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        let lower = name.to_lowercase();
        self.all()
            .filter(|c| Some(c.id) != except)
            .any(|c| c.name.to_lowercase() == lower)
    }

    /// Add a custom category. Names are trimmed and must be unique
    /// (case-insensitive) across the whole catalog.
    pub fn add_custom(&mut self, mut category: CategoryInfo) -> Result<&CategoryInfo, CatalogError> {
        category.name = category.name.trim().to_string();
        if category.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.name_taken(&category.name, None) {
            return Err(CatalogError::DuplicateCategory(category.name));
        }

        category.is_custom = true;
        self.custom.push(category);
        Ok(&self.custom[self.custom.len() - 1])
    }

    /// Replace a custom category, matched by id.
    pub fn update_custom(&mut self, mut category: CategoryInfo) -> Result<(), CatalogError> {
        if self.predefined.iter().any(|c| c.id == category.id) {
            return Err(CatalogError::NotCustom(category.name));
        }
        category.name = category.name.trim().to_string();
        if category.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.name_taken(&category.name, Some(category.id)) {
            return Err(CatalogError::DuplicateCategory(category.name));
        }

        let slot = self
            .custom
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or(CatalogError::UnknownCategory(category.id))?;
        category.is_custom = true;
        *slot = category;
        Ok(())
    }

    /// Remove a custom category by id.
    pub fn remove_custom(&mut self, id: Uuid) -> Result<CategoryInfo, CatalogError> {
        if let Some(predefined) = self.predefined.iter().find(|c| c.id == id) {
            return Err(CatalogError::NotCustom(predefined.name.clone()));
        }
        let index = self
            .custom
            .iter()
            .position(|c| c.id == id)
            .ok_or(CatalogError::UnknownCategory(id))?;
        Ok(self.custom.remove(index))
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

const PREDEFINED_TAGS: [&str; 10] = [
    "Important",
    "Gift",
    "Urgent",
    "High Value",
    "Replacement Needed",
    "Under Review",
    "Extended Warranty",
    "Limited Edition",
    "Vintage",
    "Collectible",
];

/// Predefined plus user-defined tags.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    custom: Vec<String>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_custom(custom: impl IntoIterator<Item = String>) -> Self {
        let mut catalog = Self::new();
        for tag in custom {
            catalog.add(&tag);
        }
        catalog
    }

    /// Add a custom tag. Blank and already-known tags are ignored;
    /// returns whether the tag was added.
    pub fn add(&mut self, tag: &str) -> bool {
        let trimmed = tag.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.custom.push(trimmed.to_string());
        true
    }

    /// Remove a custom tag; predefined tags stay.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|t| t != tag);
        before != self.custom.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        PREDEFINED_TAGS.contains(&tag) || self.custom.iter().any(|t| t == tag)
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Every known tag, sorted lexically.
    pub fn all(&self) -> Vec<String> {
        let mut tags: Vec<String> = PREDEFINED_TAGS
            .iter()
            .map(|t| t.to_string())
            .chain(self.custom.iter().cloned())
            .collect();
        tags.sort();
        tags
    }
}
