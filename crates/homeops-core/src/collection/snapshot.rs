//! Versioned, copy-on-write item collection.
//!
//! Readers take an `Arc` to one immutable snapshot and keep it for a whole
//! computation. Writers build a replacement and swap it in under the lock.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::ItemError;
use crate::models::item::{Item, ItemId};

/// One immutable version of the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionSnapshot {
    version: u64,
    items: Vec<Item>,
}

impl CollectionSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Shared item store handing out consistent snapshots.
#[derive(Debug, Default)]
pub struct ItemLibrary {
    current: RwLock<Arc<CollectionSnapshot>>,
}

impl ItemLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection. Items are validated.
    pub fn with_items(items: Vec<Item>) -> Result<Self, ItemError> {
        for item in &items {
            item.validate()?;
        }
        Ok(Self {
            current: RwLock::new(Arc::new(CollectionSnapshot { version: 0, items })),
        })
    }

    /// The current version.
    pub fn snapshot(&self) -> Arc<CollectionSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Add an item and return the new version.
    pub fn insert(&self, item: Item) -> Result<u64, ItemError> {
        item.validate()?;
        self.mutate(|items| {
            items.push(item);
            Ok(())
        })
    }

    /// Replace the item with the same id and return the new version.
    pub fn update(&self, item: Item) -> Result<u64, ItemError> {
        item.validate()?;
        self.mutate(|items| {
            let slot = items
                .iter_mut()
                .find(|existing| existing.id == item.id)
                .ok_or(ItemError::NotFound(item.id))?;
            *slot = item;
            Ok(())
        })
    }

    /// Delete an item and return it with the new version.
    pub fn remove(&self, id: ItemId) -> Result<(Item, u64), ItemError> {
        let mut removed = None;
        let version = self.mutate(|items| {
            let index = items
                .iter()
                .position(|item| item.id == id)
                .ok_or(ItemError::NotFound(id))?;
            removed = Some(items.remove(index));
            Ok(())
        })?;
        removed.map(|item| (item, version)).ok_or(ItemError::NotFound(id))
    }

    /// Swap in a whole new collection and return the new version.
    pub fn replace_all(&self, items: Vec<Item>) -> Result<u64, ItemError> {
        for item in &items {
            item.validate()?;
        }
        self.mutate(|current| {
            *current = items;
            Ok(())
        })
    }

    fn mutate<F>(&self, f: F) -> Result<u64, ItemError>
    where
        F: FnOnce(&mut Vec<Item>) -> Result<(), ItemError>,
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut items = guard.items.clone();
        f(&mut items)?;

        let version = guard.version + 1;
        *guard = Arc::new(CollectionSnapshot { version, items });
        debug!("Item library now at version {} ({} items)", version, guard.items.len());
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::thread;

    fn item(name: &str) -> Item {
        Item::new(name, "Misc", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 12).unwrap()
    }

    #[test]
    fn test_snapshot_survives_later_writes() {
        let library = ItemLibrary::new();
        library.insert(item("Drill")).unwrap();
        let before = library.snapshot();

        library.insert(item("Ladder")).unwrap();

        assert_eq!(before.version(), 1);
        assert_eq!(before.len(), 1);
        assert_eq!(library.snapshot().len(), 2);
        assert_eq!(library.version(), 2);
    }

    #[test]
    fn test_update_and_remove() {
        let library = ItemLibrary::new();
        let mut drill = item("Drill");
        let id = drill.id;
        library.insert(drill.clone()).unwrap();

        drill.name = "Cordless Drill".to_string();
        assert_eq!(library.update(drill).unwrap(), 2);
        assert_eq!(library.snapshot().get(id).unwrap().name, "Cordless Drill");

        let (removed, version) = library.remove(id).unwrap();
        assert_eq!(removed.name, "Cordless Drill");
        assert_eq!(version, 3);
        assert!(library.snapshot().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_version() {
        let library = ItemLibrary::new();
        let missing = item("Ghost");
        assert_eq!(library.remove(missing.id), Err(ItemError::NotFound(missing.id)));

        let mut bad = item("Saw");
        bad.warranty_duration_months = 0;
        assert_eq!(library.insert(bad), Err(ItemError::InvalidWarrantyDuration(0)));
        assert_eq!(library.version(), 0);
    }

    #[test]
    fn test_replace_all() {
        let library = ItemLibrary::with_items(vec![item("A")]).unwrap();
        let version = library.replace_all(vec![item("B"), item("C")]).unwrap();
        assert_eq!(version, 1);
        assert_eq!(library.snapshot().len(), 2);
    }

    #[test]
    fn test_concurrent_readers_see_whole_versions() {
        let library = Arc::new(ItemLibrary::new());

        let writer = {
            let library = Arc::clone(&library);
            thread::spawn(move || {
                for i in 0..50 {
                    library.insert(item(&format!("Item {}", i))).unwrap();
                }
            })
        };

        for _ in 0..50 {
            let snapshot = library.snapshot();
            assert_eq!(snapshot.len() as u64, snapshot.version());
        }

        writer.join().unwrap();
        assert_eq!(library.version(), 50);
    }
}
