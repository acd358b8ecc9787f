//! In-memory attribute store.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use cargohold_foundation::{AttributeMap, Error, ErrorKind, ItemId, Result};

use crate::traits::AttributeStore;

/// Attribute maps keyed by item, with optional load-failure injection.
#[derive(Debug, Default)]
pub struct MemoryAttributeStore {
    maps: RefCell<HashMap<ItemId, AttributeMap>>,
    failing: RefCell<HashSet<ItemId>>,
}

impl MemoryAttributeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the attributes of an item.
    pub fn seed(&self, item: ItemId, attributes: AttributeMap) {
        self.maps.borrow_mut().insert(item, attributes);
    }

    /// Makes every load of `item` fail until [`MemoryAttributeStore::clear_failures`].
    pub fn fail_load(&self, item: ItemId) {
        self.failing.borrow_mut().insert(item);
    }

    /// Removes every injected failure.
    pub fn clear_failures(&self) {
        self.failing.borrow_mut().clear();
    }

    /// Returns the persisted attributes of an item, if any were saved.
    #[must_use]
    pub fn persisted(&self, item: ItemId) -> Option<AttributeMap> {
        self.maps.borrow().get(&item).cloned()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn load_attributes(&self, item: ItemId) -> Result<AttributeMap> {
        if self.failing.borrow().contains(&item) {
            return Err(Error::new(ErrorKind::AttributeLoad {
                item,
                message: "attribute backend unavailable".to_string(),
            }));
        }
        Ok(self.maps.borrow().get(&item).cloned().unwrap_or_default())
    }

    fn save_attributes(&self, item: ItemId, attributes: &AttributeMap) -> Result<()> {
        self.maps.borrow_mut().insert(item, attributes.clone());
        Ok(())
    }

    fn delete_attributes(&self, item: ItemId) -> Result<()> {
        self.maps.borrow_mut().remove(&item);
        Ok(())
    }
}
