//! Recursive deletion.

use std::rc::Rc;

use cargohold_foundation::Result;
use tracing::{debug, error};

use crate::cache::ItemCache;
use crate::item::{InventoryItem, ItemKind};

/// Name given to an item that was deleted while still held elsewhere.
pub const BAD_DELETED_ITEM: &str = "BAD DELETED ITEM";

impl InventoryItem {
    /// Deletes this item and everything it contains, consuming the caller's
    /// handle.
    ///
    /// The item is first parked at the junk location under the system owner
    /// so it leaves every client's view even if a later step fails. Its
    /// children are then read from the store, so rows that appeared after
    /// the contents were loaded are found too, and deleted one by one. It
    /// is evicted from the cache, and its attributes and rows are removed.
    ///
    /// If anyone besides the caller still holds the item afterwards, it is
    /// invalidated in place (renamed, emptied, marked loaded) and an error
    /// is logged. Those holders must not trust it.
    ///
    /// # Errors
    ///
    /// Returns the first storage error, with the chain of items being
    /// deleted attached as context. Steps already taken are not undone.
    pub fn delete(self: Rc<Self>, cache: &ItemCache) -> Result<()> {
        self.delete_held(cache, 1)
    }

    /// Deletes this item, expecting `holders` strong handles to remain once
    /// the cache and every container have let go.
    pub(crate) fn delete_held(self: Rc<Self>, cache: &ItemCache, holders: usize) -> Result<()> {
        let id = self.id();
        self.delete_subtree(cache, holders)
            .map_err(|e| e.within("delete", id))
    }

    fn delete_subtree(self: Rc<Self>, cache: &ItemCache, expected: usize) -> Result<()> {
        let config = cache.config();
        self.move_to(cache, config.junk_location, config.junk_flag, true)?;
        self.change_owner(cache, config.system_owner, true)?;

        self.link_stored_contents(cache)?;
        for child in self.children() {
            // a stale edge must not take an item that lives elsewhere with it
            if child.location() == self.id() {
                child.delete(cache)?;
            }
        }
        self.contents_mut().clear();

        cache.evict(self.id());
        if let ItemKind::Blueprint(_) = self.kind {
            cache.database().delete_blueprint(self.id())?;
        }
        cache.attribute_store().delete_attributes(self.id())?;
        cache.database().delete_item(self.id())?;

        let holders = Rc::strong_count(&self);
        if holders == expected {
            debug!(item_id = %self.id(), "deleted item");
        } else {
            error!(
                item_id = %self.id(),
                holders,
                expected,
                "deleted item is still referenced; invalidating it"
            );
            let mut data = self.data.borrow_mut();
            data.name = BAD_DELETED_ITEM.to_string();
            data.quantity = 0;
            self.contents_loaded.set(true);
        }
        Ok(())
    }
}
