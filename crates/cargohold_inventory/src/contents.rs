//! Containment: the map from child id to child handle, and its queries.
//!
//! A container's map mirrors exactly its children that are resident, and
//! only once the container's contents have been loaded. Queries come in two
//! forms: `peek_*` borrows into the map, everything else hands out fresh
//! handles the caller owns.

use std::cell::{Ref, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

use cargohold_foundation::{Error, ItemFlag, ItemId, Result};
use tracing::{error, trace, warn};

use crate::cache::ItemCache;
use crate::item::{InventoryItem, ItemRef};

impl InventoryItem {
    /// Links a resident child into this container.
    ///
    /// Re-adding the same instance is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if a different instance is already
    /// registered under the same id.
    pub fn add_contained_item(&self, item: &ItemRef) -> Result<()> {
        let mut contents = self.contents.borrow_mut();
        match contents.get(&item.id()) {
            Some(existing) if Rc::ptr_eq(existing, item) => Ok(()),
            Some(_) => {
                error!(
                    container = %self.id(),
                    item_id = %item.id(),
                    "two live instances represent the same item"
                );
                Err(Error::duplicate_instance(item.id()))
            }
            None => {
                contents.insert(item.id(), Rc::clone(item));
                trace!(container = %self.id(), item_id = %item.id(), "linked child");
                Ok(())
            }
        }
    }

    /// Unlinks a child, releasing the handle the container held on it.
    ///
    /// Returns false if the child was not linked.
    pub fn remove_contained_item(&self, id: ItemId) -> bool {
        let removed = self.contents.borrow_mut().remove(&id);
        if removed.is_some() {
            trace!(container = %self.id(), item_id = %id, "unlinked child");
        }
        removed.is_some()
    }

    /// True if `id` is a loaded child of this item, or with `recursive`, of
    /// any loaded descendant.
    #[must_use]
    pub fn contains_item(&self, id: ItemId, recursive: bool) -> bool {
        let contents = self.contents.borrow();
        if contents.contains_key(&id) {
            return true;
        }
        recursive && contents.values().any(|child| child.contains_item(id, true))
    }

    /// Borrows the containment map.
    ///
    /// The borrow must be released before any operation that links or
    /// unlinks children of this item.
    pub fn contents(&self) -> Ref<'_, BTreeMap<ItemId, ItemRef>> {
        self.contents.borrow()
    }

    pub(crate) fn contents_mut(&self) -> RefMut<'_, BTreeMap<ItemId, ItemRef>> {
        self.contents.borrow_mut()
    }

    /// Returns handles to every loaded child, in id order.
    #[must_use]
    pub fn children(&self) -> Vec<ItemRef> {
        self.contents.borrow().values().cloned().collect()
    }

    /// Returns a handle to a loaded child by id.
    #[must_use]
    pub fn get_by_id(&self, id: ItemId) -> Option<ItemRef> {
        self.contents.borrow().get(&id).cloned()
    }

    /// Borrows the first loaded child in `flag`, without taking a handle.
    pub fn peek_first_by_flag(&self, flag: ItemFlag) -> Option<Ref<'_, ItemRef>> {
        Ref::filter_map(self.contents.borrow(), |contents| {
            contents.values().find(|child| child.flag() == flag)
        })
        .ok()
    }

    /// Returns a handle to the first loaded child in `flag`.
    #[must_use]
    pub fn find_first_by_flag(&self, flag: ItemFlag) -> Option<ItemRef> {
        self.contents
            .borrow()
            .values()
            .find(|child| child.flag() == flag)
            .cloned()
    }

    /// Returns handles to every loaded child in `flag`.
    #[must_use]
    pub fn find_by_flag(&self, flag: ItemFlag) -> Vec<ItemRef> {
        self.collect_children(|f| f == flag)
    }

    /// Returns handles to every loaded child whose flag lies in `low..=high`.
    #[must_use]
    pub fn find_by_flag_range(&self, low: ItemFlag, high: ItemFlag) -> Vec<ItemRef> {
        self.collect_children(|f| (low..=high).contains(&f))
    }

    /// Returns handles to every loaded child whose flag is in `flags`.
    #[must_use]
    pub fn find_by_flag_set(&self, flags: &[ItemFlag]) -> Vec<ItemRef> {
        self.collect_children(|f| flags.contains(&f))
    }

    /// Returns handles to every fitted module and rig.
    #[must_use]
    pub fn equipped(&self) -> Vec<ItemRef> {
        self.collect_children(|f| f.is_module_slot() || f.is_rig_slot())
    }

    fn collect_children(&self, pred: impl Fn(ItemFlag) -> bool) -> Vec<ItemRef> {
        self.contents
            .borrow()
            .values()
            .filter(|child| pred(child.flag()))
            .cloned()
            .collect()
    }

    /// Loads the direct children of this item, and with `recursive`, the
    /// whole subtree.
    ///
    /// The store is queried at most once per item; later calls only recurse
    /// into children that were loaded already. A child that fails to load is
    /// logged and skipped, and so is a stored row that would close a
    /// containment cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if a contents query itself fails.
    pub fn load_contents(&self, cache: &ItemCache, recursive: bool) -> Result<()> {
        if !self.contents_loaded.get() {
            trace!(item_id = %self.id(), recursive, "loading contents");
            self.link_stored_contents(cache)?;
        }

        if recursive {
            for child in self.children() {
                child
                    .load_contents(cache, true)
                    .map_err(|e| e.within("load_contents", self.id()))?;
            }
        }
        Ok(())
    }

    /// Reads this item's child ids from the store and links every one that
    /// is not linked yet, then marks the contents loaded.
    ///
    /// A child that already sits on this item's chain of locations is left
    /// unlinked, so loaded containment stays acyclic even over corrupt rows.
    pub(crate) fn link_stored_contents(&self, cache: &ItemCache) -> Result<()> {
        let ids = cache.database().item_contents(self.id())?;
        for child_id in ids {
            if self.contents.borrow().contains_key(&child_id) {
                continue;
            }
            if cache.would_create_cycle(child_id, self.id())? {
                warn!(
                    container = %self.id(),
                    item_id = %child_id,
                    "stored rows form a containment cycle; not linking"
                );
                continue;
            }
            match cache.get_item(child_id, false) {
                Ok(child) => {
                    // a duplicate is logged and rejected by the link itself
                    self.add_contained_item(&child).ok();
                }
                Err(e) => warn!(
                    container = %self.id(),
                    item_id = %child_id,
                    error = %e,
                    "skipping child that failed to load"
                ),
            }
        }
        self.contents_loaded.set(true);
        Ok(())
    }
}
