//! Field mutators. Each one writes the row back before returning.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::rc::Rc;

use cargohold_foundation::{
    Error, ErrorKind, ItemData, ItemField, ItemFlag, ItemId, MergeMismatch, OwnerId, Point,
    Result, TypeId,
};
use tracing::{debug, error, trace};

use crate::cache::ItemCache;
use crate::item::{InventoryItem, ItemKind, ItemRef};

impl InventoryItem {
    /// Writes the row back, and optionally the attribute map and the rows of
    /// every loaded descendant. Blueprints also write their blueprint row.
    ///
    /// # Errors
    ///
    /// Returns the first storage error.
    pub fn save(&self, cache: &ItemCache, recursive: bool, save_attributes: bool) -> Result<()> {
        trace!(item_id = %self.id(), recursive, save_attributes, "saving item");
        cache.database().save_item(self.id(), &self.data.borrow())?;
        if let ItemKind::Blueprint(blueprint) = &self.kind {
            cache
                .database()
                .save_blueprint(self.id(), &blueprint.borrow())?;
        }
        if save_attributes {
            cache
                .attribute_store()
                .save_attributes(self.id(), &self.attributes.borrow())?;
        }
        if recursive {
            for child in self.children() {
                child.save(cache, true, save_attributes)?;
            }
        }
        Ok(())
    }

    /// Moves this item to another location and flag.
    ///
    /// Resident containers with loaded contents are kept in step: the
    /// destination takes a handle first, and only then does the source drop
    /// its own, so a rejected link leaves the item where it was. Containers
    /// that are not loaded pick the change up from the store when they load.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the move would make this item its
    /// own container, or a storage error.
    pub fn move_to(
        self: &Rc<Self>,
        cache: &ItemCache,
        location: ItemId,
        flag: ItemFlag,
        notify: bool,
    ) -> Result<()> {
        let (old_location, old_flag) = {
            let data = self.data.borrow();
            (data.location, data.flag)
        };
        if location == old_location && flag == old_flag {
            return Ok(());
        }

        if location != old_location {
            if cache.would_create_cycle(self.id(), location)? {
                error!(item_id = %self.id(), %location, "move would create a containment cycle");
                return Err(Error::new(ErrorKind::ContainmentCycle {
                    item: self.id(),
                    location,
                }));
            }
            if let Some(new) = cache.get_if_contents_loaded(location) {
                new.add_contained_item(self)?;
            }
            if let Some(old) = cache.get_if_contents_loaded(old_location) {
                old.remove_contained_item(self.id());
            }
        }

        {
            let mut data = self.data.borrow_mut();
            data.location = location;
            data.flag = flag;
        }
        self.save(cache, false, false)?;
        debug!(item_id = %self.id(), from = %old_location, to = %location, %flag, "moved item");

        if notify {
            let mut changes = BTreeMap::from([(ItemField::Location, i64::from(old_location.get()))]);
            if flag != old_flag {
                changes.insert(ItemField::Flag, i64::from(old_flag.0));
            }
            self.send_item_change(cache, self.owner(), changes);
        }
        Ok(())
    }

    /// Moves this item into `container` under `flag`.
    ///
    /// # Errors
    ///
    /// See [`InventoryItem::move_to`].
    pub fn move_into(
        self: &Rc<Self>,
        cache: &ItemCache,
        container: &InventoryItem,
        flag: ItemFlag,
        notify: bool,
    ) -> Result<()> {
        self.move_to(cache, container.id(), flag, notify)
    }

    /// Changes the flag, keeping the location.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn change_flag(&self, cache: &ItemCache, flag: ItemFlag, notify: bool) -> Result<()> {
        let old_flag = self.flag();
        if flag == old_flag {
            return Ok(());
        }

        self.data.borrow_mut().flag = flag;
        self.save(cache, false, false)?;

        if notify {
            let changes = BTreeMap::from([(ItemField::Flag, i64::from(old_flag.0))]);
            self.send_item_change(cache, self.owner(), changes);
        }
        Ok(())
    }

    /// Adds `delta` to the stack size.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the result would be negative or
    /// if this item is a singleton.
    pub fn alter_quantity(&self, cache: &ItemCache, delta: i32, notify: bool) -> Result<()> {
        if delta == 0 {
            return Ok(());
        }

        let quantity = self.quantity();
        let updated = i64::from(quantity) + i64::from(delta);
        if updated < 0 {
            error!(item_id = %self.id(), quantity, delta, "quantity would become negative");
            return Err(Error::negative_quantity(self.id(), quantity, i64::from(delta)));
        }
        let updated = u32::try_from(updated)
            .map_err(|_| Error::invalid_amount(self.id(), i64::from(delta)))?;
        self.set_quantity(cache, updated, notify)
    }

    /// Sets the stack size.
    ///
    /// # Errors
    ///
    /// Always fails on a singleton.
    pub fn set_quantity(&self, cache: &ItemCache, quantity: u32, notify: bool) -> Result<()> {
        if self.singleton() {
            error!(item_id = %self.id(), quantity, "cannot set the quantity of a singleton");
            return Err(Error::new(ErrorKind::SingletonQuantity(self.id())));
        }

        let old = std::mem::replace(&mut self.data.borrow_mut().quantity, quantity);
        self.save(cache, false, false)?;

        if notify {
            let changes = BTreeMap::from([(ItemField::Quantity, i64::from(old))]);
            self.send_item_change(cache, self.owner(), changes);
        }
        Ok(())
    }

    /// Takes `quantity` off this stack into a freshly spawned stack of the
    /// same type, owner, location and flag.
    ///
    /// With `notify`, the new stack is spawned at the staging location and
    /// then moved into place so the client sees it arrive.
    ///
    /// If spawning fails, the quantity already taken off this stack is not
    /// put back.
    ///
    /// # Errors
    ///
    /// Fails if `quantity` is not positive, exceeds this stack, or this item
    /// is a singleton, and on any storage error.
    pub fn split(&self, cache: &ItemCache, quantity: i32, notify: bool) -> Result<ItemRef> {
        if quantity <= 0 {
            error!(item_id = %self.id(), quantity, "split into a non-positive chunk");
            return Err(Error::invalid_amount(self.id(), i64::from(quantity)));
        }
        self.alter_quantity(cache, -quantity, notify)?;

        let (type_id, owner, location, flag) = {
            let data = self.data.borrow();
            (data.type_id, data.owner, data.location, data.flag)
        };
        let spawn_at = if notify {
            cache.config().staging_location
        } else {
            location
        };
        let fresh = cache
            .spawn_item(ItemData::stack(type_id, owner, spawn_at, flag, quantity.unsigned_abs()))
            .inspect_err(|e| {
                error!(item_id = %self.id(), quantity, error = %e, "split lost its new stack");
            })?;
        if notify {
            fresh.move_to(cache, location, flag, true)?;
        }
        debug!(item_id = %self.id(), new_item = %fresh.id(), quantity, "split stack");
        Ok(fresh)
    }

    /// Merges `quantity` units of `other` into this stack; 0 means all of it.
    ///
    /// When every unit moves, `other` is deleted; the caller's handle then
    /// refers to a deleted item and should be dropped.
    ///
    /// # Errors
    ///
    /// Fails without changing anything on a type, location or flag mismatch,
    /// when both sides are the same item, when the amount is not positive or
    /// exceeds `other`, or when this item is a singleton.
    pub fn merge(&self, cache: &ItemCache, other: &ItemRef, quantity: i32, notify: bool) -> Result<()> {
        let mismatch = if other.id() == self.id() {
            Some(MergeMismatch::SameItem)
        } else if other.type_id() != self.type_id() {
            Some(MergeMismatch::Type)
        } else if other.location() != self.location() {
            Some(MergeMismatch::Location {
                expected: self.location(),
                actual: other.location(),
            })
        } else if other.flag() != self.flag() {
            Some(MergeMismatch::Flag {
                expected: self.flag(),
                actual: other.flag(),
            })
        } else {
            None
        };
        if let Some(reason) = mismatch {
            error!(item_id = %self.id(), other = %other.id(), %reason, "merge rejected");
            return Err(Error::merge_mismatch(self.id(), other.id(), reason));
        }

        let available = other.quantity();
        let amount = if quantity == 0 {
            i64::from(available)
        } else {
            i64::from(quantity)
        };
        if amount <= 0 || amount > i64::from(available) {
            error!(item_id = %self.id(), other = %other.id(), amount, available, "merge amount out of range");
            return Err(Error::invalid_amount(other.id(), amount));
        }
        let delta = i32::try_from(amount).map_err(|_| Error::invalid_amount(other.id(), amount))?;

        self.alter_quantity(cache, delta, notify)?;
        debug!(item_id = %self.id(), other = %other.id(), amount, "merged stacks");
        if amount == i64::from(available) {
            // the caller keeps its handle alongside this one
            Rc::clone(other).delete_held(cache, 2)
        } else {
            other.alter_quantity(cache, -delta, notify)
        }
    }

    /// Merges loaded same-type stacks sharing a slot into the first stack of
    /// that type in that slot.
    ///
    /// Only children matching `flag` and `owner` (when given) take part.
    /// Singletons are never merged.
    ///
    /// # Errors
    ///
    /// Returns the first merge failure.
    pub fn stack_contained_items(
        &self,
        cache: &ItemCache,
        flag: Option<ItemFlag>,
        owner: Option<OwnerId>,
    ) -> Result<()> {
        let candidates: Vec<ItemRef> = self
            .contents
            .borrow()
            .values()
            .filter(|child| {
                !child.singleton()
                    && flag.is_none_or(|f| child.flag() == f)
                    && owner.is_none_or(|o| child.owner() == o)
            })
            .cloned()
            .collect();

        let mut firsts: BTreeMap<(TypeId, ItemFlag), ItemRef> = BTreeMap::new();
        for child in candidates {
            match firsts.entry((child.type_id(), child.flag())) {
                Entry::Occupied(first) => first.get().merge(cache, &child, 0, true)?,
                Entry::Vacant(slot) => {
                    slot.insert(child);
                }
            }
        }
        Ok(())
    }

    /// Hands this item to another owner. With `notify`, both the new and
    /// the old owner are told.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn change_owner(&self, cache: &ItemCache, owner: OwnerId, notify: bool) -> Result<()> {
        let old_owner = self.owner();
        if owner == old_owner {
            return Ok(());
        }

        self.data.borrow_mut().owner = owner;
        self.save(cache, false, false)?;

        if notify {
            let changes = BTreeMap::from([(ItemField::Owner, i64::from(old_owner.get()))]);
            self.send_item_change(cache, owner, changes.clone());
            self.send_item_change(cache, old_owner, changes);
        }
        Ok(())
    }

    /// Switches between individual tracking and fungible stack.
    ///
    /// The quantity is left as it is.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn change_singleton(&self, cache: &ItemCache, singleton: bool, notify: bool) -> Result<()> {
        let old = self.singleton();
        if singleton == old {
            return Ok(());
        }

        self.data.borrow_mut().singleton = singleton;
        self.save(cache, false, false)?;

        if notify {
            let changes = BTreeMap::from([(ItemField::Singleton, i64::from(old))]);
            self.send_item_change(cache, self.owner(), changes);
        }
        Ok(())
    }

    /// Renames this item.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn rename(&self, cache: &ItemCache, name: impl Into<String>) -> Result<()> {
        self.data.borrow_mut().name = name.into();
        self.save(cache, false, false)
    }

    /// Replaces the custom info blob; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn set_custom_info(&self, cache: &ItemCache, custom_info: Option<&str>) -> Result<()> {
        self.data.borrow_mut().custom_info = custom_info.unwrap_or_default().to_string();
        self.save(cache, false, false)
    }

    /// Moves this item in space. Nothing is written if the position is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn relocate(&self, cache: &ItemCache, position: Point) -> Result<()> {
        if self.position() == position {
            return Ok(());
        }
        self.data.borrow_mut().position = position;
        self.save(cache, false, false)
    }
}
