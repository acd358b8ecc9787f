//! In-memory item database.
//!
//! Rows live in ordered maps keyed by item id, with a reverse index from
//! location to contained items so contents queries do not scan every row.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use cargohold_foundation::{BlueprintData, Error, ItemData, ItemId, Result};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::ItemDatabase;

/// First id handed out by a fresh database.
pub const DEFAULT_FIRST_ITEM_ID: u32 = 140_000_000;

/// Persisted tables. This is what a snapshot contains.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct Tables {
    pub(crate) items: BTreeMap<ItemId, ItemData>,
    pub(crate) blueprints: BTreeMap<ItemId, BlueprintData>,
    pub(crate) next_id: u32,
}

/// Counters of backend calls, for tests and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseStats {
    /// Calls to [`ItemDatabase::load_item`].
    pub item_loads: usize,
    /// Calls to [`ItemDatabase::insert_item`].
    pub item_inserts: usize,
    /// Calls to [`ItemDatabase::save_item`].
    pub item_saves: usize,
    /// Calls to [`ItemDatabase::delete_item`].
    pub item_deletes: usize,
    /// Calls to [`ItemDatabase::item_contents`].
    pub contents_queries: usize,
    /// Calls to [`ItemDatabase::save_blueprint`].
    pub blueprint_saves: usize,
}

/// Item database held entirely in memory.
#[derive(Debug)]
pub struct MemoryDatabase {
    tables: RefCell<Tables>,
    by_location: RefCell<BTreeMap<ItemId, BTreeSet<ItemId>>>,
    stats: Cell<DatabaseStats>,
    fail_next_insert: Cell<bool>,
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDatabase {
    /// Creates an empty database allocating ids from [`DEFAULT_FIRST_ITEM_ID`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_first_item_id(DEFAULT_FIRST_ITEM_ID)
    }

    /// Creates an empty database allocating ids from `first`.
    ///
    /// A `first` of 0 is bumped to 1; id 0 is never allocated.
    #[must_use]
    pub fn with_first_item_id(first: u32) -> Self {
        Self::from_tables(Tables {
            next_id: first.max(1),
            ..Tables::default()
        })
    }

    pub(crate) fn from_tables(tables: Tables) -> Self {
        let mut by_location: BTreeMap<ItemId, BTreeSet<ItemId>> = BTreeMap::new();
        for (id, data) in &tables.items {
            by_location.entry(data.location).or_default().insert(*id);
        }
        Self {
            tables: RefCell::new(tables),
            by_location: RefCell::new(by_location),
            stats: Cell::new(DatabaseStats::default()),
            fail_next_insert: Cell::new(false),
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn tables(&self) -> Tables {
        self.tables.borrow().clone()
    }

    /// Writes a row under a caller-chosen id, e.g. for fixtures of world
    /// locations and characters. Overwrites an existing row.
    pub fn seed_item(&self, id: ItemId, data: ItemData) {
        let mut tables = self.tables.borrow_mut();
        if let Some(old) = tables.items.get(&id) {
            self.unindex(old.location, id);
        }
        self.by_location
            .borrow_mut()
            .entry(data.location)
            .or_default()
            .insert(id);
        tables.items.insert(id, data);
        if id.get() >= tables.next_id {
            tables.next_id = id.get().saturating_add(1);
        }
    }

    /// Writes a blueprint row under a caller-chosen id.
    pub fn seed_blueprint(&self, id: ItemId, data: BlueprintData) {
        self.tables.borrow_mut().blueprints.insert(id, data);
    }

    /// Returns a copy of a row without counting it as a load.
    #[must_use]
    pub fn row(&self, id: ItemId) -> Option<ItemData> {
        self.tables.borrow().items.get(&id).cloned()
    }

    /// Returns a copy of a blueprint row.
    #[must_use]
    pub fn blueprint_row(&self, id: ItemId) -> Option<BlueprintData> {
        self.tables.borrow().blueprints.get(&id).copied()
    }

    /// Returns true if a row exists.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.tables.borrow().items.contains_key(&id)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.borrow().items.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.borrow().items.is_empty()
    }

    /// Returns the call counters.
    #[must_use]
    pub fn stats(&self) -> DatabaseStats {
        self.stats.get()
    }

    /// Resets the call counters.
    pub fn reset_stats(&self) {
        self.stats.set(DatabaseStats::default());
    }

    /// Makes the next [`ItemDatabase::insert_item`] fail.
    pub fn fail_next_insert(&self) {
        self.fail_next_insert.set(true);
    }

    fn count(&self, f: impl FnOnce(&mut DatabaseStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    fn unindex(&self, location: ItemId, id: ItemId) {
        let mut index = self.by_location.borrow_mut();
        if let Some(ids) = index.get_mut(&location) {
            ids.remove(&id);
            if ids.is_empty() {
                index.remove(&location);
            }
        }
    }
}

impl ItemDatabase for MemoryDatabase {
    fn load_item(&self, id: ItemId) -> Result<Option<ItemData>> {
        self.count(|s| s.item_loads += 1);
        Ok(self.tables.borrow().items.get(&id).cloned())
    }

    fn insert_item(&self, data: &ItemData) -> Result<ItemId> {
        self.count(|s| s.item_inserts += 1);
        if self.fail_next_insert.replace(false) {
            return Err(Error::storage("insert rejected"));
        }
        let mut tables = self.tables.borrow_mut();
        let id = ItemId::new(tables.next_id);
        tables.next_id = tables
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::storage("item id space exhausted"))?;
        tables.items.insert(id, data.clone());
        self.by_location
            .borrow_mut()
            .entry(data.location)
            .or_default()
            .insert(id);
        trace!(item_id = %id, type_id = %data.type_id, "inserted item row");
        Ok(id)
    }

    fn save_item(&self, id: ItemId, data: &ItemData) -> Result<()> {
        self.count(|s| s.item_saves += 1);
        let mut tables = self.tables.borrow_mut();
        let row = tables
            .items
            .get_mut(&id)
            .ok_or_else(|| Error::item_not_found(id))?;
        if row.location != data.location {
            self.unindex(row.location, id);
            self.by_location
                .borrow_mut()
                .entry(data.location)
                .or_default()
                .insert(id);
        }
        *row = data.clone();
        Ok(())
    }

    fn delete_item(&self, id: ItemId) -> Result<()> {
        self.count(|s| s.item_deletes += 1);
        let removed = self.tables.borrow_mut().items.remove(&id);
        if let Some(data) = removed {
            self.unindex(data.location, id);
            trace!(item_id = %id, "deleted item row");
        }
        Ok(())
    }

    fn item_contents(&self, id: ItemId) -> Result<Vec<ItemId>> {
        self.count(|s| s.contents_queries += 1);
        Ok(self
            .by_location
            .borrow()
            .get(&id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    fn load_blueprint(&self, id: ItemId) -> Result<Option<BlueprintData>> {
        Ok(self.tables.borrow().blueprints.get(&id).copied())
    }

    fn insert_blueprint(&self, id: ItemId, data: &BlueprintData) -> Result<()> {
        let mut tables = self.tables.borrow_mut();
        if !tables.items.contains_key(&id) {
            return Err(Error::item_not_found(id));
        }
        tables.blueprints.insert(id, *data);
        Ok(())
    }

    fn save_blueprint(&self, id: ItemId, data: &BlueprintData) -> Result<()> {
        self.count(|s| s.blueprint_saves += 1);
        let mut tables = self.tables.borrow_mut();
        let row = tables
            .blueprints
            .get_mut(&id)
            .ok_or_else(|| Error::blueprint_not_found(id))?;
        *row = *data;
        Ok(())
    }

    fn delete_blueprint(&self, id: ItemId) -> Result<()> {
        self.tables.borrow_mut().blueprints.remove(&id);
        Ok(())
    }
}
