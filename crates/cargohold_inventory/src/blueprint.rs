//! The blueprint variant.
//!
//! A blueprint is an [`InventoryItem`] whose kind carries [`BlueprintData`].
//! [`BlueprintItem`] is a borrowed view exposing the manufacturing fields;
//! obtain one with [`InventoryItem::as_blueprint`].

use std::cell::RefCell;

use cargohold_foundation::{
    BlueprintAttributes, BlueprintData, Error, ErrorKind, ItemId, Result, TypeId,
};
use tracing::{error, trace};

use crate::cache::ItemCache;
use crate::item::{InventoryItem, ItemRef};

/// Blueprint view of an item.
#[derive(Clone, Copy, Debug)]
pub struct BlueprintItem<'a> {
    item: &'a InventoryItem,
    data: &'a RefCell<BlueprintData>,
}

impl<'a> BlueprintItem<'a> {
    pub(crate) fn new(item: &'a InventoryItem, data: &'a RefCell<BlueprintData>) -> Self {
        Self { item, data }
    }

    /// Returns the underlying item.
    #[must_use]
    pub fn item(&self) -> &'a InventoryItem {
        self.item
    }

    /// Returns the item identity.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.item.id()
    }

    /// Returns a copy of the manufacturing fields.
    #[must_use]
    pub fn data(&self) -> BlueprintData {
        *self.data.borrow()
    }

    /// True for a copy, false for an original.
    #[must_use]
    pub fn copy(&self) -> bool {
        self.data.borrow().copy
    }

    /// Returns the material research level.
    #[must_use]
    pub fn material_level(&self) -> u32 {
        self.data.borrow().material_level
    }

    /// Returns the productivity research level.
    #[must_use]
    pub fn productivity_level(&self) -> u32 {
        self.data.borrow().productivity_level
    }

    /// Returns the runs left on a copy.
    #[must_use]
    pub fn licensed_production_runs_remaining(&self) -> i32 {
        self.data.borrow().licensed_production_runs_remaining
    }

    /// Returns the manufactured type, if the type metadata names one.
    #[must_use]
    pub fn product_type(&self) -> Option<TypeId> {
        self.item
            .item_type()
            .blueprint
            .as_ref()
            .map(|info| info.product_type)
    }

    /// Returns the material waste after research: the type's base waste
    /// divided by one plus the material level.
    #[must_use]
    pub fn wastage_factor(&self) -> f64 {
        let base = self
            .item
            .item_type()
            .blueprint
            .as_ref()
            .map_or(0.0, |info| info.waste_factor);
        base / (1.0 + f64::from(self.material_level()))
    }

    /// Builds the manufacturing summary handed to clients.
    #[must_use]
    pub fn attributes(&self) -> BlueprintAttributes {
        let info = self.item.item_type().blueprint.clone().unwrap_or_default();
        let data = self.data();
        BlueprintAttributes {
            blueprint_id: self.id(),
            copy: data.copy,
            productivity_level: data.productivity_level,
            material_level: data.material_level,
            licensed_production_runs_remaining: data.licensed_production_runs_remaining,
            wastage_factor: self.wastage_factor(),
            product_type: info.product_type,
            manufacturing_time: info.production_time,
            max_production_limit: info.max_production_limit,
            research_material_time: info.research_material_time,
            research_tech_time: info.research_tech_time,
            research_productivity_time: info.research_productivity_time,
            research_copy_time: info.research_copy_time,
        }
    }

    fn update(&self, cache: &ItemCache, f: impl FnOnce(&mut BlueprintData)) -> Result<()> {
        f(&mut self.data.borrow_mut());
        trace!(item_id = %self.id(), data = ?self.data(), "blueprint updated");
        self.item.save(cache, false, false)
    }

    /// Marks this blueprint as a copy or an original.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn set_copy(&self, cache: &ItemCache, copy: bool) -> Result<()> {
        self.update(cache, |data| data.copy = copy)
    }

    /// Sets the material research level.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn set_material_level(&self, cache: &ItemCache, level: u32) -> Result<()> {
        self.update(cache, |data| data.material_level = level)
    }

    /// Adds `delta` to the material research level.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the level would become negative.
    pub fn alter_material_level(&self, cache: &ItemCache, delta: i32) -> Result<()> {
        let level = self.checked_level(self.material_level(), delta)?;
        self.set_material_level(cache, level)
    }

    /// Sets the productivity research level.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn set_productivity_level(&self, cache: &ItemCache, level: u32) -> Result<()> {
        self.update(cache, |data| data.productivity_level = level)
    }

    /// Adds `delta` to the productivity research level.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the level would become negative.
    pub fn alter_productivity_level(&self, cache: &ItemCache, delta: i32) -> Result<()> {
        let level = self.checked_level(self.productivity_level(), delta)?;
        self.set_productivity_level(cache, level)
    }

    /// Sets the runs left on a copy.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn set_licensed_production_runs_remaining(&self, cache: &ItemCache, runs: i32) -> Result<()> {
        self.update(cache, |data| data.licensed_production_runs_remaining = runs)
    }

    /// Adds `delta` to the runs left. The result is not range-checked.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn alter_licensed_production_runs_remaining(
        &self,
        cache: &ItemCache,
        delta: i32,
    ) -> Result<()> {
        let runs = self.licensed_production_runs_remaining().saturating_add(delta);
        self.set_licensed_production_runs_remaining(cache, runs)
    }

    fn checked_level(&self, level: u32, delta: i32) -> Result<u32> {
        let updated = i64::from(level) + i64::from(delta);
        if updated < 0 {
            error!(item_id = %self.id(), level, delta, "research level would become negative");
        }
        u32::try_from(updated).map_err(|_| {
            Error::new(ErrorKind::NegativeLevel {
                item: self.id(),
                level,
                delta: i64::from(delta),
            })
        })
    }

    /// Splits off `quantity` units into a new blueprint that carries the
    /// same manufacturing fields.
    ///
    /// A plain [`InventoryItem::split`] of a blueprint yields a blueprint
    /// with default fields; use this instead.
    ///
    /// # Errors
    ///
    /// See [`InventoryItem::split`].
    pub fn split_blueprint(&self, cache: &ItemCache, quantity: i32, notify: bool) -> Result<ItemRef> {
        let fresh = self.item.split(cache, quantity, notify)?;
        let Some(blueprint) = fresh.as_blueprint() else {
            return Err(Error::new(ErrorKind::Internal(format!(
                "split of blueprint {} produced a plain item",
                self.id()
            ))));
        };
        let data = self.data();
        blueprint.update(cache, |fields| *fields = data)?;
        Ok(fresh)
    }
}
