//! Read-only views of item state for clients.

use cargohold_foundation::{EntityRow, ItemFlag, OwnerId};

use crate::item::InventoryItem;

impl InventoryItem {
    /// Builds the row describing this item's current state.
    #[must_use]
    pub fn entity_row(&self) -> EntityRow {
        let data = self.data.borrow();
        EntityRow {
            item_id: self.id(),
            type_id: self.type_id(),
            owner: data.owner,
            location: data.location,
            flag: data.flag,
            contraband: data.contraband,
            singleton: data.singleton,
            quantity: data.quantity,
            group: self.group(),
            category: self.category(),
            custom_info: (!data.custom_info.is_empty()).then(|| data.custom_info.clone()),
        }
    }

    /// Builds rows for the loaded children matching `flag` and `owner`, when
    /// given.
    #[must_use]
    pub fn inventory_rows(&self, flag: Option<ItemFlag>, owner: Option<OwnerId>) -> Vec<EntityRow> {
        self.contents
            .borrow()
            .values()
            .filter(|child| {
                flag.is_none_or(|f| child.flag() == f) && owner.is_none_or(|o| child.owner() == o)
            })
            .map(|child| child.entity_row())
            .collect()
    }

    /// Returns the volume still free in a hold.
    ///
    /// The cargo hold starts from the type's capacity and the drone bay from
    /// its drone capacity; any other flag starts from zero. Loaded children
    /// in that flag are then subtracted.
    #[must_use]
    pub fn remaining_capacity(&self, flag: ItemFlag) -> f64 {
        let total = match flag {
            ItemFlag::CARGO_HOLD => self.item_type().capacity,
            ItemFlag::DRONE_BAY => self.item_type().drone_capacity,
            _ => 0.0,
        };
        let used: f64 = self
            .contents
            .borrow()
            .values()
            .filter(|child| child.flag() == flag)
            .map(|child| f64::from(child.quantity()) * child.volume())
            .sum();
        total - used
    }
}
