//! Tunables of the item model.

use cargohold_foundation::{ItemFlag, ItemId, OwnerId};

/// Fixed locations and owners the item model parks items at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Location a deleted item is moved to before its row is removed.
    pub junk_location: ItemId,
    /// Flag a deleted item is moved to.
    pub junk_flag: ItemFlag,
    /// Owner a deleted item is handed to.
    pub system_owner: OwnerId,
    /// Temporary location of a freshly split stack when the split notifies.
    pub staging_location: ItemId,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            junk_location: ItemId::new(6),
            junk_flag: ItemFlag::AUTOFIT,
            system_owner: OwnerId::new(2),
            staging_location: ItemId::new(1),
        }
    }
}

impl InventoryConfig {
    /// Sets the disposal location and flag.
    #[must_use]
    pub fn with_junk(mut self, location: ItemId, flag: ItemFlag) -> Self {
        self.junk_location = location;
        self.junk_flag = flag;
        self
    }

    /// Sets the system owner.
    #[must_use]
    pub fn with_system_owner(mut self, owner: OwnerId) -> Self {
        self.system_owner = owner;
        self
    }

    /// Sets the split staging location.
    #[must_use]
    pub fn with_staging_location(mut self, location: ItemId) -> Self {
        self.staging_location = location;
        self
    }
}
