//! Module online state.

use cargohold_foundation::{AttributeId, Notification, Result};
use tracing::debug;

use crate::cache::ItemCache;
use crate::item::InventoryItem;

impl InventoryItem {
    /// Brings a fitted module online.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute cannot be saved.
    pub fn put_online(&self, cache: &ItemCache) -> Result<()> {
        self.set_online(cache, true)
    }

    /// Takes a fitted module offline.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute cannot be saved.
    pub fn put_offline(&self, cache: &ItemCache) -> Result<()> {
        self.set_online(cache, false)
    }

    fn set_online(&self, cache: &ItemCache, online: bool) -> Result<()> {
        self.set_attribute(cache, AttributeId::IS_ONLINE, online)?;
        debug!(item_id = %self.id(), online, "module online state changed");
        self.notify_owner(
            cache,
            Notification::ModuleOnlineChanged {
                item: self.id(),
                online,
            },
        );
        Ok(())
    }
}
