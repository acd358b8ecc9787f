//! The item cache: one live instance per item identity.
//!
//! [`ItemCache`] is the explicit context every cross-item operation takes.
//! It resolves identities to live items, constructing them from the
//! persistence backend on first access, and owns the collaborators the
//! entities talk to.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use cargohold_foundation::{
    BlueprintData, CategoryId, Error, ErrorKind, ItemData, ItemId, ItemType, Result, TypeId,
};
use cargohold_storage::{AttributeStore, ItemDatabase, NotificationSink, TypeCatalog};
use tracing::{debug, error, trace};

use crate::config::InventoryConfig;
use crate::item::{InventoryItem, ItemKind, ItemRef};

/// Registry of live items and the collaborators they persist through.
pub struct ItemCache {
    database: Rc<dyn ItemDatabase>,
    catalog: Rc<dyn TypeCatalog>,
    attributes: Rc<dyn AttributeStore>,
    sessions: Rc<dyn NotificationSink>,
    resident: RefCell<HashMap<ItemId, ItemRef>>,
    config: InventoryConfig,
}

impl ItemCache {
    /// Creates an empty cache over the given collaborators.
    pub fn new(
        database: Rc<dyn ItemDatabase>,
        catalog: Rc<dyn TypeCatalog>,
        attributes: Rc<dyn AttributeStore>,
        sessions: Rc<dyn NotificationSink>,
    ) -> Self {
        Self {
            database,
            catalog,
            attributes,
            sessions,
            resident: RefCell::new(HashMap::new()),
            config: InventoryConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: InventoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub(crate) fn database(&self) -> &dyn ItemDatabase {
        self.database.as_ref()
    }

    pub(crate) fn attribute_store(&self) -> &dyn AttributeStore {
        self.attributes.as_ref()
    }

    pub(crate) fn sessions(&self) -> &dyn NotificationSink {
        self.sessions.as_ref()
    }

    /// Resolves type metadata.
    ///
    /// # Errors
    ///
    /// Returns a load failure if the catalog has no such type.
    pub fn item_type(&self, id: TypeId) -> Result<Rc<ItemType>> {
        self.catalog
            .item_type(id)
            .ok_or_else(|| Error::type_not_found(id))
    }

    /// Returns the live instance of an item, constructing it on first access.
    ///
    /// With `recurse`, the whole subtree below the item is loaded as well.
    ///
    /// # Errors
    ///
    /// Returns a load failure if the row, its type, its blueprint row or its
    /// attributes cannot be loaded, and an invariant violation if the row
    /// disagrees with its type metadata. A failure while loading the subtree
    /// leaves the item itself resident.
    pub fn get_item(&self, id: ItemId, recurse: bool) -> Result<ItemRef> {
        let cached = self.resident.borrow().get(&id).cloned();
        let item = match cached {
            Some(item) => item,
            None => self.construct(id)?,
        };
        if recurse {
            item.load_contents(self, true)?;
        }
        Ok(item)
    }

    fn construct(&self, id: ItemId) -> Result<ItemRef> {
        let data = self
            .database
            .load_item(id)?
            .ok_or_else(|| Error::item_not_found(id))?;
        let ty = self.item_type(data.type_id)?;

        let kind = if ty.is_blueprint() {
            let blueprint = self
                .database
                .load_blueprint(id)?
                .ok_or_else(|| Error::blueprint_not_found(id))?;
            ItemKind::Blueprint(RefCell::new(blueprint))
        } else {
            ItemKind::Generic
        };

        let attributes = self.attributes.load_attributes(id)?;
        let item = Rc::new(
            InventoryItem::new(id, ty, data, attributes, kind)
                .inspect_err(|e| error!(item_id = %id, error = %e, "inconsistent item row"))?,
        );

        if let Some(container) = self.get_if_contents_loaded(item.location()) {
            container.add_contained_item(&item)?;
        }

        self.resident.borrow_mut().insert(id, Rc::clone(&item));
        trace!(item_id = %id, type_id = %item.type_id(), "item resident");
        Ok(item)
    }

    /// Returns the live instance of a container, but only if it is resident
    /// and its contents are loaded.
    #[must_use]
    pub fn get_if_contents_loaded(&self, id: ItemId) -> Option<ItemRef> {
        self.resident
            .borrow()
            .get(&id)
            .filter(|item| item.is_contents_loaded())
            .cloned()
    }

    /// Returns the live instance of an item without loading it.
    #[must_use]
    pub fn get_resident(&self, id: ItemId) -> Option<ItemRef> {
        self.resident.borrow().get(&id).cloned()
    }

    /// True if the item has a live instance.
    #[must_use]
    pub fn is_resident(&self, id: ItemId) -> bool {
        self.resident.borrow().contains_key(&id)
    }

    /// Returns the number of live instances held by the cache.
    #[must_use]
    pub fn resident_count(&self) -> usize {
        self.resident.borrow().len()
    }

    pub(crate) fn evict(&self, id: ItemId) -> Option<ItemRef> {
        let evicted = self.resident.borrow_mut().remove(&id);
        if evicted.is_some() {
            trace!(item_id = %id, "evicted item");
        }
        evicted
    }

    /// Creates a new item row and returns its live instance.
    ///
    /// An empty name is replaced by the type name. Blueprint types are
    /// spawned with default blueprint data.
    ///
    /// # Errors
    ///
    /// Returns a load failure for an unknown type, a validation failure for
    /// a singleton descriptor whose quantity is not 1, and any storage error.
    pub fn spawn_item(&self, mut data: ItemData) -> Result<ItemRef> {
        let ty = self.item_type(data.type_id)?;
        if ty.is_blueprint() {
            return self.spawn_blueprint(data, BlueprintData::default());
        }

        prepare(&ty, &mut data)?;
        let id = self.database.insert_item(&data)?;
        debug!(item_id = %id, type_id = %ty.id, quantity = data.quantity, "spawned item");
        self.get_item(id, false)
    }

    /// Creates a new blueprint item with the given manufacturing fields.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the type is not a blueprint type,
    /// plus everything [`ItemCache::spawn_item`] can return.
    pub fn spawn_blueprint(&self, mut data: ItemData, blueprint: BlueprintData) -> Result<ItemRef> {
        let ty = self.item_type(data.type_id)?;
        if !ty.is_blueprint() {
            error!(type_id = %ty.id, name = %ty.name, "blueprint spawn with a non-blueprint type");
            return Err(Error::new(ErrorKind::CategoryMismatch {
                type_id: ty.id,
                expected: CategoryId::BLUEPRINT,
                actual: ty.category,
            }));
        }

        prepare(&ty, &mut data)?;
        let id = self.database.insert_item(&data)?;
        self.database.insert_blueprint(id, &blueprint)?;
        debug!(item_id = %id, type_id = %ty.id, copy = blueprint.copy, "spawned blueprint");
        self.get_item(id, false)
    }

    /// True if moving `item` into `location` would make it its own
    /// transitive container.
    ///
    /// Walks up from `location` through live instances where available and
    /// persisted rows otherwise, stopping at the first world location.
    pub(crate) fn would_create_cycle(&self, item: ItemId, location: ItemId) -> Result<bool> {
        let mut seen = HashSet::new();
        let mut current = location;
        while current.is_valid() && seen.insert(current) {
            if current == item {
                return Ok(true);
            }
            current = match self.get_resident(current) {
                Some(container) => container.location(),
                None => match self.database.load_item(current)? {
                    Some(row) => row.location,
                    None => break,
                },
            };
        }
        Ok(false)
    }
}

fn prepare(ty: &ItemType, data: &mut ItemData) -> Result<()> {
    if data.name.is_empty() {
        data.name.clone_from(&ty.name);
    }
    if !data.is_consistent() {
        error!(type_id = %ty.id, quantity = data.quantity, "singleton spawn with quantity other than 1");
        return Err(Error::new(ErrorKind::SingletonQuantity(ItemId::NONE)));
    }
    Ok(())
}
