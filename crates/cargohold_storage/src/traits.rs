//! Contracts for the collaborators the item model depends on.
//!
//! All methods take `&self`: the item model runs on one simulation thread
//! and implementations use interior mutability where they need it.

use std::rc::Rc;

use cargohold_foundation::{
    AttributeMap, BlueprintData, ItemData, ItemId, ItemType, Notification, OwnerId, Result, TypeId,
};

/// Row-level persistence for items and blueprints.
///
/// Every call is synchronous and durable when it returns `Ok`.
pub trait ItemDatabase {
    /// Fetches the row of an item. `Ok(None)` when no row exists.
    fn load_item(&self, id: ItemId) -> Result<Option<ItemData>>;

    /// Inserts a new row and returns its freshly allocated, non-zero id.
    fn insert_item(&self, data: &ItemData) -> Result<ItemId>;

    /// Overwrites the row of an existing item.
    fn save_item(&self, id: ItemId, data: &ItemData) -> Result<()>;

    /// Removes the row of an item. Removing an absent row is not an error.
    fn delete_item(&self, id: ItemId) -> Result<()>;

    /// Lists the ids of every item whose location is `id`.
    fn item_contents(&self, id: ItemId) -> Result<Vec<ItemId>>;

    /// Fetches the blueprint row keyed by an item id.
    fn load_blueprint(&self, id: ItemId) -> Result<Option<BlueprintData>>;

    /// Inserts the blueprint row of a freshly inserted item.
    fn insert_blueprint(&self, id: ItemId, data: &BlueprintData) -> Result<()>;

    /// Overwrites a blueprint row.
    fn save_blueprint(&self, id: ItemId, data: &BlueprintData) -> Result<()>;

    /// Removes a blueprint row.
    fn delete_blueprint(&self, id: ItemId) -> Result<()>;
}

/// Resolves type identifiers to immutable metadata.
pub trait TypeCatalog {
    /// Returns the metadata of a type, or `None` on a miss.
    fn item_type(&self, id: TypeId) -> Option<Rc<ItemType>>;
}

/// Per-item numeric attribute persistence.
pub trait AttributeStore {
    /// Loads every attribute of an item. Items with none yield an empty map.
    fn load_attributes(&self, item: ItemId) -> Result<AttributeMap>;

    /// Replaces the persisted attributes of an item.
    fn save_attributes(&self, item: ItemId, attributes: &AttributeMap) -> Result<()>;

    /// Removes every attribute of an item.
    fn delete_attributes(&self, item: ItemId) -> Result<()>;
}

/// An online client.
pub trait ClientSession {
    /// Delivers a record. Fire-and-forget: no acknowledgment, no retry.
    fn send(&self, notification: Notification);
}

/// Resolves owners to their online session.
pub trait NotificationSink {
    /// Returns the session of an owner, or `None` when offline.
    fn session(&self, owner: OwnerId) -> Option<Rc<dyn ClientSession>>;
}
