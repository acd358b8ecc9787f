//! The item entity and its shared-ownership handle.
//!
//! Every live item is held through an [`ItemRef`]. The strong count of that
//! handle is the item's reference count: one for cache residency, one for
//! each containment edge pointing at it, and one for each external holder.
//! Dropping the last handle releases the item and, with it, the handles it
//! holds on its loaded children.

use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use cargohold_foundation::{
    AttributeId, AttributeMap, AttributeValue, BlueprintData, CategoryId, Error, ErrorKind,
    GroupId, ItemChange, ItemData, ItemField, ItemFlag, ItemId, ItemType, Notification, OwnerId,
    Point, Result, TypeId,
};
use tracing::trace;

use crate::blueprint::BlueprintItem;
use crate::cache::ItemCache;

/// Shared handle to a live item.
pub type ItemRef = Rc<InventoryItem>;

/// Variant-specific state of an item.
#[derive(Debug)]
pub enum ItemKind {
    /// A plain item.
    Generic,
    /// A manufacturing blueprint.
    Blueprint(RefCell<BlueprintData>),
}

/// One persisted item instance.
///
/// The cache guarantees at most one live `InventoryItem` per [`ItemId`].
/// Every mutator writes the row back before returning.
pub struct InventoryItem {
    id: ItemId,
    ty: Rc<ItemType>,
    pub(crate) data: RefCell<ItemData>,
    pub(crate) attributes: RefCell<AttributeMap>,
    pub(crate) contents: RefCell<BTreeMap<ItemId, ItemRef>>,
    pub(crate) contents_loaded: Cell<bool>,
    pub(crate) kind: ItemKind,
}

impl InventoryItem {
    /// Builds an entity from its persisted state.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the row's type differs from the
    /// resolved metadata, or if a blueprint is built from a type outside the
    /// blueprint category.
    pub(crate) fn new(
        id: ItemId,
        ty: Rc<ItemType>,
        data: ItemData,
        attributes: AttributeMap,
        kind: ItemKind,
    ) -> Result<Self> {
        if data.type_id != ty.id {
            return Err(Error::new(ErrorKind::TypeMismatch {
                item: id,
                descriptor: data.type_id,
                metadata: ty.id,
            }));
        }
        if matches!(kind, ItemKind::Blueprint(_)) && !ty.is_blueprint() {
            return Err(Error::new(ErrorKind::CategoryMismatch {
                type_id: ty.id,
                expected: CategoryId::BLUEPRINT,
                actual: ty.category,
            }));
        }
        Ok(Self {
            id,
            ty,
            data: RefCell::new(data),
            attributes: RefCell::new(attributes),
            contents: RefCell::new(BTreeMap::new()),
            contents_loaded: Cell::new(false),
            kind,
        })
    }

    /// Returns the item identity.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the type metadata.
    #[must_use]
    pub fn item_type(&self) -> &ItemType {
        &self.ty
    }

    /// Returns the type identity.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.ty.id
    }

    /// Returns the type group.
    #[must_use]
    pub fn group(&self) -> GroupId {
        self.ty.group
    }

    /// Returns the type category.
    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.ty.category
    }

    /// Returns the volume of one unit.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.ty.volume
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    /// Returns the owner.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.data.borrow().owner
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> ItemId {
        self.data.borrow().location
    }

    /// Returns the flag.
    #[must_use]
    pub fn flag(&self) -> ItemFlag {
        self.data.borrow().flag
    }

    /// Returns the contraband bit.
    #[must_use]
    pub fn contraband(&self) -> bool {
        self.data.borrow().contraband
    }

    /// Returns the singleton bit.
    #[must_use]
    pub fn singleton(&self) -> bool {
        self.data.borrow().singleton
    }

    /// Returns the stack size.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.data.borrow().quantity
    }

    /// Returns the position in space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.data.borrow().position
    }

    /// Returns the custom info blob.
    #[must_use]
    pub fn custom_info(&self) -> String {
        self.data.borrow().custom_info.clone()
    }

    /// Returns a copy of the persisted descriptor.
    #[must_use]
    pub fn data(&self) -> ItemData {
        self.data.borrow().clone()
    }

    /// True once the direct children have been loaded. Never reverts.
    #[must_use]
    pub fn is_contents_loaded(&self) -> bool {
        self.contents_loaded.get()
    }

    /// Returns the variant-specific state.
    #[must_use]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// True for blueprint items.
    #[must_use]
    pub fn is_blueprint(&self) -> bool {
        matches!(self.kind, ItemKind::Blueprint(_))
    }

    /// Returns the blueprint view of this item, if it is one.
    #[must_use]
    pub fn as_blueprint(&self) -> Option<BlueprintItem<'_>> {
        match &self.kind {
            ItemKind::Blueprint(data) => Some(BlueprintItem::new(self, data)),
            ItemKind::Generic => None,
        }
    }

    /// Returns one attribute.
    #[must_use]
    pub fn attribute(&self, id: AttributeId) -> Option<AttributeValue> {
        self.attributes.borrow().get(id)
    }

    /// Borrows the live attribute map.
    pub fn attributes(&self) -> Ref<'_, AttributeMap> {
        self.attributes.borrow()
    }

    /// Returns a snapshot of every attribute for handing to a client.
    ///
    /// The snapshot shares structure with the live map and is unaffected
    /// by later changes.
    #[must_use]
    pub fn encode_attributes(&self) -> AttributeMap {
        self.attributes.borrow().clone()
    }

    /// Sets an attribute and writes the attribute map back.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute store rejects the write.
    pub fn set_attribute(
        &self,
        cache: &ItemCache,
        id: AttributeId,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        self.attributes.borrow_mut().set(id, value.into());
        cache
            .attribute_store()
            .save_attributes(self.id, &self.attributes.borrow())
    }

    /// True when the `IS_ONLINE` attribute is set.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.attribute(AttributeId::IS_ONLINE)
            .is_some_and(|v| v.as_int() != 0)
    }

    /// Delivers a change record to `to`, if they are online.
    pub(crate) fn send_item_change(
        &self,
        cache: &ItemCache,
        to: OwnerId,
        changes: BTreeMap<ItemField, i64>,
    ) {
        let Some(session) = cache.sessions().session(to) else {
            return;
        };
        session.send(Notification::ItemChanged(ItemChange {
            row: self.entity_row(),
            changes,
        }));
    }

    /// Delivers a record to the current owner, if they are online.
    pub(crate) fn notify_owner(&self, cache: &ItemCache, notification: Notification) {
        if let Some(session) = cache.sessions().session(self.owner()) {
            session.send(notification);
        }
    }
}

impl Drop for InventoryItem {
    fn drop(&mut self) {
        trace!(item_id = %self.id, "releasing item");
    }
}

impl fmt::Debug for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("InventoryItem")
            .field("id", &self.id)
            .field("type_id", &self.ty.id)
            .field("name", &data.name)
            .field("owner", &data.owner)
            .field("location", &data.location)
            .field("flag", &data.flag)
            .field("quantity", &data.quantity)
            .field("singleton", &data.singleton)
            .field("contents", &self.contents.borrow().keys().collect::<Vec<_>>())
            .field("contents_loaded", &self.contents_loaded.get())
            .finish_non_exhaustive()
    }
}
