//! In-memory type catalog.

use std::collections::HashMap;
use std::rc::Rc;

use cargohold_foundation::{ItemType, TypeId};

use crate::traits::TypeCatalog;

/// Type metadata registered up front and shared by reference.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: HashMap<TypeId, Rc<ItemType>>,
}

impl TypeTable {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, replacing any previous entry with the same id.
    pub fn register(&mut self, ty: ItemType) -> Rc<ItemType> {
        let ty = Rc::new(ty);
        self.types.insert(ty.id, Rc::clone(&ty));
        ty
    }

    /// Builder form of [`TypeTable::register`].
    #[must_use]
    pub fn with(mut self, ty: ItemType) -> Self {
        self.register(ty);
        self
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for TypeTable {
    fn item_type(&self, id: TypeId) -> Option<Rc<ItemType>> {
        self.types.get(&id).cloned()
    }
}

impl FromIterator<ItemType> for TypeTable {
    fn from_iter<I: IntoIterator<Item = ItemType>>(iter: I) -> Self {
        let mut table = Self::new();
        for ty in iter {
            table.register(ty);
        }
        table
    }
}
