//! Numeric identifiers for items, types, owners, and attributes.
//!
//! Every identifier is a thin `u32` newtype so that an owner can never be
//! passed where a location is expected. Item identity is allocated by the
//! persistence backend and is never reused.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Creates an identifier from its raw value.
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }
    };
}

id_type!(
    /// Identity of one persisted item.
    ///
    /// Locations share this space: an item's `location` is either another
    /// item (its container) or a world location that is never loaded as an
    /// item.
    ItemId,
    "Item"
);

id_type!(
    /// Identity of an item type in the type catalog.
    TypeId,
    "Type"
);

id_type!(
    /// Identity of an owning character or corporation.
    OwnerId,
    "Owner"
);

id_type!(
    /// Type group, used for presentation only.
    GroupId,
    "Group"
);

id_type!(
    /// Type category; selects the entity variant at construction.
    CategoryId,
    "Category"
);

id_type!(
    /// Key of a numeric per-item attribute.
    AttributeId,
    "Attribute"
);

impl ItemId {
    /// The null identity. Never allocated by a backend.
    pub const NONE: Self = Self(0);

    /// Returns true unless this is [`ItemId::NONE`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl OwnerId {
    /// Returns the owner identity of a character item.
    ///
    /// Characters own themselves and share the item id space.
    #[must_use]
    pub const fn from_item(item: ItemId) -> Self {
        Self(item.0)
    }
}

impl CategoryId {
    /// Owners (characters, corporations).
    pub const OWNER: Self = Self(1);
    /// Ships.
    pub const SHIP: Self = Self(6);
    /// Fittable modules.
    pub const MODULE: Self = Self(7);
    /// Charges and ammunition.
    pub const CHARGE: Self = Self(8);
    /// Manufacturing blueprints. Items of this category are blueprint variants.
    pub const BLUEPRINT: Self = Self(9);
    /// Skills.
    pub const SKILL: Self = Self(16);
}

impl AttributeId {
    /// Whether a fitted module is online (0 or 1).
    pub const IS_ONLINE: Self = Self(2);
    /// Skill points trained into a skill.
    pub const SKILL_POINTS: Self = Self(276);
    /// Trained level of a skill.
    pub const SKILL_LEVEL: Self = Self(280);
}
