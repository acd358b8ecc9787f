//! Plain value descriptors used to construct, persist, and transfer items.
//!
//! Descriptors carry no identity: the persistence backend assigns an
//! [`ItemId`](crate::ItemId) when a descriptor is inserted.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::flag::ItemFlag;
use crate::ids::{ItemId, OwnerId, TypeId};

/// A position in space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Everything needed to construct or persist one item row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemData {
    /// Display name. An empty name is replaced by the type name on spawn.
    pub name: String,
    /// Item type.
    pub type_id: TypeId,
    /// Owning character or corporation.
    pub owner: OwnerId,
    /// Containing item or world location.
    pub location: ItemId,
    /// Slot within the location.
    pub flag: ItemFlag,
    /// Whether the item is contraband.
    pub contraband: bool,
    /// Individually tracked (`true`) or a fungible stack (`false`).
    pub singleton: bool,
    /// Stack size. Always 1 for singletons.
    pub quantity: u32,
    /// Position when floating in space.
    pub position: Point,
    /// Opaque persisted blob.
    pub custom_info: String,
}

impl ItemData {
    /// Describes a fungible stack at the origin with no name.
    #[must_use]
    pub fn stack(
        type_id: TypeId,
        owner: OwnerId,
        location: ItemId,
        flag: ItemFlag,
        quantity: u32,
    ) -> Self {
        Self {
            name: String::new(),
            type_id,
            owner,
            location,
            flag,
            contraband: false,
            singleton: false,
            quantity,
            position: Point::ORIGIN,
            custom_info: String::new(),
        }
    }

    /// Describes an individually tracked item.
    #[must_use]
    pub fn singleton(
        type_id: TypeId,
        owner: OwnerId,
        location: ItemId,
        flag: ItemFlag,
        name: impl Into<String>,
        position: Point,
    ) -> Self {
        Self {
            name: name.into(),
            type_id,
            owner,
            location,
            flag,
            contraband: false,
            singleton: true,
            quantity: 1,
            position,
            custom_info: String::new(),
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the contraband bit.
    #[must_use]
    pub fn with_contraband(mut self, contraband: bool) -> Self {
        self.contraband = contraband;
        self
    }

    /// Sets the custom info blob.
    #[must_use]
    pub fn with_custom_info(mut self, custom_info: impl Into<String>) -> Self {
        self.custom_info = custom_info.into();
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// True when the singleton/quantity pairing is consistent.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.singleton || self.quantity == 1
    }
}

/// Manufacturing fields carried by blueprint items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlueprintData {
    /// Copy (`true`) or original (`false`).
    pub copy: bool,
    /// Material efficiency research level.
    pub material_level: u32,
    /// Production efficiency research level.
    pub productivity_level: u32,
    /// Runs left on a copy; may go negative through unchecked alteration.
    pub licensed_production_runs_remaining: i32,
}

impl BlueprintData {
    /// Describes an original blueprint with the given research levels.
    #[must_use]
    pub fn original(material_level: u32, productivity_level: u32) -> Self {
        Self {
            copy: false,
            material_level,
            productivity_level,
            licensed_production_runs_remaining: 0,
        }
    }

    /// Describes a copy with a number of licensed runs.
    #[must_use]
    pub fn copy(material_level: u32, productivity_level: u32, runs: i32) -> Self {
        Self {
            copy: true,
            material_level,
            productivity_level,
            licensed_production_runs_remaining: runs,
        }
    }
}
