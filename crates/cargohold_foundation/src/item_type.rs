//! Immutable type metadata resolved from the type catalog.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, GroupId, TypeId};

/// Metadata shared by every item of one type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemType {
    /// Type identity.
    pub id: TypeId,
    /// Default name for spawned items.
    pub name: String,
    /// Presentation group.
    pub group: GroupId,
    /// Category; [`CategoryId::BLUEPRINT`] selects the blueprint variant.
    pub category: CategoryId,
    /// Volume of one unit, in m³.
    pub volume: f64,
    /// Cargo hold capacity, in m³.
    pub capacity: f64,
    /// Drone bay capacity, in m³.
    pub drone_capacity: f64,
    /// Manufacturing metadata, present for blueprint types.
    pub blueprint: Option<BlueprintTypeInfo>,
}

impl ItemType {
    /// Creates a type with no volume or capacity.
    #[must_use]
    pub fn new(id: TypeId, name: impl Into<String>, group: GroupId, category: CategoryId) -> Self {
        Self {
            id,
            name: name.into(),
            group,
            category,
            volume: 0.0,
            capacity: 0.0,
            drone_capacity: 0.0,
            blueprint: None,
        }
    }

    /// Sets the unit volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the cargo hold capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the drone bay capacity.
    #[must_use]
    pub fn with_drone_capacity(mut self, drone_capacity: f64) -> Self {
        self.drone_capacity = drone_capacity;
        self
    }

    /// Attaches manufacturing metadata.
    #[must_use]
    pub fn with_blueprint(mut self, info: BlueprintTypeInfo) -> Self {
        self.blueprint = Some(info);
        self
    }

    /// True when items of this type are constructed as blueprints.
    #[must_use]
    pub fn is_blueprint(&self) -> bool {
        self.category == CategoryId::BLUEPRINT
    }
}

/// Production timings and limits of a blueprint type.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlueprintTypeInfo {
    /// Type manufactured from this blueprint.
    pub product_type: TypeId,
    /// Base manufacturing time, in seconds.
    pub production_time: u32,
    /// Maximum runs per copy.
    pub max_production_limit: u32,
    /// Material research time, in seconds.
    pub research_material_time: u32,
    /// Invention time, in seconds.
    pub research_tech_time: u32,
    /// Productivity research time, in seconds.
    pub research_productivity_time: u32,
    /// Copy time, in seconds.
    pub research_copy_time: u32,
    /// Base material waste, as a fraction.
    pub waste_factor: f64,
}
