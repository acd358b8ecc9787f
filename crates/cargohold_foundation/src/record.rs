//! Read-only records handed to the presentation and session layers.

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::flag::ItemFlag;
use crate::ids::{CategoryId, GroupId, ItemId, OwnerId, TypeId};

/// Row describing the current state of one item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRow {
    /// Item identity.
    pub item_id: ItemId,
    /// Item type.
    pub type_id: TypeId,
    /// Current owner.
    pub owner: OwnerId,
    /// Current location.
    pub location: ItemId,
    /// Current flag.
    pub flag: ItemFlag,
    /// Contraband bit.
    pub contraband: bool,
    /// Singleton bit.
    pub singleton: bool,
    /// Stack size.
    pub quantity: u32,
    /// Type group.
    pub group: GroupId,
    /// Type category.
    pub category: CategoryId,
    /// Custom info; `None` when empty.
    pub custom_info: Option<String>,
}

/// Manufacturing summary of a blueprint item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlueprintAttributes {
    /// Blueprint item identity.
    pub blueprint_id: ItemId,
    /// Copy or original.
    pub copy: bool,
    /// Productivity research level.
    pub productivity_level: u32,
    /// Material research level.
    pub material_level: u32,
    /// Runs left on a copy.
    pub licensed_production_runs_remaining: i32,
    /// Effective material waste after research.
    pub wastage_factor: f64,
    /// Manufactured type.
    pub product_type: TypeId,
    /// Base manufacturing time, in seconds.
    pub manufacturing_time: u32,
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
}

/// Field identifiers used in change records.
///
/// Discriminants match the column order of [`EntityRow`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemField {
    /// `item_id`
    ItemId = 0,
    /// `type_id`
    TypeId = 1,
    /// `owner`
    Owner = 2,
    /// `location`
    Location = 3,
    /// `flag`
    Flag = 4,
    /// `contraband`
    Contraband = 5,
    /// `singleton`
    Singleton = 6,
    /// `quantity`
    Quantity = 7,
    /// `group`
    Group = 8,
    /// `category`
    Category = 9,
    /// `custom_info`
    CustomInfo = 10,
}

/// Current row of an item plus the previous value of every changed field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemChange {
    /// Row after the change.
    pub row: EntityRow,
    /// Previous values keyed by field.
    pub changes: BTreeMap<ItemField, i64>,
}

impl ItemChange {
    /// Returns the previous value of a field, if it changed.
    #[must_use]
    pub fn previous(&self, field: ItemField) -> Option<i64> {
        self.changes.get(&field).copied()
    }
}

/// A record delivered to an online owner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Notification {
    /// One or more fields of an item changed.
    ItemChanged(ItemChange),
    /// A fitted module went online or offline.
    ModuleOnlineChanged {
        /// The module.
        item: ItemId,
        /// New online state.
        online: bool,
    },
    /// A skill started training.
    SkillTrainingStarted {
        /// The skill item.
        skill: ItemId,
    },
    /// A skill stopped training.
    SkillTrainingStopped {
        /// The skill item.
        skill: ItemId,
    },
}

impl Notification {
    /// Returns the item change, if this is one.
    #[must_use]
    pub fn as_item_change(&self) -> Option<&ItemChange> {
        match self {
            Self::ItemChanged(change) => Some(change),
            _ => None,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemChanged(change) => {
                write!(f, "OnItemChange({}", change.row.item_id)?;
                for (field, old) in &change.changes {
                    write!(f, ", {field:?}={old}")?;
                }
                write!(f, ")")
            }
            Self::ModuleOnlineChanged { item, online } => {
                write!(f, "OnModuleAttributeChange({item}, online={online})")
            }
            Self::SkillTrainingStarted { skill } => write!(f, "OnSkillStartTraining({skill})"),
            Self::SkillTrainingStopped { skill } => write!(f, "OnSkillTrainingStopped({skill})"),
        }
    }
}
