//! Reference-counted item entities for Cargohold.
//!
//! This crate provides:
//! - [`ItemCache`] - the single live instance of every resident item
//! - [`InventoryItem`] and [`ItemRef`] - the entity and its shared handle
//! - [`BlueprintItem`] - the manufacturing view of blueprint items
//! - [`InventoryConfig`] - fixed locations and owners used by the mutators
//!
//! Items load lazily: resolving an item does not load what it contains
//! until [`InventoryItem::load_contents`] is called or the item is resolved
//! with `recurse`. Every mutator writes through to the [`ItemDatabase`]
//! before returning.
//!
//! [`ItemDatabase`]: cargohold_storage::ItemDatabase

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod blueprint;
pub mod cache;
pub mod config;
pub mod contents;
pub mod delete;
pub mod item;
pub mod mutation;
pub mod online;
pub mod presentation;
pub mod skills;

pub use blueprint::BlueprintItem;
pub use cache::ItemCache;
pub use config::InventoryConfig;
pub use delete::BAD_DELETED_ITEM;
pub use item::{InventoryItem, ItemKind, ItemRef};
