//! Collaborator contracts and in-memory backends for Cargohold.
//!
//! This crate provides:
//! - [`ItemDatabase`] - row-level item and blueprint persistence
//! - [`TypeCatalog`] - type metadata resolution
//! - [`AttributeStore`] - per-item attribute persistence
//! - [`NotificationSink`] and [`ClientSession`] - delivery to online owners
//! - [`MemoryDatabase`], [`TypeTable`], [`MemoryAttributeStore`],
//!   [`SessionTable`] - in-memory implementations of each

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attributes;
pub mod catalog;
pub mod memory;
pub mod sessions;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod traits;

pub use attributes::MemoryAttributeStore;
pub use catalog::TypeTable;
pub use memory::{DEFAULT_FIRST_ITEM_ID, DatabaseStats, MemoryDatabase};
pub use sessions::{RecordingSession, SessionTable};
pub use traits::{AttributeStore, ClientSession, ItemDatabase, NotificationSink, TypeCatalog};
