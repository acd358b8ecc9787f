//! Identifiers, descriptors, records, and errors for Cargohold.
//!
//! This crate provides:
//! - [`ItemId`], [`TypeId`], [`OwnerId`] and friends - typed identifiers
//! - [`ItemFlag`] - slot flags locating an item inside its container
//! - [`ItemData`], [`BlueprintData`] - persisted row descriptors
//! - [`ItemType`] - immutable type metadata
//! - [`EntityRow`], [`Notification`] - records for presentation and sessions
//! - [`Error`] - rich error types with a failure taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod descriptor;
pub mod error;
pub mod flag;
pub mod ids;
pub mod item_type;
pub mod record;

pub use attribute::{AttributeMap, AttributeValue};
pub use descriptor::{BlueprintData, ItemData, Point};
pub use error::{Error, ErrorClass, ErrorContext, ErrorKind, MergeMismatch, Result};
pub use flag::ItemFlag;
pub use ids::{AttributeId, CategoryId, GroupId, ItemId, OwnerId, TypeId};
pub use item_type::{BlueprintTypeInfo, ItemType};
pub use record::{BlueprintAttributes, EntityRow, ItemChange, ItemField, Notification};
