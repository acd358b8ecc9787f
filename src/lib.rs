//! Cargohold - item entities for a persistent multiplayer world server
//!
//! This crate re-exports all layers of the Cargohold system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: cargohold_inventory  - Item cache, entities, containment, mutation
//! Layer 1: cargohold_storage    - Persistence, catalog, attribute, session contracts
//! Layer 0: cargohold_foundation - Core types (ItemId, ItemData, Error)
//! ```

pub use cargohold_foundation as foundation;
pub use cargohold_inventory as inventory;
pub use cargohold_storage as storage;
