//! Integration tests for Layer 1: Storage
//!
//! Tests for the in-memory item database, type catalog, attribute store,
//! and session table through their trait contracts.

mod sessions;
