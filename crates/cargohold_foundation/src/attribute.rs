//! Numeric per-item attributes.
//!
//! [`AttributeMap`] is a thin wrapper around `im::OrdMap`, so an encoded
//! snapshot handed to a client is an O(1) clone that shares structure with
//! the live map.

use std::fmt;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::AttributeId;

/// One attribute value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeValue {
    /// Integral value.
    Int(i64),
    /// Real value.
    Real(f64),
}

impl AttributeValue {
    /// Returns the value as an integer, truncating reals.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Real(v) => v as i64,
        }
    }

    /// Returns the value as a real.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Real(v) => v,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

/// Ordered attribute map with structural sharing.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeMap(im::OrdMap<AttributeId, AttributeValue>);

impl AttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets an attribute.
    #[must_use]
    pub fn get(&self, id: AttributeId) -> Option<AttributeValue> {
        self.0.get(&id).copied()
    }

    /// Sets an attribute, returning the previous value.
    pub fn set(&mut self, id: AttributeId, value: AttributeValue) -> Option<AttributeValue> {
        self.0.insert(id, value)
    }

    /// Removes an attribute.
    pub fn remove(&mut self, id: AttributeId) -> Option<AttributeValue> {
        self.0.remove(&id)
    }

    /// Iterates attributes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, AttributeValue)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl fmt::Debug for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl FromIterator<(AttributeId, AttributeValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (AttributeId, AttributeValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
