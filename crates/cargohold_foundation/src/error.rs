//! Error types for the Cargohold system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::flag::ItemFlag;
use crate::ids::{CategoryId, ItemId, TypeId};

/// The main error type for Cargohold operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records that this error surfaced while `operation` was working on
    /// `item`. Repeated calls on the way out build the chain of items,
    /// innermost first.
    #[must_use]
    pub fn within(mut self, operation: &str, item: ItemId) -> Self {
        self.context
            .get_or_insert_with(|| ErrorContext::new().with_operation(operation))
            .items
            .push(item);
        self
    }

    /// Returns the taxonomy class of this error.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Creates an item not found error.
    #[must_use]
    pub fn item_not_found(id: ItemId) -> Self {
        Self::new(ErrorKind::ItemNotFound(id))
    }

    /// Creates a type not found error.
    #[must_use]
    pub fn type_not_found(id: TypeId) -> Self {
        Self::new(ErrorKind::TypeNotFound(id))
    }

    /// Creates a missing blueprint row error.
    #[must_use]
    pub fn blueprint_not_found(id: ItemId) -> Self {
        Self::new(ErrorKind::BlueprintNotFound(id))
    }

    /// Creates a duplicate live instance error.
    #[must_use]
    pub fn duplicate_instance(id: ItemId) -> Self {
        Self::new(ErrorKind::DuplicateInstance(id))
    }

    /// Creates a negative resulting quantity error.
    #[must_use]
    pub fn negative_quantity(item: ItemId, quantity: u32, delta: i64) -> Self {
        Self::new(ErrorKind::NegativeQuantity {
            item,
            quantity,
            delta,
        })
    }

    /// Creates a non-positive amount error.
    #[must_use]
    pub fn invalid_amount(item: ItemId, amount: i64) -> Self {
        Self::new(ErrorKind::InvalidAmount { item, amount })
    }

    /// Creates a merge mismatch error.
    #[must_use]
    pub fn merge_mismatch(item: ItemId, other: ItemId, reason: MergeMismatch) -> Self {
        Self::new(ErrorKind::MergeMismatch {
            item,
            other,
            reason,
        })
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No persisted row for an item.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Type metadata could not be resolved.
    #[error("type not found: {0}")]
    TypeNotFound(TypeId),

    /// A blueprint-category item has no blueprint row.
    #[error("blueprint data not found for {0}")]
    BlueprintNotFound(ItemId),

    /// Attributes could not be loaded.
    #[error("failed to load attributes of {item}: {message}")]
    AttributeLoad {
        /// The item being loaded.
        item: ItemId,
        /// Backend message.
        message: String,
    },

    /// Descriptor type does not match the resolved type metadata.
    #[error("type mismatch on {item}: descriptor has {descriptor}, metadata has {metadata}")]
    TypeMismatch {
        /// The item being constructed.
        item: ItemId,
        /// Type recorded in the row.
        descriptor: TypeId,
        /// Type of the resolved metadata.
        metadata: TypeId,
    },

    /// Type category does not match the entity variant.
    #[error("category mismatch on {type_id}: expected {expected}, got {actual}")]
    CategoryMismatch {
        /// The offending type.
        type_id: TypeId,
        /// Category the variant requires.
        expected: CategoryId,
        /// Category of the type.
        actual: CategoryId,
    },

    /// Two live instances would represent one persisted item.
    #[error("duplicate live instance of {0}")]
    DuplicateInstance(ItemId),

    /// A move would make an item its own container.
    #[error("{item} cannot be moved into {location}: containment cycle")]
    ContainmentCycle {
        /// The item being moved.
        item: ItemId,
        /// The requested location.
        location: ItemId,
    },

    /// The resulting quantity would be negative.
    #[error("{item}: cannot apply {delta} to a stack of {quantity}")]
    NegativeQuantity {
        /// The item.
        item: ItemId,
        /// Quantity before the change.
        quantity: u32,
        /// Requested change.
        delta: i64,
    },

    /// A blueprint research level would drop below zero.
    #[error("{item}: cannot apply {delta} to research level {level}")]
    NegativeLevel {
        /// The blueprint item.
        item: ItemId,
        /// Level before the change.
        level: u32,
        /// Requested change.
        delta: i64,
    },

    /// Singleton items never accept direct quantity assignment.
    #[error("{0} is a singleton; its quantity cannot be set")]
    SingletonQuantity(ItemId),

    /// A split or merge amount was out of range.
    #[error("{item}: invalid amount {amount}")]
    InvalidAmount {
        /// The item.
        item: ItemId,
        /// Requested amount.
        amount: i64,
    },

    /// Two items cannot be merged.
    #[error("cannot merge {other} into {item}: {reason}")]
    MergeMismatch {
        /// The receiving stack.
        item: ItemId,
        /// The stack being merged.
        other: ItemId,
        /// Which precondition failed.
        reason: MergeMismatch,
    },

    /// A skill operation was requested on an invalid subject.
    #[error("invalid skill training on {character}: {message}")]
    InvalidTraining {
        /// The character item.
        character: ItemId,
        /// What was wrong.
        message: String,
    },

    /// Persistence backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Maps this kind onto the failure taxonomy.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ItemNotFound(_)
            | Self::TypeNotFound(_)
            | Self::BlueprintNotFound(_)
            | Self::AttributeLoad { .. } => ErrorClass::LoadFailure,
            Self::TypeMismatch { .. }
            | Self::CategoryMismatch { .. }
            | Self::DuplicateInstance(_)
            | Self::ContainmentCycle { .. } => ErrorClass::InvariantViolation,
            Self::NegativeQuantity { .. }
            | Self::NegativeLevel { .. }
            | Self::SingletonQuantity(_)
            | Self::InvalidAmount { .. }
            | Self::MergeMismatch { .. }
            | Self::InvalidTraining { .. } => ErrorClass::ValidationFailure,
            Self::Storage(_) | Self::SerializationError(_) | Self::IoError(_) => {
                ErrorClass::Storage
            }
            Self::Internal(_) => ErrorClass::Internal,
        }
    }
}

/// Failure taxonomy shared by every layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing row, missing type metadata, or attribute-load failure.
    LoadFailure,
    /// Persisted data or live graph is inconsistent.
    InvariantViolation,
    /// A request was rejected before any state changed.
    ValidationFailure,
    /// The backend failed.
    Storage,
    /// Should not happen.
    Internal,
}

/// Which merge precondition failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeMismatch {
    /// Different item types.
    Type,
    /// Different locations.
    Location {
        /// Location of the receiving stack.
        expected: ItemId,
        /// Location of the other stack.
        actual: ItemId,
    },
    /// Different flags.
    Flag {
        /// Flag of the receiving stack.
        expected: ItemFlag,
        /// Flag of the other stack.
        actual: ItemFlag,
    },
    /// Both sides are the same item.
    SameItem,
}

impl fmt::Display for MergeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type differs"),
            Self::Location { expected, actual } => {
                write!(f, "location differs ({expected} vs {actual})")
            }
            Self::Flag { expected, actual } => write!(f, "flag differs ({expected} vs {actual})"),
            Self::SameItem => write!(f, "same item"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed.
    pub operation: Option<String>,
    /// Chain of items being processed, innermost first.
    pub items: Vec<ItemId>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Adds an item to the chain.
    #[must_use]
    pub fn with_item(mut self, item: ItemId) -> Self {
        self.items.push(item);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        for item in &self.items {
            write!(f, " <- {item}")?;
        }
        Ok(())
    }
}

/// Result type alias using the Cargohold error type.
pub type Result<T> = std::result::Result<T, Error>;
