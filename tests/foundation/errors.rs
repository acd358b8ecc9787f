//! Integration tests for Error types
//!
//! Tests error construction, display, context, and the failure taxonomy.

use cargohold_foundation::{
    CategoryId, Error, ErrorClass, ErrorContext, ErrorKind, ItemFlag, ItemId, MergeMismatch, TypeId,
};

// =============================================================================
// Taxonomy
// =============================================================================

#[test]
fn load_failures() {
    for err in [
        Error::item_not_found(ItemId::new(1)),
        Error::type_not_found(TypeId::new(2)),
        Error::blueprint_not_found(ItemId::new(3)),
        Error::new(ErrorKind::AttributeLoad {
            item: ItemId::new(4),
            message: "down".into(),
        }),
    ] {
        assert_eq!(err.class(), ErrorClass::LoadFailure, "{err}");
    }
}

#[test]
fn invariant_violations() {
    for err in [
        Error::duplicate_instance(ItemId::new(1)),
        Error::new(ErrorKind::TypeMismatch {
            item: ItemId::new(1),
            descriptor: TypeId::new(2),
            metadata: TypeId::new(3),
        }),
        Error::new(ErrorKind::CategoryMismatch {
            type_id: TypeId::new(2),
            expected: CategoryId::BLUEPRINT,
            actual: CategoryId::SHIP,
        }),
        Error::new(ErrorKind::ContainmentCycle {
            item: ItemId::new(1),
            location: ItemId::new(1),
        }),
    ] {
        assert_eq!(err.class(), ErrorClass::InvariantViolation, "{err}");
    }
}

#[test]
fn validation_failures() {
    for err in [
        Error::negative_quantity(ItemId::new(1), 5, -100),
        Error::invalid_amount(ItemId::new(1), 0),
        Error::new(ErrorKind::SingletonQuantity(ItemId::new(1))),
        Error::merge_mismatch(ItemId::new(1), ItemId::new(2), MergeMismatch::Type),
        Error::new(ErrorKind::NegativeLevel {
            item: ItemId::new(1),
            level: 2,
            delta: -3,
        }),
    ] {
        assert_eq!(err.class(), ErrorClass::ValidationFailure, "{err}");
    }
}

#[test]
fn storage_failures() {
    assert_eq!(Error::storage("gone").class(), ErrorClass::Storage);
    assert_eq!(
        Error::new(ErrorKind::IoError("eof".into())).class(),
        ErrorClass::Storage
    );
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn merge_location_mismatch_names_both_locations() {
    let err = Error::merge_mismatch(
        ItemId::new(1),
        ItemId::new(2),
        MergeMismatch::Location {
            expected: ItemId::new(10),
            actual: ItemId::new(20),
        },
    );
    let msg = err.to_string();
    assert!(msg.contains("Item(10)"));
    assert!(msg.contains("Item(20)"));
}

#[test]
fn same_item_merge_display() {
    let err = Error::merge_mismatch(ItemId::new(1), ItemId::new(1), MergeMismatch::SameItem);
    assert!(err.to_string().contains("same item"));
}

#[test]
fn context_chain_display() {
    let ctx = ErrorContext::new()
        .with_operation("delete")
        .with_item(ItemId::new(1))
        .with_item(ItemId::new(2));
    assert_eq!(ctx.to_string(), "in delete <- Item(1) <- Item(2)");
}

#[test]
fn flag_display_in_errors() {
    let err = Error::merge_mismatch(
        ItemId::new(1),
        ItemId::new(2),
        MergeMismatch::Flag {
            expected: ItemFlag::DRONE_BAY,
            actual: ItemFlag::med_slot(0).unwrap(),
        },
    );
    let msg = err.to_string();
    assert!(msg.contains("drone-bay"));
    assert!(msg.contains("med-slot-0"));
}
