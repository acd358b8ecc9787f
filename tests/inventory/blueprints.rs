//! Integration tests for the blueprint variant

use cargohold_foundation::{
    BlueprintData, CategoryId, ErrorClass, ErrorKind, ItemData, ItemFlag,
};
use cargohold_inventory::{ItemKind, ItemRef};

use crate::common::{Fixture, ORE, OWNER, SHIP, SHIP_BLUEPRINT, STATION};

fn blueprint(fx: &Fixture, quantity: u32, data: BlueprintData) -> ItemRef {
    fx.cache
        .spawn_blueprint(
            ItemData::stack(SHIP_BLUEPRINT, OWNER, STATION, ItemFlag::HANGAR, quantity),
            data,
        )
        .unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn spawned_blueprint_persists_its_fields() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::copy(3, 1, 10));
    assert!(bp.is_blueprint());
    assert!(matches!(bp.kind(), ItemKind::Blueprint(_)));
    assert_eq!(bp.name(), "Rifter Blueprint");
    assert_eq!(fx.db.blueprint_row(bp.id()), Some(BlueprintData::copy(3, 1, 10)));

    let reloaded = fx.second_cache().get_item(bp.id(), false).unwrap();
    let view = reloaded.as_blueprint().unwrap();
    assert!(view.copy());
    assert_eq!(view.material_level(), 3);
    assert_eq!(view.productivity_level(), 1);
    assert_eq!(view.licensed_production_runs_remaining(), 10);
}

#[test]
fn blueprint_category_spawns_with_default_fields() {
    let fx = Fixture::new();
    let bp = fx
        .cache
        .spawn_item(ItemData::stack(SHIP_BLUEPRINT, OWNER, STATION, ItemFlag::HANGAR, 2))
        .unwrap();
    assert_eq!(bp.as_blueprint().unwrap().data(), BlueprintData::default());
    assert_eq!(fx.db.blueprint_row(bp.id()), Some(BlueprintData::default()));
}

#[test]
fn plain_types_are_not_blueprints() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 1);
    assert!(!ore.is_blueprint());
    assert!(ore.as_blueprint().is_none());

    let err = fx
        .cache
        .spawn_blueprint(
            ItemData::stack(ORE, OWNER, STATION, ItemFlag::HANGAR, 1),
            BlueprintData::default(),
        )
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::CategoryMismatch { expected, .. } if expected == CategoryId::BLUEPRINT
    ));
    assert_eq!(err.class(), ErrorClass::InvariantViolation);
}

// =============================================================================
// Mutators
// =============================================================================

#[test]
fn setters_write_through() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::original(0, 0));
    let view = bp.as_blueprint().unwrap();
    fx.db.reset_stats();

    view.set_copy(&fx.cache, true).unwrap();
    view.set_material_level(&fx.cache, 7).unwrap();
    view.set_productivity_level(&fx.cache, 4).unwrap();
    view.set_licensed_production_runs_remaining(&fx.cache, 25).unwrap();

    assert_eq!(fx.db.blueprint_row(bp.id()), Some(BlueprintData::copy(7, 4, 25)));
    assert_eq!(fx.db.stats().blueprint_saves, 4);
}

#[test]
fn alter_adds_to_levels() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::original(5, 2));
    let view = bp.as_blueprint().unwrap();

    view.alter_material_level(&fx.cache, 3).unwrap();
    view.alter_productivity_level(&fx.cache, -2).unwrap();
    assert_eq!(view.material_level(), 8);
    assert_eq!(view.productivity_level(), 0);
    assert_eq!(fx.db.blueprint_row(bp.id()), Some(BlueprintData::original(8, 0)));
}

#[test]
fn levels_never_go_negative() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::original(5, 2));
    let view = bp.as_blueprint().unwrap();
    fx.db.reset_stats();

    let err = view.alter_material_level(&fx.cache, -6).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NegativeLevel { level: 5, delta: -6, .. }));
    assert_eq!(err.class(), ErrorClass::ValidationFailure);
    assert!(view.alter_productivity_level(&fx.cache, -3).is_err());

    assert_eq!(view.data(), BlueprintData::original(5, 2));
    assert_eq!(fx.db.stats().blueprint_saves, 0);
}

#[test]
fn licensed_runs_are_not_range_checked() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::copy(0, 0, 2));
    let view = bp.as_blueprint().unwrap();

    view.alter_licensed_production_runs_remaining(&fx.cache, -5).unwrap();
    assert_eq!(view.licensed_production_runs_remaining(), -3);
    view.alter_licensed_production_runs_remaining(&fx.cache, i32::MAX).unwrap();
    assert_eq!(view.licensed_production_runs_remaining(), i32::MAX - 3);
    view.alter_licensed_production_runs_remaining(&fx.cache, 10).unwrap();
    assert_eq!(view.licensed_production_runs_remaining(), i32::MAX);
}

// =============================================================================
// Derived Values
// =============================================================================

#[test]
fn wastage_shrinks_with_material_research() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::original(0, 0));
    let view = bp.as_blueprint().unwrap();
    assert!(approx(view.wastage_factor(), 10.0));

    view.set_material_level(&fx.cache, 4).unwrap();
    assert!(approx(view.wastage_factor(), 2.0));
    assert_eq!(view.product_type(), Some(SHIP));
}

#[test]
fn attribute_summary_combines_item_and_type() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::copy(1, 3, 12));
    let summary = bp.as_blueprint().unwrap().attributes();

    assert_eq!(summary.blueprint_id, bp.id());
    assert!(summary.copy);
    assert_eq!(summary.material_level, 1);
    assert_eq!(summary.productivity_level, 3);
    assert_eq!(summary.licensed_production_runs_remaining, 12);
    assert!(approx(summary.wastage_factor, 5.0));
    assert_eq!(summary.product_type, SHIP);
    assert_eq!(summary.manufacturing_time, 6_000);
    assert_eq!(summary.max_production_limit, 30);
}

// =============================================================================
// Split
// =============================================================================

#[test]
fn blueprint_split_carries_the_fields() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 5, BlueprintData::original(6, 3));

    let part = bp.as_blueprint().unwrap().split_blueprint(&fx.cache, 2, false).unwrap();
    assert_eq!(bp.quantity(), 3);
    assert_eq!(part.quantity(), 2);
    assert_eq!(part.as_blueprint().unwrap().data(), BlueprintData::original(6, 3));
    assert_eq!(fx.db.blueprint_row(part.id()), Some(BlueprintData::original(6, 3)));
}

#[test]
fn plain_split_of_a_blueprint_yields_default_fields() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 5, BlueprintData::original(6, 3));

    let part = bp.split(&fx.cache, 2, false).unwrap();
    assert!(part.is_blueprint());
    assert_eq!(part.as_blueprint().unwrap().data(), BlueprintData::default());
}

#[test]
fn save_writes_the_blueprint_row() {
    let fx = Fixture::new();
    let bp = blueprint(&fx, 1, BlueprintData::original(1, 1));
    fx.db.reset_stats();

    bp.rename(&fx.cache, "Research Copy").unwrap();
    let stats = fx.db.stats();
    assert_eq!(stats.item_saves, 1);
    assert_eq!(stats.blueprint_saves, 1);
}
