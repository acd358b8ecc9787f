//! Integration tests for moves and single-field mutators

use std::rc::Rc;

use cargohold_foundation::{
    ErrorClass, ErrorKind, ItemData, ItemField, ItemFlag, Notification, Point,
};

use crate::common::{CONTAINER, Fixture, ORE, OTHER_OWNER, OWNER, STATION, holders};

fn changes(received: &[Notification]) -> Vec<Vec<ItemField>> {
    received
        .iter()
        .filter_map(Notification::as_item_change)
        .map(|change| change.changes.keys().copied().collect())
        .collect()
}

// =============================================================================
// Moves
// =============================================================================

#[test]
fn move_between_loaded_containers_transfers_the_edge() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let can = fx.container(STATION, ItemFlag::HANGAR);
    let ore = fx.stack(ORE, ship.id(), ItemFlag::CARGO_HOLD, 5);
    let before = holders(&ore);

    ore.move_into(&fx.cache, &can, ItemFlag::AUTOFIT, false).unwrap();
    assert!(!ship.contains_item(ore.id(), false));
    assert!(can.contains_item(ore.id(), false));
    assert_eq!(holders(&ore), before);
    assert_eq!(fx.db.row(ore.id()).unwrap().location, can.id());

    ore.move_to(&fx.cache, ship.id(), ItemFlag::CARGO_HOLD, false).unwrap();
    assert!(ship.contains_item(ore.id(), false));
    assert!(!can.contains_item(ore.id(), false));
    assert_eq!(holders(&ore), before);
}

#[test]
fn move_into_unloaded_container_waits_for_its_load() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let can_id = fx.row(&ItemData::singleton(
        CONTAINER,
        OWNER,
        STATION,
        ItemFlag::HANGAR,
        "Crate",
        Point::ORIGIN,
    ));
    let ore = fx.stack(ORE, ship.id(), ItemFlag::CARGO_HOLD, 5);

    ore.move_to(&fx.cache, can_id, ItemFlag::AUTOFIT, false).unwrap();
    assert!(!ship.contains_item(ore.id(), false));
    assert_eq!(holders(&ore), 2);

    let can = fx.cache.get_item(can_id, true).unwrap();
    assert!(Rc::ptr_eq(&can.get_by_id(ore.id()).unwrap(), &ore));
}

#[test]
fn rejected_link_leaves_the_item_in_its_source() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let can = fx.container(STATION, ItemFlag::HANGAR);
    let ore = fx.stack(ORE, ship.id(), ItemFlag::CARGO_HOLD, 5);
    let before = holders(&ore);

    // the crate already links a different instance of the same row
    let other_cache = fx.second_cache();
    let impostor = other_cache.get_item(ore.id(), false).unwrap();
    can.add_contained_item(&impostor).unwrap();

    let err = ore.move_into(&fx.cache, &can, ItemFlag::AUTOFIT, false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateInstance(id) if id == ore.id()));
    assert_eq!(err.class(), ErrorClass::InvariantViolation);
    assert!(ship.contains_item(ore.id(), false));
    assert_eq!(ore.location(), ship.id());
    assert_eq!(fx.db.row(ore.id()).unwrap().location, ship.id());
    assert_eq!(holders(&ore), before);
}

#[test]
fn unchanged_move_writes_nothing() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    let session = fx.online(OWNER);
    fx.db.reset_stats();

    ore.move_to(&fx.cache, STATION, ItemFlag::HANGAR, true).unwrap();
    assert_eq!(fx.db.stats().item_saves, 0);
    assert!(session.received().is_empty());
}

#[test]
fn move_notifies_location_and_flag() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    let session = fx.online(OWNER);

    ore.move_to(&fx.cache, ship.id(), ItemFlag::CARGO_HOLD, true).unwrap();
    let received = session.take();
    assert_eq!(received.len(), 1);
    let change = received[0].as_item_change().unwrap();
    assert_eq!(change.row.location, ship.id());
    assert_eq!(change.previous(ItemField::Location), Some(i64::from(STATION.get())));
    assert_eq!(change.previous(ItemField::Flag), Some(i64::from(ItemFlag::HANGAR.0)));
}

#[test]
fn flag_only_move_still_reports_location() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let ore = fx.stack(ORE, ship.id(), ItemFlag::CARGO_HOLD, 5);
    let session = fx.online(OWNER);

    ore.move_to(&fx.cache, ship.id(), ItemFlag::DRONE_BAY, true).unwrap();
    assert_eq!(
        changes(&session.take()),
        vec![vec![ItemField::Location, ItemField::Flag]]
    );
    assert!(ship.contains_item(ore.id(), false));
}

#[test]
fn silent_moves_and_offline_owners_send_nothing() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    ore.move_to(&fx.cache, STATION, ItemFlag::CARGO_HOLD, true).unwrap();

    let session = fx.online(OWNER);
    ore.move_to(&fx.cache, STATION, ItemFlag::HANGAR, false).unwrap();
    assert!(session.received().is_empty());
}

#[test]
fn moves_that_would_nest_an_item_in_itself_fail() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let can = fx.container(ship.id(), ItemFlag::CARGO_HOLD);

    let err = ship.move_into(&fx.cache, &can, ItemFlag::AUTOFIT, false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
    assert_eq!(err.class(), ErrorClass::InvariantViolation);
    assert_eq!(ship.location(), STATION);
    assert!(ship.contains_item(can.id(), false));

    let err = can.move_to(&fx.cache, can.id(), ItemFlag::AUTOFIT, false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
}

#[test]
fn cycle_check_follows_rows_of_unloaded_containers() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let inner = fx.row(&ItemData::singleton(
        CONTAINER,
        OWNER,
        ship.id(),
        ItemFlag::CARGO_HOLD,
        "",
        Point::ORIGIN,
    ));
    let err = ship.move_to(&fx.cache, inner, ItemFlag::AUTOFIT, false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
}

// =============================================================================
// Field Mutators
// =============================================================================

#[test]
fn change_flag_keeps_the_location() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let ore = fx.stack(ORE, ship.id(), ItemFlag::CARGO_HOLD, 5);
    let session = fx.online(OWNER);

    ore.change_flag(&fx.cache, ItemFlag::DRONE_BAY, true).unwrap();
    assert_eq!(ore.location(), ship.id());
    assert_eq!(fx.db.row(ore.id()).unwrap().flag, ItemFlag::DRONE_BAY);
    assert_eq!(changes(&session.take()), vec![vec![ItemField::Flag]]);
    assert_eq!(ship.find_by_flag(ItemFlag::DRONE_BAY).len(), 1);
}

#[test]
fn change_owner_tells_both_owners() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    let old = fx.online(OWNER);
    let new = fx.online(OTHER_OWNER);

    ore.change_owner(&fx.cache, OTHER_OWNER, true).unwrap();
    assert_eq!(fx.db.row(ore.id()).unwrap().owner, OTHER_OWNER);
    for session in [&old, &new] {
        let received = session.take();
        assert_eq!(received.len(), 1);
        let change = received[0].as_item_change().unwrap();
        assert_eq!(change.row.owner, OTHER_OWNER);
        assert_eq!(change.previous(ItemField::Owner), Some(i64::from(OWNER.get())));
    }
}

#[test]
fn change_singleton_leaves_quantity_alone() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    let session = fx.online(OWNER);

    ore.change_singleton(&fx.cache, true, true).unwrap();
    assert!(ore.singleton());
    assert_eq!(ore.quantity(), 5);
    assert!(fx.db.row(ore.id()).unwrap().singleton);
    assert_eq!(changes(&session.take()), vec![vec![ItemField::Singleton]]);

    ore.change_singleton(&fx.cache, true, true).unwrap();
    assert!(session.received().is_empty());
}

#[test]
fn rename_and_custom_info_persist() {
    let fx = Fixture::new();
    let ship = fx.ship();
    assert_eq!(ship.name(), "Rifter");

    ship.rename(&fx.cache, "Bob's Rifter").unwrap();
    ship.set_custom_info(&fx.cache, Some("fitting:1")).unwrap();
    let row = fx.db.row(ship.id()).unwrap();
    assert_eq!(row.name, "Bob's Rifter");
    assert_eq!(row.custom_info, "fitting:1");

    ship.set_custom_info(&fx.cache, None).unwrap();
    assert_eq!(ship.custom_info(), "");
    assert_eq!(fx.db.row(ship.id()).unwrap().custom_info, "");
}

#[test]
fn relocate_skips_unchanged_positions() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let target = Point::new(1.0, -2.5, 3.0);

    fx.db.reset_stats();
    ship.relocate(&fx.cache, target).unwrap();
    assert_eq!(fx.db.row(ship.id()).unwrap().position, target);
    ship.relocate(&fx.cache, target).unwrap();
    assert_eq!(fx.db.stats().item_saves, 1);
}
