//! Integration tests for recursive deletion

use std::rc::Rc;

use cargohold_foundation::{
    AttributeId, BlueprintData, ErrorKind, ItemData, ItemField, ItemFlag, ItemId, Point,
};
use cargohold_inventory::{BAD_DELETED_ITEM, InventoryConfig};
use cargohold_storage::ItemDatabase;

use crate::common::{CONTAINER, Fixture, ORE, OWNER, SHIP_BLUEPRINT, STATION};

#[test]
fn deleting_a_leaf_removes_row_attributes_and_instance() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let ore = fx.stack(ORE, ship.id(), ItemFlag::CARGO_HOLD, 5);
    ore.set_attribute(&fx.cache, AttributeId::new(161), 0.01).unwrap();
    let id = ore.id();
    assert!(fx.attributes.persisted(id).is_some());

    ore.delete(&fx.cache).unwrap();
    assert!(!fx.db.contains(id));
    assert!(fx.attributes.persisted(id).is_none());
    assert!(!fx.cache.is_resident(id));
    assert!(!ship.contains_item(id, false));
}

#[test]
fn deletion_reaches_unloaded_descendants() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let can = fx.container(ship.id(), ItemFlag::CARGO_HOLD).id();
    let loaded = fx.stack(ORE, can, ItemFlag::AUTOFIT, 5).id();
    let inner = fx.row(&ItemData::singleton(
        CONTAINER,
        OWNER,
        can,
        ItemFlag::AUTOFIT,
        "",
        Point::ORIGIN,
    ));
    let deep = fx.row(&ItemData::stack(ORE, OWNER, inner, ItemFlag::AUTOFIT, 9));
    let ship_id = ship.id();

    ship.delete(&fx.cache).unwrap();
    for id in [ship_id, can, loaded, inner, deep] {
        assert!(!fx.db.contains(id), "{id} survived");
        assert!(!fx.cache.is_resident(id), "{id} still resident");
    }
    assert!(fx.db.is_empty());
    assert_eq!(fx.cache.resident_count(), 0);
}

#[test]
fn rows_added_after_loading_are_deleted_with_their_container() {
    let fx = Fixture::new();
    let can = fx.container(STATION, ItemFlag::HANGAR);
    assert!(can.is_contents_loaded());
    let late = fx.row(&ItemData::stack(ORE, OWNER, can.id(), ItemFlag::AUTOFIT, 3));
    let late_child = fx.row(&ItemData::stack(ORE, OWNER, late, ItemFlag::AUTOFIT, 1));
    assert!(!can.contains_item(late, false));
    let can_id = can.id();

    can.delete(&fx.cache).unwrap();
    for id in [can_id, late, late_child] {
        assert!(!fx.db.contains(id), "{id} survived");
        assert!(!fx.cache.is_resident(id), "{id} still resident");
    }
}

#[test]
fn failed_child_deletion_names_the_chain_of_items() {
    let fx = Fixture::new();
    let ship = fx.ship();
    let can = fx.container(ship.id(), ItemFlag::CARGO_HOLD);
    let ore = fx.stack(ORE, can.id(), ItemFlag::AUTOFIT, 5);
    let ids = [ore.id(), can.id(), ship.id()];
    drop(can);
    // the row vanishes underneath the resident instance
    fx.db.delete_item(ore.id()).unwrap();

    let err = ship.delete(&fx.cache).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ItemNotFound(id) if id == ids[0]));
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.operation.as_deref(), Some("delete"));
    assert_eq!(context.items, ids);
    assert!(context.to_string().starts_with("in delete <- "));
}

#[test]
fn deleted_items_leave_through_the_junk_location() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    let session = fx.online(OWNER);
    let config = fx.cache.config().clone();

    ore.delete(&fx.cache).unwrap();
    let received = session.take();
    assert_eq!(received.len(), 2);

    let moved = received[0].as_item_change().unwrap();
    assert_eq!(moved.row.location, config.junk_location);
    assert_eq!(moved.previous(ItemField::Location), Some(i64::from(STATION.get())));

    let handed_over = received[1].as_item_change().unwrap();
    assert_eq!(handed_over.row.owner, config.system_owner);
    assert_eq!(handed_over.previous(ItemField::Owner), Some(i64::from(OWNER.get())));
}

#[test]
fn still_referenced_item_is_invalidated() {
    let fx = Fixture::new();
    let ore = fx.stack(ORE, STATION, ItemFlag::HANGAR, 5);
    let stale = Rc::clone(&ore);

    ore.delete(&fx.cache).unwrap();
    assert_eq!(stale.name(), BAD_DELETED_ITEM);
    assert_eq!(stale.quantity(), 0);
    assert!(stale.is_contents_loaded());
    assert!(!fx.db.contains(stale.id()));
    assert_eq!(Rc::strong_count(&stale), 1);
}

#[test]
fn stale_container_reports_no_contents() {
    let fx = Fixture::new();
    let can = fx.row(&ItemData::singleton(
        CONTAINER,
        OWNER,
        STATION,
        ItemFlag::HANGAR,
        "",
        Point::ORIGIN,
    ));
    fx.row(&ItemData::stack(ORE, OWNER, can, ItemFlag::AUTOFIT, 1));
    let can = fx.cache.get_item(can, false).unwrap();
    let stale = Rc::clone(&can);

    can.delete(&fx.cache).unwrap();
    assert!(stale.contents().is_empty());
    stale.load_contents(&fx.cache, false).unwrap();
    assert!(stale.contents().is_empty());
}

#[test]
fn deleting_a_blueprint_removes_its_blueprint_row() {
    let fx = Fixture::new();
    let bp = fx
        .cache
        .spawn_blueprint(
            ItemData::stack(SHIP_BLUEPRINT, OWNER, STATION, ItemFlag::HANGAR, 1),
            BlueprintData::original(5, 2),
        )
        .unwrap();
    let id = bp.id();
    assert!(fx.db.blueprint_row(id).is_some());

    bp.delete(&fx.cache).unwrap();
    assert!(fx.db.blueprint_row(id).is_none());
    assert!(!fx.db.contains(id));
}

#[test]
fn custom_junk_location_is_used() {
    let fx = Fixture::new();
    let junk = ItemId::new(66);
    let cache = fx
        .second_cache()
        .with_config(InventoryConfig::default().with_junk(junk, ItemFlag::BONUS));
    let ore = cache
        .spawn_item(ItemData::stack(ORE, OWNER, STATION, ItemFlag::HANGAR, 1))
        .unwrap();
    let session = fx.online(OWNER);

    ore.delete(&cache).unwrap();
    let received = session.take();
    let moved = received[0].as_item_change().unwrap();
    assert_eq!(moved.row.location, junk);
    assert_eq!(moved.row.flag, ItemFlag::BONUS);
}
