//! Integration tests for notification delivery
//!
//! Tests session resolution and fire-and-forget delivery through the
//! `NotificationSink` contract.

use std::rc::Rc;

use cargohold_foundation::{ItemId, Notification, OwnerId};
use cargohold_storage::{NotificationSink, SessionTable};

#[test]
fn delivery_reaches_only_the_resolved_owner() {
    let table = SessionTable::new();
    let alice = table.connect(OwnerId::new(1));
    let bob = table.connect(OwnerId::new(2));
    let sink: Rc<dyn NotificationSink> = Rc::new(table);

    sink.session(OwnerId::new(1))
        .unwrap()
        .send(Notification::SkillTrainingStopped {
            skill: ItemId::new(9),
        });

    assert_eq!(alice.received().len(), 1);
    assert!(bob.received().is_empty());
}

#[test]
fn offline_owner_resolves_to_none() {
    let table = SessionTable::new();
    table.connect(OwnerId::new(1));
    table.disconnect(OwnerId::new(1));
    assert!(table.session(OwnerId::new(1)).is_none());
    assert!(table.session(OwnerId::new(2)).is_none());
}

#[test]
fn session_outlives_disconnect_for_holders() {
    let table = SessionTable::new();
    let session = table.connect(OwnerId::new(1));
    let resolved = table.session(OwnerId::new(1)).unwrap();
    table.disconnect(OwnerId::new(1));

    resolved.send(Notification::SkillTrainingStarted {
        skill: ItemId::new(3),
    });
    assert_eq!(session.take().len(), 1);
}
