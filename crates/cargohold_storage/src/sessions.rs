//! Session lookup that records every delivered notification.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cargohold_foundation::{Notification, OwnerId};
use tracing::debug;

use crate::traits::{ClientSession, NotificationSink};

/// A session that keeps what it receives.
#[derive(Debug)]
pub struct RecordingSession {
    owner: OwnerId,
    received: RefCell<Vec<Notification>>,
}

impl RecordingSession {
    /// Creates a session for an owner.
    #[must_use]
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            received: RefCell::new(Vec::new()),
        }
    }

    /// Returns the owner of this session.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns a copy of every notification received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }

    /// Drains the received notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.borrow_mut())
    }
}

impl ClientSession for RecordingSession {
    fn send(&self, notification: Notification) {
        debug!(owner = %self.owner, %notification, "delivering notification");
        self.received.borrow_mut().push(notification);
    }
}

/// Online owners and their sessions.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: RefCell<HashMap<OwnerId, Rc<RecordingSession>>>,
}

impl SessionTable {
    /// Creates a table with nobody online.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings an owner online, returning their session. Connecting twice
    /// returns the existing session.
    pub fn connect(&self, owner: OwnerId) -> Rc<RecordingSession> {
        Rc::clone(
            self.sessions
                .borrow_mut()
                .entry(owner)
                .or_insert_with(|| Rc::new(RecordingSession::new(owner))),
        )
    }

    /// Takes an owner offline. Later notifications to them are dropped.
    pub fn disconnect(&self, owner: OwnerId) {
        self.sessions.borrow_mut().remove(&owner);
    }

    /// Returns true if the owner has a session.
    #[must_use]
    pub fn is_online(&self, owner: OwnerId) -> bool {
        self.sessions.borrow().contains_key(&owner)
    }
}

impl NotificationSink for SessionTable {
    fn session(&self, owner: OwnerId) -> Option<Rc<dyn ClientSession>> {
        self.sessions
            .borrow()
            .get(&owner)
            .map(|s| Rc::clone(s) as Rc<dyn ClientSession>)
    }
}
