// SPDX-License-Identifier: MPL-2.0
//! Insertion-ordered map of live notifications.
//!
//! The registry only tracks membership and order. Capacity enforcement and
//! timer cleanup are driven by the [`Manager`](super::Manager), which always
//! goes through [`Registry::remove`] so that every removal path hands back
//! the entry's pending task handles.

use super::notification::{Notification, NotificationId};
use super::scheduler::TaskHandle;
use indexmap::IndexMap;

/// A live notification together with its pending timers.
#[derive(Debug)]
pub struct Entry {
    pub notification: Notification,
    pub timers: Vec<TaskHandle>,
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<NotificationId, Entry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification as the newest entry.
    ///
    /// The caller must have removed any entry with the same id first; an
    /// existing entry would otherwise keep its old position.
    pub fn insert(&mut self, notification: Notification, timers: Vec<TaskHandle>) {
        debug_assert!(!self.entries.contains_key(notification.id()));
        self.entries.insert(
            notification.id().clone(),
            Entry {
                notification,
                timers,
            },
        );
    }

    /// Removes an entry, preserving the order of the remaining ones.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Entry> {
        self.entries.shift_remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.entries.get(id).map(|entry| &entry.notification)
    }

    pub fn get_mut(&mut self, id: &NotificationId) -> Option<&mut Notification> {
        self.entries.get_mut(id).map(|entry| &mut entry.notification)
    }

    /// Id of the entry registered earliest among the live ones.
    #[must_use]
    pub fn oldest(&self) -> Option<&NotificationId> {
        self.entries.first().map(|(id, _)| id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &NotificationId> {
        self.entries.keys()
    }

    /// Notifications in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.values().map(|entry| &entry.notification)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
