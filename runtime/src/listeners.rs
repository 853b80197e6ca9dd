//! Listener bookkeeping for the store.
//!
//! # Notification policy
//!
//! - The registry is snapshotted at the start of every pass. A listener
//!   subscribed during a pass first runs on the next pass.
//! - A listener unsubscribed during a pass is skipped if it has not run yet.
//! - No borrow is held while a callback runs, so callbacks may subscribe,
//!   unsubscribe, read state or install a new state (nested pass).

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::metrics::{LISTENERS_ACTIVE, LISTENERS_NOTIFIED, counter, gauge};

/// Identifier of one subscription, unique per registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct ListenerEntry {
    id: ListenerId,
    active: Cell<bool>,
    callback: Box<dyn Fn()>,
}

/// Ordered set of zero-argument callbacks
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: RefCell<Vec<Rc<ListenerEntry>>>,
    next_id: Cell<u64>,
}

impl ListenerRegistry {
    pub(crate) fn add(&self, callback: Box<dyn Fn()>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let len = {
            let mut entries = self.entries.borrow_mut();
            entries.push(Rc::new(ListenerEntry {
                id,
                active: Cell::new(true),
                callback,
            }));
            entries.len()
        };
        record_active(len);
        tracing::trace!(listener = id.0, active = len, "Listener subscribed");

        id
    }

    /// Removes the entry; returns whether it was still registered
    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let (removed, len) = {
            let mut entries = self.entries.borrow_mut();
            let removed = entries
                .iter()
                .position(|entry| entry.id == id)
                .map(|index| entries.remove(index));
            (removed, entries.len())
        };

        // the entry is dropped outside the borrow: its callback may own a store handle
        let Some(entry) = removed else {
            return false;
        };
        entry.active.set(false);
        drop(entry);

        record_active(len);
        tracing::trace!(listener = id.0, active = len, "Listener unsubscribed");
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Runs every listener registered when the pass starts, in order
    pub(crate) fn notify(&self) -> usize {
        let snapshot: SmallVec<[Rc<ListenerEntry>; 8]> =
            self.entries.borrow().iter().cloned().collect();

        let mut notified = 0;
        for entry in snapshot {
            if !entry.active.get() {
                tracing::trace!(listener = entry.id.0, "Skipping listener removed mid-pass");
                continue;
            }
            tracing::trace!(listener = entry.id.0, "Notifying listener");
            (entry.callback)();
            notified += 1;
        }

        counter!(LISTENERS_NOTIFIED).increment(notified as u64);
        notified
    }
}

#[allow(clippy::cast_precision_loss)] // listener counts are small
fn record_active(len: usize) {
    gauge!(LISTENERS_ACTIVE).set(len as f64);
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe)
///
/// Calling [`unsubscribe`](Self::unsubscribe) removes exactly the
/// subscription that produced this handle. Further calls do nothing.
/// Dropping the handle does **not** unsubscribe.
#[must_use = "the listener stays subscribed; keep the handle to remove it later"]
pub struct Unsubscribe {
    registry: Weak<ListenerRegistry>,
    id: ListenerId,
}

impl Unsubscribe {
    pub(crate) fn new(registry: &Rc<ListenerRegistry>, id: ListenerId) -> Self {
        Self {
            registry: Rc::downgrade(registry),
            id,
        }
    }

    /// The subscription this handle controls
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener from the store
    ///
    /// Idempotent. Also a no-op once the store itself is gone.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }

    /// Whether the listener is still registered
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            registry
                .entries
                .borrow()
                .iter()
                .any(|entry| entry.id == self.id)
        })
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
