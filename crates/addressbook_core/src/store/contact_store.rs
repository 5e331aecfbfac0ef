//! Observable contact container.
//!
//! # Responsibility
//! - Hold the current ordered contact sequence.
//! - Replace it wholesale and notify registered observers on every change.
//!
//! # Invariants
//! - Observers are notified in registration order.
//! - Every top-level `set`/`update` finishes its notification pass before
//!   returning. A `set` issued from inside an observer is queued behind the
//!   pass in progress, so every observer sees changes in `set` order and
//!   ends on the value the store holds.
//! - Observers only ever see fully settled snapshots.
//! - A panicking observer never prevents later observers from running.
//! - No `RefCell` borrow is held while an observer runs, so observers may
//!   call back into the store.

use crate::logging::panic_payload_summary;
use crate::model::contact::Contact;
use log::{debug, error};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

type Observer = Rc<dyn Fn(&[Contact])>;

/// Handle returned by [`ContactStore::subscribe`].
///
/// Ids are allocated monotonically and never reused within one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

struct StoreState {
    contacts: Rc<Vec<Contact>>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    pending: VecDeque<PendingNotification>,
    draining: bool,
}

struct PendingNotification {
    id: SubscriptionId,
    observer: Observer,
    contacts: Rc<Vec<Contact>>,
}

/// Single-threaded observable holder of the address book.
///
/// Construct one per process and pass it by reference to whichever
/// components read, replace, or watch the contact list.
pub struct ContactStore {
    state: RefCell<StoreState>,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self {
            state: RefCell::new(StoreState {
                contacts: Rc::new(Vec::new()),
                observers: Vec::new(),
                next_subscription: 1,
                pending: VecDeque::new(),
                draining: false,
            }),
        }
    }
}

impl Debug for ContactStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ContactStore")
            .field("contacts", &state.contacts)
            .field("subscribers", &state.observers.len())
            .finish()
    }
}

impl ContactStore {
    /// Creates a store holding an empty sequence and no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a shared handle to the current sequence.
    ///
    /// The handle stays valid after later `set` calls; it simply keeps
    /// pointing at the sequence that was current when it was taken.
    pub fn snapshot(&self) -> Rc<Vec<Contact>> {
        Rc::clone(&self.state.borrow().contacts)
    }

    /// Returns an owned copy of the current sequence.
    pub fn get(&self) -> Vec<Contact> {
        self.state.borrow().contacts.as_ref().clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().contacts.is_empty()
    }

    /// Number of currently registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Replaces the whole sequence and notifies every observer.
    ///
    /// # Contract
    /// - The new sequence is stored as given: no merge, no dedup, no checks.
    /// - Observers run even when `contacts` equals the previous value.
    /// - Called from outside any observer, all observers have been invoked
    ///   when this returns.
    /// - Called from inside an observer, the held value changes immediately
    ///   but notifications are queued behind the pass already running.
    pub fn set(&self, contacts: Vec<Contact>) {
        let (contact_count, queued, nested) = {
            let mut state = self.state.borrow_mut();
            let snapshot = Rc::new(contacts);
            state.contacts = Rc::clone(&snapshot);
            let queued = state.observers.len();
            let entries: Vec<PendingNotification> = state
                .observers
                .iter()
                .map(|(id, observer)| PendingNotification {
                    id: *id,
                    observer: Rc::clone(observer),
                    contacts: Rc::clone(&snapshot),
                })
                .collect();
            state.pending.extend(entries);
            let nested = state.draining;
            state.draining = true;
            (snapshot.len(), queued, nested)
        };

        debug!(
            "event=store_set module=store status=start contacts={} queued={} nested={}",
            contact_count, queued, nested
        );
        if nested {
            return;
        }

        let (delivered, failed) = self.drain_pending();
        debug!(
            "event=store_set module=store status=ok contacts={} delivered={} failed={}",
            contact_count, delivered, failed
        );
    }

    /// Derives a new sequence from the current one and [`set`](Self::set)s it.
    pub fn update<F>(&self, transform: F)
    where
        F: FnOnce(&[Contact]) -> Vec<Contact>,
    {
        let current = self.snapshot();
        self.set(transform(current.as_slice()));
    }

    /// Registers `observer` and immediately invokes it with the current
    /// sequence.
    ///
    /// The observer is then invoked once per later `set`/`update` until
    /// [`unsubscribe`](Self::unsubscribe) is called with the returned id.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&[Contact]) + 'static,
    {
        let observer: Observer = Rc::new(observer);
        let (id, snapshot) = {
            let mut state = self.state.borrow_mut();
            let id = SubscriptionId(state.next_subscription);
            state.next_subscription += 1;
            state.observers.push((id, Rc::clone(&observer)));
            (id, Rc::clone(&state.contacts))
        };

        debug!(
            "event=store_subscribe module=store status=ok subscription_id={} contacts={}",
            id.0,
            snapshot.len()
        );
        notify(id, &observer, snapshot.as_slice());
        id
    }

    /// Removes a registered observer.
    ///
    /// Returns `false` without side effects when `id` is unknown or was
    /// already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let before = state.observers.len();
            state.observers.retain(|(existing, _)| *existing != id);
            state.pending.retain(|pending| pending.id != id);
            state.observers.len() != before
        };

        debug!(
            "event=store_unsubscribe module=store status=ok subscription_id={} removed={}",
            id.0, removed
        );
        removed
    }

    /// Delivers queued notifications in FIFO order until the queue is empty.
    ///
    /// Returns `(delivered, failed)` counts.
    fn drain_pending(&self) -> (usize, usize) {
        let mut delivered = 0_usize;
        let mut failed = 0_usize;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let next = state.pending.pop_front();
                if next.is_none() {
                    state.draining = false;
                }
                next
            };
            let Some(pending) = next else {
                return (delivered, failed);
            };

            delivered += 1;
            if !notify(pending.id, &pending.observer, pending.contacts.as_slice()) {
                failed += 1;
            }
        }
    }
}

/// Runs one observer, containing any panic it raises.
///
/// Returns `false` when the observer panicked.
fn notify(id: SubscriptionId, observer: &Observer, contacts: &[Contact]) -> bool {
    match catch_unwind(AssertUnwindSafe(|| observer(contacts))) {
        Ok(()) => true,
        Err(payload) => {
            error!(
                "event=observer_notify module=store status=error subscription_id={} contacts={} payload={}",
                id.0,
                contacts.len(),
                panic_payload_summary(payload.as_ref())
            );
            false
        }
    }
}
