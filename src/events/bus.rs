//! In-process publish/subscribe registry.
//!
//! [`Bus`] carries the three broadcast channels that wire the system
//! together: the two re-initialization channels and the drop
//! confirmation channel. A drop raised by one zone is observed by every
//! live draggable, which filters by identity; neither side holds a
//! reference to the other.
//!
//! ## Rules
//! - **Synchronous, ordered delivery**: `publish()` returns only after
//!   every subscriber callback has run, in subscription order.
//! - **Snapshot dispatch**: subscribers added while a publish is in
//!   flight do not observe the in-flight event; subscribers removed
//!   mid-flight are skipped.
//! - **Idempotent re-registration**: `subscribe()` returns a
//!   [`Subscription`] handle; dropping it removes the callback, so an
//!   instance that tears its old handle down before installing a new
//!   one never accumulates duplicate listeners across resets.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::types::{DropReceipt, ResetScope};

/// Broadcast channel names, the wire contract for external drivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Re-run draggable init, optionally scoped to a set of drag ids
    InitializeDraggables,
    /// Re-run droppable init, optionally scoped to a set of drop ids
    InitializeDroppables,
    /// One accepted drop happened
    ElementDropped,
}

/// Payload carried on a channel.
#[derive(Clone, Debug)]
pub enum BusEvent {
    InitializeDraggables(ResetScope),
    InitializeDroppables(ResetScope),
    ElementDropped(DropReceipt),
}

impl BusEvent {
    /// Channel this payload belongs to.
    pub fn channel(&self) -> Channel {
        match self {
            Self::InitializeDraggables(_) => Channel::InitializeDraggables,
            Self::InitializeDroppables(_) => Channel::InitializeDroppables,
            Self::ElementDropped(_) => Channel::ElementDropped,
        }
    }
}

type Callback = Arc<Mutex<Box<dyn FnMut(&BusEvent) + Send>>>;

struct Entry {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct BusInner {
    subscribers: HashMap<Channel, Vec<Entry>>,
    next_id: u64,
}

/// Synchronous broadcast bus.
///
/// Cheap to clone; clones share the same subscriber registry. One bus
/// instance is scoped to one application context — use [`global`] when
/// the whole process is that context, or construct a fresh bus per
/// board (tests do the latter for isolation).
#[derive(Clone, Default)]
pub struct Bus {
    inner: Arc<Mutex<BusInner>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback on a channel.
    ///
    /// The returned handle owns the registration: dropping it (or
    /// calling [`Subscription::unsubscribe`]) removes the callback.
    pub fn subscribe(
        &self,
        channel: Channel,
        callback: impl FnMut(&BusEvent) + Send + 'static,
    ) -> Subscription {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.subscribers.entry(channel).or_default().push(Entry {
            id,
            callback: Arc::new(Mutex::new(Box::new(callback))),
        });
        Subscription {
            channel,
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every subscriber of its channel, in order.
    pub fn publish(&self, event: BusEvent) {
        let channel = event.channel();
        let snapshot: Vec<(u64, Callback)> = {
            let inner = self.inner.lock();
            inner
                .subscribers
                .get(&channel)
                .map(|entries| {
                    entries
                        .iter()
                        .map(|e| (e.id, Arc::clone(&e.callback)))
                        .collect()
                })
                .unwrap_or_default()
        };
        for (id, callback) in snapshot {
            // skip callbacks unsubscribed by an earlier subscriber in
            // this same dispatch
            let still_registered = {
                let inner = self.inner.lock();
                inner
                    .subscribers
                    .get(&channel)
                    .is_some_and(|entries| entries.iter().any(|e| e.id == id))
            };
            if still_registered {
                let mut cb = callback.lock();
                (*cb)(&event);
            }
        }
    }

    /// Number of live subscriptions on a channel.
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.inner
            .lock()
            .subscribers
            .get(&channel)
            .map_or(0, Vec::len)
    }

    fn remove(inner: &Weak<Mutex<BusInner>>, channel: Channel, id: u64) {
        if let Some(inner) = inner.upgrade() {
            let mut inner = inner.lock();
            if let Some(entries) = inner.subscribers.get_mut(&channel) {
                entries.retain(|e| e.id != id);
            }
        }
    }
}

/// Handle owning one channel registration.
///
/// Held by the subscribing instance; replaced wholesale on every
/// re-init so repeated resets never stack listeners.
pub struct Subscription {
    channel: Channel,
    id: u64,
    bus: Weak<Mutex<BusInner>>,
}

impl Subscription {
    /// Remove the registration now instead of at drop time.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        Bus::remove(&self.bus, self.channel, self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .field("id", &self.id)
            .finish()
    }
}

static GLOBAL: Lazy<Bus> = Lazy::new(Bus::new);

/// The process-wide bus, for applications whose root context is the
/// whole process.
pub fn global() -> &'static Bus {
    &GLOBAL
}
