//=========================================================================
// Signals
//=========================================================================
//
// Multicast notification channels with explicit subscription handles.
//
// Architecture:
//   Signal<T> ──emit()──> Sender<T> per subscriber ──> Receiver<T>
//                                                         ↓
//                                          Subscription<T>::drain()
//
// Each subscriber owns its own inbox, so fan-out does not depend on the
// order in which subscribers attached. Delivery is pull-based: values sit
// in the inbox until the subscriber drains it during its own update.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crossbeam_channel::{unbounded, Receiver, Sender};

//=== Internal Dependencies ===============================================

use super::error::{GridError, Result};

//=== SubscriptionId ======================================================

/// Opaque identifier of one subscription on one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

//=== Subscriber Registry =================================================

struct Subscribers<T> {
    next_id: u64,
    senders: Vec<(SubscriptionId, Sender<T>)>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            senders: Vec::new(),
        }
    }
}

fn attach<T>(registry: &Rc<RefCell<Subscribers<T>>>) -> Subscription<T> {
    let (tx, rx) = unbounded();

    let mut subscribers = registry.borrow_mut();
    let id = SubscriptionId(subscribers.next_id);
    subscribers.next_id += 1;
    subscribers.senders.push((id, tx));

    Subscription {
        id,
        receiver: rx,
        registry: Rc::downgrade(registry),
        attached: true,
    }
}

//=== Signal ==============================================================

/// Owning end of a multicast channel.
///
/// Only the owner can emit. Other components either subscribe through a
/// shared reference or keep a [`SignalSource`] and subscribe later.
pub struct Signal<T> {
    registry: Rc<RefCell<Subscribers<T>>>,
}

impl<T: Clone> Signal<T> {
    /// Creates a signal with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Subscribers::new())),
        }
    }

    /// Attaches a new subscriber. Values emitted from now on are queued
    /// in the returned subscription.
    pub fn subscribe(&self) -> Subscription<T> {
        attach(&self.registry)
    }

    /// Returns a subscribe-only view that does not keep the signal alive.
    pub fn source(&self) -> SignalSource<T> {
        SignalSource {
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Queues a copy of `value` for every live subscriber.
    pub fn emit(&self, value: T) {
        let subscribers = self.registry.borrow();
        for (_, sender) in &subscribers.senders {
            // Disconnected inboxes belong to subscriptions mid-teardown.
            let _ = sender.send(value.clone());
        }
    }

    /// Number of currently attached subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().senders.len()
    }
}

impl<T: Clone> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.registry.borrow().senders.len())
            .finish()
    }
}

//=== SignalSource ========================================================

/// Weak, subscribe-only handle to a [`Signal`].
pub struct SignalSource<T> {
    registry: Weak<RefCell<Subscribers<T>>>,
}

impl<T> SignalSource<T> {
    /// Returns `true` while the owning signal is still alive.
    pub fn is_live(&self) -> bool {
        self.registry.strong_count() > 0
    }

    /// Subscribes to the owning signal.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidArgument`] if the signal has been dropped.
    pub fn subscribe(&self) -> Result<Subscription<T>> {
        let registry = self.registry.upgrade().ok_or_else(|| {
            GridError::InvalidArgument("signal source is no longer live".into())
        })?;
        Ok(attach(&registry))
    }
}

impl<T> Clone for SignalSource<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<T> fmt::Debug for SignalSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSource")
            .field("live", &self.is_live())
            .finish()
    }
}

//=== Subscription ========================================================

/// Receiving end of one subscription.
///
/// Dropping the subscription detaches it from the signal.
pub struct Subscription<T> {
    id: SubscriptionId,
    receiver: Receiver<T>,
    registry: Weak<RefCell<Subscribers<T>>>,
    attached: bool,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns `false` once [`unsubscribe`](Self::unsubscribe) has run.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Pops the oldest queued value, if any.
    pub fn try_next(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Takes every queued value in emission order.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Number of values waiting in the inbox.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Detaches from the signal and discards anything still queued.
    ///
    /// Safe to call repeatedly, and safe after the signal was dropped.
    pub fn unsubscribe(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;

        if let Some(registry) = self.registry.upgrade() {
            let id = self.id;
            registry.borrow_mut().senders.retain(|(sub, _)| *sub != id);
        }

        while self.receiver.try_recv().is_ok() {}
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.attached)
            .field("pending", &self.receiver.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
