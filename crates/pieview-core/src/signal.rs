//! Type-safe signal/slot system.
//!
//! Signals are the notification primitive of the model/view architecture:
//! the item model emits them around mutations, and the view and adapter
//! layers connect slots to stay synchronized.
//!
//! Dispatch is direct and synchronous. Every query and mutation in this
//! system runs to completion on the thread that owns the widget and its
//! model, so there is no queued or cross-thread delivery.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Identifies a single signal/slot connection.
    ///
    /// Returned by [`Signal::connect`] and used to disconnect the slot later.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe multicast signal.
///
/// `Signal<Args>` holds a list of connected slots and invokes each of them
/// with a reference to the emitted arguments.
///
/// # Example
///
/// ```
/// use pieview_core::Signal;
///
/// let signal = Signal::<String>::new();
/// let id = signal.connect(|s| println!("Got: {}", s));
/// signal.emit("Hello".to_string());
/// signal.disconnect(id);
/// ```
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync` and can be shared behind an `Arc`. Slots
/// are always invoked on the emitting thread.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot whose lifetime is tied to the returned guard.
    ///
    /// The connection is removed when the [`ConnectionGuard`] is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use pieview_core::Signal;
    ///
    /// let signal = Signal::<i32>::new();
    /// {
    ///     let _guard = signal.connect_scoped(|n| println!("{}", n));
    ///     assert_eq!(signal.connection_count(), 1);
    /// }
    /// assert_eq!(signal.connection_count(), 0);
    /// ```
    pub fn connect_scoped<'s, F>(&'s self, slot: F) -> ConnectionGuard<'s, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: self.connect(slot),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during batch
    /// updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in insertion order.
    ///
    /// If the signal is blocked, this does nothing. Slots may connect or
    /// disconnect other slots while the emission is in flight; such changes
    /// take effect on the next emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "pieview_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slot list so slots may reconnect without deadlocking.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: "pieview_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );
        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<(usize, usize)>: Send, Sync);

/// RAII wrapper around a signal connection.
///
/// Disconnects the slot when dropped. Created by [`Signal::connect_scoped`].
pub struct ConnectionGuard<'s, Args> {
    signal: &'s Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.connections.lock().remove(self.id);
    }
}
