//! Signal/slot system for Vitrine.
//!
//! Controllers communicate outward through signals: a panel emits its state
//! transitions, a watcher emits entered/exited edges, a media controller
//! emits controls visibility. Hosts connect slots (closures) and receive
//! every emission until they disconnect.
//!
//! The toolkit's concurrency model is single-threaded and cooperative, so
//! there is no queued or cross-thread dispatch here: every slot runs
//! directly in the emitting call. Signals are still `Send + Sync` so that
//! controllers can be held behind shared handles.
//!
//! # Example
//!
//! ```
//! use vitrine_core::Signal;
//!
//! let state_changed = Signal::<String>::new();
//!
//! let conn_id = state_changed.connect(|s| {
//!     println!("state: {s}");
//! });
//!
//! state_changed.emit("open".to_string());
//! state_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with any number of connected slots.
///
/// Emitting invokes every connected slot, in connection order, with a
/// reference to the emitted value. Slots connected or disconnected from
/// within a slot take effect from the next emission.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
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

    /// Temporarily block emissions. Blocked emissions are dropped, not
    /// queued.
    pub fn block(&self) {
        self.blocked.store(true, Ordering::SeqCst);
    }

    /// Re-enable emissions after [`block`](Self::block).
    pub fn unblock(&self) {
        self.blocked.store(false, Ordering::SeqCst);
    }

    /// Whether emissions are currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            return;
        }

        // Snapshot the slots so a slot may connect/disconnect without
        // deadlocking on the connections lock.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = self
            .connections
            .lock()
            .values()
            .map(|c| c.slot.clone())
            .collect();

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

/// RAII guard that disconnects a signal connection when dropped.
///
/// Created with [`ConnectionGuard::new`] from a shared signal. Useful for
/// controllers that must guarantee teardown on unmount.
pub struct ConnectionGuard<Args> {
    signal: Weak<Signal<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// Connect `slot` to `signal` and return a guard that disconnects it
    /// when dropped.
    pub fn new<F>(signal: &Arc<Signal<Args>>, slot: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = signal.connect(slot);
        Self {
            signal: Arc::downgrade(signal),
            id,
        }
    }

    /// The underlying connection id.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.disconnect(self.id);
        }
    }
}

// Signals must be shareable behind controller handles.
static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
