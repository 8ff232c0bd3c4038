//! Carry store built from a lookup function and an update function.

use crate::store::traits::CarryStore;
use std::fmt;

/// [`CarryStore`] that forwards to two injected functions.
///
/// This is the shape a host system with its own per-connection state uses:
/// `lookup(identity) -> carry` reads the connection's buffer and
/// `update(identity, carry)` writes it back. Storage, creation and eviction
/// stay with the host.
///
/// # Examples
///
/// ```
/// use lineframe::store::{CarryStore, FnCarryStore};
/// use std::collections::HashMap;
/// use std::sync::{Arc, Mutex};
///
/// let buffers: Arc<Mutex<HashMap<u32, String>>> = Arc::default();
/// let read = Arc::clone(&buffers);
/// let write = Arc::clone(&buffers);
///
/// let mut store = FnCarryStore::new(
///     move |id: &u32| read.lock().map(|m| m.get(id).cloned().unwrap_or_default()).unwrap_or_default(),
///     move |id: &u32, carry: String| {
///         if let Ok(mut m) = write.lock() {
///             m.insert(*id, carry);
///         }
///     },
/// );
///
/// store.update(&7, "abc".to_string());
/// assert_eq!(store.lookup(&7), "abc");
/// ```
pub struct FnCarryStore<L, U> {
    lookup: L,
    update: U,
}

impl<L, U> FnCarryStore<L, U> {
    /// Creates a store from the two capability functions.
    pub const fn new(lookup: L, update: U) -> Self {
        Self { lookup, update }
    }
}

impl<L, U> fmt::Debug for FnCarryStore<L, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCarryStore").finish_non_exhaustive()
    }
}

impl<I, L, U> CarryStore<I> for FnCarryStore<L, U>
where
    L: Fn(&I) -> String + Send,
    U: FnMut(&I, String) + Send,
{
    fn lookup(&self, identity: &I) -> String {
        (self.lookup)(identity)
    }

    fn update(&mut self, identity: &I, carry: String) {
        (self.update)(identity, carry);
    }
}
