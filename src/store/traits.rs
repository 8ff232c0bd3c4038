//! Carry store trait definition.
//!
//! Defines the capability a multiplexed framer reads and writes per-identity
//! carry buffers through. The framer never creates, evicts or enumerates
//! entries itself; that is entirely up to the implementation.

/// Per-identity storage for carry buffers.
///
/// A framer calls [`lookup`](Self::lookup) then [`update`](Self::update) for
/// every chunk of a given identity. Implementations shared between threads
/// must make that read-modify-write atomic per identity; chunks for one
/// identity must never interleave.
pub trait CarryStore<I>: Send {
    /// Returns the carry for `identity`, or an empty string if none exists.
    fn lookup(&self, identity: &I) -> String;

    /// Persists `carry` for `identity`, overwriting any prior value.
    fn update(&mut self, identity: &I, carry: String);
}

impl<I, S: CarryStore<I> + ?Sized> CarryStore<I> for Box<S> {
    fn lookup(&self, identity: &I) -> String {
        (**self).lookup(identity)
    }

    fn update(&mut self, identity: &I, carry: String) {
        (**self).update(identity, carry);
    }
}
