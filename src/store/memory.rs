//! In-memory carry store.

use crate::store::traits::CarryStore;
use std::collections::HashMap;
use std::hash::Hash;

/// `HashMap`-backed [`CarryStore`].
///
/// Entries are created on the first non-empty carry and dropped as soon as
/// an identity's carry becomes empty again, so idle connections cost
/// nothing. Owners call [`remove`](Self::remove) on connection teardown to
/// discard a pending fragment.
///
/// # Examples
///
/// ```
/// use lineframe::store::{CarryStore, MemoryCarryStore};
///
/// let mut store = MemoryCarryStore::new();
/// assert_eq!(store.lookup(&"S1"), "");
///
/// store.update(&"S1", "partial".to_string());
/// assert_eq!(store.lookup(&"S1"), "partial");
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryCarryStore<I> {
    carries: HashMap<I, String>,
}

impl<I> Default for MemoryCarryStore<I> {
    fn default() -> Self {
        Self {
            carries: HashMap::new(),
        }
    }
}

impl<I: Eq + Hash> MemoryCarryStore<I> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending carry for `identity`, if non-empty.
    #[must_use]
    pub fn get(&self, identity: &I) -> Option<&str> {
        self.carries.get(identity).map(String::as_str)
    }

    /// Discards the carry for `identity`, returning it.
    pub fn remove(&mut self, identity: &I) -> Option<String> {
        self.carries.remove(identity)
    }

    /// Number of identities with a pending fragment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carries.len()
    }

    /// Returns true if no identity has a pending fragment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carries.is_empty()
    }

    /// Iterates over identities with a pending fragment and their carries.
    pub fn iter(&self) -> impl Iterator<Item = (&I, &str)> {
        self.carries.iter().map(|(id, carry)| (id, carry.as_str()))
    }
}

impl<I> CarryStore<I> for MemoryCarryStore<I>
where
    I: Eq + Hash + Clone + Send,
{
    fn lookup(&self, identity: &I) -> String {
        self.carries.get(identity).cloned().unwrap_or_default()
    }

    fn update(&mut self, identity: &I, carry: String) {
        if carry.is_empty() {
            self.carries.remove(identity);
        } else if let Some(slot) = self.carries.get_mut(identity) {
            *slot = carry;
        } else {
            self.carries.insert(identity.clone(), carry);
        }
    }
}
