//! Framer construction.
//!
//! The builder settles the operating mode once, at `build`, from which
//! capabilities were supplied. Half a capability (lookup without update, or
//! the reverse) is rejected there rather than on the first chunk.

use crate::error::{FramingError, Result};
use crate::framing::framer::{Framer, Mode};
use crate::framing::sink::LineSink;
use crate::splitter::{CrlfSplitter, Splitter};
use crate::store::{CarryStore, FnCarryStore};
use std::fmt;
use std::sync::Arc;

type LookupFn<I> = Box<dyn Fn(&I) -> String + Send>;
type UpdateFn<I> = Box<dyn FnMut(&I, String) + Send>;

/// Builder for [`Framer`].
///
/// | supplied                 | mode                               |
/// |--------------------------|------------------------------------|
/// | nothing                  | single-stream                      |
/// | `store`                  | multiplexed over the store         |
/// | `lookup` and `update`    | multiplexed over the two functions |
/// | only `lookup` / `update` | [`FramingError::MissingCapability`] |
/// | `store` plus functions   | [`FramingError::ConflictingCapability`] |
///
/// # Examples
///
/// ```
/// use lineframe::framing::FramerBuilder;
/// use lineframe::splitter::StrictCrlfSplitter;
///
/// let mut framer = FramerBuilder::<()>::new()
///     .splitter(StrictCrlfSplitter)
///     .build(Vec::new())
///     .unwrap();
/// framer.feed("a\nb\r\n").unwrap();
/// assert_eq!(framer.sink()[0].line(), "a\nb");
/// ```
pub struct FramerBuilder<I> {
    splitter: Option<Arc<dyn Splitter>>,
    lookup: Option<LookupFn<I>>,
    update: Option<UpdateFn<I>>,
    store: Option<Box<dyn CarryStore<I>>>,
}

impl<I> Default for FramerBuilder<I> {
    fn default() -> Self {
        Self {
            splitter: None,
            lookup: None,
            update: None,
            store: None,
        }
    }
}

impl<I: Clone + 'static> FramerBuilder<I> {
    /// Creates a builder with the default `\r?\n` rule and no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a delimiter rule.
    #[must_use]
    pub fn splitter(mut self, splitter: impl Splitter + 'static) -> Self {
        self.splitter = Some(Arc::new(splitter));
        self
    }

    /// Installs a delimiter rule shared with other framers.
    #[must_use]
    pub fn shared_splitter(mut self, splitter: Arc<dyn Splitter>) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Supplies the per-identity carry lookup function.
    #[must_use]
    pub fn lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&I) -> String + Send + 'static,
    {
        self.lookup = Some(Box::new(lookup));
        self
    }

    /// Supplies the per-identity carry update function.
    #[must_use]
    pub fn update<F>(mut self, update: F) -> Self
    where
        F: FnMut(&I, String) + Send + 'static,
    {
        self.update = Some(Box::new(update));
        self
    }

    /// Supplies a carry store.
    #[must_use]
    pub fn store(mut self, store: impl CarryStore<I> + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Builds the framer, announcing lines to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::MissingCapability`] if only one of lookup and
    /// update was supplied, or [`FramingError::ConflictingCapability`] if a
    /// store was combined with either.
    pub fn build<S: LineSink<I>>(self, sink: S) -> Result<Framer<I, S>> {
        let mode = match (self.store, self.lookup, self.update) {
            (None, None, None) => Mode::SingleStream {
                carry: String::new(),
            },
            (Some(store), None, None) => Mode::Multiplexed { store },
            (None, Some(lookup), Some(update)) => Mode::Multiplexed {
                store: Box::new(FnCarryStore::new(lookup, update)),
            },
            (None, Some(_), None) => {
                return Err(FramingError::MissingCapability { missing: "update" }.into());
            }
            (None, None, Some(_)) => {
                return Err(FramingError::MissingCapability { missing: "lookup" }.into());
            }
            (Some(_), _, _) => return Err(FramingError::ConflictingCapability.into()),
        };

        let splitter = self.splitter.unwrap_or_else(|| Arc::new(CrlfSplitter));
        Ok(Framer::from_parts(mode, splitter, sink))
    }
}

impl<I> fmt::Debug for FramerBuilder<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramerBuilder")
            .field("splitter", &self.splitter.as_ref().map(|s| s.name()))
            .field("lookup", &self.lookup.is_some())
            .field("update", &self.update.is_some())
            .field("store", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LineNotification;
    use crate::error::Error;
    use crate::framing::FramerMode;
    use crate::splitter::{LfSplitter, PatternSplitter};
    use crate::store::MemoryCarryStore;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Notes<I> = Vec<LineNotification<I>>;

    #[test]
    fn test_default_is_single_stream() {
        let framer = FramerBuilder::<u8>::new().build(Notes::new()).unwrap();
        assert_eq!(framer.mode(), FramerMode::SingleStream);
        assert_eq!(framer.splitter_name(), "crlf");
    }

    #[test]
    fn test_store_selects_multiplexed() {
        let framer = FramerBuilder::new()
            .store(MemoryCarryStore::<u8>::new())
            .splitter(LfSplitter)
            .build(Notes::new())
            .unwrap();
        assert_eq!(framer.mode(), FramerMode::Multiplexed);
        assert_eq!(framer.splitter_name(), "lf");
    }

    #[test]
    fn test_lookup_and_update_functions() {
        let buffers: Arc<Mutex<HashMap<u16, String>>> = Arc::default();
        let read = Arc::clone(&buffers);
        let write = Arc::clone(&buffers);

        let mut framer = FramerBuilder::new()
            .lookup(move |id: &u16| read.lock().unwrap().get(id).cloned().unwrap_or_default())
            .update(move |id: &u16, carry| {
                write.lock().unwrap().insert(*id, carry);
            })
            .build(Notes::new())
            .unwrap();

        framer.feed_keyed(9, "hel").unwrap();
        assert_eq!(buffers.lock().unwrap().get(&9).map(String::as_str), Some("hel"));

        framer.feed_keyed(9, "lo\r\nwor").unwrap();
        assert_eq!(framer.sink().len(), 1);
        assert_eq!(framer.sink()[0].identity(), Some(&9));
        assert_eq!(framer.sink()[0].line(), "hello");
        assert_eq!(buffers.lock().unwrap().get(&9).map(String::as_str), Some("wor"));
    }

    #[test]
    fn test_lookup_without_update_rejected() {
        let err = FramerBuilder::<u8>::new()
            .lookup(|_| String::new())
            .build(Notes::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::MissingCapability { missing: "update" })
        ));
    }

    #[test]
    fn test_update_without_lookup_rejected() {
        let err = FramerBuilder::<u8>::new()
            .update(|_, _| {})
            .build(Notes::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::MissingCapability { missing: "lookup" })
        ));
    }

    #[test]
    fn test_store_with_functions_rejected() {
        let err = FramerBuilder::<u8>::new()
            .store(MemoryCarryStore::new())
            .lookup(|_| String::new())
            .update(|_, _| {})
            .build(Notes::new())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::ConflictingCapability)
        ));
    }

    #[test]
    fn test_custom_pattern_splitter() {
        let mut framer = FramerBuilder::<()>::new()
            .splitter(PatternSplitter::literal("\0").unwrap())
            .build(Notes::new())
            .unwrap();
        framer.feed("a\0b\n\0c").unwrap();
        let lines: Vec<_> = framer.sink().iter().map(|n| n.line().as_str()).collect();
        assert_eq!(lines, ["a", "b\n"]);
        assert_eq!(framer.carry(), Some("c"));
    }

    #[test]
    fn test_builder_debug() {
        let builder = FramerBuilder::<u8>::new().lookup(|_| String::new());
        let debug = format!("{builder:?}");
        assert!(debug.contains("lookup: true"));
        assert!(debug.contains("update: false"));
    }
}
