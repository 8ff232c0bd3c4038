//! Stateful line framer.
//!
//! Adapts a pure [`Splitter`] into a per-stream or per-connection line
//! reconstructor. The operating mode is fixed when the framer is built:
//!
//! - **single-stream**: the framer owns one carry buffer;
//! - **multiplexed**: the framer owns no carry and reaches each identity's
//!   buffer through a [`CarryStore`].
//!
//! Every completed line is announced to the framer's [`LineSink`], in the
//! order its delimiter appeared in the stream.

use crate::core::{EventArg, Line, LineNotification, ReadEvent};
use crate::error::{FramingError, Result};
use crate::framing::sink::LineSink;
use crate::splitter::{CrlfSplitter, Splitter};
use crate::store::CarryStore;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Operating mode of a [`Framer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerMode {
    /// One carry buffer, chunks without identity.
    SingleStream,
    /// One carry buffer per identity, held in a carry store.
    Multiplexed,
}

impl FramerMode {
    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleStream => "single-stream",
            Self::Multiplexed => "multiplexed",
        }
    }
}

impl fmt::Display for FramerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Carry ownership, resolved once at construction.
pub(crate) enum Mode<I> {
    SingleStream { carry: String },
    Multiplexed { store: Box<dyn CarryStore<I>> },
}

impl<I> Mode<I> {
    const fn kind(&self) -> FramerMode {
        match self {
            Self::SingleStream { .. } => FramerMode::SingleStream,
            Self::Multiplexed { .. } => FramerMode::Multiplexed,
        }
    }
}

/// Line framer over a stream of read events.
///
/// # Examples
///
/// Single-stream:
///
/// ```
/// use lineframe::framing::Framer;
///
/// let mut framer = Framer::<(), _>::single_stream(Vec::new());
/// framer.feed("fo").unwrap();
/// framer.feed("o\r\nbar").unwrap();
///
/// let lines: Vec<_> = framer.sink().iter().map(|n| n.line().to_string()).collect();
/// assert_eq!(lines, ["foo"]);
/// assert_eq!(framer.carry(), Some("bar"));
/// ```
///
/// Multiplexed:
///
/// ```
/// use lineframe::framing::Framer;
/// use lineframe::store::MemoryCarryStore;
///
/// let mut framer = Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
/// framer.feed_keyed("S1", "a").unwrap();
/// framer.feed_keyed("S2", "b\n").unwrap();
/// framer.feed_keyed("S1", "\n").unwrap();
///
/// let seen: Vec<_> = framer
///     .sink()
///     .iter()
///     .map(|n| (*n.identity().unwrap(), n.line().to_string()))
///     .collect();
/// assert_eq!(seen, [("S2", "b".to_string()), ("S1", "a".to_string())]);
/// ```
pub struct Framer<I, S> {
    mode: Mode<I>,
    splitter: Arc<dyn Splitter>,
    sink: S,
    lines_emitted: u64,
}

impl<I, S> Framer<I, S>
where
    I: Clone,
    S: LineSink<I>,
{
    /// Creates a single-stream framer with the default `\r?\n` rule.
    pub fn single_stream(sink: S) -> Self {
        Self::from_parts(
            Mode::SingleStream {
                carry: String::new(),
            },
            Arc::new(CrlfSplitter),
            sink,
        )
    }

    /// Creates a multiplexed framer with the default `\r?\n` rule.
    pub fn multiplexed(store: impl CarryStore<I> + 'static, sink: S) -> Self {
        Self::from_parts(
            Mode::Multiplexed {
                store: Box::new(store),
            },
            Arc::new(CrlfSplitter),
            sink,
        )
    }

    pub(crate) fn from_parts(mode: Mode<I>, splitter: Arc<dyn Splitter>, sink: S) -> Self {
        Self {
            mode,
            splitter,
            sink,
            lines_emitted: 0,
        }
    }

    /// Handles one read event.
    ///
    /// Splits the event's chunk against the relevant carry, persists the new
    /// carry, then emits one notification per completed line, in order.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::ModeMismatch`] if a keyed event reaches a
    /// single-stream framer or a bare chunk reaches a multiplexed one. The
    /// event is not processed and no state changes.
    pub fn on_chunk_received(&mut self, event: ReadEvent<I>) -> Result<()> {
        match event {
            ReadEvent::Chunk(chunk) => self.frame_single(&chunk),
            ReadEvent::Keyed { identity, chunk } => self.frame_keyed(identity, &chunk),
        }
    }

    /// Handles a read event given as positional values.
    ///
    /// `[Data]` is a single-stream chunk; `[Identity, Data]` is a keyed one.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::Arity`] for any other count or shape, and
    /// [`FramingError::ModeMismatch`] as for
    /// [`on_chunk_received`](Self::on_chunk_received).
    pub fn on_read(&mut self, args: Vec<EventArg<I>>) -> Result<()> {
        let event = ReadEvent::from_args(args)?;
        self.on_chunk_received(event)
    }

    /// Feeds a single-stream chunk.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::ModeMismatch`] on a multiplexed framer.
    pub fn feed(&mut self, chunk: &str) -> Result<()> {
        self.frame_single(chunk)
    }

    /// Feeds a chunk for one connection identity.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::ModeMismatch`] on a single-stream framer.
    pub fn feed_keyed(&mut self, identity: I, chunk: &str) -> Result<()> {
        self.frame_keyed(identity, chunk)
    }

    fn frame_single(&mut self, chunk: &str) -> Result<()> {
        let Mode::SingleStream { carry } = &mut self.mode else {
            return Err(mismatch(FramerMode::Multiplexed, "single-stream"));
        };

        let split = self.splitter.split(chunk, carry);
        *carry = split.carry;
        debug!(
            mode = "single-stream",
            chunk_len = chunk.len(),
            lines = split.lines.len(),
            carry_len = carry.len(),
            "framed chunk"
        );

        for line in split.lines {
            self.emit(LineNotification::Line(Line::from(line)));
        }
        Ok(())
    }

    fn frame_keyed(&mut self, identity: I, chunk: &str) -> Result<()> {
        let Mode::Multiplexed { store } = &mut self.mode else {
            return Err(mismatch(FramerMode::SingleStream, "keyed"));
        };

        let carry = store.lookup(&identity);
        let split = self.splitter.split(chunk, &carry);
        let carry_len = split.carry.len();
        store.update(&identity, split.carry);
        debug!(
            mode = "multiplexed",
            chunk_len = chunk.len(),
            lines = split.lines.len(),
            carry_len,
            "framed chunk"
        );

        for line in split.lines {
            self.emit(LineNotification::Keyed {
                identity: identity.clone(),
                line: Line::from(line),
            });
        }
        Ok(())
    }

    fn emit(&mut self, notification: LineNotification<I>) {
        trace!(line_len = notification.line().len(), "emitting line");
        self.sink.emit(notification);
        self.lines_emitted += 1;
    }
}

fn mismatch(mode: FramerMode, event: &'static str) -> crate::error::Error {
    FramingError::ModeMismatch {
        mode: mode.as_str(),
        event,
    }
    .into()
}

impl<I, S> Framer<I, S> {
    /// Returns the operating mode.
    #[must_use]
    pub const fn mode(&self) -> FramerMode {
        self.mode.kind()
    }

    /// Returns the pending fragment of a single-stream framer.
    ///
    /// Multiplexed framers hold no carry and return `None`.
    #[must_use]
    pub fn carry(&self) -> Option<&str> {
        match &self.mode {
            Mode::SingleStream { carry } => Some(carry),
            Mode::Multiplexed { .. } => None,
        }
    }

    /// Looks up the pending fragment of one identity in a multiplexed
    /// framer's carry store.
    ///
    /// Single-stream framers return `None`.
    #[must_use]
    pub fn carry_for(&self, identity: &I) -> Option<String> {
        match &self.mode {
            Mode::SingleStream { .. } => None,
            Mode::Multiplexed { store } => Some(store.lookup(identity)),
        }
    }

    /// Returns the name of the installed delimiter rule.
    #[must_use]
    pub fn splitter_name(&self) -> &'static str {
        self.splitter.name()
    }

    /// Number of lines emitted so far.
    #[must_use]
    pub const fn lines_emitted(&self) -> u64 {
        self.lines_emitted
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the framer, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<I, S> fmt::Debug for Framer<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framer")
            .field("mode", &self.mode())
            .field("splitter", &self.splitter_name())
            .field("carry", &self.carry())
            .field("lines_emitted", &self.lines_emitted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryCarryStore;

    type Notes<I> = Vec<LineNotification<I>>;

    fn single() -> Framer<(), Notes<()>> {
        Framer::single_stream(Vec::new())
    }

    fn lines<I>(framer: &Framer<I, Notes<I>>) -> Vec<String> {
        framer
            .sink()
            .iter()
            .map(|n| n.line().to_string())
            .collect()
    }

    #[test]
    fn test_crlf_then_lf() {
        let mut framer = single();
        framer.feed("foo\r\n").unwrap();
        assert_eq!(lines(&framer), ["foo"]);
        framer.feed("bar\n").unwrap();
        assert_eq!(lines(&framer), ["foo", "bar"]);
        assert_eq!(framer.carry(), Some(""));
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut framer = single();
        framer.feed("fo").unwrap();
        assert!(framer.sink().is_empty());
        assert_eq!(framer.carry(), Some("fo"));

        framer.feed("o\r\nbar").unwrap();
        assert_eq!(lines(&framer), ["foo"]);
        assert_eq!(framer.carry(), Some("bar"));
    }

    #[test]
    fn test_cr_and_lf_in_separate_chunks() {
        let mut framer = single();
        framer.feed("\r").unwrap();
        assert!(framer.sink().is_empty());
        assert_eq!(framer.carry(), Some("\r"));

        framer.feed("\nhello\n").unwrap();
        assert_eq!(lines(&framer), ["", "hello"]);
        assert_eq!(framer.carry(), Some(""));
    }

    #[test]
    fn test_single_stream_notifications_are_unkeyed() {
        let mut framer = single();
        framer.on_chunk_received(ReadEvent::chunk("x\n")).unwrap();
        assert_eq!(
            framer.sink().as_slice(),
            [LineNotification::Line(Line::new("x"))]
        );
        assert_eq!(framer.lines_emitted(), 1);
    }

    #[test]
    fn test_multiplexed_isolation() {
        let mut framer = Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
        framer.feed_keyed("S1", "a").unwrap();
        framer.feed_keyed("S2", "b").unwrap();
        framer.feed_keyed("S2", "\n").unwrap();
        framer.feed_keyed("S1", "\n").unwrap();

        let seen: Vec<_> = framer
            .sink()
            .iter()
            .map(|n| (*n.identity().unwrap(), n.line().as_str().to_string()))
            .collect();
        assert_eq!(seen, [("S2", "b".to_string()), ("S1", "a".to_string())]);
        assert_eq!(framer.carry(), None);
        assert_eq!(framer.mode(), FramerMode::Multiplexed);
    }

    #[test]
    fn test_carry_for_reads_store() {
        let mut framer = Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
        framer.feed_keyed(7_u8, "x\r\nhal").unwrap();
        assert_eq!(framer.carry_for(&7).as_deref(), Some("hal"));
        assert_eq!(framer.carry_for(&8).as_deref(), Some(""));
        assert_eq!(single().carry_for(&()), None);
    }

    #[test]
    fn test_keyed_event_rejected_by_single_stream() {
        let mut framer = single();
        framer.feed("pending").unwrap();
        let err = framer.on_chunk_received(ReadEvent::keyed((), "x\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::ModeMismatch {
                mode: "single-stream",
                event: "keyed"
            })
        ));
        assert!(framer.sink().is_empty());
        assert_eq!(framer.carry(), Some("pending"));
    }

    #[test]
    fn test_chunk_event_rejected_by_multiplexed() {
        let mut framer: Framer<u32, Notes<u32>> =
            Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
        let err = framer.feed("x\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::ModeMismatch {
                mode: "multiplexed",
                event: "single-stream"
            })
        ));
        assert!(framer.sink().is_empty());
    }

    #[test]
    fn test_on_read_arity() {
        let mut framer: Framer<u32, Notes<u32>> =
            Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
        let err = framer
            .on_read(vec![
                EventArg::Identity(1),
                EventArg::Data("a\n".to_string()),
                EventArg::Data("b\n".to_string()),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::Framing(FramingError::Arity { got: 3 })));
        assert!(framer.sink().is_empty());

        framer
            .on_read(vec![EventArg::Identity(1), EventArg::Data("a\n".to_string())])
            .unwrap();
        assert_eq!(lines(&framer), ["a"]);
    }

    #[test]
    fn test_on_read_one_value_on_multiplexed_is_mismatch() {
        let mut framer: Framer<u32, Notes<u32>> =
            Framer::multiplexed(MemoryCarryStore::new(), Vec::new());
        let err = framer
            .on_read(vec![EventArg::Data("a\n".to_string())])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::ModeMismatch { .. })
        ));
    }

    #[test]
    fn test_undelimited_data_accumulates() {
        let mut framer = single();
        for _ in 0..100 {
            framer.feed("\0\u{1}binary\r").unwrap();
        }
        assert!(framer.sink().is_empty());
        assert_eq!(framer.carry().map(str::len), Some(100 * 9));
    }

    #[test]
    fn test_debug_and_accessors() {
        let framer = single();
        assert_eq!(framer.splitter_name(), "crlf");
        assert_eq!(framer.mode().to_string(), "single-stream");
        let debug = format!("{framer:?}");
        assert!(debug.contains("SingleStream"));
        assert!(framer.into_sink().is_empty());
    }
}
