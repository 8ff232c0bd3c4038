//! Read events delivered to a framer.
//!
//! A read-event source hands the framer either a bare chunk (single-stream)
//! or a chunk tagged with the connection identity it arrived on
//! (multiplexed). Sources that produce events as a positional argument list
//! go through [`ReadEvent::from_args`], which rejects any shape other than
//! `(data)` or `(identity, data)`.

use crate::error::FramingError;

/// One delivery of newly arrived text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent<I> {
    /// A chunk from the single stream.
    Chunk(String),

    /// A chunk from one connection of a multiplexed source.
    Keyed {
        /// Identity of the connection the chunk arrived on.
        identity: I,
        /// Newly arrived text.
        chunk: String,
    },
}

/// One positional value of a read event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventArg<I> {
    /// A connection identity.
    Identity(I),
    /// A chunk of text.
    Data(String),
}

impl<I> ReadEvent<I> {
    /// Creates a single-stream event.
    #[must_use]
    pub fn chunk(chunk: impl Into<String>) -> Self {
        Self::Chunk(chunk.into())
    }

    /// Creates a multiplexed event.
    #[must_use]
    pub fn keyed(identity: I, chunk: impl Into<String>) -> Self {
        Self::Keyed {
            identity,
            chunk: chunk.into(),
        }
    }

    /// Builds an event from positional values.
    ///
    /// Accepts exactly `[Data]` or `[Identity, Data]`.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::Arity`] for any other count or shape; no
    /// value is processed in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use lineframe::core::{EventArg, ReadEvent};
    ///
    /// let event = ReadEvent::from_args(vec![EventArg::Identity(1_u32), EventArg::Data("a\n".into())]);
    /// assert_eq!(event.unwrap(), ReadEvent::keyed(1, "a\n"));
    ///
    /// let too_many = ReadEvent::<u32>::from_args(vec![
    ///     EventArg::Identity(1),
    ///     EventArg::Data("a".into()),
    ///     EventArg::Data("b".into()),
    /// ]);
    /// assert!(too_many.is_err());
    /// ```
    pub fn from_args(args: Vec<EventArg<I>>) -> Result<Self, FramingError> {
        let got = args.len();
        let mut args = args.into_iter();
        match (args.next(), args.next(), args.next()) {
            (Some(EventArg::Data(chunk)), None, None) => Ok(Self::Chunk(chunk)),
            (Some(EventArg::Identity(identity)), Some(EventArg::Data(chunk)), None) => {
                Ok(Self::Keyed { identity, chunk })
            }
            _ => Err(FramingError::Arity { got }),
        }
    }

    /// Returns the chunk text.
    #[must_use]
    pub fn data(&self) -> &str {
        match self {
            Self::Chunk(chunk) | Self::Keyed { chunk, .. } => chunk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_from_args_single() {
        let event = ReadEvent::<u8>::from_args(vec![EventArg::Data("foo\r\n".to_string())]);
        assert_eq!(event, Ok(ReadEvent::chunk("foo\r\n")));
    }

    #[test]
    fn test_from_args_keyed() {
        let event =
            ReadEvent::from_args(vec![EventArg::Identity("S1"), EventArg::Data("a\n".into())]);
        assert_eq!(event, Ok(ReadEvent::keyed("S1", "a\n")));
    }

    #[test_case(vec![] ; "no values")]
    #[test_case(vec![EventArg::Identity(1)] ; "identity without data")]
    #[test_case(vec![EventArg::Data("a".into()), EventArg::Identity(1)] ; "reversed order")]
    #[test_case(vec![EventArg::Data("a".into()), EventArg::Data("b".into())] ; "two chunks")]
    #[test_case(vec![EventArg::Identity(1), EventArg::Data("a".into()), EventArg::Data("b".into())] ; "three values")]
    fn test_from_args_rejects(args: Vec<EventArg<u32>>) {
        let got = args.len();
        assert_eq!(ReadEvent::from_args(args), Err(FramingError::Arity { got }));
    }

    #[test]
    fn test_event_accessors() {
        let event: ReadEvent<u8> = ReadEvent::chunk("x");
        assert_eq!(event.data(), "x");

        let event = ReadEvent::keyed(3_u8, "y");
        assert_eq!(event.data(), "y");
    }
}
