//! # lineframe
//!
//! Line framing over chunked text streams.
//!
//! Network reads deliver text in arbitrary pieces: a logical line may span
//! several reads and one read may hold several lines. lineframe turns such
//! a sequence of chunks back into whole lines.
//!
//! ## Features
//!
//! - **Splitters**: pure `(chunk, carry) -> (lines, carry)` delimiter rules,
//!   `\r?\n` by default, with named, regex and closure alternatives
//! - **Framer**: single-stream mode with an owned carry, or multiplexed mode
//!   with one carry per connection identity held in a [`CarryStore`]
//! - **Sinks**: line notifications delivered to a `Vec`, a channel or a closure
//! - **Parallel framing**: independent streams framed concurrently with rayon
//!
//! ## Example
//!
//! ```
//! use lineframe::Framer;
//!
//! let mut framer = Framer::<(), _>::single_stream(Vec::new());
//! framer.feed("PING\r\nPO").unwrap();
//! framer.feed("NG\n").unwrap();
//!
//! let lines: Vec<_> = framer.sink().iter().map(|n| n.line().to_string()).collect();
//! assert_eq!(lines, ["PING", "PONG"]);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod framing;
pub mod io;
pub mod splitter;
pub mod store;

// Re-export commonly used types at crate root
pub use error::{Error, FramingError, Result};

// Re-export core domain types
pub use core::{EventArg, Line, LineNotification, ReadEvent};

// Re-export splitter types
pub use splitter::{
    CrlfSplitter, DEFAULT_SPLITTER, FnSplitter, LfSplitter, PatternSplitter, Split, Splitter,
    StrictCrlfSplitter, available_splitters, create_splitter, default_splitter,
};

// Re-export carry store types
pub use store::{CarryStore, FnCarryStore, MemoryCarryStore};

// Re-export framing types
pub use framing::{
    FnSink, Framer, FramerBuilder, FramerMode, LineSink, ParallelFramer, StreamLines,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
