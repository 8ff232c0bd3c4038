//! Line framing over sequences of read events.
//!
//! - [`Framer`]: stateful adapter around a [`Splitter`](crate::splitter::Splitter),
//!   single-stream or multiplexed
//! - [`FramerBuilder`]: mode selection from supplied capabilities
//! - [`LineSink`]: where line notifications go
//! - [`ParallelFramer`]: independent streams framed concurrently

pub mod builder;
pub mod framer;
pub mod parallel;
pub mod sink;

pub use builder::FramerBuilder;
pub use framer::{Framer, FramerMode};
pub use parallel::{ParallelFramer, StreamLines};
pub use sink::{FnSink, LineSink};
