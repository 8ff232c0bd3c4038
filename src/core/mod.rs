//! Core domain models for lineframe.
//!
//! Read events flowing into a framer and the lines and notifications
//! flowing out of it. These are pure data types with no I/O dependencies.

pub mod event;
pub mod line;

pub use event::{EventArg, ReadEvent};
pub use line::{Line, LineNotification};
