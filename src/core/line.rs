//! Reconstructed lines and the notifications that announce them.
//!
//! A [`Line`] is one logical unit of text with its delimiter stripped. A
//! [`LineNotification`] is what a framer hands to downstream consumers: the
//! line alone in single-stream mode, or the line tagged with the connection
//! identity it came from in multiplexed mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// One reconstructed line, delimiter stripped.
///
/// Lines never contain the delimiter that produced them and are immutable
/// once built.
///
/// # Examples
///
/// ```
/// use lineframe::core::Line;
///
/// let line = Line::new("PING :irc.example.net");
/// assert_eq!(line.as_str(), "PING :irc.example.net");
/// assert!(line.starts_with("PING"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line(String);

impl Line {
    /// Creates a line from its content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// Returns the line content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the line, returning its content.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Line {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Line {
    fn from(content: String) -> Self {
        Self(content)
    }
}

impl From<&str> for Line {
    fn from(content: &str) -> Self {
        Self(content.to_string())
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Announcement of one completed line.
///
/// Single-stream framers emit [`LineNotification::Line`]; multiplexed
/// framers emit [`LineNotification::Keyed`] carrying the connection identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineNotification<I> {
    /// A line from the single stream.
    Line(Line),

    /// A line from the stream of one connection identity.
    Keyed {
        /// Identity of the connection the line arrived on.
        identity: I,
        /// The line content.
        line: Line,
    },
}

impl<I> LineNotification<I> {
    /// Returns the announced line.
    #[must_use]
    pub const fn line(&self) -> &Line {
        match self {
            Self::Line(line) | Self::Keyed { line, .. } => line,
        }
    }

    /// Returns the connection identity, if the notification is keyed.
    #[must_use]
    pub const fn identity(&self) -> Option<&I> {
        match self {
            Self::Line(_) => None,
            Self::Keyed { identity, .. } => Some(identity),
        }
    }

    /// Splits the notification into its identity (if any) and line.
    #[must_use]
    pub fn into_parts(self) -> (Option<I>, Line) {
        match self {
            Self::Line(line) => (None, line),
            Self::Keyed { identity, line } => (Some(identity), line),
        }
    }
}
