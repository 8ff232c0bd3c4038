//! Splitter trait definition.
//!
//! A splitter is the pure half of line framing: given the newly arrived
//! chunk and the carry left over from the previous call, it returns the
//! completed lines and the new carry. All state is passed in and returned;
//! framers own the carry between calls.

use std::borrow::Cow;
use std::ops::Range;

/// Output of one [`Splitter::split`] call.
///
/// `lines` are in stream order and never contain a delimiter. `carry` is the
/// trailing partition after the last delimiter; it may be empty and never
/// contains a full delimiter match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    /// Completed lines, delimiters stripped.
    pub lines: Vec<String>,
    /// Incomplete fragment to feed back in on the next call.
    pub carry: String,
}

impl Split {
    /// Creates a split result.
    #[must_use]
    pub const fn new(lines: Vec<String>, carry: String) -> Self {
        Self { lines, carry }
    }

    /// Returns true if no line was completed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Trait for delimiter rules that partition text into lines.
///
/// Implementations must concatenate `carry` then `chunk` before matching, so
/// a delimiter straddling two chunks is still found, and must be
/// deterministic: the same inputs always give the same [`Split`].
///
/// # Examples
///
/// ```
/// use lineframe::splitter::{CrlfSplitter, Splitter};
///
/// let splitter = CrlfSplitter;
/// let split = splitter.split("o\r\nbar", "fo");
/// assert_eq!(split.lines, vec!["foo".to_string()]);
/// assert_eq!(split.carry, "bar");
/// ```
pub trait Splitter: Send + Sync {
    /// Splits `carry + chunk` at every delimiter.
    ///
    /// # Arguments
    ///
    /// * `chunk` - Newly arrived text (may be empty).
    /// * `carry` - Leftover from the previous call (may be empty).
    fn split(&self, chunk: &str, carry: &str) -> Split;

    /// Returns the name of the delimiter rule.
    fn name(&self) -> &'static str;

    /// Returns a description of the delimiter rule.
    fn description(&self) -> &'static str {
        "No description available"
    }
}

impl<S: Splitter + ?Sized> Splitter for Box<S> {
    fn split(&self, chunk: &str, carry: &str) -> Split {
        (**self).split(chunk, carry)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }
}

/// Concatenates carry and chunk, borrowing when one side is empty.
pub(crate) fn concat<'a>(carry: &'a str, chunk: &'a str) -> Cow<'a, str> {
    if carry.is_empty() {
        Cow::Borrowed(chunk)
    } else if chunk.is_empty() {
        Cow::Borrowed(carry)
    } else {
        let mut joined = String::with_capacity(carry.len() + chunk.len());
        joined.push_str(carry);
        joined.push_str(chunk);
        Cow::Owned(joined)
    }
}

/// Partitions `joined` at the given delimiter ranges.
///
/// Ranges must be ascending and non-overlapping. Zero-length ranges are
/// ignored since they carry no boundary.
pub(crate) fn partition<D>(joined: &str, delimiters: D) -> Split
where
    D: IntoIterator<Item = Range<usize>>,
{
    let mut lines = Vec::new();
    let mut start = 0;
    for delimiter in delimiters {
        if delimiter.is_empty() {
            continue;
        }
        lines.push(joined[start..delimiter.start].to_string());
        start = delimiter.end;
    }
    Split {
        lines,
        carry: joined[start..].to_string(),
    }
}
