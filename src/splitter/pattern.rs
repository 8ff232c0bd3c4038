//! Custom delimiter rules backed by regular expressions.

use crate::error::{FramingError, Result};
use crate::splitter::traits::{Split, Splitter, concat, partition};
use regex::Regex;

/// Splitter using a caller-supplied regular expression as the delimiter.
///
/// Matches are found on `carry + chunk`, so a delimiter split across two
/// chunks is still recognised. Feeding `a` then `b` gives the same lines as
/// feeding `a + b` only while a match cannot grow by appending text; a
/// pattern such as `\n+` may match a shorter run at a chunk end than the
/// stream eventually holds.
///
/// # Examples
///
/// ```
/// use lineframe::splitter::{PatternSplitter, Splitter};
///
/// let splitter = PatternSplitter::literal("\0").unwrap();
/// let split = splitter.split("b\0c", "a\0");
/// assert_eq!(split.lines, vec!["a".to_string(), "b".to_string()]);
/// assert_eq!(split.carry, "c");
/// ```
#[derive(Debug, Clone)]
pub struct PatternSplitter {
    /// Compiled delimiter.
    delimiter: Regex,
}

impl PatternSplitter {
    /// Creates a splitter from a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::InvalidPattern`] if the pattern does not
    /// compile, or [`FramingError::EmptyDelimiter`] if it matches the empty
    /// string.
    pub fn new(pattern: &str) -> Result<Self> {
        let delimiter = Regex::new(pattern).map_err(FramingError::from)?;
        if delimiter.is_match("") {
            return Err(FramingError::EmptyDelimiter.into());
        }
        Ok(Self { delimiter })
    }

    /// Creates a splitter matching `delimiter` literally.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::EmptyDelimiter`] if `delimiter` is empty.
    pub fn literal(delimiter: &str) -> Result<Self> {
        if delimiter.is_empty() {
            return Err(FramingError::EmptyDelimiter.into());
        }
        Self::new(&regex::escape(delimiter))
    }

    /// Returns the delimiter pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.delimiter.as_str()
    }
}

impl Splitter for PatternSplitter {
    fn split(&self, chunk: &str, carry: &str) -> Split {
        let joined = concat(carry, chunk);
        partition(&joined, self.delimiter.find_iter(&joined).map(|m| m.range()))
    }

    fn name(&self) -> &'static str {
        "pattern"
    }

    fn description(&self) -> &'static str {
        "custom regular expression delimiter"
    }
}
