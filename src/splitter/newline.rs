//! Newline delimiter rules.
//!
//! - [`CrlfSplitter`]: `\r?\n`, the permissive default. Bare LF and CRLF end
//!   a line identically; a lone `\r` is ordinary data.
//! - [`LfSplitter`]: `\n` only. A `\r` before the `\n` stays in the line.
//! - [`StrictCrlfSplitter`]: `\r\n` only. A bare `\n` is ordinary data.

use crate::splitter::traits::{Split, Splitter, concat, partition};

/// Default delimiter rule: optional `\r` followed by `\n`.
///
/// # Examples
///
/// ```
/// use lineframe::splitter::{CrlfSplitter, Splitter};
///
/// let split = CrlfSplitter.split("\nhello\n", "\r");
/// assert_eq!(split.lines, vec!["".to_string(), "hello".to_string()]);
/// assert_eq!(split.carry, "");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrlfSplitter;

impl Splitter for CrlfSplitter {
    fn split(&self, chunk: &str, carry: &str) -> Split {
        let joined = concat(carry, chunk);
        let bytes = joined.as_bytes();
        let delimiters = joined.match_indices('\n').map(|(pos, _)| {
            // The '\r' can't belong to an earlier match, which always ends in '\n'.
            if pos > 0 && bytes[pos - 1] == b'\r' {
                pos - 1..pos + 1
            } else {
                pos..pos + 1
            }
        });
        partition(&joined, delimiters)
    }

    fn name(&self) -> &'static str {
        "crlf"
    }

    fn description(&self) -> &'static str {
        "LF or CRLF ends a line; a lone CR is data"
    }
}

/// Bare line-feed rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LfSplitter;

impl Splitter for LfSplitter {
    fn split(&self, chunk: &str, carry: &str) -> Split {
        let joined = concat(carry, chunk);
        partition(&joined, joined.match_indices('\n').map(|(pos, _)| pos..pos + 1))
    }

    fn name(&self) -> &'static str {
        "lf"
    }

    fn description(&self) -> &'static str {
        "LF ends a line; a preceding CR is kept in the line"
    }
}

/// Strict CRLF rule, as required by SMTP and IRC servers that refuse bare LF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictCrlfSplitter;

impl Splitter for StrictCrlfSplitter {
    fn split(&self, chunk: &str, carry: &str) -> Split {
        let joined = concat(carry, chunk);
        partition(
            &joined,
            joined.match_indices("\r\n").map(|(pos, _)| pos..pos + 2),
        )
    }

    fn name(&self) -> &'static str {
        "crlf-strict"
    }

    fn description(&self) -> &'static str {
        "only CRLF ends a line; a bare LF is data"
    }
}
