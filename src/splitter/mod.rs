//! Delimiter rules for lineframe.
//!
//! This module provides a trait-based system for partitioning text into
//! lines. Several rules are available:
//!
//! - **crlf**: `\r?\n`, the default; accepts either convention from a peer
//! - **lf**: bare `\n`
//! - **crlf-strict**: `\r\n` only
//! - **pattern**: any regular expression or literal delimiter
//! - **function**: any closure with the splitter signature

pub mod func;
pub mod newline;
pub mod pattern;
pub mod traits;

pub use func::FnSplitter;
pub use newline::{CrlfSplitter, LfSplitter, StrictCrlfSplitter};
pub use pattern::PatternSplitter;
pub use traits::{Split, Splitter};

/// Name of the default splitter.
pub const DEFAULT_SPLITTER: &str = "crlf";

/// Creates the default splitter (`\r?\n`).
#[must_use]
pub const fn default_splitter() -> CrlfSplitter {
    CrlfSplitter
}

/// Creates a splitter by name.
///
/// # Arguments
///
/// * `name` - Splitter name: "crlf", "lf", or "crlf-strict".
///
/// # Errors
///
/// Returns [`crate::error::FramingError::UnknownSplitter`] if the name is not recognized.
pub fn create_splitter(name: &str) -> crate::error::Result<Box<dyn Splitter>> {
    match name.to_lowercase().as_str() {
        "crlf" => Ok(Box::new(CrlfSplitter)),
        "lf" => Ok(Box::new(LfSplitter)),
        "crlf-strict" => Ok(Box::new(StrictCrlfSplitter)),
        _ => Err(crate::error::FramingError::UnknownSplitter {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available named splitters.
#[must_use]
pub fn available_splitters() -> Vec<&'static str> {
    vec!["crlf", "lf", "crlf-strict"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_splitter() {
        assert_eq!(default_splitter().name(), DEFAULT_SPLITTER);
    }

    #[test_case("crlf")]
    #[test_case("lf")]
    #[test_case("crlf-strict")]
    fn test_create_splitter(name: &str) {
        let splitter = create_splitter(name).unwrap();
        assert_eq!(splitter.name(), name);
    }

    #[test]
    fn test_create_splitter_case_insensitive() {
        let splitter = create_splitter("CRLF").unwrap();
        assert_eq!(splitter.name(), "crlf");
    }

    #[test]
    fn test_create_splitter_unknown() {
        let result = create_splitter("unknown");
        assert!(result.is_err());
    }

    #[test]
    fn test_available_splitters_all_constructible() {
        let names = available_splitters();
        assert_eq!(names.len(), 3);
        for name in names {
            assert!(create_splitter(name).is_ok());
        }
    }
}
