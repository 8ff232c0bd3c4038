//! Error types for lineframe operations.
//!
//! This module provides the error hierarchy using `thiserror` for framing,
//! I/O and CLI commands. Malformed or undelimited text is never an error:
//! it simply stays in the carry buffer.

use thiserror::Error;

/// Result type alias for lineframe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Framing errors (invalid usage of a framer or splitter).
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Framing-specific errors.
///
/// All of these are caller or configuration mistakes surfaced at the
/// boundary; none is raised because of the content of a chunk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// A positional read event carried neither one nor two values, or the
    /// values were not in `(identity, data)` / `(data)` shape.
    #[error("invalid usage: read event takes 1 or 2 positional values, got {got}")]
    Arity {
        /// Number of positional values supplied.
        got: usize,
    },

    /// A read event does not fit the framer's operating mode.
    #[error("invalid usage: {event} event delivered to a {mode} framer")]
    ModeMismatch {
        /// Mode the framer was constructed in.
        mode: &'static str,
        /// Shape of the offending event.
        event: &'static str,
    },

    /// Multiplexed mode was requested with only half of the carry capability.
    #[error("multiplexed framing requires both lookup and update, missing {missing}")]
    MissingCapability {
        /// Name of the missing capability.
        missing: &'static str,
    },

    /// A carry store was supplied together with lookup/update functions.
    #[error("a carry store cannot be combined with lookup/update functions")]
    ConflictingCapability,

    /// Delimiter pattern failed to compile.
    #[error("invalid delimiter pattern: {0}")]
    InvalidPattern(String),

    /// Delimiter pattern matches the empty string.
    #[error("delimiter must not match the empty string")]
    EmptyDelimiter,

    /// Unknown splitter name.
    #[error("unknown splitter: {name}")]
    UnknownSplitter {
        /// Name of the unknown splitter.
        name: String,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be serialized.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<regex::Error> for FramingError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::Framing(err.into())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Command(err.into())
    }
}
