//! Input helpers for the command-line driver.
//!
//! Reads whole inputs (memory-mapping large files) and cuts text into
//! chunk-sized pieces at UTF-8 character boundaries.

pub mod reader;
pub mod unicode;

pub use reader::{FileReader, STDIN_PATH, read_file, read_source};
pub use unicode::{
    chunks_at_char_boundaries, find_char_boundary, find_char_boundary_forward, validate_utf8,
};
