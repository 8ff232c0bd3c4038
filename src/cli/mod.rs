//! CLI layer for lineframe.
//!
//! Provides the command-line interface using clap. Commands replay files
//! as read events through a framer and print the reconstructed lines.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
