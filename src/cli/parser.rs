//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default chunk size in bytes when replaying a file as read events.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// lineframe: reconstruct delimited lines from chunked text streams.
///
/// Replays files as sequences of read events and prints the lines a
/// framer reconstructs from them.
#[derive(Parser, Debug)]
#[command(name = "lineframe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Named delimiter rule (crlf, lf, crlf-strict).
    #[arg(
        short,
        long,
        env = "LINEFRAME_SPLITTER",
        default_value = crate::splitter::DEFAULT_SPLITTER,
        global = true
    )]
    pub splitter: String,

    /// Delimiter regex; overrides `--splitter`.
    #[arg(short, long, env = "LINEFRAME_PATTERN", global = true)]
    pub pattern: Option<String>,

    /// Size in bytes of each replayed chunk.
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE, global = true)]
    pub chunk_size: usize,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Frame one input as a single stream.
    Split {
        /// Input file, or `-` for standard input.
        input: String,
    },

    /// Frame several files as interleaved connections.
    ///
    /// Chunks are taken round-robin, one per file, and each file path is
    /// the connection identity.
    Mux {
        /// Input files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Frame each file on its own thread instead of interleaving.
        #[arg(long)]
        parallel: bool,
    },

    /// List available delimiter rules.
    Splitters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lineframe", "split", "-"]).unwrap();
        assert_eq!(cli.format, "text");
        assert_eq!(cli.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Split { ref input } if input == "-"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "lineframe",
            "mux",
            "a.log",
            "b.log",
            "--parallel",
            "--format",
            "json",
            "--chunk-size",
            "3",
            "--pattern",
            ";",
        ])
        .unwrap();
        assert_eq!(cli.format, "json");
        assert_eq!(cli.chunk_size, 3);
        assert_eq!(cli.pattern.as_deref(), Some(";"));
        assert!(matches!(
            cli.command,
            Commands::Mux { ref files, parallel: true } if files.len() == 2
        ));
    }

    #[test]
    fn test_mux_requires_files() {
        assert!(Cli::try_parse_from(["lineframe", "mux"]).is_err());
    }
}
