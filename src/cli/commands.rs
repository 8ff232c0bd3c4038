//! CLI command implementations.
//!
//! Each command replays its inputs as read events: the text is cut into
//! `--chunk-size` pieces at character boundaries and fed to a framer.

use crate::cli::output::{
    MuxReport, OutputFormat, Pending, SplitReport, SplitterInfo, format_mux, format_split,
    format_splitters, format_streams,
};
use crate::cli::parser::{Cli, Commands};
use crate::error::{CommandError, Result};
use crate::framing::{FramerBuilder, ParallelFramer};
use crate::io::{chunks_at_char_boundaries, read_file, read_source};
use crate::splitter::{
    DEFAULT_SPLITTER, PatternSplitter, Splitter, available_splitters, create_splitter,
};
use crate::store::MemoryCarryStore;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the arguments are invalid, an input cannot be read,
/// or the delimiter rule cannot be built.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Split { input } => cmd_split(cli, input, format),
        Commands::Mux { files, parallel } => {
            if *parallel {
                cmd_mux_parallel(cli, files, format)
            } else {
                cmd_mux(cli, files, format)
            }
        }
        Commands::Splitters => cmd_splitters(format),
    }
}

/// Resolves the delimiter rule from `--pattern` or `--splitter`.
fn build_splitter(cli: &Cli) -> Result<Arc<dyn Splitter>> {
    if let Some(pattern) = &cli.pattern {
        return Ok(Arc::new(PatternSplitter::new(pattern)?));
    }
    Ok(Arc::from(create_splitter(&cli.splitter)?))
}

fn check_chunk_size(chunk_size: usize) -> Result<usize> {
    if chunk_size == 0 {
        return Err(CommandError::InvalidArgument(
            "chunk size must be greater than 0".to_string(),
        )
        .into());
    }
    Ok(chunk_size)
}

fn cmd_split(cli: &Cli, input: &str, format: OutputFormat) -> Result<String> {
    let chunk_size = check_chunk_size(cli.chunk_size)?;
    let splitter = build_splitter(cli)?;
    let text = read_source(input)?;

    let mut framer = FramerBuilder::<()>::new()
        .shared_splitter(Arc::clone(&splitter))
        .build(Vec::new())?;
    let mut chunks = 0;
    for chunk in chunks_at_char_boundaries(&text, chunk_size) {
        framer.feed(chunk)?;
        chunks += 1;
    }

    let pending = framer.carry().unwrap_or_default().to_string();
    tracing::info!(
        source = input,
        chunks,
        lines = framer.lines_emitted(),
        pending = pending.len(),
        "split complete"
    );

    let lines = framer
        .into_sink()
        .into_iter()
        .map(|notification| notification.into_parts().1)
        .collect();

    let report = SplitReport {
        source: input.to_string(),
        splitter: splitter.name().to_string(),
        chunks,
        lines,
        pending,
    };
    format_split(&report, format)
}

/// Reads every file, pairing it with its path as the connection identity.
///
/// Each path may appear once: a repeated path would feed two streams into
/// the same carry.
fn read_streams(files: &[PathBuf]) -> Result<Vec<(String, String)>> {
    let mut seen = HashSet::new();
    files
        .iter()
        .map(|path| -> Result<(String, String)> {
            let identity = path.to_string_lossy().to_string();
            if !seen.insert(identity.clone()) {
                return Err(CommandError::InvalidArgument(format!(
                    "input given more than once: {identity}"
                ))
                .into());
            }
            Ok((identity, read_file(path)?))
        })
        .collect()
}

fn cmd_mux(cli: &Cli, files: &[PathBuf], format: OutputFormat) -> Result<String> {
    let chunk_size = check_chunk_size(cli.chunk_size)?;
    let splitter = build_splitter(cli)?;
    let streams = read_streams(files)?;

    let mut framer = FramerBuilder::new()
        .shared_splitter(Arc::clone(&splitter))
        .store(MemoryCarryStore::<String>::new())
        .build(Vec::new())?;

    let mut cursors: Vec<_> = streams
        .iter()
        .map(|(identity, text)| (identity, chunks_at_char_boundaries(text, chunk_size)))
        .collect();

    // Round-robin: one chunk per stream per pass until all are drained
    loop {
        let mut progressed = false;
        for (identity, chunks) in &mut cursors {
            if let Some(chunk) = chunks.next() {
                framer.feed_keyed((*identity).clone(), chunk)?;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    let pending = streams
        .iter()
        .filter_map(|(identity, _)| {
            let carry = framer.carry_for(identity)?;
            (!carry.is_empty()).then(|| Pending {
                identity: identity.clone(),
                pending: carry,
            })
        })
        .collect();
    tracing::info!(
        streams = streams.len(),
        lines = framer.lines_emitted(),
        "mux complete"
    );

    let report = MuxReport {
        splitter: splitter.name().to_string(),
        lines: framer.into_sink(),
        pending,
    };
    format_mux(&report, format)
}

fn cmd_mux_parallel(cli: &Cli, files: &[PathBuf], format: OutputFormat) -> Result<String> {
    let chunk_size = check_chunk_size(cli.chunk_size)?;
    let splitter = build_splitter(cli)?;
    let streams = read_streams(files)?;

    let chunked: Vec<(String, Vec<&str>)> = streams
        .iter()
        .map(|(identity, text)| {
            (
                identity.clone(),
                chunks_at_char_boundaries(text, chunk_size).collect(),
            )
        })
        .collect();

    let results = ParallelFramer::new().splitter(splitter).frame(chunked)?;
    format_streams(&results, format)
}

fn cmd_splitters(format: OutputFormat) -> Result<String> {
    let infos: Vec<SplitterInfo> = available_splitters()
        .into_iter()
        .filter_map(|name| create_splitter(name).ok())
        .map(|splitter| SplitterInfo {
            name: splitter.name(),
            description: splitter.description(),
            default: splitter.name() == DEFAULT_SPLITTER,
        })
        .collect();
    format_splitters(&infos, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, FramingError, IoError};
    use clap::Parser;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> Result<String> {
        let mut argv = vec!["lineframe"];
        argv.extend_from_slice(args);
        execute(&Cli::try_parse_from(argv).unwrap())
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_split_small_chunks() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.log", "foo\r\nbar\nbaz");
        let out = run(&["split", path.as_str(), "--chunk-size", "2"]).unwrap();
        assert_eq!(out, "foo\nbar\npending (3 bytes): baz\n");
    }

    #[test]
    fn test_split_with_pattern() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", "a;b;;c");
        let out = run(&["split", path.as_str(), "--pattern", ";+"]).unwrap();
        assert_eq!(out, "a\nb\npending (1 bytes): c\n");
    }

    #[test]
    fn test_split_rejects_zero_chunk_size() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.log", "x\n");
        let err = run(&["split", path.as_str(), "--chunk-size", "0"]).unwrap_err();
        assert!(matches!(err, Error::Command(CommandError::InvalidArgument(_))));
    }

    #[test]
    fn test_split_unknown_splitter() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.log", "x\n");
        let err = run(&["split", path.as_str(), "--splitter", "nope"]).unwrap_err();
        assert!(matches!(
            err,
            Error::Framing(FramingError::UnknownSplitter { .. })
        ));
    }

    #[test]
    fn test_split_missing_file() {
        let err = run(&["split", "/nonexistent/input.log"]).unwrap_err();
        assert!(matches!(err, Error::Io(IoError::FileNotFound { .. })));
    }

    #[test]
    fn test_mux_interleaves_by_identity() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", "a1\na2\n");
        let b = write(&dir, "b", "b1\nb2");
        let out = run(&["mux", a.as_str(), b.as_str(), "--chunk-size", "3"]).unwrap();

        // Chunks: a="a1\n","a2\n"; b="b1\n","b2"
        let expected = format!("{a}: a1\n{b}: b1\n{a}: a2\n{b}: pending (2 bytes): b2\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_mux_rejects_repeated_input() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.log", "ab\n");

        for extra in [None, Some("--parallel")] {
            let mut args = vec!["mux", a.as_str(), a.as_str(), "--chunk-size", "1"];
            args.extend(extra);
            let err = run(&args).unwrap_err();
            assert!(matches!(err, Error::Command(CommandError::InvalidArgument(_))));
            assert!(err.to_string().contains("more than once"));
        }
    }

    #[test]
    fn test_mux_parallel_groups_by_identity() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a", "1\n2\n");
        let b = write(&dir, "b", "3\n");
        let out = run(&["mux", a.as_str(), b.as_str(), "--parallel", "--format", "json"]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["lines"], serde_json::json!(["1", "2"]));
        assert_eq!(value[1]["lines"], serde_json::json!(["3"]));
    }

    #[test]
    fn test_splitters_lists_default() {
        let out = run(&["splitters"]).unwrap();
        assert!(out.contains("crlf"));
        assert!(out.contains("crlf-strict"));
        assert!(out.contains("(default)"));
    }
}
