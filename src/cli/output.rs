//! Output formatting for CLI commands.
//!
//! Supports text, pretty JSON and newline-delimited JSON output.

use crate::core::{Line, LineNotification};
use crate::error::{CommandError, Error, FramingError, IoError, Result};
use crate::framing::StreamLines;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON document.
    Json,
    /// One JSON object per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// Result of framing one input as a single stream.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// Input name (`-` for stdin).
    pub source: String,
    /// Delimiter rule used.
    pub splitter: String,
    /// Number of chunks replayed.
    pub chunks: usize,
    /// Completed lines.
    pub lines: Vec<Line>,
    /// Trailing fragment with no delimiter.
    pub pending: String,
}

/// Result of framing several inputs as interleaved connections.
#[derive(Debug, Clone, Serialize)]
pub struct MuxReport {
    /// Delimiter rule used.
    pub splitter: String,
    /// Notifications in emission order.
    pub lines: Vec<LineNotification<String>>,
    /// Non-empty trailing fragments per identity.
    pub pending: Vec<Pending>,
}

/// A trailing fragment left for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pending {
    /// Connection identity.
    pub identity: String,
    /// Fragment with no delimiter.
    pub pending: String,
}

/// Description of one named delimiter rule.
#[derive(Debug, Clone, Serialize)]
pub struct SplitterInfo {
    /// Registry name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether this is the default rule.
    pub default: bool,
}

/// Formats the lines of a single-stream run.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if a record cannot be serialized.
pub fn format_split(report: &SplitReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for line in &report.lines {
                let _ = writeln!(output, "{}", escape(line));
            }
            write_pending_text(&mut output, None, &report.pending);
            Ok(output)
        }
        OutputFormat::Json => format_json(report),
        OutputFormat::Ndjson => {
            #[derive(Serialize)]
            struct Record<'a> {
                line: &'a Line,
            }
            let mut output = String::new();
            for line in &report.lines {
                push_ndjson(&mut output, &Record { line })?;
            }
            if !report.pending.is_empty() {
                push_ndjson(&mut output, &Pending {
                    identity: report.source.clone(),
                    pending: report.pending.clone(),
                })?;
            }
            Ok(output)
        }
    }
}

/// Formats the notifications of an interleaved run.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if a record cannot be serialized.
pub fn format_mux(report: &MuxReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for notification in &report.lines {
                match notification {
                    LineNotification::Keyed { identity, line } => {
                        let _ = writeln!(output, "{identity}: {}", escape(line));
                    }
                    LineNotification::Line(line) => {
                        let _ = writeln!(output, "{}", escape(line));
                    }
                }
            }
            for pending in &report.pending {
                write_pending_text(&mut output, Some(&pending.identity), &pending.pending);
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(report),
        OutputFormat::Ndjson => {
            let mut output = String::new();
            for notification in &report.lines {
                push_ndjson(&mut output, notification)?;
            }
            for pending in &report.pending {
                push_ndjson(&mut output, pending)?;
            }
            Ok(output)
        }
    }
}

/// Formats per-stream results of a parallel run.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if a record cannot be serialized.
pub fn format_streams(streams: &[StreamLines<String>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for stream in streams {
                let _ = writeln!(output, "== {} ({} lines) ==", stream.identity, stream.lines.len());
                for line in &stream.lines {
                    let _ = writeln!(output, "{}", escape(line));
                }
                write_pending_text(&mut output, None, &stream.carry);
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(&streams),
        OutputFormat::Ndjson => {
            let mut output = String::new();
            for stream in streams {
                push_ndjson(&mut output, stream)?;
            }
            Ok(output)
        }
    }
}

/// Formats the list of named delimiter rules.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if a record cannot be serialized.
pub fn format_splitters(splitters: &[SplitterInfo], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("Available splitters:\n");
            for info in splitters {
                let marker = if info.default { " (default)" } else { "" };
                let _ = writeln!(output, "  {:<12} {}{marker}", info.name, info.description);
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(&splitters),
        OutputFormat::Ndjson => {
            let mut output = String::new();
            for info in splitters {
                push_ndjson(&mut output, info)?;
            }
            Ok(output)
        }
    }
}

/// Formats an error for display.
///
/// JSON formats produce `{"success": false, "error": {...}}`; text produces
/// the error message alone.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    let body = serde_json::json!({
        "success": false,
        "error": {
            "type": error_kind(error),
            "message": error.to_string(),
        },
    });

    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format!("{body:#}\n"),
        OutputFormat::Ndjson => body.to_string(),
    }
}

const fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::Framing(FramingError::Arity { .. } | FramingError::ModeMismatch { .. }) => {
            "invalid_usage"
        }
        Error::Framing(
            FramingError::MissingCapability { .. } | FramingError::ConflictingCapability,
        ) => "missing_capability",
        Error::Framing(_) => "invalid_splitter",
        Error::Io(IoError::FileNotFound { .. }) => "file_not_found",
        Error::Io(_) => "io_error",
        Error::Command(CommandError::InvalidArgument(_)) => "invalid_argument",
        Error::Command(CommandError::OutputFormat(_)) => "output_error",
    }
}

fn write_pending_text(output: &mut String, identity: Option<&str>, pending: &str) {
    if pending.is_empty() {
        return;
    }
    let escaped = escape(pending);
    match identity {
        Some(id) => {
            let _ = writeln!(output, "{id}: pending ({} bytes): {escaped}", pending.len());
        }
        None => {
            let _ = writeln!(output, "pending ({} bytes): {escaped}", pending.len());
        }
    }
}

/// Escapes backslashes and line breaks so a line or fragment prints on
/// exactly one output line.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}

fn push_ndjson<T: Serialize>(output: &mut String, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    output.push_str(&json);
    output.push('\n');
    Ok(())
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
