//! Input sources for the command-line driver.
//!
//! Files are read whole; large files are memory-mapped and decoded in
//! place. `-` names standard input.

// Memory mapping requires unsafe but is sound for read-only access
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use crate::io::unicode::validate_utf8;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum file size to read into memory (1GB).
const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Path that stands for standard input.
pub const STDIN_PATH: &str = "-";

/// File reader with support for memory mapping.
///
/// - Small files (< 1MB): read directly into memory
/// - Large files (>= 1MB): memory-mapped, then decoded
///
/// # Examples
///
/// ```no_run
/// use lineframe::io::FileReader;
///
/// let reader = FileReader::open("server.log").unwrap();
/// let text = reader.read_to_string().unwrap();
/// ```
#[derive(Debug)]
pub struct FileReader {
    file: File,
    size: u64,
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if the path does not exist, or
    /// [`IoError::ReadFailed`] if it cannot be opened or exceeds 1GB.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let read_failed = |e: std::io::Error| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        };
        let file = File::open(path_ref).map_err(read_failed)?;
        let size = file.metadata().map_err(read_failed)?.len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or mapping fails, or if the content is
    /// not valid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        if self.size >= MMAP_THRESHOLD {
            tracing::debug!(path = %self.path, size = self.size, "memory-mapping input");
            // Safety: the map is read-only and dropped before returning
            let mmap = unsafe {
                Mmap::map(&self.file).map_err(|e| IoError::MmapFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?
            };
            self.decode(&mmap).map(str::to_owned)
        } else {
            let mut file = &self.file;
            #[allow(clippy::cast_possible_truncation)]
            let mut buffer = Vec::with_capacity(self.size as usize);
            file.read_to_end(&mut buffer)
                .map_err(|e| IoError::ReadFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;
            String::from_utf8(buffer).map_err(|e| self.invalid_utf8(e.utf8_error().valid_up_to()))
        }
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Result<&'a str> {
        validate_utf8(bytes).map_err(|offset| self.invalid_utf8(offset))
    }

    fn invalid_utf8(&self, offset: usize) -> crate::error::Error {
        IoError::ReadFailed {
            path: self.path.clone(),
            reason: format!("invalid UTF-8 at byte {offset}"),
        }
        .into()
    }
}

/// Reads a file to string, choosing between direct reads and mmap.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::open(path)?.read_to_string()
}

/// Reads a named input, where [`STDIN_PATH`] means standard input.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid UTF-8.
pub fn read_source(path: &str) -> Result<String> {
    if path != STDIN_PATH {
        return read_file(path);
    }

    let mut buffer = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut buffer)
        .map_err(|e| IoError::ReadFailed {
            path: "<stdin>".to_string(),
            reason: e.to_string(),
        })?;
    String::from_utf8(buffer).map_err(|e| {
        IoError::ReadFailed {
            path: "<stdin>".to_string(),
            reason: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
        }
        .into()
    })
}
