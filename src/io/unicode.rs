//! Unicode utilities for cutting text into chunks.
//!
//! The CLI driver simulates a read-event source by slicing a text into
//! fixed-size pieces. Pieces are cut only at UTF-8 character boundaries so
//! every chunk is a valid `&str`.

/// Finds a valid UTF-8 character boundary at or before the given position.
///
/// # Arguments
///
/// * `s` - The string to search.
/// * `pos` - Target position in bytes.
///
/// # Examples
///
/// ```
/// use lineframe::io::find_char_boundary;
///
/// let s = "Hello 世界";
/// assert_eq!(find_char_boundary(s, 6), 6); // Before '世'
/// assert_eq!(find_char_boundary(s, 7), 6); // Middle of '世', backs up
/// ```
#[must_use]
pub const fn find_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut boundary = pos;
    // UTF-8 continuation bytes start with 10xxxxxx (0x80-0xBF)
    while boundary > 0 && (bytes[boundary] & 0xC0) == 0x80 {
        boundary -= 1;
    }
    boundary
}

/// Finds a valid UTF-8 character boundary at or after the given position.
#[must_use]
pub const fn find_char_boundary_forward(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let bytes = s.as_bytes();
    let mut boundary = pos;
    while boundary < bytes.len() && (bytes[boundary] & 0xC0) == 0x80 {
        boundary += 1;
    }
    boundary
}

/// Validates that a byte slice is valid UTF-8.
///
/// # Errors
///
/// Returns the byte offset of the first invalid UTF-8 sequence.
pub fn validate_utf8(bytes: &[u8]) -> std::result::Result<&str, usize> {
    std::str::from_utf8(bytes).map_err(|e| e.valid_up_to())
}

/// Cuts `s` into pieces of at most `size` bytes at character boundaries.
///
/// A piece is only longer than `size` when a single character is wider
/// than `size` bytes. A `size` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use lineframe::io::chunks_at_char_boundaries;
///
/// let pieces: Vec<_> = chunks_at_char_boundaries("ab世界", 3).collect();
/// assert_eq!(pieces, ["ab", "世", "界"]);
/// assert_eq!(pieces.concat(), "ab世界");
/// ```
pub fn chunks_at_char_boundaries(s: &str, size: usize) -> impl Iterator<Item = &str> {
    let size = size.max(1);
    let mut start = 0;
    std::iter::from_fn(move || {
        if start >= s.len() {
            return None;
        }
        let mut end = find_char_boundary(s, start + size);
        if end <= start {
            end = find_char_boundary_forward(s, start + 1);
        }
        let piece = &s[start..end];
        start = end;
        Some(piece)
    })
}
