//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer appends a line terminator to the caller's source so the final
//! logical line is always closed, then guarantees a `0x00` sentinel byte
//! after the content, allowing the scanner to detect end of input without
//! explicit bounds checking. The total buffer size is rounded up to the next
//! 64-byte boundary for cache-line alignment, which also provides safe
//! padding for `peek()` near the end of the buffer.
//!
//! # Interior Null Bytes
//!
//! A `&str` may legally contain U+0000. The cursor distinguishes an interior
//! null from the sentinel by comparing its position against the content
//! length; the tokenizer reports interior nulls as illegal characters.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., b'\n', 0x00, padding_zeros...]
///  ^                ^      ^     ^
///  0                |      |     rounded up to 64-byte boundary
///                   |      sentinel
///                   appended line terminator (always present)
/// ```
///
/// The appended `\n` counts as source content: `len()` includes it, and the
/// cursor scans through it like any other byte. The sentinel and padding do
/// not.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source..., b'\n', 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the content (caller's source plus the appended `\n`).
    source_len: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source text.
    ///
    /// A `\n` is appended unconditionally, so the final line is well-formed
    /// regardless of whether the caller's text ends with one. An extra blank
    /// line at the end of the input is absorbed by the tokenizer and never
    /// produces a token.
    ///
    /// # File Size
    ///
    /// Sources larger than `u32::MAX` bytes (~4 GiB) are accepted but the
    /// content length saturates at `u32::MAX`; callers feeding files that
    /// large should reject them upstream.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let content_len = source_bytes.len() + 1; // plus appended '\n'

        // Round up to next 64-byte boundary (minimum: content + 1 sentinel byte).
        let padded_len = (content_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled buffer, then copy source bytes.
        // The sentinel (buf[content_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_bytes.len()].copy_from_slice(source_bytes);
        buf[source_bytes.len()] = b'\n';

        let source_len = u32::try_from(content_len).unwrap_or(u32::MAX);

        Self { buf, source_len }
    }

    /// Returns the content bytes (caller's source plus the appended `\n`),
    /// without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the content in bytes (includes the appended `\n`, excludes
    /// sentinel and padding). Never zero.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Always `false`: the appended line terminator means even an empty
    /// input yields one byte of content. Kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

/// Size assertion: `SourceBuffer` should be <= 32 bytes on 64-bit platforms.
/// Vec<u8> = 24, u32 = 4, + 4 padding = 32.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);
