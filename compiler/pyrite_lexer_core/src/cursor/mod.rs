//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. End of input is
//! detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached or exceeded the content length. No explicit bounds
//! checking is performed in the common case -- the sentinel guarantees safe
//! termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes (U+0000), the cursor
//! distinguishes them from end of input by comparing `pos` against
//! `source_len`. A null at `pos < source_len` is an interior null (illegal
//! character); a null at `pos >= source_len` is the sentinel.

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by the memchr-based scanning methods to combine results from
/// separate memchr calls when we need to search for more bytes than
/// `memchr3` supports (which handles at most 3 needles).
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots: the indentation
/// engine records the cursor at a line start and rewinds to it after probing
/// the line for content.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (content + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of the content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at end of input (the sentinel byte). Interior
    /// null bytes also return `0x00`; use [`is_eof()`](Self::is_eof) to
    /// distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and cache-line padding
    /// guarantee valid reads beyond the content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Advance the cursor by one byte.
    ///
    /// No-op once the cursor sits on the sentinel: the cursor never moves
    /// past end of input, so advancing there is idempotent.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.source_len {
            self.pos += 1;
        }
    }

    /// Advance the cursor by `n` bytes, stopping at the sentinel.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = (self.pos + n).min(self.source_len);
    }

    /// Returns `true` if the cursor has reached end of input.
    ///
    /// End of input is when the current byte is the sentinel (`0x00`) and
    /// the position is at or past the content length. This distinguishes
    /// the terminal state from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the content.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Extract a content substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the content (`end <= source_len`) and
    /// on valid UTF-8 character boundaries. This holds when `start` and
    /// `end` come from the tokenizer's token boundary tracking: the buffer
    /// was built from `&str`, and every boundary the tokenizer produces sits
    /// on an ASCII byte.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds content length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        // Boundaries are ASCII by construction; an out-of-boundary slice is
        // a tokenizer bug, caught by the debug_asserts above and surfaced as
        // an empty lexeme in release builds.
        std::str::from_utf8(&self.buf[start as usize..end as usize]).unwrap_or("")
    }

    /// Extract a content substring from `start` to the current position.
    ///
    /// Equivalent to `self.slice(start, self.pos())`.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, so the sentinel terminates the loop.
    /// This is true for all standard byte classification predicates.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Advance past horizontal whitespace: spaces, tabs, and carriage
    /// returns. Never consumes `\n` -- the line terminator is a token.
    ///
    /// A lone `\r` counts as horizontal whitespace, which also makes CRLF
    /// line endings collapse to the `\n` the tokenizer cares about.
    ///
    /// Uses a simple byte loop, which is faster than wide scans for the
    /// short runs (1-4 bytes) typical between tokens. The sentinel byte
    /// (`0x00`) naturally terminates scanning.
    #[inline]
    pub fn eat_horizontal_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Advance to the next `\n` byte or end of input using SIMD-accelerated
    /// search.
    ///
    /// Used by the comment scanner to skip comment bodies. Scans only within
    /// content (not into sentinel/padding). If no newline is found, positions
    /// the cursor at the sentinel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past ordinary string content to the next byte significant
    /// inside a string literal. Returns the byte found, or 0 for end of
    /// input.
    ///
    /// Significant bytes: the closing `"`, the line terminators `\n`/`\r`
    /// (strings are single-line), and the disallowed `\t`, `\\`, `%`.
    /// Uses memchr3 for the 3 most common (`"`, `\\`, `\n`), with a
    /// secondary search for the rarer `\r`, `\t`, `%`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        // Find nearest of ", \, or \n (the common terminators)
        let primary = memchr::memchr3(b'"', b'\\', b'\n', remaining);
        // Also check for the rarer disallowed bytes
        let secondary = memchr::memchr3(b'\r', b'\t', b'%', remaining);

        // Take the earliest match
        let offset = earliest_of(primary, secondary);

        if let Some(off) = offset {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0 // sentinel
        }
    }
}
