//! Low-level scanning primitives for the Pyrite tokenizer.
//!
//! This crate owns the two building blocks the tokenizer scans with:
//!
//! - [`SourceBuffer`]: a sentinel-terminated copy of the source text. The
//!   buffer appends a `\n` so the final line is always closed, then a `0x00`
//!   sentinel plus cache-line padding so the scanner never needs explicit
//!   bounds checks.
//! - [`Cursor`]: a `Copy` cursor over that buffer with byte-level
//!   `current`/`peek`/`advance` primitives and `memchr`-accelerated bulk
//!   scans for comments and string bodies.
//!
//! Token classification, keyword resolution, and the indentation state
//! machine live in `pyrite_lexer`; nothing in this crate knows what a token
//! is.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;
