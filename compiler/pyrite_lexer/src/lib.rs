//! Indentation-sensitive tokenizer for Pyrite.
//!
//! Converts raw source text into a stream of typed [`Token`]s, synthesizing
//! the [`Indent`](TokenKind::Indent)/[`Dedent`](TokenKind::Dedent) tokens
//! that mark block structure in an indentation-delimited language.
//!
//! # Architecture
//!
//! ```text
//! source -> SourceBuffer -> Tokenizer::next_token() -> Token / LexError
//! ```
//!
//! The [`Tokenizer`] is a pure pull interface: the consumer (the parser,
//! which buffers a current and a lookahead token) drives progress by calling
//! [`Tokenizer::next_token`] until it sees [`TokenKind::Eof`]. Tokens borrow
//! their lexemes from the [`SourceBuffer`], so the buffer outlives every
//! token produced from it. Every lexical error is fatal; the tokenizer
//! returns it once and the caller decides how to report and terminate.
//!
//! # Example
//!
//! ```
//! use pyrite_lexer::{tokenize, SourceBuffer, TokenKind};
//!
//! let buffer = SourceBuffer::new("if x:\n    y\n");
//! let tokens = tokenize(&buffer)?;
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::If,
//!         TokenKind::Ident,
//!         TokenKind::Colon,
//!         TokenKind::Newline,
//!         TokenKind::Indent,
//!         TokenKind::Ident,
//!         TokenKind::Newline,
//!         TokenKind::Dedent,
//!         TokenKind::Eof,
//!     ]
//! );
//! # Ok::<(), pyrite_lexer::LexError>(())
//! ```

mod keywords;
mod lex_error;
mod span;
mod token;
mod tokenizer;

pub use lex_error::{LexError, LexErrorContext, LexErrorKind, LexSuggestion};
pub use pyrite_lexer_core::SourceBuffer;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
