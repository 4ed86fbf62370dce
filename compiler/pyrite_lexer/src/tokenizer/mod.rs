//! The pull-based tokenizer state machine.
//!
//! One token per [`Tokenizer::next_token`] call. Two logical states drive
//! the machine: at the start of a logical line, the indentation engine runs
//! before any content token; mid-line, ordinary byte dispatch classifies
//! the next token.
//!
//! # The indentation engine
//!
//! At a line start the tokenizer first absorbs fully blank lines and
//! comment-only lines (they never produce tokens), then measures the run of
//! leading spaces on the first line with real content. The measured width is
//! reconciled against the indentation stack:
//!
//! - deeper than the enclosing block: push, emit one `Indent`
//! - shallower: pop and emit one `Dedent` per call until the width matches
//!   an enclosing level; a width matching no level is a fatal error
//! - equal: no structural token, classification continues in the same call
//!
//! Reconciliation happens in a loop across calls, never by recursion and
//! never by batching several structural tokens into one.
//!
//! # End of input
//!
//! The source buffer's appended `\n` guarantees the last logical line is
//! closed, so end of input is always reached at a line start. Any blocks
//! still open dedent back to width 0 (one `Dedent` per call) before the
//! terminal `Eof` token. `Eof` is idempotent: every later call yields it
//! again.

use pyrite_lexer_core::{Cursor, SourceBuffer};
use tracing::trace;

use crate::keywords;
use crate::lex_error::LexError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Where the tokenizer is within the current logical line.
#[derive(Clone, Copy, Debug)]
enum LineState {
    /// At the start of a (potential) logical line: indentation must be
    /// resolved before any content token. Entered on construction and after
    /// every emitted `Newline`.
    AtLineStart,
    /// Indentation has been measured for the current line; structural
    /// tokens may still be owed.
    Reconciling { width: u32 },
    /// Mid-line: ordinary token classification.
    InLine,
}

/// Pull-based tokenizer over a [`SourceBuffer`].
///
/// The tokenizer is the sole owner of its cursor and indentation stack;
/// it is single-threaded and synchronous, and the caller drives progress
/// by calling [`next_token`](Self::next_token) repeatedly until it returns
/// a token of kind [`TokenKind::Eof`].
pub struct Tokenizer<'src> {
    cursor: Cursor<'src>,
    /// Open indentation levels, strictly increasing bottom to top. Always
    /// contains 0 at the bottom; the top is the width of the innermost
    /// active block. Mutated only by the indentation engine.
    indent_stack: Vec<u32>,
    state: LineState,
}

impl<'src> Tokenizer<'src> {
    /// Create a tokenizer positioned at the start of the buffer.
    pub fn new(buffer: &'src SourceBuffer) -> Self {
        Self {
            cursor: buffer.cursor(),
            indent_stack: vec![0],
            state: LineState::AtLineStart,
        }
    }

    /// Produce the next token.
    ///
    /// Errors are fatal: the tokenizer's state after an `Err` is
    /// unspecified and no further calls should be made.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        if matches!(self.state, LineState::AtLineStart) {
            let width = self.measure_indentation()?;
            self.state = LineState::Reconciling { width };
        }
        if let LineState::Reconciling { width } = self.state {
            if let Some(token) = self.reconcile_indentation(width)? {
                return Ok(token);
            }
            // Width matches the enclosing block: no structural token for
            // this line, fall through to classification in the same call.
            self.state = LineState::InLine;
        }
        self.scan_token()
    }

    // ─── Indentation engine ──────────────────────────────────────────────

    /// Find the next line with real content and measure its indentation.
    ///
    /// Fully blank lines and comment-only lines are absorbed, terminators
    /// included. At end of input the width is 0: every open block closes.
    /// On a content line the cursor is left at the first byte after the
    /// leading spaces.
    fn measure_indentation(&mut self) -> Result<u32, LexError> {
        loop {
            // Checkpoint the line start; probing for content moves the
            // cursor and a content line must be re-measured from column 0.
            let line_start = self.cursor;

            self.cursor.eat_horizontal_whitespace();
            if self.cursor.current() == b'#' {
                self.cursor.eat_until_newline_or_eof();
            }
            if self.cursor.current() == b'\n' {
                self.cursor.advance();
                trace!(pos = self.cursor.pos(), "absorbed blank line");
                continue;
            }
            if self.cursor.is_eof() {
                return Ok(0);
            }

            // A content line: rewind and count leading spaces only.
            self.cursor = line_start;
            let start = self.cursor.pos();
            self.cursor.eat_while(|b| b == b' ');
            if self.cursor.current() == b'\t' {
                return Err(LexError::tab_indentation(Span::point(self.cursor.pos())));
            }
            return Ok(self.cursor.pos() - start);
        }
    }

    /// Reconcile the measured width against the indentation stack.
    ///
    /// Returns the owed structural token, or `None` once the width equals
    /// the enclosing level. Emits at most one token per call; a multi-level
    /// dedent leaves the state at `Reconciling` so the next call pops again.
    fn reconcile_indentation(&mut self, width: u32) -> Result<Option<Token<'src>>, LexError> {
        let at = self.cursor.pos();
        let top = self.indent_stack.last().copied().unwrap_or(0);

        if width > top {
            self.indent_stack.push(width);
            self.state = LineState::InLine;
            trace!(width, "indent");
            return Ok(Some(Token::synthesized(TokenKind::Indent, at)));
        }

        if width < top {
            self.indent_stack.pop();
            let nearest = self.indent_stack.last().copied().unwrap_or(0);
            if width > nearest {
                // The width sits between two levels: it matches nothing.
                return Err(LexError::dedent_mismatch(Span::point(at), width, nearest));
            }
            self.state = if width == nearest {
                LineState::InLine
            } else {
                LineState::Reconciling { width }
            };
            trace!(width, from = top, "dedent");
            return Ok(Some(Token::synthesized(TokenKind::Dedent, at)));
        }

        Ok(None)
    }

    // ─── Classification ──────────────────────────────────────────────────

    /// Scan one ordinary token. Runs only with indentation resolved.
    fn scan_token(&mut self) -> Result<Token<'src>, LexError> {
        self.cursor.eat_horizontal_whitespace();
        if self.cursor.current() == b'#' {
            self.cursor.eat_until_newline_or_eof();
        }

        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.end_of_input(start),
            b'\n' => {
                self.cursor.advance();
                self.state = LineState::AtLineStart;
                Ok(self.lexeme_token(TokenKind::Newline, start))
            }
            b'+' => Ok(self.single(TokenKind::Plus, start)),
            b'*' => Ok(self.single(TokenKind::Star, start)),
            b'%' => Ok(self.single(TokenKind::Percent, start)),
            b'(' => Ok(self.single(TokenKind::LeftParen, start)),
            b')' => Ok(self.single(TokenKind::RightParen, start)),
            b'[' => Ok(self.single(TokenKind::LeftBracket, start)),
            b']' => Ok(self.single(TokenKind::RightBracket, start)),
            b',' => Ok(self.single(TokenKind::Comma, start)),
            b':' => Ok(self.single(TokenKind::Colon, start)),
            b'.' => Ok(self.single(TokenKind::Dot, start)),
            b'-' => Ok(self.minus_or_arrow(start)),
            b'=' => Ok(self.either(b'=', TokenKind::EqualEqual, TokenKind::Equal, start)),
            b'>' => Ok(self.either(b'=', TokenKind::GreaterEqual, TokenKind::Greater, start)),
            b'<' => Ok(self.either(b'=', TokenKind::LessEqual, TokenKind::Less, start)),
            b'/' => self.slash_slash(start),
            b'!' => self.bang_equal(start),
            b'"' => self.string(start),
            b'0'..=b'9' => self.number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(self.ident_or_keyword(start)),
            _ => Err(self.illegal_character(start)),
        }
    }

    /// End of input, or an interior null byte masquerading as one.
    fn end_of_input(&mut self, start: u32) -> Result<Token<'src>, LexError> {
        if self.cursor.is_eof() {
            // Terminal state: the cursor never moves past the sentinel, so
            // every subsequent call lands here again.
            Ok(Token::synthesized(TokenKind::Eof, start))
        } else {
            Err(self.illegal_character(start))
        }
    }

    /// Single-byte token: advance one byte and emit the given kind.
    fn single(&mut self, kind: TokenKind, start: u32) -> Token<'src> {
        self.cursor.advance();
        self.lexeme_token(kind, start)
    }

    /// Two-byte-or-one disambiguation: if the lookahead is `second`, emit
    /// `pair`, otherwise emit `alone`.
    fn either(&mut self, second: u8, pair: TokenKind, alone: TokenKind, start: u32) -> Token<'src> {
        if self.cursor.peek() == second {
            self.cursor.advance_n(2);
            self.lexeme_token(pair, start)
        } else {
            self.single(alone, start)
        }
    }

    fn minus_or_arrow(&mut self, start: u32) -> Token<'src> {
        self.either(b'>', TokenKind::Arrow, TokenKind::Minus, start)
    }

    /// `//` or a fatal error: the dialect has no true-division operator.
    fn slash_slash(&mut self, start: u32) -> Result<Token<'src>, LexError> {
        if self.cursor.peek() == b'/' {
            self.cursor.advance_n(2);
            Ok(self.lexeme_token(TokenKind::SlashSlash, start))
        } else {
            let found = self.char_at(start + 1);
            Err(LexError::lone_slash(Span::new(start, start + 1), found))
        }
    }

    /// `!=` or a fatal error: bare `!` is invalid.
    fn bang_equal(&mut self, start: u32) -> Result<Token<'src>, LexError> {
        if self.cursor.peek() == b'=' {
            self.cursor.advance_n(2);
            Ok(self.lexeme_token(TokenKind::BangEqual, start))
        } else {
            let found = self.char_at(start + 1);
            Err(LexError::lone_bang(Span::new(start, start + 1), found))
        }
    }

    /// String literal. The lexeme includes both delimiting quotes. Strings
    /// are single-line and support no escape sequences: a line terminator
    /// or end of input before the closing quote is an unterminated-string
    /// error, and `\r`, `\t`, `\\`, `%` inside are illegal.
    fn string(&mut self, start: u32) -> Result<Token<'src>, LexError> {
        self.cursor.advance(); // consume opening '"'
        match self.cursor.skip_to_string_delim() {
            b'"' => {
                self.cursor.advance();
                Ok(self.lexeme_token(TokenKind::String, start))
            }
            b'\n' | 0 => Err(LexError::unterminated_string(
                Span::new(start, self.cursor.pos()),
                start,
            )),
            found => {
                let at = self.cursor.pos();
                Err(LexError::illegal_string_character(
                    Span::new(at, at + 1),
                    char::from(found),
                    start,
                ))
            }
        }
    }

    /// Number literal: a maximal run of decimal digits. A decimal point
    /// immediately after the run is fatal.
    fn number(&mut self, start: u32) -> Result<Token<'src>, LexError> {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' {
            let span = Span::new(start, self.cursor.pos() + 1);
            return Err(LexError::float_not_supported(span));
        }
        Ok(self.lexeme_token(TokenKind::Number, start))
    }

    /// Identifier or keyword: a maximal run of letters, digits, and
    /// underscores, resolved through the keyword tables.
    fn ident_or_keyword(&mut self, start: u32) -> Token<'src> {
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice_from(start);
        Token::new(
            keywords::resolve(text),
            text,
            Span::new(start, self.cursor.pos()),
        )
    }

    /// Build a token whose lexeme is the source text from `start` to the
    /// current position.
    fn lexeme_token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let end = self.cursor.pos();
        Token::new(kind, self.cursor.slice(start, end), Span::new(start, end))
    }

    #[cold]
    fn illegal_character(&self, start: u32) -> LexError {
        let found = self.char_at(start);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "char::len_utf8() is 1..=4, fits u32"
        )]
        let len = found.len_utf8() as u32;
        LexError::illegal_character(Span::new(start, start + len), found)
    }

    /// Decode the UTF-8 character at `offset` for diagnostics.
    ///
    /// Falls back to U+FFFD if `offset` does not sit on a character
    /// boundary (possible only for malformed tokenizer positions).
    fn char_at(&self, offset: u32) -> char {
        self.cursor
            .slice(offset, self.cursor.source_len())
            .chars()
            .next()
            .unwrap_or('\u{FFFD}')
    }
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Tokenize an entire buffer, collecting tokens through the terminal
/// [`TokenKind::Eof`] (included as the last element).
pub fn tokenize(buffer: &SourceBuffer) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokenizer = Tokenizer::new(buffer);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests;
