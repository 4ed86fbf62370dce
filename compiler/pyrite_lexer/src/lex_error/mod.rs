//! Lexer error types.
//!
//! Errors follow the WHERE+WHAT+WHY+HOW shape:
//! - WHERE: `span` locating the error in source
//! - WHAT: `kind` describing what went wrong
//! - WHY: `context` explaining what the tokenizer was doing
//! - HOW: `suggestions` providing actionable fixes
//!
//! Every member of the taxonomy is fatal: the tokenizer returns the error
//! once and produces no further tokens. There is no recovery or
//! partial-result mode. Reserved-word usage is deliberately NOT an error at
//! this layer — it lexes to [`TokenKind::SyntaxError`](crate::TokenKind)
//! and the grammar rejects it.

use thiserror::Error;

use crate::span::Span;

/// A lexer error with full context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("lexing error at {span}: {kind}")]
pub struct LexError {
    /// WHERE the error occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHY we were scanning (tokenizer context at the point of error).
    pub context: LexErrorContext,
    /// HOW to fix (actionable suggestions).
    pub suggestions: Vec<LexSuggestion>,
}

/// What kind of lexer error occurred.
///
/// The `Display` impl provides the category label plus the offending input
/// fragment, which is the minimum a host diagnostic must print.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// An input character that matches no token rule.
    #[error("illegal character {found:?}")]
    IllegalCharacter { found: char },

    /// A string literal missing its closing `"` before the end of the line.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A character the dialect forbids inside string literals
    /// (carriage return, tab, backslash, or percent sign).
    #[error("illegal character {found:?} in string literal")]
    IllegalStringCharacter { found: char },

    /// A decimal point after a digit run.
    #[error("floating point numbers are not supported")]
    FloatNotSupported,

    /// A `/` not followed by a second `/`. The dialect has no true-division
    /// operator.
    #[error("expected `//`, got `/` followed by {found:?}")]
    LoneSlash { found: char },

    /// A `!` not followed by `=`.
    #[error("expected `!=`, got `!` followed by {found:?}")]
    LoneBang { found: char },

    /// A dedent whose width matches no enclosing indentation level.
    #[error("unindent to {width} does not match any outer indentation level")]
    DedentMismatch {
        /// Measured indentation width of the offending line.
        width: u32,
        /// The nearest enclosing level below `width`.
        nearest: u32,
    },

    /// A tab character in a line's leading indentation. Indentation is
    /// measured in spaces only.
    #[error("tab character in indentation")]
    TabIndentation,
}

/// Tokenizer context at the point of error — the WHY.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    /// Ordinary mid-line scanning.
    #[default]
    TopLevel,
    /// Inside a string literal opened at `start`.
    InsideString { start: u32 },
    /// Inside a numeric literal.
    NumberLiteral,
    /// Resolving indentation at the start of a logical line.
    LineStart,
}

/// Suggestion for fixing a lexical error — the HOW.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexSuggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// Priority (lower = more likely relevant). 0 = most likely.
    pub priority: u8,
}

impl LexSuggestion {
    /// Create a suggestion.
    pub fn text(message: impl Into<String>, priority: u8) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }
}

impl LexError {
    /// Create an illegal character error.
    #[cold]
    pub fn illegal_character(span: Span, found: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::IllegalCharacter { found },
            context: LexErrorContext::TopLevel,
            suggestions: Vec::new(),
        }
    }

    /// Create an unterminated string error. `start` is the opening quote.
    #[cold]
    pub fn unterminated_string(span: Span, start: u32) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedString,
            context: LexErrorContext::InsideString { start },
            suggestions: vec![LexSuggestion::text("add closing `\"` before the end of the line", 0)],
        }
    }

    /// Create an illegal-character-in-string error.
    #[cold]
    pub fn illegal_string_character(span: Span, found: char, start: u32) -> Self {
        Self {
            span,
            kind: LexErrorKind::IllegalStringCharacter { found },
            context: LexErrorContext::InsideString { start },
            suggestions: vec![LexSuggestion::text(
                "strings are single-line and support no escape sequences",
                1,
            )],
        }
    }

    /// Create a floating-point-rejected error.
    #[cold]
    pub fn float_not_supported(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::FloatNotSupported,
            context: LexErrorContext::NumberLiteral,
            suggestions: vec![LexSuggestion::text("numbers are integers only", 0)],
        }
    }

    /// Create a lone-slash error.
    #[cold]
    pub fn lone_slash(span: Span, found: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::LoneSlash { found },
            context: LexErrorContext::TopLevel,
            suggestions: vec![LexSuggestion::text("use `//` for floor division", 0)],
        }
    }

    /// Create a lone-bang error.
    #[cold]
    pub fn lone_bang(span: Span, found: char) -> Self {
        Self {
            span,
            kind: LexErrorKind::LoneBang { found },
            context: LexErrorContext::TopLevel,
            suggestions: vec![LexSuggestion::text("use `!=` for inequality", 0)],
        }
    }

    /// Create a dedent-mismatch error.
    #[cold]
    pub fn dedent_mismatch(span: Span, width: u32, nearest: u32) -> Self {
        Self {
            span,
            kind: LexErrorKind::DedentMismatch { width, nearest },
            context: LexErrorContext::LineStart,
            suggestions: vec![LexSuggestion::text(
                format!("unindent to {nearest} spaces to match the enclosing block"),
                0,
            )],
        }
    }

    /// Create a tab-in-indentation error.
    #[cold]
    pub fn tab_indentation(span: Span) -> Self {
        Self {
            span,
            kind: LexErrorKind::TabIndentation,
            context: LexErrorContext::LineStart,
            suggestions: vec![LexSuggestion::text("indent with spaces only", 0)],
        }
    }
}
