//! Token definitions for the Pyrite tokenizer.
//!
//! A [`Token`] pairs a [`TokenKind`] with the exact lexeme text (borrowed
//! from the source buffer) and its byte span. Tokens are created once by the
//! tokenizer and never mutated; ownership passes to the caller.

use std::fmt;

use crate::span::Span;

/// The closed set of Pyrite token kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    // === Structural ===
    /// Block opened: the line is indented deeper than the enclosing block.
    Indent,
    /// Block closed: indentation returned to an enclosing level.
    Dedent,
    /// End of a logical line.
    Newline,
    /// End of input. Terminal: every call after the first `Eof` yields `Eof`.
    Eof,

    // === Literals ===
    /// Decimal integer literal.
    Number,
    /// String literal, delimiting quotes included in the lexeme.
    String,
    /// Identifier.
    Ident,

    // === Keywords ===
    False,
    True,
    None,
    And,
    As,
    Class,
    Def,
    Elif,
    Else,
    For,
    Global,
    If,
    In,
    Is,
    Nonlocal,
    Not,
    Or,
    Pass,
    Return,
    While,

    // === Operators & punctuation ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `//` (floor division; Pyrite has no true-division operator)
    SlashSlash,
    /// `%`
    Percent,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `->`
    Arrow,

    /// An identifier spelled like a word the host-language subset reserves
    /// but Pyrite does not support (`lambda`, `import`, ...). Lexically
    /// well-formed, so the tokenizer passes it through; the grammar rejects
    /// it.
    SyntaxError,
}

impl TokenKind {
    /// Returns `true` for the supported keyword kinds (not `SyntaxError`).
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::False
                | TokenKind::True
                | TokenKind::None
                | TokenKind::And
                | TokenKind::As
                | TokenKind::Class
                | TokenKind::Def
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Global
                | TokenKind::If
                | TokenKind::In
                | TokenKind::Is
                | TokenKind::Nonlocal
                | TokenKind::Not
                | TokenKind::Or
                | TokenKind::Pass
                | TokenKind::Return
                | TokenKind::While
        )
    }

    /// Returns `true` for the synthesized structural kinds.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::Indent | TokenKind::Dedent | TokenKind::Newline | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Ident => "identifier",
            TokenKind::False => "`False`",
            TokenKind::True => "`True`",
            TokenKind::None => "`None`",
            TokenKind::And => "`and`",
            TokenKind::As => "`as`",
            TokenKind::Class => "`class`",
            TokenKind::Def => "`def`",
            TokenKind::Elif => "`elif`",
            TokenKind::Else => "`else`",
            TokenKind::For => "`for`",
            TokenKind::Global => "`global`",
            TokenKind::If => "`if`",
            TokenKind::In => "`in`",
            TokenKind::Is => "`is`",
            TokenKind::Nonlocal => "`nonlocal`",
            TokenKind::Not => "`not`",
            TokenKind::Or => "`or`",
            TokenKind::Pass => "`pass`",
            TokenKind::Return => "`return`",
            TokenKind::While => "`while`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::SlashSlash => "`//`",
            TokenKind::Percent => "`%`",
            TokenKind::Equal => "`=`",
            TokenKind::EqualEqual => "`==`",
            TokenKind::BangEqual => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEqual => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEqual => "`>=`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Arrow => "`->`",
            TokenKind::SyntaxError => "reserved word",
        };
        f.write_str(s)
    }
}

/// A single lexical token.
///
/// `text` is the exact lexeme, borrowed from the source buffer. Synthesized
/// tokens ([`Indent`](TokenKind::Indent), [`Dedent`](TokenKind::Dedent),
/// [`Eof`](TokenKind::Eof)) have no lexeme: their `text` is empty and their
/// span is a point at the position that triggered them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// Create a synthesized token: empty text, point span.
    #[inline]
    pub fn synthesized(kind: TokenKind, at: u32) -> Self {
        Self {
            kind,
            text: "",
            span: Span::point(at),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            // Only these kinds carry information beyond the kind itself.
            TokenKind::Number | TokenKind::String | TokenKind::Ident | TokenKind::SyntaxError => {
                write!(f, "{} `{}`", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
