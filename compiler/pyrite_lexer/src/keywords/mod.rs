//! Keyword resolution.
//!
//! Two-table keyword system:
//! 1. **Supported keywords** — length-bucketed lookup, resolved to their
//!    dedicated token kinds.
//! 2. **Reserved words** — spellings the host-language subset reserves but
//!    Pyrite does not support (`lambda`, `import`, ...). These resolve to
//!    [`TokenKind::SyntaxError`] so the grammar layer can reject them with
//!    a parse error instead of the lexer aborting mid-file.
//!
//! The lookup functions are pure `match`es over the identifier text — no
//! process-wide mutable table. The identifier's length is the first-pass
//! filter (keywords range from 2-8 chars), then the text is matched against
//! the keywords of that length.

use crate::token::TokenKind;

/// Resolve an identifier's spelling to its token kind.
///
/// Supported keywords map to their kinds, reserved words map to
/// [`TokenKind::SyntaxError`], and everything else is an
/// [`TokenKind::Ident`].
#[inline]
pub(crate) fn resolve(text: &str) -> TokenKind {
    if let Some(kind) = lookup(text) {
        return kind;
    }
    if reserved_lookup(text).is_some() {
        return TokenKind::SyntaxError;
    }
    TokenKind::Ident
}

/// Look up a supported keyword by text.
///
/// Returns the corresponding `TokenKind` if the text is a supported keyword,
/// `None` if it's a regular identifier (or a reserved word — those are
/// handled separately by [`reserved_lookup`]).
///
/// Uses length-bucketing for fast rejection: identifiers whose length falls
/// outside the 2-8 range are immediately rejected without any comparison.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let bytes = text.as_bytes();
    let len = bytes.len();

    // Guard: all keywords are 2-8 chars and start with ASCII alpha
    if !(2..=8).contains(&len) {
        return None;
    }
    if !bytes[0].is_ascii_alphabetic() {
        return None;
    }

    match len {
        2 => match text {
            "as" => Some(TokenKind::As),
            "if" => Some(TokenKind::If),
            "in" => Some(TokenKind::In),
            "is" => Some(TokenKind::Is),
            "or" => Some(TokenKind::Or),
            _ => None,
        },
        3 => match text {
            "and" => Some(TokenKind::And),
            "def" => Some(TokenKind::Def),
            "for" => Some(TokenKind::For),
            "not" => Some(TokenKind::Not),
            _ => None,
        },
        4 => match text {
            "None" => Some(TokenKind::None),
            "True" => Some(TokenKind::True),
            "elif" => Some(TokenKind::Elif),
            "else" => Some(TokenKind::Else),
            "pass" => Some(TokenKind::Pass),
            _ => None,
        },
        5 => match text {
            "False" => Some(TokenKind::False),
            "class" => Some(TokenKind::Class),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "global" => Some(TokenKind::Global),
            "return" => Some(TokenKind::Return),
            _ => None,
        },
        8 => match text {
            "nonlocal" => Some(TokenKind::Nonlocal),
            _ => None,
        },
        _ => None,
    }
}

/// Check if a spelling is reserved by the host-language subset but
/// unsupported by Pyrite.
///
/// Returns the static keyword string if it matches, `None` otherwise.
/// These words cannot be used as identifiers — the grammar rejects the
/// [`TokenKind::SyntaxError`] token they lex to.
pub(crate) fn reserved_lookup(text: &str) -> Option<&'static str> {
    match text {
        "assert" => Some("assert"),
        "async" => Some("async"),
        "await" => Some("await"),
        "break" => Some("break"),
        "continue" => Some("continue"),
        "del" => Some("del"),
        "except" => Some("except"),
        "finally" => Some("finally"),
        "from" => Some("from"),
        "import" => Some("import"),
        "lambda" => Some("lambda"),
        "raise" => Some("raise"),
        "try" => Some("try"),
        "with" => Some("with"),
        "yield" => Some("yield"),
        _ => None,
    }
}
