use pretty_assertions::assert_eq;

use super::*;
use crate::lex_error::{LexErrorContext, LexErrorKind};
use crate::token::TokenKind as K;

fn kinds(source: &str) -> Vec<K> {
    let buffer = SourceBuffer::new(source);
    match tokenize(&buffer) {
        Ok(tokens) => tokens.iter().map(|t| t.kind).collect(),
        Err(err) => panic!("unexpected lexing error for {source:?}: {err}"),
    }
}

fn texts(source: &str) -> Vec<(K, String)> {
    let buffer = SourceBuffer::new(source);
    match tokenize(&buffer) {
        Ok(tokens) => tokens.iter().map(|t| (t.kind, t.text.to_owned())).collect(),
        Err(err) => panic!("unexpected lexing error for {source:?}: {err}"),
    }
}

fn lex_err(source: &str) -> LexError {
    let buffer = SourceBuffer::new(source);
    match tokenize(&buffer) {
        Ok(tokens) => panic!("expected a lexing error for {source:?}, got {tokens:?}"),
        Err(err) => err,
    }
}

// === End-to-end scenarios ===

#[test]
fn simple_block() {
    assert_eq!(
        kinds("if x:\n    y\n"),
        [
            K::If,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Eof,
        ]
    );
}

#[test]
fn flat_statements_have_no_structural_tokens() {
    assert_eq!(
        kinds("x = 1\ny = 2\n"),
        [
            K::Ident,
            K::Equal,
            K::Number,
            K::Newline,
            K::Ident,
            K::Equal,
            K::Number,
            K::Newline,
            K::Eof,
        ]
    );
}

#[test]
fn arrow_versus_minus() {
    assert_eq!(
        texts("->"),
        [
            (K::Arrow, "->".to_owned()),
            (K::Newline, "\n".to_owned()),
            (K::Eof, String::new()),
        ]
    );
    assert_eq!(
        texts("- "),
        [
            (K::Minus, "-".to_owned()),
            (K::Newline, "\n".to_owned()),
            (K::Eof, String::new()),
        ]
    );
}

#[test]
fn missing_trailing_newline_is_supplied() {
    // The buffer appends the terminator; the final line still closes.
    assert_eq!(
        kinds("if x:\n    y"),
        [
            K::If,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Eof,
        ]
    );
}

// === Indentation ===

#[test]
fn nested_blocks_dedent_one_per_line_level() {
    assert_eq!(
        kinds("a:\n  b:\n    c\nd\n"),
        [
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Dedent,
            K::Ident,
            K::Newline,
            K::Eof,
        ]
    );
}

#[test]
fn dedents_close_open_blocks_at_end_of_input() {
    assert_eq!(
        kinds("a:\n  b:\n    c\n"),
        [
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Dedent,
            K::Eof,
        ]
    );
}

#[test]
fn partial_dedent_to_known_level() {
    assert_eq!(
        kinds("a:\n    b:\n        c\n    d\n"),
        [
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Eof,
        ]
    );
}

#[test]
fn structural_tokens_are_synthesized() {
    let buffer = SourceBuffer::new("if x:\n    y\n");
    let tokens = match tokenize(&buffer) {
        Ok(tokens) => tokens,
        Err(err) => panic!("unexpected error: {err}"),
    };
    let indent = tokens.iter().find(|t| t.kind == K::Indent);
    match indent {
        Some(token) => {
            assert_eq!(token.text, "");
            assert!(token.span.is_empty());
            // Point span sits at the first content byte of the line.
            assert_eq!(token.span.start, 10);
        }
        None => panic!("no indent token produced"),
    }
}

#[test]
fn dedent_to_unknown_width_is_fatal() {
    let err = lex_err("if x:\n    y\n  z\n");
    assert_eq!(err.kind, LexErrorKind::DedentMismatch { width: 2, nearest: 0 });
    assert_eq!(err.context, LexErrorContext::LineStart);
}

#[test]
fn dedent_between_nested_levels_is_fatal() {
    let err = lex_err("a:\n  b:\n    c\n   d\n");
    assert_eq!(err.kind, LexErrorKind::DedentMismatch { width: 3, nearest: 2 });
}

#[test]
fn tab_in_indentation_is_fatal() {
    let err = lex_err("\tx\n");
    assert_eq!(err.kind, LexErrorKind::TabIndentation);

    let err = lex_err("if x:\n\ty\n");
    assert_eq!(err.kind, LexErrorKind::TabIndentation);

    // Tabs after the leading spaces of a content line are still indentation.
    let err = lex_err("if x:\n    \ty\n");
    assert_eq!(err.kind, LexErrorKind::TabIndentation);
}

#[test]
fn tabs_mid_line_are_ordinary_whitespace() {
    assert_eq!(
        kinds("x\t=\t1\n"),
        [K::Ident, K::Equal, K::Number, K::Newline, K::Eof]
    );
}

// === Blank and comment-only lines ===

#[test]
fn blank_lines_are_absorbed() {
    assert_eq!(
        kinds("x\n\n\ny\n"),
        [K::Ident, K::Newline, K::Ident, K::Newline, K::Eof]
    );
}

#[test]
fn comment_only_lines_are_absorbed() {
    assert_eq!(
        kinds("x\n# comment\ny\n"),
        [K::Ident, K::Newline, K::Ident, K::Newline, K::Eof]
    );
}

#[test]
fn indented_comment_lines_do_not_open_blocks() {
    assert_eq!(
        kinds("x\n        # deep comment\ny\n"),
        [K::Ident, K::Newline, K::Ident, K::Newline, K::Eof]
    );
}

#[test]
fn blank_lines_inside_blocks_keep_the_block_open() {
    assert_eq!(
        kinds("if x:\n    y\n\n    z\n"),
        [
            K::If,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Ident,
            K::Newline,
            K::Ident,
            K::Newline,
            K::Dedent,
            K::Eof,
        ]
    );
}

#[test]
fn whitespace_only_line_with_tabs_is_blank() {
    // A tab on a blank line is absorbed, never measured.
    assert_eq!(
        kinds("x\n \t \ny\n"),
        [K::Ident, K::Newline, K::Ident, K::Newline, K::Eof]
    );
}

#[test]
fn leading_blank_lines_before_first_statement() {
    assert_eq!(kinds("\n\n# header\nx\n"), [K::Ident, K::Newline, K::Eof]);
}

#[test]
fn inline_comment_is_skipped() {
    assert_eq!(
        kinds("x = 1  # trailing\n"),
        [K::Ident, K::Equal, K::Number, K::Newline, K::Eof]
    );
}

#[test]
fn comment_only_input_is_just_eof() {
    assert_eq!(kinds("# nothing here\n"), [K::Eof]);
    assert_eq!(kinds(""), [K::Eof]);
    assert_eq!(kinds("   \n\t\n"), [K::Eof]);
}

// === Operators ===

#[test]
fn operator_disambiguation() {
    assert_eq!(
        kinds("= == < <= > >= != // -> -\n"),
        [
            K::Equal,
            K::EqualEqual,
            K::Less,
            K::LessEqual,
            K::Greater,
            K::GreaterEqual,
            K::BangEqual,
            K::SlashSlash,
            K::Arrow,
            K::Minus,
            K::Newline,
            K::Eof,
        ]
    );
}

#[test]
fn single_character_tokens() {
    assert_eq!(
        kinds("+ * % ( ) [ ] , : .\n"),
        [
            K::Plus,
            K::Star,
            K::Percent,
            K::LeftParen,
            K::RightParen,
            K::LeftBracket,
            K::RightBracket,
            K::Comma,
            K::Colon,
            K::Dot,
            K::Newline,
            K::Eof,
        ]
    );
}

#[test]
fn adjacent_compound_operators() {
    // `==` binds greedily; `===` is `==` then `=`.
    assert_eq!(
        kinds("===\n"),
        [K::EqualEqual, K::Equal, K::Newline, K::Eof]
    );
    assert_eq!(kinds("<=>\n"), [K::LessEqual, K::Greater, K::Newline, K::Eof]);
}

#[test]
fn lone_slash_is_fatal() {
    let err = lex_err("x / y\n");
    assert_eq!(err.kind, LexErrorKind::LoneSlash { found: ' ' });
}

#[test]
fn lone_bang_is_fatal() {
    let err = lex_err("!x\n");
    assert_eq!(err.kind, LexErrorKind::LoneBang { found: 'x' });
}

#[test]
fn arrow_signature_lexes() {
    assert_eq!(
        kinds("def f(x) -> y:\n    pass\n"),
        [
            K::Def,
            K::Ident,
            K::LeftParen,
            K::Ident,
            K::RightParen,
            K::Arrow,
            K::Ident,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Pass,
            K::Newline,
            K::Dedent,
            K::Eof,
        ]
    );
}

// === Literals ===

#[test]
fn number_lexemes() {
    assert_eq!(
        texts("0 7 12345\n")
            .iter()
            .filter(|(k, _)| *k == K::Number)
            .map(|(_, t)| t.clone())
            .collect::<Vec<_>>(),
        ["0", "7", "12345"]
    );
}

#[test]
fn number_followed_by_identifier_splits() {
    assert_eq!(kinds("123abc\n"), [K::Number, K::Ident, K::Newline, K::Eof]);
}

#[test]
fn decimal_point_is_fatal() {
    let err = lex_err("x = 1.5\n");
    assert_eq!(err.kind, LexErrorKind::FloatNotSupported);
    assert_eq!(err.context, LexErrorContext::NumberLiteral);

    let err = lex_err("12.\n");
    assert_eq!(err.kind, LexErrorKind::FloatNotSupported);
}

#[test]
fn leading_dot_is_just_a_dot() {
    // `.5` is Dot then Number; only a dot AFTER digits is rejected.
    assert_eq!(kinds(".5\n"), [K::Dot, K::Number, K::Newline, K::Eof]);
}

#[test]
fn string_lexeme_includes_quotes() {
    assert_eq!(
        texts("s = \"hello\"\n")
            .iter()
            .find(|(k, _)| *k == K::String)
            .map(|(_, t)| t.clone()),
        Some("\"hello\"".to_owned())
    );
}

#[test]
fn empty_string_literal() {
    assert_eq!(kinds("\"\"\n"), [K::String, K::Newline, K::Eof]);
}

#[test]
fn string_allows_single_quotes_and_hash() {
    // `#` inside a string is content, not a comment.
    assert_eq!(
        kinds("\"it's #1\"\n"),
        [K::String, K::Newline, K::Eof]
    );
}

#[test]
fn unterminated_string_is_fatal() {
    let err = lex_err("\"abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.context, LexErrorContext::InsideString { start: 0 });

    let err = lex_err("x = \"abc\ny\n");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn illegal_string_characters_are_fatal() {
    for (source, found) in [
        ("\"a\\nb\"\n", '\\'),
        ("\"100%\"\n", '%'),
        ("\"a\tb\"\n", '\t'),
    ] {
        let err = lex_err(source);
        assert_eq!(
            err.kind,
            LexErrorKind::IllegalStringCharacter { found },
            "for {source:?}"
        );
    }
}

#[test]
fn carriage_return_in_string_is_fatal() {
    let err = lex_err("\"a\rb\"\n");
    assert_eq!(err.kind, LexErrorKind::IllegalStringCharacter { found: '\r' });
}

// === Identifiers & keywords ===

#[test]
fn identifier_shapes() {
    assert_eq!(
        texts("_x x9 snake_case _ CamelCase\n")
            .iter()
            .filter(|(k, _)| *k == K::Ident)
            .map(|(_, t)| t.clone())
            .collect::<Vec<_>>(),
        ["_x", "x9", "snake_case", "_", "CamelCase"]
    );
}

#[test]
fn keywords_resolve() {
    assert_eq!(
        kinds("while True:\n    pass\n"),
        [
            K::While,
            K::True,
            K::Colon,
            K::Newline,
            K::Indent,
            K::Pass,
            K::Newline,
            K::Dedent,
            K::Eof,
        ]
    );
}

#[test]
fn reserved_words_lex_as_syntax_error_tokens() {
    // The tokenizer passes them through; the grammar rejects them.
    assert_eq!(
        texts("lambda x\n"),
        [
            (K::SyntaxError, "lambda".to_owned()),
            (K::Ident, "x".to_owned()),
            (K::Newline, "\n".to_owned()),
            (K::Eof, String::new()),
        ]
    );
    assert_eq!(kinds("import y\n")[0], K::SyntaxError);
}

#[test]
fn keyword_prefixed_identifiers_are_identifiers() {
    assert_eq!(
        kinds("ifx for_ Trues\n"),
        [K::Ident, K::Ident, K::Ident, K::Newline, K::Eof]
    );
}

// === Illegal characters ===

#[test]
fn unknown_punctuation_is_fatal() {
    let err = lex_err("x = $\n");
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter { found: '$' });
    assert_eq!(err.span, Span::new(4, 5));
}

#[test]
fn non_ascii_is_fatal_outside_strings() {
    let err = lex_err("caf\u{e9}\n");
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter { found: '\u{e9}' });

    // ...but fine inside strings.
    assert_eq!(kinds("\"caf\u{e9}\"\n"), [K::String, K::Newline, K::Eof]);
}

#[test]
fn interior_null_is_fatal() {
    let err = lex_err("a\0b\n");
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter { found: '\0' });
}

// === Line endings ===

#[test]
fn crlf_line_endings_collapse() {
    assert_eq!(
        kinds("a\r\nb\r\n"),
        [K::Ident, K::Newline, K::Ident, K::Newline, K::Eof]
    );
}

#[test]
fn newline_token_carries_the_linefeed() {
    let buffer = SourceBuffer::new("a\r\n");
    let tokens = match tokenize(&buffer) {
        Ok(tokens) => tokens,
        Err(err) => panic!("unexpected error: {err}"),
    };
    assert_eq!(tokens[1].kind, K::Newline);
    assert_eq!(tokens[1].text, "\n");
    assert_eq!(tokens[1].span, Span::new(2, 3));
}

// === Terminal state ===

#[test]
fn eof_is_idempotent() {
    let buffer = SourceBuffer::new("x\n");
    let mut tokenizer = Tokenizer::new(&buffer);
    loop {
        match tokenizer.next_token() {
            Ok(token) if token.kind == K::Eof => break,
            Ok(_) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    for _ in 0..5 {
        match tokenizer.next_token() {
            Ok(token) => assert_eq!(token.kind, K::Eof),
            Err(err) => panic!("unexpected error after eof: {err}"),
        }
    }
}

#[test]
fn two_token_lookahead_consumption() {
    // The parser buffers a current and a lookahead token: two pulls at
    // construction, one per advance. Nothing else crosses the boundary.
    let buffer = SourceBuffer::new("x = 1\n");
    let mut tokenizer = Tokenizer::new(&buffer);
    let mut current = tokenizer.next_token();
    let mut lookahead = tokenizer.next_token();
    let mut seen = Vec::new();
    loop {
        let cur = match current {
            Ok(token) => token,
            Err(err) => panic!("unexpected error: {err}"),
        };
        seen.push(cur.kind);
        if cur.kind == K::Eof {
            break;
        }
        current = lookahead;
        lookahead = tokenizer.next_token();
    }
    assert_eq!(
        seen,
        [K::Ident, K::Equal, K::Number, K::Newline, K::Eof]
    );
}

// === Properties ===

mod properties {
    use proptest::prelude::*;

    use super::super::tokenize;
    use crate::token::TokenKind as K;
    use pyrite_lexer_core::SourceBuffer;

    /// Strategy: small programs assembled from tokenizable lines at varying
    /// indentation. Dedent mismatches are still possible (and filtered);
    /// nothing else can fail.
    fn program() -> impl Strategy<Value = String> {
        let line = (0u8..4, 0usize..6).prop_map(|(indent, body)| {
            let body = ["x", "x = 1", "if x:", "pass", "# note", ""][body];
            format!("{}{}", " ".repeat(usize::from(indent) * 2), body)
        });
        proptest::collection::vec(line, 0..12).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn indents_and_dedents_balance(source in program()) {
            let buffer = SourceBuffer::new(&source);
            if let Ok(tokens) = tokenize(&buffer) {
                let indents = tokens.iter().filter(|t| t.kind == K::Indent).count();
                let dedents = tokens.iter().filter(|t| t.kind == K::Dedent).count();
                prop_assert_eq!(indents, dedents, "unbalanced for {:?}", source);
            }
        }

        #[test]
        fn tokenizing_is_deterministic(source in program()) {
            let buffer_a = SourceBuffer::new(&source);
            let buffer_b = SourceBuffer::new(&source);
            let a = tokenize(&buffer_a);
            let b = tokenize(&buffer_b);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn eof_is_always_last_on_success(source in program()) {
            let buffer = SourceBuffer::new(&source);
            if let Ok(tokens) = tokenize(&buffer) {
                prop_assert_eq!(tokens.last().map(|t| t.kind), Some(K::Eof));
                prop_assert_eq!(
                    tokens.iter().filter(|t| t.kind == K::Eof).count(),
                    1
                );
            }
        }

        #[test]
        fn blank_line_runs_do_not_change_the_stream(source in program()) {
            // Doubling every newline only adds blank lines; the token
            // stream (kinds and texts) must be unchanged.
            let doubled = source.replace('\n', "\n\n");
            let buffer = SourceBuffer::new(&source);
            let buffer_doubled = SourceBuffer::new(&doubled);
            let original = tokenize(&buffer);
            let padded = tokenize(&buffer_doubled);
            match (original, padded) {
                (Ok(a), Ok(b)) => {
                    let a: Vec<_> = a.iter().map(|t| (t.kind, t.text)).collect();
                    let b: Vec<_> = b.iter().map(|t| (t.kind, t.text)).collect();
                    prop_assert_eq!(a, b);
                }
                (Err(_), Err(_)) => {}
                (a, b) => prop_assert!(false, "divergence: {:?} vs {:?}", a, b),
            }
        }
    }
}
