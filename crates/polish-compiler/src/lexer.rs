//! Lexer for Polish assembly.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source when needed. Whitespace is dropped and consecutive unrecognized
//! characters are coalesced into a single `Garbage` token.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    /// Decimal INT literal. Letters are lexed too and rejected as digits.
    #[regex(r"[0-9][0-9a-zA-Z]*")]
    Number,

    /// `#` + base or type prefix + digits.
    #[regex(r"#[0-9a-zA-Z]*")]
    PrefixedNumber,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,

    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Mnemonic,

    /// `:name`
    #[regex(r":[a-zA-Z0-9_]*")]
    LabelDef,

    /// `@name`, or a bare `@`
    #[regex(r"@[a-zA-Z0-9_]*")]
    LabelRef,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("~")]
    Tilde,

    #[token(".")]
    Dot,

    #[token("!")]
    Bang,

    #[token("?")]
    Question,

    /// Coalesced unrecognized characters, including an unterminated string.
    Garbage,
}

/// Zero-copy token: kind + span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Tokenizes source into span-based tokens, without whitespace.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(TokenKind::Garbage, start..end));
                }
                if kind != TokenKind::Whitespace {
                    tokens.push(Token::new(kind, lexer.span()));
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(TokenKind::Garbage, start..source.len()));
                }
                break;
            }
        }
    }

    tokens
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span.clone()]
}
