//! Lexer for `sfmt`/`sscn` format strings.
//!
//! Grammar of a directive after `%`:
//!
//! ```text
//! [+] [0][digits] ( s | (c|r|i|l|C|R|I|L) [base] )
//! ```
//!
//! Lowercase type letters are unsigned, uppercase signed. A leading `0` on the
//! width selects zero padding. `%%` is a literal percent sign.

use std::ops::Range;

use polish_bytecode::Width;
use polish_bytecode::bytecode::{DEFAULT_BASE, base_of};

use super::error::RuntimeError;

/// Sign handling of a numeric directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    /// `c r i l`
    Unsigned,
    /// `C R I L`
    Signed,
    /// `+c`, `+r`, ...: always shows `+`.
    UnsignedShow,
    /// `+C`, `+R`, ...: shows `+` or `-`.
    SignedShow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Str,
    Num { width: Width, sign: Sign, base: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: Kind,
    /// Declared field width.
    pub width: Option<usize>,
    pub zero_pad: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A byte copied or matched as is (`%%` yields `b'%'`).
    Literal(u8),
    Directive(Directive),
}

/// Iterator over the tokens of a format string, with their byte spans.
#[derive(Clone)]
pub struct FormatLexer<'f> {
    fmt: &'f [u8],
    pos: usize,
}

impl<'f> FormatLexer<'f> {
    pub fn new(fmt: &'f [u8]) -> Self {
        Self { fmt, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.fmt.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn invalid(&self, start: usize) -> RuntimeError {
        let text = String::from_utf8_lossy(&self.fmt[start..self.pos]);
        RuntimeError::InvalidFormat(format!("`{text}` at {start}"))
    }

    fn directive(&mut self, start: usize) -> Result<Directive, RuntimeError> {
        let show = self.peek() == Some(b'+');
        if show {
            self.pos += 1;
        }

        let zero_pad = self.peek() == Some(b'0');
        let mut width = None;
        while let Some(d @ b'0'..=b'9') = self.peek() {
            self.pos += 1;
            let w: usize = width.unwrap_or(0);
            width = Some(w.saturating_mul(10).saturating_add((d - b'0') as usize));
        }

        let Some(letter) = self.bump() else {
            return Err(self.invalid(start));
        };
        if letter == b's' {
            return Ok(Directive {
                kind: Kind::Str,
                width,
                zero_pad,
            });
        }

        let width_of = match letter.to_ascii_lowercase() {
            b'c' => Width::Char,
            b'r' => Width::Red,
            b'i' => Width::Int,
            b'l' => Width::Long,
            _ => return Err(self.invalid(start)),
        };
        let sign = match (letter.is_ascii_uppercase(), show) {
            (false, false) => Sign::Unsigned,
            (true, false) => Sign::Signed,
            (false, true) => Sign::UnsignedShow,
            (true, true) => Sign::SignedShow,
        };
        let base = match self.peek().and_then(base_of) {
            Some(base) => {
                self.pos += 1;
                base
            }
            None => DEFAULT_BASE,
        };

        Ok(Directive {
            kind: Kind::Num {
                width: width_of,
                sign,
                base,
            },
            width,
            zero_pad,
        })
    }
}

impl Iterator for FormatLexer<'_> {
    type Item = Result<(Range<usize>, Token), RuntimeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let c = self.bump()?;
        if c != b'%' {
            return Some(Ok((start..self.pos, Token::Literal(c))));
        }
        if self.peek() == Some(b'%') {
            self.pos += 1;
            return Some(Ok((start..self.pos, Token::Literal(b'%'))));
        }
        Some(
            self.directive(start)
                .map(|d| (start..self.pos, Token::Directive(d))),
        )
    }
}
