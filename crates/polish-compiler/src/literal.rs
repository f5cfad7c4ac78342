//! Number and string literal parsing.
//!
//! Number syntax:
//!
//! ```text
//! 123          INT, base 10
//! #H7F         INT, base letter
//! #c65  #LH10  type letter (any case), optional base letter
//! #u111        base 1: the value is the count of `1`s
//! ```

use polish_bytecode::bytecode::{base_of, digit_value};
use polish_bytecode::{Literal, Width};

use crate::error::{ErrorKind, LexError};

fn width_of(letter: u8) -> Option<Width> {
    match letter.to_ascii_lowercase() {
        b'c' => Some(Width::Char),
        b'r' => Some(Width::Red),
        b'i' => Some(Width::Int),
        b'l' => Some(Width::Long),
        _ => None,
    }
}

/// Parse a `Number` or `PrefixedNumber` token.
pub fn parse_number(text: &str) -> Result<Literal, ErrorKind> {
    let (width, base, digits) = match text.strip_prefix('#') {
        Some(rest) => split_prefix(text, rest)?,
        None => (Width::Int, 10, text),
    };

    let value = parse_digits(digits, base).map_err(|e| match e {
        DigitsError::Lex(e) => ErrorKind::Lex(e),
        DigitsError::Overflow => ErrorKind::NumberTooLarge {
            text: text.to_string(),
            bits: width.bits(),
        },
    })?;

    if value & !width.mask() != 0 {
        return Err(ErrorKind::NumberTooLarge {
            text: text.to_string(),
            bits: width.bits(),
        });
    }
    Ok(Literal::new(width, value))
}

/// Split `rest` (the text after `#`) into width, base and digits.
fn split_prefix<'t>(text: &str, rest: &'t str) -> Result<(Width, u32, &'t str), LexError> {
    let invalid = || LexError::InvalidNumberPrefix(text.to_string());
    let bytes = rest.as_bytes();
    let Some(&first) = bytes.first() else {
        return Err(invalid());
    };

    if first.is_ascii_digit() {
        return Ok((Width::Int, 10, rest));
    }
    if let Some(base) = base_of(first) {
        return Ok((Width::Int, base, &rest[1..]));
    }
    let width = width_of(first).ok_or_else(invalid)?;

    match bytes.get(1) {
        Some(d) if d.is_ascii_digit() => Ok((width, 10, &rest[1..])),
        Some(&b) => base_of(b)
            .map(|base| (width, base, &rest[2..]))
            .ok_or_else(invalid),
        None => Err(invalid()),
    }
}

enum DigitsError {
    Lex(LexError),
    Overflow,
}

fn parse_digits(digits: &str, base: u32) -> Result<u64, DigitsError> {
    if digits.is_empty() && base != 1 {
        return Err(DigitsError::Lex(LexError::MissingDigits));
    }

    let mut value: u64 = 0;
    for c in digits.bytes() {
        let digit = if base == 1 {
            (c == b'1').then_some(1)
        } else {
            digit_value(c).filter(|&d| d < base)
        };
        let Some(digit) = digit else {
            return Err(DigitsError::Lex(LexError::InvalidDigit {
                digit: c as char,
                base,
            }));
        };
        value = if base == 1 {
            value.checked_add(1)
        } else {
            value
                .checked_mul(base as u64)
                .and_then(|v| v.checked_add(digit as u64))
        }
        .ok_or(DigitsError::Overflow)?;
    }
    Ok(value)
}

/// Decode the body of a string literal (without its quotes).
pub fn unescape(body: &str) -> Result<Vec<u8>, LexError> {
    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let escaped = match chars.next() {
            Some('n') => b'\n',
            Some('t') => b'\t',
            Some('"') => b'"',
            Some('\\') => b'\\',
            Some('0') => 0,
            Some('a') => 0x07,
            Some('b') => 0x08,
            Some('r') => b'\r',
            Some('v') => 0x0B,
            Some(other) => return Err(LexError::BadEscape(other)),
            None => return Err(LexError::UnterminatedString),
        };
        out.push(escaped);
    }

    Ok(out)
}
