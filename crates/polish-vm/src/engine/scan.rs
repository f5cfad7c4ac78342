//! `sscn`: scanf-like parsing of a subject string.
//!
//! Pops a format string and the subject string beneath it, and leaves the
//! decoded values where the subject started. Scanning stops quietly at the
//! first mismatch: whatever was decoded up to that point is kept.

use polish_bytecode::Width;
use polish_bytecode::bytecode::digit_value;

use super::directive::{Directive, FormatLexer, Kind, Sign, Token};
use super::error::RuntimeError;
use super::stack::Stack;

pub fn sscn(stack: &mut Stack) -> Result<(), RuntimeError> {
    let (fmt_nul, fmt) = stack.string_at(0)?;
    let fmt = fmt.to_vec();
    let (subject_nul, subject) = stack.string_at(stack.head() - fmt_nul)?;
    let subject = subject.to_vec();

    let values = scan(&subject, &fmt)?;
    stack.splice(subject_nul, &values)
}

/// Decode `subject` against `fmt`, returning the packed little-endian values.
pub fn scan(subject: &[u8], fmt: &[u8]) -> Result<Vec<u8>, RuntimeError> {
    let tokens = FormatLexer::new(fmt)
        .map(|t| t.map(|(_, token)| token))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = Vec::new();
    let mut pos = 0;

    for (i, token) in tokens.iter().enumerate() {
        let rest = &subject[pos..];
        let consumed = match *token {
            Token::Literal(b' ') => rest
                .iter()
                .position(|c| !c.is_ascii_whitespace())
                .unwrap_or(rest.len()),
            Token::Literal(b) if rest.first() == Some(&b) => 1,
            Token::Literal(_) => break,
            Token::Directive(d) => match d.kind {
                Kind::Num { width, sign, base } => {
                    let Some((value, used)) = scan_number(rest, width, sign, base, &d) else {
                        break;
                    };
                    out.extend_from_slice(&value.to_le_bytes()[..width.bytes()]);
                    used
                }
                Kind::Str => {
                    let len = match d.width {
                        Some(w) if w > rest.len() => break,
                        Some(w) => w,
                        None => string_len(rest, tokens.get(i + 1)),
                    };
                    out.extend_from_slice(&rest[..len]);
                    len
                }
            },
        };
        pos += consumed;
    }

    Ok(out)
}

/// Bytes an unbounded `%s` takes: up to the next literal of the format.
fn string_len(rest: &[u8], next: Option<&Token>) -> usize {
    let end = match next {
        Some(Token::Literal(b' ')) => rest.iter().position(u8::is_ascii_whitespace),
        Some(Token::Literal(b)) => rest.iter().position(|c| c == b),
        _ => None,
    };
    end.unwrap_or(rest.len())
}

/// Parse one number at the start of `input`: `(value, bytes used)`.
pub fn scan_number(
    input: &[u8],
    width: Width,
    sign: Sign,
    base: u32,
    d: &Directive,
) -> Option<(u64, usize)> {
    let field = match d.width {
        Some(w) if w > input.len() => return None,
        Some(w) => &input[..w],
        None => input,
    };
    let mut pos = 0;
    let at = |pos: usize| field.get(pos).copied();

    // Space padding sits before the sign, zero padding after it.
    if !d.zero_pad {
        while at(pos) == Some(b' ') {
            pos += 1;
        }
    }

    let mut negative = false;
    match (sign, at(pos)) {
        (Sign::Signed | Sign::SignedShow, Some(b'-')) => {
            negative = true;
            pos += 1;
        }
        (Sign::SignedShow | Sign::UnsignedShow, Some(b'+')) => pos += 1,
        (Sign::SignedShow | Sign::UnsignedShow, _) => return None,
        _ => {}
    }

    let pad_start = pos;
    if d.zero_pad {
        while at(pos) == Some(b'0') {
            pos += 1;
        }
    }
    let padded = pos > pad_start;

    let mut value: u64 = 0;
    let digits_start = pos;
    if base == 1 {
        while at(pos) == Some(b'1') {
            value = value.wrapping_add(1);
            pos += 1;
        }
    } else {
        while let Some(digit) = at(pos).and_then(digit_value).filter(|&v| v < base) {
            value = value.wrapping_mul(base as u64).wrapping_add(digit as u64);
            pos += 1;
        }
        if pos == digits_start && !padded {
            return None;
        }
    }

    if d.width.is_some() && pos != field.len() {
        return None;
    }
    if negative {
        value = value.wrapping_neg();
    }
    Some((value & width.mask(), pos))
}
