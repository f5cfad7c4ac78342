//! `sfmt`: printf-like rendering in place.
//!
//! The format string on top of the stack is rewritten directive by directive:
//! each directive's text is replaced by its rendering, shifting the rest of
//! the format up or down with [`Stack::relocate`]. Operands are read from
//! beneath the format string, nearest first. When the whole format is
//! rendered, the result string slides down over the consumed operands.

use polish_bytecode::Width;
use polish_bytecode::bytecode::digit_char;

use super::directive::{Directive, FormatLexer, Kind, Sign, Token};
use super::error::RuntimeError;
use super::stack::{Stack, read_le};

pub fn sfmt(stack: &mut Stack) -> Result<(), RuntimeError> {
    let (nul, fmt) = stack.string_at(0)?;
    let fmt = fmt.to_vec();

    // Lowest byte of the operands consumed so far.
    let mut floor = nul;
    // Where the next token's rendering goes; the unrendered format follows.
    let mut out = nul + 1;

    for token in FormatLexer::new(&fmt) {
        let (span, token) = token?;
        let rendered = match token {
            Token::Literal(_) if span.len() == 1 => {
                out += 1;
                continue;
            }
            Token::Literal(b) => vec![b],
            Token::Directive(d) => match d.kind {
                Kind::Num { width, sign, base } => {
                    floor = floor
                        .checked_sub(width.bytes())
                        .ok_or(RuntimeError::StackUnderflow {
                            size: width.bytes(),
                            head: floor,
                        })?;
                    let value = read_le(stack.read_at(floor, width.bytes()));
                    let (_, magnitude) = split_sign(value, width, sign);
                    let room = (stack.free() + span.len()) as u64;
                    if base == 1 && magnitude > room {
                        return Err(RuntimeError::StackOverflow {
                            size: usize::try_from(magnitude).unwrap_or(usize::MAX),
                            head: stack.head(),
                            capacity: stack.capacity(),
                        });
                    }
                    render_number(value, width, sign, base, &d)
                }
                Kind::Str => {
                    let (str_nul, chars) = stack.string_at(stack.head() - floor)?;
                    let rendered = render_string(chars, &d);
                    floor = str_nul;
                    rendered
                }
            },
        };
        stack.relocate(out + span.len(), out + rendered.len())?;
        stack.write_at(out, &rendered);
        out += rendered.len();
    }

    stack.relocate(nul, floor)
}

/// Text of one numeric directive.
pub fn render_number(value: u64, width: Width, sign: Sign, base: u32, d: &Directive) -> Vec<u8> {
    let (prefix, abs) = split_sign(value, width, sign);

    let digits = if base == 1 {
        vec![b'1'; abs as usize]
    } else {
        to_digits(abs, base)
    };

    let len = digits.len() + prefix.is_some() as usize;
    let pad = d.width.unwrap_or(0).saturating_sub(len);
    let mut text = Vec::with_capacity(len + pad);
    // Zeros go between sign and digits, the layout `sscn` reads back.
    if d.zero_pad {
        text.extend(prefix);
        text.extend(std::iter::repeat_n(b'0', pad));
    } else {
        text.extend(std::iter::repeat_n(b' ', pad));
        text.extend(prefix);
    }
    text.extend(digits);
    text
}

/// Sign prefix and magnitude of `value` read at `width`.
pub fn split_sign(value: u64, width: Width, sign: Sign) -> (Option<u8>, u64) {
    let value = value & width.mask();
    match sign {
        Sign::Unsigned => (None, value),
        Sign::UnsignedShow => (Some(b'+'), value),
        Sign::Signed | Sign::SignedShow if width.is_negative(value) => {
            (Some(b'-'), value.wrapping_neg() & width.mask())
        }
        Sign::Signed => (None, value),
        Sign::SignedShow => (Some(b'+'), value),
    }
}

/// Text of one string directive: right-justified to the declared width.
pub fn render_string(chars: &[u8], d: &Directive) -> Vec<u8> {
    let pad = d.width.unwrap_or(0).saturating_sub(chars.len());
    let mut text = Vec::with_capacity(chars.len() + pad);
    text.extend(std::iter::repeat_n(b' ', pad));
    text.extend_from_slice(chars);
    text
}

fn to_digits(mut value: u64, base: u32) -> Vec<u8> {
    let base = base as u64;
    let mut digits = Vec::new();
    loop {
        digits.push(digit_char((value % base) as u32));
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}
