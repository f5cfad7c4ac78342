//! Number bases shared by the assembler and the format engines.
//!
//! A base is named by one letter: `u b t q p h s o n d` are bases 1 to 10,
//! their capitals 11 to 19, and `v` is 20. Base 1 is a tally of `1`s.

/// Base letters in order, starting at base 1.
pub const BASE_LETTERS: &[u8; 20] = b"ubtqphsondUBTQPHSONv";

pub const DEFAULT_BASE: u32 = 10;

/// Base for a base letter.
pub fn base_of(letter: u8) -> Option<u32> {
    BASE_LETTERS
        .iter()
        .position(|&b| b == letter)
        .map(|i| i as u32 + 1)
}

/// Digit character for `0..20`: `0-9` then `A-J`.
pub fn digit_char(digit: u32) -> u8 {
    if digit < 10 {
        b'0' + digit as u8
    } else {
        b'A' + (digit - 10) as u8
    }
}

/// Value of a digit character in any base up to 36, case-insensitive.
pub fn digit_value(c: u8) -> Option<u32> {
    (c as char).to_digit(36)
}
