//! Multi-cell integer literals.
//!
//! A literal of width W is W cells, least significant byte first. The leading
//! cell carries the type magic, each following cell the same magic OR'd with
//! [`MAGIC_CONT`].

use super::cell::Cell;
use super::constants::{BITS_PER_CELL, MAGIC_CONT};
use super::width::Width;

/// A decoded literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Literal {
    pub width: Width,
    pub value: u64,
}

impl Literal {
    pub fn new(width: Width, value: u64) -> Self {
        Self { width, value }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Overlarge number for type; {value} >= 2^{bits}")]
    NumberTooLarge { value: u64, bits: u32 },

    #[error("Malformed number; {found:04X} @ +{index} ({expected:04X})")]
    MalformedNumber {
        found: u16,
        index: usize,
        expected: u16,
    },

    #[error("Malformed number; {available} of {needed} cells present")]
    Truncated { available: usize, needed: usize },

    #[error("Malformed number; {0:04X} does not start a literal")]
    NotALiteral(u16),
}

/// Encode `value` as `width` cells.
pub fn encode(value: u64, width: Width) -> Result<Vec<Cell>, CodecError> {
    if value & !width.mask() != 0 {
        return Err(CodecError::NumberTooLarge {
            value,
            bits: width.bits(),
        });
    }

    let magic = width.magic();
    let cells = (0..width.bytes())
        .map(|i| {
            let byte = ((value >> (BITS_PER_CELL as usize * i)) & 0xFF) as u16;
            let magic = if i == 0 { magic } else { magic | MAGIC_CONT };
            Cell(magic | byte)
        })
        .collect();
    Ok(cells)
}

/// Decode the literal starting at `cells[0]`.
///
/// Only the cells belonging to the literal are read; trailing cells are
/// ignored.
pub fn decode(cells: &[Cell]) -> Result<Literal, CodecError> {
    let Some(&head) = cells.first() else {
        return Err(CodecError::Truncated {
            available: 0,
            needed: 1,
        });
    };
    let width = head
        .literal_width()
        .ok_or(CodecError::NotALiteral(head.raw()))?;

    let needed = width.bytes();
    if cells.len() < needed {
        return Err(CodecError::Truncated {
            available: cells.len(),
            needed,
        });
    }

    let expected = width.magic() | MAGIC_CONT;
    let mut value = head.data() as u64;
    for (index, cell) in cells.iter().enumerate().take(needed).skip(1) {
        if cell.magic() != expected {
            return Err(CodecError::MalformedNumber {
                found: cell.magic(),
                index,
                expected,
            });
        }
        value |= (cell.data() as u64) << (BITS_PER_CELL as usize * index);
    }

    Ok(Literal { width, value })
}
