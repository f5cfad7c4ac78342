//! A single 16-bit bytecode cell.

use super::constants::{MAGIC_CONT, MASK_DATA, MASK_MAGIC};
use super::width::Width;

/// One 16-bit little-endian unit of the bytecode stream.
///
/// The high byte is the magic: zero for instructions, a literal type code for
/// the leading cell of a literal, or a type code with [`MAGIC_CONT`] for the
/// remaining cells of that literal. The low byte is the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell(pub u16);

impl Cell {
    #[inline]
    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    #[inline]
    pub fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// An instruction cell carrying `code` in its low byte.
    #[inline]
    pub fn instruction(code: u8) -> Self {
        Self(code as u16)
    }

    #[inline]
    pub fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn magic(self) -> u16 {
        self.0 & MASK_MAGIC
    }

    #[inline]
    pub fn data(self) -> u8 {
        (self.0 & MASK_DATA) as u8
    }

    #[inline]
    pub fn is_instruction(self) -> bool {
        self.magic() == 0
    }

    #[inline]
    pub fn is_continuation(self) -> bool {
        self.magic() & MAGIC_CONT != 0
    }

    /// Width of the literal this cell starts, if it is a valid leading cell.
    pub fn literal_width(self) -> Option<Width> {
        if self.is_continuation() {
            return None;
        }
        Width::from_type_code((self.magic() >> 8) as u8)
    }
}

impl From<u16> for Cell {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
