//! Operand widths.
//!
//! Every literal type and every width-polymorphic instruction carries one of
//! four widths. The discriminant is the literal type code stored in the magic.

use super::constants::BITS_PER_CELL;

/// Operand width: CHAR (1 byte), RED (2), INT (4), LONG (8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Width {
    Char = 1,
    Red = 2,
    Int = 3,
    Long = 4,
}

impl Width {
    pub const ALL: [Width; 4] = [Width::Char, Width::Red, Width::Int, Width::Long];

    /// Decode a literal type code (the magic shifted down by 8 bits).
    pub fn from_type_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Char),
            2 => Some(Self::Red),
            3 => Some(Self::Int),
            4 => Some(Self::Long),
            _ => None,
        }
    }

    /// Width for a byte count of 1, 2, 4 or 8.
    pub fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::Char),
            2 => Some(Self::Red),
            4 => Some(Self::Int),
            8 => Some(Self::Long),
            _ => None,
        }
    }

    #[inline]
    pub fn type_code(self) -> u8 {
        self as u8
    }

    /// Position within a width family (c/r/·/l → 0..4).
    #[inline]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    /// Size in bytes on the data stack, and in cells in the program.
    #[inline]
    pub fn bytes(self) -> usize {
        1 << (self as usize - 1)
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.bytes() as u32 * BITS_PER_CELL
    }

    /// Magic of the leading cell of a literal of this width.
    #[inline]
    pub fn magic(self) -> u16 {
        (self as u16) << 8
    }

    /// Mask of the representable values.
    #[inline]
    pub fn mask(self) -> u64 {
        match self {
            Self::Long => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }

    /// Mnemonic prefix used by width-polymorphic instructions.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Char => "c",
            Self::Red => "r",
            Self::Int => "",
            Self::Long => "l",
        }
    }

    /// Whether the top bit of `value` (interpreted at this width) is set.
    #[inline]
    pub fn is_negative(self, value: u64) -> bool {
        value & (1u64 << (self.bits() - 1)) != 0
    }
}
