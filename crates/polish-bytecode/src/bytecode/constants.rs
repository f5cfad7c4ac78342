//! Cell layout constants.

/// Size of one cell in bytes.
pub const CELL_SIZE: usize = 2;

/// Mask selecting the magic (high byte) of a cell.
pub const MASK_MAGIC: u16 = 0xFF00;

/// Mask selecting the data (low byte) of a cell.
pub const MASK_DATA: u16 = 0x00FF;

/// Magic of an instruction cell.
pub const MAGIC_INSTR: u16 = 0x0000;

/// Flag OR'd into the magic of every non-leading literal cell.
pub const MAGIC_CONT: u16 = 0x1000;

/// Data bits carried by a single cell.
pub const BITS_PER_CELL: u32 = 8;
