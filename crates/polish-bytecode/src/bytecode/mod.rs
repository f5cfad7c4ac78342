//! Bytecode format: cells, literals, opcodes and whole programs.

mod cell;
pub mod codec;
mod constants;
mod dump;
mod opcode;
mod program;
pub mod radix;
mod width;

pub use cell::Cell;
pub use codec::{CodecError, Literal};
pub use constants::{BITS_PER_CELL, CELL_SIZE, MAGIC_CONT, MAGIC_INSTR, MASK_DATA, MASK_MAGIC};
pub use dump::{dump, format_instruction, format_literal};
pub use opcode::Opcode;
pub use program::{DecodeError, Instruction, Program, ProgramError, ProgramIter};
pub use radix::{DEFAULT_BASE, base_of, digit_char, digit_value};
pub use width::Width;

#[cfg(test)]
mod program_tests;
#[cfg(test)]
mod radix_tests;
