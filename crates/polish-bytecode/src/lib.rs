//! Bytecode format for the Polish stack machine.
//!
//! This crate contains:
//! - Cell layout and the literal codec
//! - The opcode table and mnemonics
//! - `Program` loading, decoding and the disassembly dump
//! - `Colors` shared by every crate that prints

pub mod bytecode;
pub mod colors;

// Re-export commonly used items at crate root
pub use bytecode::{
    CELL_SIZE, Cell, CodecError, DecodeError, Instruction, Literal, MAGIC_CONT, Opcode, Program,
    ProgramError, Width, dump,
};
pub use colors::Colors;
