//! Loaded program image.
//!
//! A `.pbc` file is a flat run of cells with no header: its byte length is the
//! addressable program size and execution starts at offset 0. All addresses
//! are byte offsets; valid instruction addresses are even.

use super::cell::Cell;
use super::codec::{self, CodecError, Literal};
use super::constants::CELL_SIZE;
use super::opcode::Opcode;

/// Error loading a program image.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("bytecode length {0} is not a whole number of cells")]
    OddLength(usize),
}

/// Error decoding the instruction at an offset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("offset {offset} is outside the program ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("continuation cell {cell:04X} @ {offset}")]
    UnexpectedContinuation { cell: u16, offset: usize },

    #[error("{source} @ {offset}")]
    Number { source: CodecError, offset: usize },
}

/// One decoded program unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Literal(Literal),
    Op(Opcode),
    /// Instruction cell whose code is not in the opcode table.
    Unknown(u8),
}

impl Instruction {
    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Literal(lit) => lit.width.bytes() * CELL_SIZE,
            Self::Op(_) | Self::Unknown(_) => CELL_SIZE,
        }
    }
}

/// Immutable program image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Load a program from raw file contents.
    pub fn load(bytes: Vec<u8>) -> Result<Self, ProgramError> {
        if bytes.len() % CELL_SIZE != 0 {
            return Err(ProgramError::OddLength(bytes.len()));
        }
        Ok(Self { bytes })
    }

    pub fn from_cells(cells: &[Cell]) -> Self {
        let bytes = cells.iter().flat_map(|c| c.to_le_bytes()).collect();
        Self { bytes }
    }

    /// Size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.bytes.len() / CELL_SIZE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cell at a byte offset, if the whole cell lies within the program.
    pub fn cell(&self, offset: usize) -> Option<Cell> {
        let bytes = self.bytes.get(offset..offset.checked_add(CELL_SIZE)?)?;
        Some(Cell::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Cells from `offset` (inclusive), at most `count` of them.
    fn cells_from(&self, offset: usize, count: usize) -> Vec<Cell> {
        (0..count)
            .map_while(|i| self.cell(offset + i * CELL_SIZE))
            .collect()
    }

    /// Decode the instruction starting at `offset`.
    pub fn decode(&self, offset: usize) -> Result<Instruction, DecodeError> {
        let cell = self.cell(offset).ok_or(DecodeError::OutOfBounds {
            offset,
            len: self.len(),
        })?;

        if cell.is_continuation() {
            return Err(DecodeError::UnexpectedContinuation {
                cell: cell.raw(),
                offset,
            });
        }

        if cell.is_instruction() {
            let byte = cell.data();
            return Ok(match Opcode::from_byte(byte) {
                Some(op) => Instruction::Op(op),
                None => Instruction::Unknown(byte),
            });
        }

        let needed = cell
            .literal_width()
            .map_or(1, |w| w.bytes());
        codec::decode(&self.cells_from(offset, needed))
            .map(Instruction::Literal)
            .map_err(|source| DecodeError::Number { source, offset })
    }

    /// Walk the program front to back, one decoded unit at a time.
    ///
    /// Undecodable cells are yielded as errors and skipped one cell at a time.
    pub fn iter(&self) -> ProgramIter<'_> {
        ProgramIter {
            program: self,
            offset: 0,
        }
    }
}

/// Iterator over `(offset, decoded)` pairs. See [`Program::iter`].
pub struct ProgramIter<'p> {
    program: &'p Program,
    offset: usize,
}

impl Iterator for ProgramIter<'_> {
    type Item = (usize, Result<Instruction, DecodeError>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset + CELL_SIZE > self.program.len() {
            return None;
        }
        let offset = self.offset;
        let decoded = self.program.decode(offset);
        self.offset += match &decoded {
            Ok(instr) => instr.size(),
            Err(_) => CELL_SIZE,
        };
        Some((offset, decoded))
    }
}
