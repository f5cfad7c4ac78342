//! Errors that can occur during program execution.
//!
//! Every message starts with the canned text the CLI prints after `RUN ERR: `,
//! followed by the detail for this occurrence.

use polish_bytecode::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("Stack overflow; {size} bytes at SP {head} of {capacity}")]
    StackOverflow {
        size: usize,
        head: usize,
        capacity: usize,
    },

    #[error("Stack underflow; {size} bytes below SP {head}")]
    StackUnderflow { size: usize, head: usize },

    #[error("Invalid jump; {target} in a {len}-byte program")]
    InvalidJump { target: u64, len: usize },

    #[error("{source} at {offset}")]
    MalformedNumber { source: CodecError, offset: usize },

    #[error("Unexpected continuation bit; {cell:04X} at {offset}")]
    UnexpectedContinuation { cell: u16, offset: usize },

    #[error("Runaway string; down from SP {from}")]
    RunawayString { from: usize },

    #[error("Error reading string; {0}")]
    StringRead(String),

    #[error("Error writing string; {0}")]
    StringWrite(String),

    #[error("Invalid format string; {0}")]
    InvalidFormat(String),

    #[error("Program leaves valid memory before END; {offset} of {len}")]
    ProgramLeftValidMemory { offset: usize, len: usize },

    #[error("Invalid instruction; {byte:#04x} at {offset}")]
    InvalidInstruction { byte: u8, offset: usize },

    #[error("Division by zero; {lhs} / 0")]
    DivisionByZero { lhs: u64 },

    #[error("Nested under; at {offset}")]
    NestedUnder { offset: usize },

    #[error("Invalid handle; {0:#x}")]
    InvalidHandle(u64),

    #[error("Out of bounds; {size} bytes at +{offset} of a {len}-byte block")]
    OutOfBounds {
        offset: u64,
        size: usize,
        len: usize,
    },

    #[error("Heap exhausted; {requested} bytes requested with {live} of {limit} in use")]
    HeapExhausted {
        requested: usize,
        live: usize,
        limit: usize,
    },

    /// Step fuel exhausted.
    #[error("Execution limit exceeded; {0} steps")]
    ExecFuelExhausted(u64),
}
