//! Runtime VM for executing Polish bytecode.
//!
//! This crate provides the stack machine that executes a loaded `Program`,
//! including the format/scan engines and the heap and stream tables.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    DEFAULT_HEAP_LIMIT, DEFAULT_STACK_SIZE, ExecLimits, Heap, NoopTracer, PrintTracer,
    RuntimeError, STDERR, STDIN, STDOUT, Stack, Streams, Tracer, VM, VMBuilder,
};
