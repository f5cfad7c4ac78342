//! Runtime engine for executing Polish bytecode.
//!
//! The VM runs a program against a fixed-size byte stack, with heap blocks
//! and file streams reachable through opaque handles.

mod arith;
mod directive;
mod error;
mod format;
mod heap;
mod scan;
mod stack;
mod streams;
mod strings;
mod trace;
mod vm;

#[cfg(test)]
mod arith_tests;
#[cfg(test)]
mod format_tests;
#[cfg(test)]
mod heap_tests;
#[cfg(test)]
mod stack_tests;
#[cfg(test)]
mod strings_tests;
#[cfg(test)]
mod test_utils;

pub use arith::BinaryOp;
pub use error::RuntimeError;
pub use format::sfmt;
pub use heap::{DEFAULT_HEAP_LIMIT, Heap};
pub use scan::sscn;
pub use stack::{DEFAULT_STACK_SIZE, Stack};
pub use streams::{OpenMode, STDERR, STDIN, STDOUT, STREAM_TAG, Streams};
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use vm::{ExecLimits, VM, VMBuilder};
