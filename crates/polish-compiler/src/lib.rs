//! Polish assembler: turns assembly source into a bytecode `Program`.
//!
//! - `lexer` - logos tokens with spans
//! - `literal` - number prefixes and string escapes
//! - `compiler` - label resolution and cell emission
//! - `diagnostics` - error rendering against the source

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod literal;

#[cfg(test)]
mod diagnostics_tests;
#[cfg(test)]
mod lexer_tests;

pub use compiler::{CompileLimits, Compiler, compile, compile_with};
pub use diagnostics::DiagnosticsPrinter;
pub use error::{CompileError, ErrorKind, LabelLimit, LexError};
