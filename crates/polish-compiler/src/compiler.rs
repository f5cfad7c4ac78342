//! Single-pass assembler: tokens in, cells out.
//!
//! Labels may be used before they are defined. A reference emits an 8-byte
//! placeholder literal that is patched once the whole source has been read.

use std::ops::Range;

use indexmap::IndexMap;
use polish_bytecode::bytecode::codec;
use polish_bytecode::{CELL_SIZE, Cell, Literal, Opcode, Program, Width};

use crate::error::{CompileError, ErrorKind, LabelLimit, LexError};
use crate::lexer::{Token, TokenKind, lex, token_text};
use crate::literal::{parse_number, unescape};

/// Resource limits for one compile.
#[derive(Clone, Copy, Debug)]
pub struct CompileLimits {
    /// Maximum number of labels (default: 32).
    pub(crate) max_labels: usize,
    /// Maximum total characters across label names (default: 512).
    pub(crate) max_label_chars: usize,
    /// Maximum program size in bytes (default: 1 MiB).
    pub(crate) max_program_size: usize,
}

impl Default for CompileLimits {
    fn default() -> Self {
        Self {
            max_labels: 32,
            max_label_chars: 512,
            max_program_size: 1 << 20,
        }
    }
}

impl CompileLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_labels(mut self, n: usize) -> Self {
        self.max_labels = n;
        self
    }

    pub fn max_label_chars(mut self, n: usize) -> Self {
        self.max_label_chars = n;
        self
    }

    pub fn max_program_size(mut self, bytes: usize) -> Self {
        self.max_program_size = bytes;
        self
    }

    pub fn get_max_labels(&self) -> usize {
        self.max_labels
    }

    pub fn get_max_label_chars(&self) -> usize {
        self.max_label_chars
    }

    pub fn get_max_program_size(&self) -> usize {
        self.max_program_size
    }
}

/// Compile with default limits.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    compile_with(source, CompileLimits::default())
}

pub fn compile_with(source: &str, limits: CompileLimits) -> Result<Program, CompileError> {
    Compiler::new(source, limits).compile()
}

/// Label reference waiting for its target.
struct Patch {
    /// Cell index of the placeholder literal.
    cell: usize,
    name: String,
    span: Range<usize>,
}

/// Assembler state for one source text.
pub struct Compiler<'s> {
    source: &'s str,
    limits: CompileLimits,
    cells: Vec<Cell>,
    /// Label name to byte offset, in definition order.
    labels: IndexMap<String, usize>,
    label_chars: usize,
    patches: Vec<Patch>,
    /// A `?` was read and applies to the next emitted unit.
    pending_cond: bool,
    has_end: bool,
}

impl<'s> Compiler<'s> {
    pub fn new(source: &'s str, limits: CompileLimits) -> Self {
        Self {
            source,
            limits,
            cells: Vec::new(),
            labels: IndexMap::new(),
            label_chars: 0,
            patches: Vec::new(),
            pending_cond: false,
            has_end: false,
        }
    }

    pub fn compile(mut self) -> Result<Program, CompileError> {
        for token in lex(self.source) {
            self.token(&token)?;
        }

        self.resolve_patches()?;

        if !self.has_end {
            let len = self.source.len();
            return Err(CompileError::new(
                ErrorKind::MissingEnd {
                    len: self.offset(),
                },
                len..len,
            ));
        }

        Ok(Program::from_cells(&self.cells))
    }

    /// Current byte offset in the program.
    fn offset(&self) -> usize {
        self.cells.len() * CELL_SIZE
    }

    fn token(&mut self, token: &Token) -> Result<(), CompileError> {
        let text = token_text(self.source, token);
        let span = token.span.clone();
        let at = |kind: ErrorKind| CompileError::new(kind, span.clone());

        match token.kind {
            TokenKind::Number | TokenKind::PrefixedNumber => {
                let lit = parse_number(text).map_err(at)?;
                self.emit_cond(&span)?;
                self.emit_literal(lit, &span)?;
            }
            TokenKind::String => {
                let bytes = unescape(&text[1..text.len() - 1]).map_err(|e| at(e.into()))?;
                self.emit_cond(&span)?;
                self.emit_literal(Literal::new(Width::Char, 0), &span)?;
                for b in bytes {
                    self.emit_literal(Literal::new(Width::Char, b as u64), &span)?;
                }
            }
            TokenKind::Mnemonic => {
                let op = Opcode::from_mnemonic(text)
                    .ok_or_else(|| at(ErrorKind::UnknownInstruction(text.to_string())))?;
                self.emit_op(op, &span)?;
            }
            TokenKind::Plus => self.emit_op(Opcode::Add(Width::Int), &span)?,
            TokenKind::Minus => self.emit_op(Opcode::Sub(Width::Int), &span)?,
            TokenKind::Star => self.emit_op(Opcode::Mul(Width::Int), &span)?,
            TokenKind::Slash => self.emit_op(Opcode::Div(Width::Int), &span)?,
            TokenKind::Tilde => self.emit_op(Opcode::Und(Width::Int), &span)?,
            TokenKind::Dot => self.emit_op(Opcode::Drp(Width::Int), &span)?,
            TokenKind::Bang => self.emit_op(Opcode::Not, &span)?,
            TokenKind::Question => self.pending_cond = true,
            TokenKind::LabelDef => {
                let name = &text[1..];
                if name.is_empty() {
                    return Err(at(LexError::EmptyLabel.into()));
                }
                self.define_label(name, &span)?;
            }
            TokenKind::LabelRef => {
                let name = &text[1..];
                if name.is_empty() {
                    self.emit_op(Opcode::Cpp, &span)?;
                } else {
                    self.jump_to(name, &span)?;
                }
            }
            TokenKind::Garbage if text.starts_with('"') => {
                return Err(at(LexError::UnterminatedString.into()));
            }
            TokenKind::Garbage => {
                return Err(at(LexError::InvalidToken(text.to_string()).into()));
            }
            TokenKind::Whitespace => {}
        }
        Ok(())
    }

    fn push_cells(&mut self, cells: &[Cell], span: &Range<usize>) -> Result<(), CompileError> {
        let size = self.offset() + cells.len() * CELL_SIZE;
        let limit = self.limits.max_program_size;
        if size > limit {
            return Err(CompileError::new(
                ErrorKind::ProgramTooLarge { size, limit },
                span.clone(),
            ));
        }
        self.cells.extend_from_slice(cells);
        Ok(())
    }

    fn emit_literal(&mut self, lit: Literal, span: &Range<usize>) -> Result<(), CompileError> {
        let cells = encode(lit, span)?;
        self.push_cells(&cells, span)
    }

    fn emit_op(&mut self, op: Opcode, span: &Range<usize>) -> Result<(), CompileError> {
        self.emit_cond(span)?;
        if op == Opcode::End {
            self.has_end = true;
        }
        self.push_cells(&[Cell::instruction(op.to_byte())], span)
    }

    /// Flush a pending `?` in front of the next unit.
    fn emit_cond(&mut self, span: &Range<usize>) -> Result<(), CompileError> {
        if !std::mem::take(&mut self.pending_cond) {
            return Ok(());
        }
        self.push_cells(&[Cell::instruction(Opcode::Cond.to_byte())], span)
    }

    fn define_label(&mut self, name: &str, span: &Range<usize>) -> Result<(), CompileError> {
        if let Some(&offset) = self.labels.get(name) {
            return Err(CompileError::new(
                ErrorKind::DuplicateLabel {
                    name: name.to_string(),
                    offset,
                },
                span.clone(),
            ));
        }

        let limit = if self.labels.len() >= self.limits.max_labels {
            Some(LabelLimit::Count(self.limits.max_labels))
        } else if self.label_chars + name.len() > self.limits.max_label_chars {
            Some(LabelLimit::Chars(self.limits.max_label_chars))
        } else {
            None
        };
        if let Some(limit) = limit {
            return Err(CompileError::new(
                ErrorKind::LabelStorageOverflow {
                    name: name.to_string(),
                    limit,
                },
                span.clone(),
            ));
        }

        self.label_chars += name.len();
        let offset = self.offset();
        self.labels.insert(name.to_string(), offset);
        Ok(())
    }

    /// `@name`: push the target and jump. A pending `?` guards only the jump,
    /// so the target is parked with `lund` and dropped when not taken.
    fn jump_to(&mut self, name: &str, span: &Range<usize>) -> Result<(), CompileError> {
        let target = self.labels.get(name).copied();
        if target.is_none() {
            self.patches.push(Patch {
                cell: self.cells.len(),
                name: name.to_string(),
                span: span.clone(),
            });
        }
        let lit = Literal::new(Width::Long, target.unwrap_or(0) as u64);
        self.emit_literal(lit, span)?;

        if !self.pending_cond {
            return self.emit_op(Opcode::Jmp, span);
        }
        self.pending_cond = false;
        for op in [
            Opcode::Und(Width::Long),
            Opcode::Cond,
            Opcode::Jmp,
            Opcode::Drp(Width::Long),
        ] {
            self.push_cells(&[Cell::instruction(op.to_byte())], span)?;
        }
        Ok(())
    }

    fn resolve_patches(&mut self) -> Result<(), CompileError> {
        for patch in std::mem::take(&mut self.patches) {
            let Some(&offset) = self.labels.get(&patch.name) else {
                return Err(CompileError::new(
                    ErrorKind::UndefinedLabel(patch.name),
                    patch.span,
                ));
            };
            let cells = encode(Literal::new(Width::Long, offset as u64), &patch.span)?;
            self.cells[patch.cell..patch.cell + cells.len()].copy_from_slice(&cells);
        }
        Ok(())
    }
}

fn encode(lit: Literal, span: &Range<usize>) -> Result<Vec<Cell>, CompileError> {
    codec::encode(lit.value, lit.width).map_err(|_| {
        CompileError::new(
            ErrorKind::NumberTooLarge {
                text: lit.value.to_string(),
                bits: lit.width.bits(),
            },
            span.clone(),
        )
    })
}
