//! Human-readable program listing.
//!
//! One line per decoded unit: byte offset, assembler text, then the raw cells
//! (dimmed). Literals use the assembler's `#` prefixes, except printable CHAR
//! values which show as quoted characters.

use std::fmt::Write as _;

use crate::Colors;

use super::codec::Literal;
use super::constants::CELL_SIZE;
use super::program::{Instruction, Program};
use super::width::Width;

/// Column width reserved for the instruction text.
const TEXT_COLUMN: usize = 12;

/// Generate a listing of the whole program.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    let c = &colors;
    let offset_width = width_for_offset(program.len());

    for (offset, decoded) in program.iter() {
        let (text, size) = match &decoded {
            Ok(instr @ Instruction::Literal(_)) => (
                format!("{}{}{}", c.green, format_instruction(instr), c.reset),
                instr.size(),
            ),
            Ok(instr) => (
                format!("{}{}{}", c.blue, format_instruction(instr), c.reset),
                instr.size(),
            ),
            Err(e) => (format!("{}?? {e}{}", c.red, c.reset), CELL_SIZE),
        };
        let raw = format_cells(program, offset, size);
        let pad = TEXT_COLUMN.saturating_sub(visible_len(&text));
        writeln!(
            out,
            "{offset:0offset_width$}  {text}{:pad$}  {}{raw}{}",
            "", c.dim, c.reset
        )
        .unwrap();
    }

    out
}

/// Assembler text of one decoded unit.
pub fn format_instruction(instr: &Instruction) -> String {
    match instr {
        Instruction::Literal(lit) => format_literal(lit),
        Instruction::Op(op) => op.mnemonic(),
        Instruction::Unknown(byte) => format!("<unknown {byte:#04x}>"),
    }
}

/// Literal in assembler syntax. Printable CHAR values render quoted.
pub fn format_literal(lit: &Literal) -> String {
    match lit.width {
        Width::Char => match printable(lit.value) {
            Some(ch) => format!("'{ch}'"),
            None => format!("#c{}", lit.value),
        },
        Width::Red => format!("#r{}", lit.value),
        Width::Int => lit.value.to_string(),
        Width::Long => format!("#l{}", lit.value),
    }
}

fn format_cells(program: &Program, offset: usize, size: usize) -> String {
    (0..size / CELL_SIZE)
        .filter_map(|i| program.cell(offset + i * CELL_SIZE))
        .map(|cell| format!("{:04X}", cell.raw()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Digits needed for the largest offset in a program of `len` bytes.
fn width_for_offset(len: usize) -> usize {
    len.saturating_sub(1).max(1).to_string().len().max(4)
}

/// Length of `text` without ANSI escape sequences.
fn visible_len(text: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for ch in text.chars() {
        match ch {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if in_escape => {}
            _ => len += 1,
        }
    }
    len
}

fn printable(value: u64) -> Option<char> {
    u8::try_from(value)
        .ok()
        .filter(|b| b.is_ascii_graphic() && *b != b'\'')
        .map(char::from)
}
