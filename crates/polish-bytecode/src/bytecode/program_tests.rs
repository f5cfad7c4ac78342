use super::cell::Cell;
use super::codec::{CodecError, Literal, encode};
use super::opcode::Opcode;
use super::program::{DecodeError, Instruction, Program, ProgramError};
use super::width::Width;

fn build(parts: &[Instruction]) -> Program {
    let mut cells = Vec::new();
    for part in parts {
        match part {
            Instruction::Literal(lit) => cells.extend(encode(lit.value, lit.width).unwrap()),
            Instruction::Op(op) => cells.push(Cell::instruction(op.to_byte())),
            Instruction::Unknown(b) => cells.push(Cell::instruction(*b)),
        }
    }
    Program::from_cells(&cells)
}

#[test]
fn load_rejects_odd_length() {
    assert_eq!(
        Program::load(vec![0x05, 0x03, 0x00]),
        Err(ProgramError::OddLength(3))
    );
}

#[test]
fn load_accepts_empty() {
    let program = Program::load(Vec::new()).unwrap();

    assert!(program.is_empty());
    assert_eq!(program.iter().count(), 0);
}

#[test]
fn cells_are_little_endian() {
    let program = Program::load(vec![0x05, 0x03, 0xB1, 0x00]).unwrap();

    assert_eq!(program.cell(0), Some(Cell(0x0305)));
    assert_eq!(program.cell(2), Some(Cell(0x00B1)));
    assert_eq!(program.cell(4), None);
    assert_eq!(program.cell_count(), 2);
}

#[test]
fn decode_literals_and_ops() {
    let program = build(&[
        Instruction::Literal(Literal::new(Width::Int, 5)),
        Instruction::Op(Opcode::End),
    ]);

    assert_eq!(
        program.decode(0),
        Ok(Instruction::Literal(Literal::new(Width::Int, 5)))
    );
    assert_eq!(program.decode(8), Ok(Instruction::Op(Opcode::End)));
    assert_eq!(
        program.decode(10),
        Err(DecodeError::OutOfBounds { offset: 10, len: 10 })
    );
}

#[test]
fn decode_reports_continuation_and_unknown() {
    let program = build(&[
        Instruction::Literal(Literal::new(Width::Red, 1)),
        Instruction::Unknown(0),
    ]);

    assert_eq!(
        program.decode(2),
        Err(DecodeError::UnexpectedContinuation {
            cell: 0x1200,
            offset: 2
        })
    );
    assert_eq!(program.decode(4), Ok(Instruction::Unknown(0)));
}

#[test]
fn decode_reports_literal_cut_off_by_program_end() {
    let program = Program::from_cells(&[Cell(0x0301), Cell(0x1300)]);

    assert_eq!(
        program.decode(0),
        Err(DecodeError::Number {
            source: CodecError::Truncated {
                available: 2,
                needed: 4
            },
            offset: 0,
        })
    );
}

#[test]
fn iter_advances_by_instruction_size() {
    let program = build(&[
        Instruction::Literal(Literal::new(Width::Long, 1)),
        Instruction::Literal(Literal::new(Width::Char, 2)),
        Instruction::Op(Opcode::Jmp),
    ]);

    let offsets: Vec<usize> = program.iter().map(|(offset, _)| offset).collect();

    assert_eq!(offsets, [0, 16, 18]);
}

#[test]
fn iter_steps_over_bad_cells() {
    let program = Program::from_cells(&[Cell(0x1300), Cell(0x00B1)]);

    let items: Vec<_> = program.iter().collect();

    assert_eq!(items.len(), 2);
    assert!(items[0].1.is_err());
    assert_eq!(items[1], (2, Ok(Instruction::Op(Opcode::End))));
}
