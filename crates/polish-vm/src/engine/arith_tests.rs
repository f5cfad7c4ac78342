use polish_bytecode::Width;

use super::arith::{self, BinaryOp};
use super::error::RuntimeError;
use super::stack::Stack;

fn stack_of(values: &[(u64, Width)]) -> Stack {
    let mut stack = Stack::new(64);
    for &(value, width) in values {
        stack.push_value(value, width).unwrap();
    }
    stack
}

#[test]
fn ops_wrap_at_width() {
    assert_eq!(BinaryOp::Add.apply(0xFF, 1, Width::Char), Ok(0));
    assert_eq!(BinaryOp::Sub.apply(0, 1, Width::Red), Ok(0xFFFF));
    assert_eq!(BinaryOp::Mul.apply(0x1_0000, 0x1_0000, Width::Int), Ok(0));
    assert_eq!(BinaryOp::Mul.apply(3, 5, Width::Long), Ok(15));
    assert_eq!(BinaryOp::Add.apply(u64::MAX, 2, Width::Long), Ok(1));
}

#[test]
fn sub_and_div_take_lhs_first() {
    let mut stack = stack_of(&[(10, Width::Int), (3, Width::Int)]);
    arith::binary(&mut stack, BinaryOp::Sub, Width::Int).unwrap();
    assert_eq!(stack.pop_value(Width::Int), Ok(7));

    let mut stack = stack_of(&[(10, Width::Int), (3, Width::Int)]);
    arith::binary(&mut stack, BinaryOp::Div, Width::Int).unwrap();
    assert_eq!(stack.pop_value(Width::Int), Ok(3));
}

#[test]
fn division_by_zero() {
    let mut stack = stack_of(&[(10, Width::Char), (0, Width::Char)]);

    assert_eq!(
        arith::binary(&mut stack, BinaryOp::Div, Width::Char),
        Err(RuntimeError::DivisionByZero { lhs: 10 })
    );
}

#[test]
fn compare_polarity() {
    let cases = [(3, 5, 1), (5, 3, 0xFF), (4, 4, 0)];

    for (lhs, rhs, flag) in cases {
        let mut stack = stack_of(&[(lhs, Width::Red), (rhs, Width::Red)]);
        arith::cmp(&mut stack, Width::Red).unwrap();

        assert_eq!(stack.pop_value(Width::Char), Ok(flag), "{lhs} cmp {rhs}");
        // lhs stays
        assert_eq!(stack.pop_value(Width::Red), Ok(lhs));
    }
}

#[test]
fn dup_then_drop_restores_stack() {
    for width in Width::ALL {
        let mut stack = stack_of(&[(1, Width::Char), (0x42, width)]);
        let before = stack.as_bytes().to_vec();

        arith::dup(&mut stack, width).unwrap();
        arith::dup(&mut stack, width).unwrap();
        arith::drop(&mut stack, width).unwrap();
        arith::drop(&mut stack, width).unwrap();

        assert_eq!(stack.as_bytes(), before);
    }
}

#[test]
fn swap_exchanges_top_two() {
    let mut stack = stack_of(&[(1, Width::Red), (2, Width::Red)]);

    arith::swap(&mut stack, Width::Red).unwrap();

    assert_eq!(stack.as_bytes(), &[2, 0, 1, 0]);
}

#[test]
fn inc_dec_wrap() {
    let mut stack = stack_of(&[(0, Width::Char)]);

    arith::dec(&mut stack, Width::Char).unwrap();
    assert_eq!(stack.as_bytes(), &[0xFF]);
    arith::inc(&mut stack, Width::Char).unwrap();
    assert_eq!(stack.as_bytes(), &[0]);
}

#[test]
fn not_is_logical() {
    let mut stack = stack_of(&[(7, Width::Char)]);

    arith::not(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), &[0]);
    arith::not(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), &[1]);
}
