//! Width-polymorphic arithmetic and stack shuffling.
//!
//! Every operation works on unsigned values of one width and wraps modulo
//! `2^(8 * width)`.

use polish_bytecode::Width;

use super::error::RuntimeError;
use super::stack::Stack;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// `lhs op rhs`, truncated to `width`.
    pub fn apply(self, lhs: u64, rhs: u64, width: Width) -> Result<u64, RuntimeError> {
        let value = match self {
            Self::Add => lhs.wrapping_add(rhs),
            Self::Sub => lhs.wrapping_sub(rhs),
            Self::Mul => lhs.wrapping_mul(rhs),
            Self::Div => lhs
                .checked_div(rhs)
                .ok_or(RuntimeError::DivisionByZero { lhs })?,
        };
        Ok(value & width.mask())
    }
}

/// Pop rhs, then lhs; push `lhs op rhs`.
pub fn binary(stack: &mut Stack, op: BinaryOp, width: Width) -> Result<(), RuntimeError> {
    let rhs = stack.pop_value(width)?;
    let lhs = stack.pop_value(width)?;
    stack.push_value(op.apply(lhs, rhs, width)?, width)
}

pub fn swap(stack: &mut Stack, width: Width) -> Result<(), RuntimeError> {
    let rhs = stack.pop_value(width)?;
    let lhs = stack.pop_value(width)?;
    stack.push_value(rhs, width)?;
    stack.push_value(lhs, width)
}

pub fn dup(stack: &mut Stack, width: Width) -> Result<(), RuntimeError> {
    let top = stack.peek_value(width.bytes(), width)?;
    stack.push_value(top, width)
}

pub fn drop(stack: &mut Stack, width: Width) -> Result<(), RuntimeError> {
    stack.pop(width.bytes()).map(|_| ())
}

pub fn inc(stack: &mut Stack, width: Width) -> Result<(), RuntimeError> {
    stack.update_top(width, |v| v.wrapping_add(1))
}

pub fn dec(stack: &mut Stack, width: Width) -> Result<(), RuntimeError> {
    stack.update_top(width, |v| v.wrapping_sub(1))
}

/// Pop rhs and compare it with the lhs left beneath: push `1` if rhs is
/// greater, `0xFF` if smaller, `0` if equal.
pub fn cmp(stack: &mut Stack, width: Width) -> Result<(), RuntimeError> {
    let rhs = stack.pop_value(width)?;
    let lhs = stack.peek_value(width.bytes(), width)?;
    let flag = match rhs.cmp(&lhs) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => 0xFF,
        std::cmp::Ordering::Equal => 0,
    };
    stack.push_value(flag, Width::Char)
}

/// `!`: logical negation of one byte.
pub fn not(stack: &mut Stack) -> Result<(), RuntimeError> {
    let value = stack.pop_value(Width::Char)?;
    stack.push_value((value == 0) as u64, Width::Char)
}
