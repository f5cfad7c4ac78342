use polish_bytecode::Width;

use super::error::RuntimeError;
use super::stack::Stack;

#[test]
fn values_are_little_endian() {
    let mut stack = Stack::new(16);

    stack.push_value(0x0102, Width::Red).unwrap();
    stack.push_value(7, Width::Int).unwrap();

    assert_eq!(stack.as_bytes(), &[0x02, 0x01, 7, 0, 0, 0]);
    assert_eq!(stack.pop_value(Width::Int), Ok(7));
    assert_eq!(stack.pop_value(Width::Red), Ok(0x0102));
    assert!(stack.is_empty());
}

#[test]
fn push_keeps_one_byte_spare() {
    let mut stack = Stack::new(4);

    stack.push_value(1, Width::Red).unwrap();
    stack.push_value(2, Width::Char).unwrap();
    let before = stack.as_bytes().to_vec();

    assert_eq!(
        stack.push_value(3, Width::Char),
        Err(RuntimeError::StackOverflow {
            size: 1,
            head: 3,
            capacity: 4
        })
    );
    assert_eq!(stack.as_bytes(), before);
    assert_eq!(stack.head(), 3);
}

#[test]
fn underflow_leaves_stack_alone() {
    let mut stack = Stack::new(16);
    stack.push_value(9, Width::Red).unwrap();

    assert_eq!(
        stack.pop_value(Width::Int),
        Err(RuntimeError::StackUnderflow { size: 4, head: 2 })
    );
    assert_eq!(stack.head(), 2);
}

#[test]
fn peek_reads_below_head() {
    let mut stack = Stack::new(16);
    stack.push_value(5, Width::Int).unwrap();
    stack.push_value(6, Width::Char).unwrap();

    assert_eq!(stack.peek_value(1, Width::Char), Ok(6));
    assert_eq!(stack.peek_value(5, Width::Int), Ok(5));
    assert!(stack.peek_value(6, Width::Int).is_err());
}

#[test]
fn update_top_truncates() {
    let mut stack = Stack::new(16);
    stack.push_value(0xFF, Width::Char).unwrap();

    stack.update_top(Width::Char, |v| v + 1).unwrap();

    assert_eq!(stack.as_bytes(), &[0]);
}

#[test]
fn strings_are_nul_led() {
    let mut stack = Stack::new(32);

    stack.push_string(b"ab").unwrap();
    stack.push_string(b"xyz").unwrap();

    assert_eq!(stack.as_bytes(), b"\0ab\0xyz");
    assert_eq!(stack.find_string(0), Ok(3));
    assert_eq!(stack.string_at(4), Ok((0, &b"ab"[..])));
    assert_eq!(stack.pop_string(), Ok(b"xyz".to_vec()));
    assert_eq!(stack.pop_string(), Ok(b"ab".to_vec()));
    assert!(stack.is_empty());
}

#[test]
fn runaway_string() {
    let mut stack = Stack::new(16);
    stack.push(b"abc").unwrap();

    assert_eq!(
        stack.find_string(0),
        Err(RuntimeError::RunawayString { from: 3 })
    );
}

#[test]
fn relocate_moves_the_top() {
    let mut stack = Stack::new(16);
    stack.push(&[1, 2, 3, 4, 5]).unwrap();

    stack.relocate(3, 1).unwrap();
    assert_eq!(stack.as_bytes(), &[1, 4, 5]);

    stack.relocate(1, 2).unwrap();
    assert_eq!(stack.as_bytes(), &[1, 4, 4, 5]);
}

#[test]
fn splice_replaces_everything_above() {
    let mut stack = Stack::new(16);
    stack.push(&[1, 2, 3, 4]).unwrap();

    stack.splice(1, &[9, 9]).unwrap();

    assert_eq!(stack.as_bytes(), &[1, 9, 9]);
}

#[test]
fn free_accounts_for_spare_byte() {
    let mut stack = Stack::new(8);
    stack.push(&[0; 3]).unwrap();

    assert_eq!(stack.free(), 4);
    stack.push(&[0; 4]).unwrap();
    assert_eq!(stack.free(), 0);
}
