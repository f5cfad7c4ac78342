use super::error::RuntimeError;
use super::stack::Stack;
use super::strings;

fn stack_of(strings: &[&str]) -> Stack {
    let mut stack = Stack::new(64);
    for s in strings {
        stack.push_string(s.as_bytes()).unwrap();
    }
    stack
}

#[test]
fn dup_and_pop() {
    let mut stack = stack_of(&["ab"]);

    strings::dup(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), b"\0ab\0ab");

    strings::pop(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), b"\0ab");
}

#[test]
fn swap_strings_of_different_length() {
    let mut stack = stack_of(&["one", "xy"]);

    strings::swap(&mut stack).unwrap();

    assert_eq!(stack.as_bytes(), b"\0xy\0one");
}

#[test]
fn swap_needs_two_strings() {
    let mut stack = Stack::new(16);
    stack.push(b"q").unwrap();
    stack.push_string(b"ab").unwrap();

    assert_eq!(
        strings::swap(&mut stack),
        Err(RuntimeError::RunawayString { from: 1 })
    );
}

#[test]
fn reverse_and_case() {
    let mut stack = stack_of(&["keep", "Hello"]);

    strings::reverse(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), b"\0keep\0olleH");

    strings::uppercase(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), b"\0keep\0OLLEH");

    strings::lowercase(&mut stack).unwrap();
    assert_eq!(stack.as_bytes(), b"\0keep\0olleh");
}

#[test]
fn empty_string_ops() {
    let mut stack = stack_of(&[""]);

    strings::reverse(&mut stack).unwrap();
    strings::dup(&mut stack).unwrap();

    assert_eq!(stack.as_bytes(), &[0, 0]);
}
