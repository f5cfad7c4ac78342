//! String instructions over NUL-led stack strings.

use super::error::RuntimeError;
use super::stack::Stack;

/// `sdrp`
pub fn pop(stack: &mut Stack) -> Result<(), RuntimeError> {
    stack.pop_string().map(|_| ())
}

/// `sdup`
pub fn dup(stack: &mut Stack) -> Result<(), RuntimeError> {
    let (_, chars) = stack.string_at(0)?;
    let chars = chars.to_vec();
    stack.push_string(&chars)
}

/// `sswp`
pub fn swap(stack: &mut Stack) -> Result<(), RuntimeError> {
    let (top_nul, top) = stack.string_at(0)?;
    let top = top.to_vec();
    let (below_nul, below) = stack.string_at(stack.head() - top_nul)?;

    let mut swapped = Vec::with_capacity(top.len() + below.len() + 2);
    swapped.push(0);
    swapped.extend_from_slice(&top);
    swapped.push(0);
    swapped.extend_from_slice(below);
    stack.splice(below_nul, &swapped)
}

/// `srev`
pub fn reverse(stack: &mut Stack) -> Result<(), RuntimeError> {
    stack.top_string_mut()?.reverse();
    Ok(())
}

/// `slow`
pub fn lowercase(stack: &mut Stack) -> Result<(), RuntimeError> {
    stack.top_string_mut()?.make_ascii_lowercase();
    Ok(())
}

/// `scap`
pub fn uppercase(stack: &mut Stack) -> Result<(), RuntimeError> {
    stack.top_string_mut()?.make_ascii_uppercase();
    Ok(())
}
