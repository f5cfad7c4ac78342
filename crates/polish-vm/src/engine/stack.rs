//! Fixed-capacity data stack.
//!
//! A flat byte buffer with a head offset. Values carry no type tag; every
//! access names its width. Multi-byte values are little-endian.
//!
//! Strings are a NUL byte followed by their characters, so scanning down from
//! the head meets the characters first and then the terminator.

use polish_bytecode::Width;

use super::error::RuntimeError;

/// Default capacity in bytes.
pub const DEFAULT_STACK_SIZE: usize = 256;

#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<u8>,
    head: usize,
}

impl Stack {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            head: 0,
        }
    }

    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == 0
    }

    /// Bytes below the head that a push may still use.
    ///
    /// One byte is always held back: a push must leave `head < capacity`.
    #[inline]
    pub fn free(&self) -> usize {
        self.capacity().saturating_sub(self.head + 1)
    }

    /// Live contents, bottom first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.head]
    }

    fn overflow(&self, size: usize) -> RuntimeError {
        RuntimeError::StackOverflow {
            size,
            head: self.head,
            capacity: self.capacity(),
        }
    }

    fn underflow(&self, size: usize) -> RuntimeError {
        RuntimeError::StackUnderflow {
            size,
            head: self.head,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) -> Result<(), RuntimeError> {
        if self.head + bytes.len() >= self.capacity() {
            return Err(self.overflow(bytes.len()));
        }
        self.data[self.head..self.head + bytes.len()].copy_from_slice(bytes);
        self.head += bytes.len();
        Ok(())
    }

    pub fn pop(&mut self, size: usize) -> Result<Vec<u8>, RuntimeError> {
        if self.head < size {
            return Err(self.underflow(size));
        }
        self.head -= size;
        Ok(self.data[self.head..self.head + size].to_vec())
    }

    /// `size` bytes starting `depth` bytes below the head.
    pub fn peek(&self, depth: usize, size: usize) -> Result<&[u8], RuntimeError> {
        if self.head < depth || depth < size {
            return Err(RuntimeError::StackUnderflow {
                size: depth.max(size),
                head: self.head,
            });
        }
        let start = self.head - depth;
        Ok(&self.data[start..start + size])
    }

    pub fn push_value(&mut self, value: u64, width: Width) -> Result<(), RuntimeError> {
        self.push(&value.to_le_bytes()[..width.bytes()])
    }

    pub fn pop_value(&mut self, width: Width) -> Result<u64, RuntimeError> {
        let bytes = self.pop(width.bytes())?;
        Ok(read_le(&bytes))
    }

    pub fn peek_value(&self, depth: usize, width: Width) -> Result<u64, RuntimeError> {
        self.peek(depth, width.bytes()).map(read_le)
    }

    /// Apply `f` to the top value in place, truncating the result to `width`.
    pub fn update_top(
        &mut self,
        width: Width,
        f: impl FnOnce(u64) -> u64,
    ) -> Result<(), RuntimeError> {
        let size = width.bytes();
        if self.head < size {
            return Err(self.underflow(size));
        }
        let top = &mut self.data[self.head - size..self.head];
        let value = f(read_le(top)) & width.mask();
        top.copy_from_slice(&value.to_le_bytes()[..size]);
        Ok(())
    }

    /// Move `[source, head)` to start at `dest`, shifting the head with it.
    pub fn relocate(&mut self, source: usize, dest: usize) -> Result<(), RuntimeError> {
        if source > self.head {
            return Err(self.underflow(source - self.head));
        }
        let len = self.head - source;
        let new_head = dest + len;
        if new_head >= self.capacity() {
            return Err(self.overflow(new_head.saturating_sub(self.head)));
        }
        self.data.copy_within(source..self.head, dest);
        self.head = new_head;
        Ok(())
    }

    /// Count of non-zero bytes between `head - depth` and the next NUL below.
    pub fn find_string(&self, depth: usize) -> Result<usize, RuntimeError> {
        if depth > self.head {
            return Err(self.underflow(depth));
        }
        let from = self.head - depth;
        self.data[..from]
            .iter()
            .rev()
            .position(|&b| b == 0)
            .ok_or(RuntimeError::RunawayString { from })
    }

    /// Characters of the string ending `depth` bytes below the head, and the
    /// offset of its NUL.
    pub fn string_at(&self, depth: usize) -> Result<(usize, &[u8]), RuntimeError> {
        let len = self.find_string(depth)?;
        let end = self.head - depth;
        Ok((end - len - 1, &self.data[end - len..end]))
    }

    /// Remove the top string, returning its characters.
    pub fn pop_string(&mut self) -> Result<Vec<u8>, RuntimeError> {
        let (nul, chars) = self.string_at(0)?;
        let chars = chars.to_vec();
        self.head = nul;
        Ok(chars)
    }

    /// Push `chars` as a string (NUL first).
    pub fn push_string(&mut self, chars: &[u8]) -> Result<(), RuntimeError> {
        if self.head + chars.len() + 1 >= self.capacity() {
            return Err(self.overflow(chars.len() + 1));
        }
        self.data[self.head] = 0;
        self.data[self.head + 1..self.head + 1 + chars.len()].copy_from_slice(chars);
        self.head += chars.len() + 1;
        Ok(())
    }

    /// Mutable view of the top string's characters.
    pub fn top_string_mut(&mut self) -> Result<&mut [u8], RuntimeError> {
        let len = self.find_string(0)?;
        let head = self.head;
        Ok(&mut self.data[head - len..head])
    }

    /// Cut the stack back to `at`, then push `bytes` there.
    pub fn splice(&mut self, at: usize, bytes: &[u8]) -> Result<(), RuntimeError> {
        if at > self.head {
            return Err(self.underflow(at - self.head));
        }
        if at + bytes.len() >= self.capacity() {
            return Err(RuntimeError::StackOverflow {
                size: bytes.len(),
                head: at,
                capacity: self.capacity(),
            });
        }
        self.data[at..at + bytes.len()].copy_from_slice(bytes);
        self.head = at + bytes.len();
        Ok(())
    }

    /// Raw write within the live region.
    pub(crate) fn write_at(&mut self, at: usize, bytes: &[u8]) {
        self.data[at..at + bytes.len()].copy_from_slice(bytes);
    }

    pub(crate) fn read_at(&self, at: usize, len: usize) -> &[u8] {
        &self.data[at..at + len]
    }

    pub fn truncate(&mut self, len: usize) {
        self.head = self.head.min(len);
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_SIZE)
    }
}

/// Little-endian integer from up to eight bytes.
pub(crate) fn read_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}
