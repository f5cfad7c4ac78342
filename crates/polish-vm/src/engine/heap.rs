//! Memory blocks behind opaque handles.
//!
//! Blocks live in an append-only table; a handle is `(slot + 1) << 32` and an
//! address is a handle plus a byte offset into its block. Freed slots stay in
//! the table as tombstones and are never handed out again, so a stale handle
//! is always detected. Allocations past the live-byte limit fail with
//! [`RuntimeError::HeapExhausted`].

use super::error::RuntimeError;

const SLOT_SHIFT: u32 = 32;
const OFFSET_MASK: u64 = (1 << SLOT_SHIFT) - 1;

/// Default cap on live heap bytes (16 MiB).
pub const DEFAULT_HEAP_LIMIT: usize = 16 << 20;

#[derive(Debug)]
pub struct Heap {
    blocks: Vec<Option<Vec<u8>>>,
    live_bytes: usize,
    limit: usize,
}

impl Default for Heap {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HEAP_LIMIT)
    }
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            blocks: Vec::new(),
            live_bytes: 0,
            limit,
        }
    }

    /// Allocate a zeroed block, returning its handle.
    pub fn alloc(&mut self, size: usize) -> Result<u64, RuntimeError> {
        let total = self.live_bytes.checked_add(size);
        if total.is_none_or(|total| total > self.limit) {
            return Err(RuntimeError::HeapExhausted {
                requested: size,
                live: self.live_bytes,
                limit: self.limit,
            });
        }
        self.live_bytes += size;

        let slot = self.blocks.len() as u64;
        self.blocks.push(Some(vec![0; size]));
        Ok((slot + 1) << SLOT_SHIFT)
    }

    /// Release the block a handle names. Addresses inside a block are rejected.
    pub fn free(&mut self, handle: u64) -> Result<(), RuntimeError> {
        let (slot, offset) = split(handle).ok_or(RuntimeError::InvalidHandle(handle))?;
        if offset != 0 {
            return Err(RuntimeError::InvalidHandle(handle));
        }
        match self.blocks.get_mut(slot) {
            Some(block) if block.is_some() => {
                let len = block.take().map_or(0, |data| data.len());
                self.live_bytes -= len;
                Ok(())
            }
            _ => Err(RuntimeError::InvalidHandle(handle)),
        }
    }

    pub fn write(&mut self, address: u64, bytes: &[u8]) -> Result<(), RuntimeError> {
        let (block, offset) = self.locate(address, bytes.len())?;
        let block = &mut self.blocks[block];
        if let Some(data) = block {
            data[offset..offset + bytes.len()].copy_from_slice(bytes);
        }
        Ok(())
    }

    pub fn read(&self, address: u64, size: usize) -> Result<&[u8], RuntimeError> {
        let (block, offset) = self.locate(address, size)?;
        match &self.blocks[block] {
            Some(data) => Ok(&data[offset..offset + size]),
            None => Err(RuntimeError::InvalidHandle(address)),
        }
    }

    /// Number of live blocks.
    pub fn live(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }

    /// Total size of the live blocks.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    /// Slot index and in-block offset for an access of `size` bytes.
    fn locate(&self, address: u64, size: usize) -> Result<(usize, usize), RuntimeError> {
        let (slot, offset) = split(address).ok_or(RuntimeError::InvalidHandle(address))?;
        let Some(Some(data)) = self.blocks.get(slot) else {
            return Err(RuntimeError::InvalidHandle(address));
        };
        let end = offset.checked_add(size as u64);
        if end.is_none_or(|end| end > data.len() as u64) {
            return Err(RuntimeError::OutOfBounds {
                offset,
                size,
                len: data.len(),
            });
        }
        Ok((slot, offset as usize))
    }
}

fn split(address: u64) -> Option<(usize, u64)> {
    let slot = (address >> SLOT_SHIFT).checked_sub(1)?;
    Some((slot as usize, address & OFFSET_MASK))
}
