//! Shared helpers for engine tests.

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use super::streams::Streams;

/// Output sink that can be read back after the VM has taken ownership.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Streams reading `input` and capturing stdout and stderr.
pub fn captured(input: &str) -> (Streams, SharedBuf, SharedBuf) {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let streams = Streams::new(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(out.clone()),
        Box::new(err.clone()),
    );
    (streams, out, err)
}
