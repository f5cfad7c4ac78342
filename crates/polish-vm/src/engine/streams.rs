//! File and standard stream handles.
//!
//! Stream handles carry [`STREAM_TAG`] so they never collide with heap handles.
//! The three standard streams have fixed handles; opened files are numbered
//! from 3 upwards and, like heap slots, never reused.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, Read, Write};

use super::error::RuntimeError;

pub const STREAM_TAG: u64 = 1 << 62;
pub const STDIN: u64 = STREAM_TAG;
pub const STDOUT: u64 = STREAM_TAG | 1;
pub const STDERR: u64 = STREAM_TAG | 2;

const FIRST_FILE: u64 = 3;

/// Open mode codes understood by `opnf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
    Append,
    ReadUpdate,
    WriteUpdate,
    AppendUpdate,
}

impl OpenMode {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::Read,
            2 => Self::Write,
            3 => Self::Append,
            9 => Self::ReadUpdate,
            10 => Self::WriteUpdate,
            11 => Self::AppendUpdate,
            _ => return None,
        })
    }

    fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            Self::Read => opts.read(true),
            Self::Write => opts.write(true).create(true).truncate(true),
            Self::Append => opts.append(true).create(true),
            Self::ReadUpdate => opts.read(true).write(true),
            Self::WriteUpdate => opts.read(true).write(true).create(true).truncate(true),
            Self::AppendUpdate => opts.read(true).append(true).create(true),
        };
        opts
    }
}

pub struct Streams {
    stdin: Box<dyn BufRead>,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    files: Vec<Option<File>>,
}

impl Default for Streams {
    fn default() -> Self {
        Self::new(
            Box::new(io::stdin().lock()),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }
}

impl Streams {
    pub fn new(stdin: Box<dyn BufRead>, stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            files: Vec::new(),
        }
    }

    /// Open `path` in `mode`. Returns 0 when the mode is unknown or the open
    /// fails.
    pub fn open(&mut self, path: &[u8], mode: u8) -> u64 {
        let Some(mode) = OpenMode::from_code(mode) else {
            return 0;
        };
        let Ok(path) = std::str::from_utf8(path) else {
            return 0;
        };
        match mode.options().open(path) {
            Ok(file) => {
                let index = self.files.len() as u64;
                self.files.push(Some(file));
                STREAM_TAG | (FIRST_FILE + index)
            }
            Err(_) => 0,
        }
    }

    pub fn close(&mut self, handle: u64) -> Result<(), RuntimeError> {
        let file = self
            .file_slot(handle)
            .ok_or(RuntimeError::InvalidHandle(handle))?;
        match file.take() {
            Some(mut file) => {
                file.flush()
                    .map_err(|e| RuntimeError::StringWrite(e.to_string()))?;
                Ok(())
            }
            None => Err(RuntimeError::InvalidHandle(handle)),
        }
    }

    pub fn write(&mut self, handle: u64, bytes: &[u8]) -> Result<(), RuntimeError> {
        let result = match handle {
            STDOUT => self.stdout.write_all(bytes),
            STDERR => self.stderr.write_all(bytes),
            _ => self.file(handle)?.write_all(bytes),
        };
        result.map_err(|e| RuntimeError::StringWrite(e.to_string()))
    }

    /// Read one line (newline included) of at most `limit` bytes.
    pub fn read_line(&mut self, handle: u64, limit: usize) -> Result<Vec<u8>, RuntimeError> {
        let mut line = Vec::new();
        let result = match handle {
            STDIN => read_line_buffered(&mut self.stdin, limit, &mut line),
            _ => read_line_unbuffered(self.file(handle)?, limit, &mut line),
        };
        result.map_err(|e| RuntimeError::StringRead(e.to_string()))?;
        if line.is_empty() && limit > 0 {
            return Err(RuntimeError::StringRead("end of input".to_string()));
        }
        Ok(line)
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.stdout
            .flush()
            .and_then(|_| self.stderr.flush())
            .map_err(|e| RuntimeError::StringWrite(e.to_string()))
    }

    /// Number of files currently open.
    pub fn open_files(&self) -> usize {
        self.files.iter().filter(|f| f.is_some()).count()
    }

    fn file_slot(&mut self, handle: u64) -> Option<&mut Option<File>> {
        if handle & STREAM_TAG == 0 {
            return None;
        }
        let index = (handle & !STREAM_TAG).checked_sub(FIRST_FILE)?;
        self.files.get_mut(index as usize)
    }

    fn file(&mut self, handle: u64) -> Result<&mut File, RuntimeError> {
        self.file_slot(handle)
            .and_then(|slot| slot.as_mut())
            .ok_or(RuntimeError::InvalidHandle(handle))
    }
}

fn read_line_buffered(
    reader: &mut dyn BufRead,
    limit: usize,
    line: &mut Vec<u8>,
) -> io::Result<()> {
    Read::take(reader, limit as u64).read_until(b'\n', line)?;
    Ok(())
}

/// Byte-at-a-time so the file position ends right after the line.
fn read_line_unbuffered(file: &mut File, limit: usize, line: &mut Vec<u8>) -> io::Result<()> {
    let mut byte = [0u8; 1];
    while line.len() < limit {
        if file.read(&mut byte)? == 0 {
            break;
        }
        line.push(byte[0]);
        if byte[0] == b'\n' {
            break;
        }
    }
    Ok(())
}
