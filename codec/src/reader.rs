//! A read cursor over a [Buffer].

use crate::{util::in_range, Buffer, Error, Read};
use bytes::Bytes;

/// Decodes values from a [Buffer] while tracking its own offset.
///
/// Every method has the same semantics as the corresponding `get_*` method on [Buffer]:
/// the offset only advances when a value is successfully decoded.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buffer: &'a Buffer,
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `buffer`.
    pub fn new(buffer: &'a Buffer) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Position of the next unread byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Returns true if every byte has been read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves the cursor to `offset`.
    ///
    /// Returns [Error::OutOfRange] if `offset` is past the end of the buffer.
    pub fn seek(&mut self, offset: usize) -> Result<(), Error> {
        in_range(offset, self.buffer.len())?;
        self.offset = offset;
        Ok(())
    }

    /// Reads a fixed-size value.
    pub fn read<T: Read>(&mut self) -> Result<T, Error> {
        self.buffer.get(&mut self.offset)
    }

    /// Reads a length-prefixed payload of at most `max_len` bytes.
    pub fn read_bytes(&mut self, max_len: usize) -> Result<Bytes, Error> {
        self.buffer.get_bytes(&mut self.offset, max_len)
    }

    /// Reads a length-prefixed UTF-8 string of at most `max_len` bytes.
    pub fn read_str(&mut self, max_len: usize) -> Result<String, Error> {
        self.buffer.get_str(&mut self.offset, max_len)
    }
}
