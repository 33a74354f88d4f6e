//! A growable byte buffer with typed, position-based encode and decode.
//!
//! # Format
//!
//! A [Buffer] is a plain concatenation of encoded values with no tags, header or padding:
//!
//! ```text
//! +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//! | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |10 |11 |12 |13 |...|
//! +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//! |   i32 (LE)    |  Len(S) (u32) |  S ...    | b |  u16  |...|
//! +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
//! ```
//!
//! Every multi-byte value (including the string length prefix) is little-endian. Booleans
//! are a single `0` or `1` byte. The caller is responsible for decoding values in the same
//! order and with the same types they were encoded with.
//!
//! # Cursors
//!
//! The write cursor is the buffer's length: every `put_*` call appends. The read cursor is an
//! `offset` owned by the caller and advanced by every successful `get_*` call. Failed calls
//! never move either cursor. [Buffer::reader] wraps the read cursor for callers that prefer
//! not to track it themselves.

use crate::{
    reader::Reader,
    storage::{Fs, Storage},
    util::{at_least, in_range},
    Error, FixedSize, Read, Write,
};
use bytes::Bytes;
use paste::paste;
use std::path::Path;
use tracing::{debug, trace};

/// Number of bytes used to encode the length of a string payload.
pub const LEN_PREFIX: usize = <u32 as FixedSize>::SIZE;

/// Configuration for a [Buffer].
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of bytes to allocate up front. Must be non-zero.
    pub initial_capacity: usize,

    /// Upper bound on the allocated size of the buffer, if any.
    ///
    /// Growth that would require more than this many bytes fails with
    /// [Error::CapacityExceeded] rather than allocating.
    pub max_capacity: Option<usize>,
}

impl Config {
    /// Returns a configuration with the given initial capacity and no upper bound.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
        }
    }
}

/// An owned, growable byte buffer.
#[derive(Clone, Debug)]
pub struct Buffer {
    data: Vec<u8>,
    max_capacity: Option<usize>,
}

// Generates the per-type `put_*` and `get_*` methods.
macro_rules! impl_typed {
    ($($type:ty),*) => {
        paste! {
            $(
                /// Appends a value of this width to the buffer.
                #[inline]
                pub fn [<put_ $type>](&mut self, value: $type) -> Result<(), Error> {
                    self.put(value)
                }

                /// Reads a value of this width at `offset`, advancing it on success.
                #[inline]
                pub fn [<get_ $type>](&self, offset: &mut usize) -> Result<$type, Error> {
                    self.get(offset)
                }
            )*
        }
    };
}

impl Buffer {
    /// Creates an empty buffer with room for `initial_capacity` bytes.
    ///
    /// Returns [Error::InvalidArgument] if `initial_capacity` is zero.
    pub fn new(initial_capacity: usize) -> Result<Self, Error> {
        Self::with_config(Config::new(initial_capacity))
    }

    /// Creates an empty buffer from a [Config].
    pub fn with_config(cfg: Config) -> Result<Self, Error> {
        if cfg.initial_capacity == 0 {
            return Err(Error::InvalidArgument("initial capacity must be non-zero"));
        }
        if let Some(max) = cfg.max_capacity {
            if cfg.initial_capacity > max {
                return Err(Error::InvalidArgument(
                    "initial capacity exceeds max capacity",
                ));
            }
        }

        let mut data = Vec::new();
        data.try_reserve_exact(cfg.initial_capacity)
            .map_err(|_| Error::OutOfMemory(cfg.initial_capacity))?;
        Ok(Self {
            data,
            max_capacity: cfg.max_capacity,
        })
    }

    /// Creates a buffer holding the content of the file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_storage(&Fs, path)
    }

    /// Creates a buffer holding the content of `path` in `storage`.
    pub fn from_storage<S: Storage>(storage: &S, path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut buffer = Self {
            data: Vec::new(),
            max_capacity: None,
        };
        buffer.load_from(storage, path)?;
        Ok(buffer)
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing has been encoded.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of bytes the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Configured upper bound on [Buffer::capacity], if any.
    pub fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// The encoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the encoded bytes.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.data)
    }

    /// Returns a [Reader] positioned at the start of the buffer.
    pub fn reader(&self) -> Reader<'_> {
        Reader::new(self)
    }

    /// Ensures at least `additional` more bytes can be appended without reallocating.
    ///
    /// When growth is needed, the capacity becomes `max(capacity * 2, len + additional)`,
    /// clamped to the configured maximum. If capacity is already sufficient this is a no-op.
    ///
    /// On failure the buffer is left unchanged.
    pub fn expand(&mut self, additional: usize) -> Result<(), Error> {
        let len = self.data.len();
        let capacity = self.data.capacity();
        let required = len
            .checked_add(additional)
            .ok_or(Error::OutOfMemory(usize::MAX))?;
        if required <= capacity {
            return Ok(());
        }

        let mut target = capacity.saturating_mul(2).max(required);
        if let Some(max) = self.max_capacity {
            if required > max {
                return Err(Error::CapacityExceeded(required, max));
            }
            target = target.min(max);
        }

        // `try_reserve_exact` leaves the vector untouched if allocation fails
        self.data
            .try_reserve_exact(target - len)
            .map_err(|_| Error::OutOfMemory(target))?;
        debug!(
            old = capacity,
            new = self.data.capacity(),
            len,
            "expanded buffer"
        );
        Ok(())
    }

    /// Appends a fixed-size value.
    pub fn put<T: Write + FixedSize>(&mut self, value: T) -> Result<(), Error> {
        self.expand(T::SIZE)?;
        value.write(&mut self.data);
        Ok(())
    }

    /// Reads a fixed-size value at `offset`, advancing it on success.
    ///
    /// Returns [Error::OutOfRange] if `offset` is past the end of the buffer and
    /// [Error::Truncated] if fewer than `T::SIZE` bytes remain. `offset` is not
    /// modified on failure.
    pub fn get<T: Read>(&self, offset: &mut usize) -> Result<T, Error> {
        in_range(*offset, self.data.len())?;
        let mut buf = &self.data[*offset..];
        let value = T::read(&mut buf)?;
        *offset = self.data.len() - buf.len();
        Ok(value)
    }

    impl_typed!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, bool);

    /// Appends `payload` prefixed with its length as a `u32`.
    ///
    /// Returns [Error::InvalidArgument] if the payload is longer than `u32::MAX` bytes.
    pub fn put_bytes(&mut self, payload: &[u8]) -> Result<(), Error> {
        let len = u32::try_from(payload.len())
            .map_err(|_| Error::InvalidArgument("payload length exceeds u32"))?;
        let total = LEN_PREFIX
            .checked_add(payload.len())
            .ok_or(Error::OutOfMemory(usize::MAX))?;
        self.expand(total)?;
        len.write(&mut self.data);
        self.data.extend_from_slice(payload);
        Ok(())
    }

    /// Appends the UTF-8 bytes of `value` prefixed with their length as a `u32`.
    pub fn put_str(&mut self, value: &str) -> Result<(), Error> {
        self.put_bytes(value.as_bytes())
    }

    /// Locates the payload of the length-prefixed record at `offset`.
    ///
    /// Returns the payload's start position and length.
    fn payload(&self, offset: usize, max_len: usize) -> Result<(usize, usize), Error> {
        in_range(offset, self.data.len())?;
        let mut buf = &self.data[offset..];
        let declared = u32::read(&mut buf)? as usize;
        at_least(&buf, declared)?;
        if declared > max_len {
            return Err(Error::BufferTooSmall {
                needed: declared,
                available: max_len,
            });
        }
        Ok((offset + LEN_PREFIX, declared))
    }

    /// Reads a length-prefixed payload at `offset`, advancing it on success.
    ///
    /// Returns [Error::BufferTooSmall] if the declared length exceeds `max_len`. The record is
    /// never partially consumed: on any failure `offset` is not modified.
    pub fn get_bytes(&self, offset: &mut usize, max_len: usize) -> Result<Bytes, Error> {
        let (start, len) = self.payload(*offset, max_len)?;
        let end = start + len;
        let payload = Bytes::copy_from_slice(&self.data[start..end]);
        *offset = end;
        Ok(payload)
    }

    /// Reads a length-prefixed UTF-8 string at `offset`, advancing it on success.
    ///
    /// Returns [Error::InvalidUtf8] if the payload is not valid UTF-8.
    pub fn get_str(&self, offset: &mut usize, max_len: usize) -> Result<String, Error> {
        let (start, len) = self.payload(*offset, max_len)?;
        let end = start + len;
        let value = std::str::from_utf8(&self.data[start..end])?.to_owned();
        *offset = end;
        Ok(value)
    }

    /// Copies a length-prefixed payload at `offset` into `out`, advancing `offset` on success.
    ///
    /// Returns the number of bytes written to `out`, or [Error::BufferTooSmall] if `out` cannot
    /// hold the payload (in which case the caller may retry with a larger destination).
    pub fn get_bytes_into(&self, offset: &mut usize, out: &mut [u8]) -> Result<usize, Error> {
        let (start, len) = self.payload(*offset, out.len())?;
        let end = start + len;
        out[..len].copy_from_slice(&self.data[start..end]);
        *offset = end;
        Ok(len)
    }

    /// Writes the encoded bytes to the file at `path`, creating or truncating it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.save_to(&Fs, path)
    }

    /// Writes the encoded bytes to `path` in `storage`.
    pub fn save_to<S: Storage>(&self, storage: &S, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        storage.write_all(path, &self.data)?;
        debug!(?path, len = self.data.len(), "saved buffer");
        Ok(())
    }

    /// Replaces the content of the buffer with the file at `path`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.load_from(&Fs, path)
    }

    /// Replaces the content of the buffer with `path` in `storage`.
    ///
    /// The content is not interpreted: decoding starts again at offset `0`. On failure the
    /// buffer is left unchanged.
    pub fn load_from<S: Storage>(
        &mut self,
        storage: &S,
        path: impl AsRef<Path>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let size = storage.size(path)?;
        let size = usize::try_from(size).map_err(|_| Error::OutOfMemory(usize::MAX))?;
        if let Some(max) = self.max_capacity {
            if size > max {
                return Err(Error::CapacityExceeded(size, max));
            }
        }

        // Never shrink below the current allocation and never allocate zero bytes
        let reserve = size.max(self.data.capacity()).max(1);
        let mut data = Vec::new();
        data.try_reserve_exact(reserve)
            .map_err(|_| Error::OutOfMemory(reserve))?;
        let read = storage.read_all(path, &mut data)?;
        if read != size {
            trace!(?path, expected = size, read, "file changed size while loading");
        }
        if let Some(max) = self.max_capacity {
            if read > max {
                return Err(Error::CapacityExceeded(read, max));
            }
        }

        self.data = data;
        debug!(?path, len = read, "loaded buffer");
        Ok(())
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
