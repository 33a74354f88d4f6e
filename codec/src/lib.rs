//! Encode primitives into a growable byte buffer and persist it.
//!
//! # Overview
//!
//! A position-based binary codec designed to:
//! - Append fixed-width values and length-prefixed strings to an owned, growable buffer
//! - Decode them back, in the same order, from a caller-controlled offset
//! - Dump the encoded bytes to a file (or any [Storage]) and load them back
//!
//! The format is not self-describing: there are no type tags, headers or version numbers.
//! Schema knowledge lives entirely with the caller, who must decode values in the exact order
//! and with the exact types they were encoded with.
//!
//! # Supported Types
//!
//! - Primitives: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64`, `bool`
//! - Length-prefixed byte strings and UTF-8 strings
//!
//! All multi-byte values are little-endian. Additional fixed-width types can be supported by
//! implementing [Write], [Read] and [FixedSize].
//!
//! # Errors
//!
//! Every fallible operation returns a [Result] and never panics on bad input. A failed encode
//! leaves the buffer as it was, and a failed decode leaves the offset where it was, so callers
//! can safely retry (for example, with a larger destination) or abandon the operation.
//!
//! # Example
//!
//! ```
//! use iokit_codec::{Buffer, Error};
//!
//! // Encode a record
//! let mut buffer = Buffer::new(16)?;
//! buffer.put_i32(2147483647)?;
//! buffer.put_str("hi")?;
//! assert_eq!(buffer.len(), 10);
//!
//! // Decode it from a caller-owned offset
//! let mut offset = 0;
//! assert_eq!(buffer.get_i32(&mut offset)?, 2147483647);
//! assert_eq!(offset, 4);
//! assert_eq!(buffer.get_str(&mut offset, 16)?, "hi");
//! assert_eq!(offset, 10);
//!
//! // Or let a reader track the offset
//! let mut reader = buffer.reader();
//! assert_eq!(reader.read::<i32>()?, 2147483647);
//! assert_eq!(reader.read_str(16)?, "hi");
//! assert!(reader.is_empty());
//! # Ok::<(), Error>(())
//! ```
//!
//! # Custom Types
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use iokit_codec::{Buffer, Error, FixedSize, Read, Write};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! struct Point {
//!     x: u32,
//!     y: u32,
//! }
//!
//! impl Write for Point {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.x.write(buf);
//!         self.y.write(buf);
//!     }
//! }
//!
//! impl Read for Point {
//!     fn read(buf: &mut impl Buf) -> Result<Self, Error> {
//!         // Check the whole record up front so a short read consumes nothing
//!         iokit_codec::util::at_least(buf, Self::SIZE)?;
//!         let x = u32::read(buf)?;
//!         let y = u32::read(buf)?;
//!         Ok(Self { x, y })
//!     }
//! }
//!
//! impl FixedSize for Point {
//!     const SIZE: usize = u32::SIZE + u32::SIZE;
//! }
//!
//! let mut buffer = Buffer::new(8)?;
//! buffer.put(Point { x: 1, y: 2 })?;
//! let mut offset = 0;
//! assert_eq!(buffer.get::<Point>(&mut offset)?, Point { x: 1, y: 2 });
//! # Ok::<(), Error>(())
//! ```

pub mod buffer;
pub mod codec;
pub mod error;
pub mod reader;
pub mod storage;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use buffer::{Buffer, Config, LEN_PREFIX};
pub use codec::{Codec, EncodeFixed, FixedSize, Read, Write};
pub use error::Error;
pub use reader::Reader;
pub use storage::{Fs, Memory, Storage};
