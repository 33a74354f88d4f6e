//! Core codec traits

use crate::error::Error;
use bytes::{Buf, BufMut};

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Encodes this value by writing to a buffer.
    ///
    /// Implementations may assume the buffer has already been sized to fit
    /// [`FixedSize::SIZE`] bytes.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that can be read (decoded) from a buffer.
pub trait Read: Sized {
    /// Reads a value from the buffer, consuming exactly the bytes it was encoded with.
    ///
    /// Returns an error (without consuming anything) if the buffer is too short or the
    /// bytes do not form a valid value.
    fn read(buf: &mut impl Buf) -> Result<Self, Error>;
}

/// Trait for types with a known, fixed encoded length.
pub trait FixedSize {
    /// The length of the encoded value.
    const SIZE: usize;
}

/// Trait for types that can be encoded to a fixed-size byte array.
pub trait EncodeFixed: Write + FixedSize {
    /// Encodes a value to a fixed-size byte array.
    ///
    /// The caller MUST ensure `N` is equal to `Self::SIZE`.
    ///
    /// (Provided method).
    fn encode_fixed<const N: usize>(&self) -> [u8; N] {
        assert_eq!(
            N,
            Self::SIZE,
            "Can't encode {} bytes into {} bytes",
            Self::SIZE,
            N
        );

        let mut array = [0u8; N];
        let mut buf = &mut array[..];
        self.write(&mut buf);
        assert_eq!(buf.len(), 0);
        array
    }
}

// Automatically implement `EncodeFixed` for types that implement `Write` and `FixedSize`.
impl<T: Write + FixedSize> EncodeFixed for T {}

/// Trait for types that can be both written and read with a fixed width.
pub trait Codec: Write + Read + FixedSize {}

// Automatically implement `Codec` for types that implement all three traits.
impl<T: Write + Read + FixedSize> Codec for T {}
