//! Bounds helpers shared by the codec.

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain in `buf`.
#[inline]
pub fn at_least<B: Buf>(buf: &B, len: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < len {
        return Err(Error::Truncated {
            needed: len,
            remaining,
        });
    }
    Ok(())
}

/// Checks that `offset` points inside (or at the end of) the written region.
#[inline]
pub fn in_range(offset: usize, len: usize) -> Result<(), Error> {
    if offset > len {
        return Err(Error::OutOfRange { offset, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least() {
        let buf: &[u8] = &[1, 2, 3];
        assert!(at_least(&buf, 0).is_ok());
        assert!(at_least(&buf, 3).is_ok());
        assert!(matches!(
            at_least(&buf, 4),
            Err(Error::Truncated {
                needed: 4,
                remaining: 3
            })
        ));
    }

    #[test]
    fn test_in_range() {
        assert!(in_range(0, 0).is_ok());
        assert!(in_range(5, 5).is_ok());
        assert!(matches!(
            in_range(6, 5),
            Err(Error::OutOfRange { offset: 6, len: 5 })
        ));
    }
}
