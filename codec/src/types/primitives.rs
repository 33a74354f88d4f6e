//! Codec implementations for Rust primitive types.
//!
//! Every supported primitive has a compile-time constant `SIZE` and is
//! encoded/decoded without any configuration.
//!
//! ## Portability
//! * All integers and floats are written little-endian, regardless of host
//!   endianness, so a dump produced on one machine decodes on any other.
//! * `bool` is a single byte that must be exactly `0` or `1`.

use crate::{util::at_least, Error, FixedSize, Read, Write};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            #[inline]
            fn read(buf: &mut impl Buf) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                Ok(buf.$read_method())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_numeric!(u8, get_u8, put_u8);
impl_numeric!(u16, get_u16_le, put_u16_le);
impl_numeric!(u32, get_u32_le, put_u32_le);
impl_numeric!(u64, get_u64_le, put_u64_le);
impl_numeric!(i8, get_i8, put_i8);
impl_numeric!(i16, get_i16_le, put_i16_le);
impl_numeric!(i32, get_i32_le, put_i32_le);
impl_numeric!(i64, get_i64_le, put_i64_le);
impl_numeric!(f32, get_f32_le, put_f32_le);
impl_numeric!(f64, get_f64_le, put_f64_le);

// Bool implementation
impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(if *self { 1 } else { 0 });
    }
}

impl Read for bool {
    #[inline]
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        at_least(buf, 1)?;
        let value = match buf.chunk()[0] {
            0 => false,
            1 => true,
            byte => return Err(Error::InvalidBool(byte)),
        };
        buf.advance(1);
        Ok(value)
    }
}

impl FixedSize for bool {
    const SIZE: usize = 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodeFixed;
    use paste::paste;
    use test_case::test_case;

    macro_rules! impl_num_test {
        ($type:ty, $size:expr) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        let mut encoded = Vec::new();
                        value.write(&mut encoded);
                        assert_eq!(encoded.len(), $size);
                        assert_eq!(<$type>::SIZE, $size);

                        let mut reader = &encoded[..];
                        let decoded = <$type>::read(&mut reader).unwrap();
                        assert_eq!(*value, decoded);
                        assert!(reader.is_empty());

                        let fixed: [u8; $size] = value.encode_fixed();
                        assert_eq!(&fixed[..], &encoded[..]);
                    }
                }
            }
        };
    }
    impl_num_test!(u8, 1);
    impl_num_test!(u16, 2);
    impl_num_test!(u32, 4);
    impl_num_test!(u64, 8);
    impl_num_test!(i8, 1);
    impl_num_test!(i16, 2);
    impl_num_test!(i32, 4);
    impl_num_test!(i64, 8);
    impl_num_test!(f32, 4);
    impl_num_test!(f64, 8);

    #[test]
    fn test_endianness() {
        // u16
        let encoded: [u8; 2] = 0x0102u16.encode_fixed();
        assert_eq!(encoded, [0x02, 0x01]);

        // u32
        let encoded: [u8; 4] = 0x01020304u32.encode_fixed();
        assert_eq!(encoded, [0x04, 0x03, 0x02, 0x01]);

        // f32
        let encoded: [u8; 4] = 1.0f32.encode_fixed();
        assert_eq!(encoded, [0x00, 0x00, 0x80, 0x3F]); // Little-endian IEEE 754
    }

    #[test]
    fn test_bool() {
        for value in [true, false] {
            let encoded: [u8; 1] = value.encode_fixed();
            let decoded = bool::read(&mut &encoded[..]).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test_case(2; "two")]
    #[test_case(0x7F; "max positive")]
    #[test_case(0xFF; "all bits")]
    fn test_bool_invalid(byte: u8) {
        let encoded = [byte];
        let mut reader = &encoded[..];
        assert!(matches!(bool::read(&mut reader), Err(Error::InvalidBool(b)) if b == byte));

        // Rejected byte is not consumed
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn test_nan_bits() {
        let encoded: [u8; 8] = f64::NAN.encode_fixed();
        let decoded = f64::read(&mut &encoded[..]).unwrap();
        assert_eq!(decoded.to_bits(), f64::NAN.to_bits());
    }

    #[test]
    fn test_conformity() {
        // Bool
        assert_eq!(true.encode_fixed::<1>(), [0x01]);
        assert_eq!(false.encode_fixed::<1>(), [0x00]);

        // 8-bit integers
        assert_eq!(0u8.encode_fixed::<1>(), [0x00]);
        assert_eq!(255u8.encode_fixed::<1>(), [0xFF]);
        assert_eq!((-1i8).encode_fixed::<1>(), [0xFF]);
        assert_eq!(127i8.encode_fixed::<1>(), [0x7F]);
        assert_eq!((-128i8).encode_fixed::<1>(), [0x80]);

        // 16-bit integers
        assert_eq!(0xABCDu16.encode_fixed::<2>(), [0xCD, 0xAB]);
        assert_eq!(u16::MAX.encode_fixed::<2>(), [0xFF, 0xFF]);
        assert_eq!((-1i16).encode_fixed::<2>(), [0xFF, 0xFF]);
        assert_eq!(0x1234i16.encode_fixed::<2>(), [0x34, 0x12]);

        // 32-bit integers
        assert_eq!(0xABCDEF01u32.encode_fixed::<4>(), [0x01, 0xEF, 0xCD, 0xAB]);
        assert_eq!(i32::MAX.encode_fixed::<4>(), [0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(i32::MIN.encode_fixed::<4>(), [0x00, 0x00, 0x00, 0x80]);

        // 64-bit integers
        assert_eq!(
            0x0123456789ABCDEFu64.encode_fixed::<8>(),
            [0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01]
        );
        assert_eq!(u64::MAX.encode_fixed::<8>(), [0xFF; 8]);
        assert_eq!(
            i64::MAX.encode_fixed::<8>(),
            [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]
        );

        // Floats
        assert_eq!((-1.0f32).encode_fixed::<4>(), (-1.0f32).to_le_bytes());
        assert_eq!(f32::INFINITY.encode_fixed::<4>(), f32::INFINITY.to_le_bytes());
        assert_eq!(
            1.0f64.encode_fixed::<8>(),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]
        );
        assert_eq!(f64::MIN.encode_fixed::<8>(), f64::MIN.to_le_bytes());
    }
}
