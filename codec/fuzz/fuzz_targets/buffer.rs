#![no_main]

use arbitrary::Arbitrary;
use iokit_codec::{Buffer, Error, Memory};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone)]
enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    Bytes(Vec<u8>),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    initial_capacity: u16,
    values: Vec<Value>,
    raw: Vec<u8>,
    probes: Vec<(u8, usize)>,
}

fn put(buffer: &mut Buffer, value: &Value) {
    let result = match value {
        Value::U8(v) => buffer.put_u8(*v),
        Value::U16(v) => buffer.put_u16(*v),
        Value::U32(v) => buffer.put_u32(*v),
        Value::U64(v) => buffer.put_u64(*v),
        Value::I8(v) => buffer.put_i8(*v),
        Value::I16(v) => buffer.put_i16(*v),
        Value::I32(v) => buffer.put_i32(*v),
        Value::I64(v) => buffer.put_i64(*v),
        Value::F32(v) => buffer.put_f32(*v),
        Value::F64(v) => buffer.put_f64(*v),
        Value::Bool(v) => buffer.put_bool(*v),
        Value::Str(v) => buffer.put_str(v),
        Value::Bytes(v) => buffer.put_bytes(v),
    };
    result.expect("Failed to encode value!");
}

fn check(buffer: &Buffer, offset: &mut usize, value: &Value) {
    let before = *offset;
    match value {
        Value::U8(v) => assert_eq!(buffer.get_u8(offset).unwrap(), *v),
        Value::U16(v) => assert_eq!(buffer.get_u16(offset).unwrap(), *v),
        Value::U32(v) => assert_eq!(buffer.get_u32(offset).unwrap(), *v),
        Value::U64(v) => assert_eq!(buffer.get_u64(offset).unwrap(), *v),
        Value::I8(v) => assert_eq!(buffer.get_i8(offset).unwrap(), *v),
        Value::I16(v) => assert_eq!(buffer.get_i16(offset).unwrap(), *v),
        Value::I32(v) => assert_eq!(buffer.get_i32(offset).unwrap(), *v),
        Value::I64(v) => assert_eq!(buffer.get_i64(offset).unwrap(), *v),
        Value::F32(v) => assert_eq!(buffer.get_f32(offset).unwrap().to_bits(), v.to_bits()),
        Value::F64(v) => assert_eq!(buffer.get_f64(offset).unwrap().to_bits(), v.to_bits()),
        Value::Bool(v) => assert_eq!(buffer.get_bool(offset).unwrap(), *v),
        Value::Str(v) => assert_eq!(&buffer.get_str(offset, v.len()).unwrap(), v),
        Value::Bytes(v) => assert_eq!(&buffer.get_bytes(offset, v.len()).unwrap()[..], &v[..]),
    }
    assert!(*offset > before);
}

// Decoding arbitrary bytes must either succeed and advance, or fail and leave the offset alone.
fn probe(buffer: &Buffer, kind: u8, offset: usize) {
    let mut cursor = offset;
    let result: Result<(), Error> = match kind % 6 {
        0 => buffer.get_u8(&mut cursor).map(drop),
        1 => buffer.get_u32(&mut cursor).map(drop),
        2 => buffer.get_i64(&mut cursor).map(drop),
        3 => buffer.get_bool(&mut cursor).map(drop),
        4 => buffer.get_str(&mut cursor, 64).map(drop),
        _ => buffer.get_bytes(&mut cursor, usize::MAX).map(drop),
    };
    match result {
        Ok(()) => assert!(cursor > offset && cursor <= buffer.len()),
        Err(_) => assert_eq!(cursor, offset),
    }
}

fn fuzz(input: FuzzInput) {
    let capacity = (input.initial_capacity as usize).max(1);
    let mut buffer = Buffer::new(capacity).unwrap();
    for value in &input.values {
        put(&mut buffer, value);
    }
    assert!(buffer.capacity() >= buffer.len());

    // Round-trip through storage
    let storage = Memory::default();
    buffer.save_to(&storage, "fuzz.bin").unwrap();
    let restored = Buffer::from_storage(&storage, "fuzz.bin").unwrap();
    assert_eq!(restored.as_slice(), buffer.as_slice());

    let mut offset = 0;
    for value in &input.values {
        check(&restored, &mut offset, value);
    }
    assert_eq!(offset, restored.len());

    // Probe unstructured bytes
    let mut raw = Buffer::new(capacity).unwrap();
    raw.put_u8(0).unwrap();
    raw.expand(input.raw.len()).unwrap();
    for byte in &input.raw {
        raw.put_u8(*byte).unwrap();
    }
    for (kind, offset) in input.probes {
        probe(&raw, kind, offset % (raw.len() + 2));
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
