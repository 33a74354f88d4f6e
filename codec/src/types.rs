//! Codec implementations for common types

pub mod primitives;
