//! Error types for buffer operations

use thiserror::Error;

/// Error type for buffer operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("allocation failed: {0} bytes")]
    OutOfMemory(usize),
    #[error("capacity exceeded: {0} > {1}")]
    CapacityExceeded(usize, usize), // requested, max
    #[error("offset out of range: {offset} > {len}")]
    OutOfRange { offset: usize, len: usize },
    #[error("truncated: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
    #[error("buffer too small: {needed} > {available}")]
    BufferTooSmall { needed: usize, available: usize },
    #[error("invalid bool: {0}")]
    InvalidBool(u8),
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
