//! Error type for the byte-level container operations.
//!
//! Geometric degeneracies are not errors: generators report them through
//! sentinel results (fully clipped segment, straight-line arc, `radii_ok`,
//! `is_valid`) and keep going.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A serialized buffer does not hold a whole number of elements.
    #[error("byte length {len} is not a multiple of the element size {element_size}")]
    MisalignedByteLength {
        /// Length of the supplied byte slice.
        len: usize,
        /// Size in bytes of one stored element.
        element_size: usize,
    },
    /// The destination buffer cannot hold the serialized elements.
    #[error("buffer of {available} bytes is too small, {needed} bytes needed")]
    BufferTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes offered by the caller.
        available: usize,
    },
}

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
