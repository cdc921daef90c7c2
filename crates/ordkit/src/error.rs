//! Error types for ordkit collections

use std::fmt;

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by collection operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested element, key or end of the collection does not exist
    NoSuchElement,

    /// A positional access fell outside `0..len` (or `0..=len` for inserts)
    IndexOutOfBounds {
        /// Index supplied by the caller
        index: usize,
        /// Length of the collection at the time of the call
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoSuchElement => write!(f, "no such element"),
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: index {} but length is {}", index, len)
            }
        }
    }
}

impl std::error::Error for Error {}
