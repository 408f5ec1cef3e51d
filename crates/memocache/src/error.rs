//! Error types for memocache

use std::fmt;

/// Result type alias for memocache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction and the workloads built on top of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bounded cache constructed with a capacity of zero
    InvalidCapacity(usize),

    /// Range query with `low > high`
    InvalidRange {
        /// Lower bound (inclusive)
        low: usize,
        /// Upper bound (inclusive)
        high: usize,
    },

    /// Index past the end of the underlying array
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },

    /// Range sum does not fit in an `i64`
    SumOverflow {
        /// First index (inclusive)
        low: usize,
        /// Last index (inclusive)
        high: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be greater than 0)", capacity)
            }
            Error::InvalidRange { low, high } => {
                write!(f, "Invalid range: low {} is greater than high {}", low, high)
            }
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index out of bounds: {} (len {})", index, len)
            }
            Error::SumOverflow { low, high } => {
                write!(f, "Range sum overflow: [{}, {}] exceeds i64", low, high)
            }
        }
    }
}

impl std::error::Error for Error {}
