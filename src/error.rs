//! Errors returned by [`FenwickTree`](crate::FenwickTree) operations.

use std::fmt;

/// Error returned when an index falls outside the bound an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenwickError {
    /// `index` is not a valid position for a tree holding `len` elements.
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for FenwickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for tree of length {len}")
            }
        }
    }
}

impl std::error::Error for FenwickError {}

/// Result type used throughout the crate.
pub type Result<T, E = FenwickError> = std::result::Result<T, E>;
