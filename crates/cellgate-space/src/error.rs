//! Error types for torus construction.

use std::fmt;

/// Errors arising from torus construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a torus with zero cells.
    EmptySpace,
    /// `width * height` does not fit in a `u32` cell index.
    CellCountOverflow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "torus must have at least one cell"),
            Self::CellCountOverflow { width, height } => {
                write!(f, "torus {width}x{height} exceeds u32 cell indices")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
