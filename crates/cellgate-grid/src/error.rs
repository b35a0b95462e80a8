//! Grid storage error types.

use std::error::Error;
use std::fmt;

use cellgate_core::cell::InvalidCell;
use cellgate_space::SpaceError;

/// Errors that can occur during grid storage operations.
///
/// None of these are fatal to the engine: each aborts only the operation
/// that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The grid has not been initialized yet.
    NotReady,
    /// `initialize` was called on an already-initialized grid.
    AlreadyInitialized {
        /// Width fixed by the first initialization.
        width: u32,
        /// Height fixed by the first initialization.
        height: u32,
    },
    /// `width * height` exceeds the buffer capacity.
    CapacityExceeded {
        /// Requested cell count.
        requested: u64,
        /// Buffer capacity in cells.
        capacity: usize,
    },
    /// The grid shape is not a valid torus.
    Space(SpaceError),
    /// A cell index at or beyond the grid length.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Current grid length.
        length: usize,
    },
    /// Neighbour delta other than plus or minus one neighbour step.
    InvalidDelta {
        /// The rejected delta.
        delta: i8,
    },
    /// Applying a neighbour delta would leave a count outside `0..=8`.
    NeighborOverflow {
        /// Cell whose count would have left the valid range.
        index: usize,
    },
    /// A stored byte does not decode to a valid cell.
    InvalidCell(InvalidCell),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "grid not initialized"),
            Self::AlreadyInitialized { width, height } => {
                write!(f, "grid already initialized as {width}x{height}")
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "grid capacity exceeded: requested {requested} cells, capacity {capacity}"
                )
            }
            Self::Space(e) => write!(f, "space: {e}"),
            Self::IndexOutOfRange { index, length } => {
                write!(f, "cell index {index} out of range for length {length}")
            }
            Self::InvalidDelta { delta } => {
                write!(f, "neighbour delta {delta} is not a single neighbour step")
            }
            Self::NeighborOverflow { index } => {
                write!(f, "neighbour count of cell {index} would leave 0..=8")
            }
            Self::InvalidCell(e) => write!(f, "{e}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::InvalidCell(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for GridError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<InvalidCell> for GridError {
    fn from(e: InvalidCell) -> Self {
        Self::InvalidCell(e)
    }
}
