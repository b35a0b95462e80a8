//! Immutable generation snapshots and their fixed-size record encoding.
//!
//! A record is a 16-byte little-endian header followed by exactly
//! [`CAP`] cell bytes:
//!
//! ```text
//! offset  size  field
//!      0     4  generation (u32)
//!      4     4  width      (u32)
//!      8     4  height     (u32)
//!     12     4  length     (u32, number of meaningful cell bytes)
//!     16  4096  cells      (packed cell bytes, zero past `length`)
//! ```

use std::error::Error;
use std::fmt;

use cellgate_core::{Cell, Generation, CAP};
use cellgate_grid::{GridError, GridStore};

/// Size of the record header in bytes.
pub const RECORD_HEADER_LEN: usize = 16;

/// Total size of an encoded record in bytes.
pub const RECORD_LEN: usize = RECORD_HEADER_LEN + CAP;

// ── RecordError ────────────────────────────────────────────────────

/// Errors from decoding a snapshot record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// Fewer bytes than [`RECORD_LEN`].
    Truncated {
        /// Bytes supplied.
        len: usize,
    },
    /// The header `length` exceeds [`CAP`].
    LengthExceedsCapacity {
        /// Header `length`.
        length: u32,
    },
    /// The header `length` exceeds `width * height`.
    LengthExceedsGrid {
        /// Header `length`.
        length: u32,
        /// Header `width`.
        width: u32,
        /// Header `height`.
        height: u32,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { len } => {
                write!(f, "record truncated: {len} bytes, expected {RECORD_LEN}")
            }
            Self::LengthExceedsCapacity { length } => {
                write!(f, "record length {length} exceeds capacity {CAP}")
            }
            Self::LengthExceedsGrid {
                length,
                width,
                height,
            } => write!(f, "record length {length} exceeds {width}x{height} grid"),
        }
    }
}

impl Error for RecordError {}

// ── Snapshot ───────────────────────────────────────────────────────

/// A by-value copy of the live cells of one generation.
///
/// A snapshot owns its cell bytes, so it stays valid after the engine has
/// moved on. Bytes past [`len()`](Self::len) are zero.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    generation: Generation,
    width: u32,
    height: u32,
    length: u32,
    cells: Box<[u8; CAP]>,
}

impl Snapshot {
    /// Copy up to `payload_capacity` live cell bytes out of `grid`.
    ///
    /// `payload_capacity` is clamped to [`CAP`]. When it is smaller than
    /// the grid, `length` records the number of bytes actually copied.
    pub fn capture(
        grid: &GridStore,
        generation: Generation,
        payload_capacity: usize,
    ) -> Result<Self, GridError> {
        let topology = grid.topology()?;
        let live = grid.live();
        let length = live.len().min(payload_capacity).min(CAP);

        let mut cells = Box::new([0u8; CAP]);
        cells[..length].copy_from_slice(&live[..length]);
        Ok(Self {
            generation,
            width: topology.width(),
            height: topology.height(),
            length: length as u32,
            cells,
        })
    }

    /// The generation this snapshot was taken at.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Grid width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of meaningful cell bytes.
    pub fn len(&self) -> usize {
        self.length as usize
    }

    /// Whether the snapshot carries no cell bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the snapshot carries every cell of the grid.
    pub fn is_complete(&self) -> bool {
        self.len() == (self.width as usize) * (self.height as usize)
    }

    /// The meaningful packed cell bytes.
    pub fn cells(&self) -> &[u8] {
        &self.cells[..self.len()]
    }

    /// Liveness of `(row, col)`. Cells outside the grid or past the
    /// payload read as dead.
    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        if row >= self.height || col >= self.width {
            return false;
        }
        let index = (row as usize) * (self.width as usize) + col as usize;
        self.cells().get(index).is_some_and(|&b| Cell::alive_bit(b))
    }

    /// Number of live cells in the payload.
    pub fn alive_count(&self) -> usize {
        self.cells().iter().filter(|&&b| Cell::alive_bit(b)).count()
    }

    /// Encode as a [`RECORD_LEN`]-byte record.
    pub fn to_record(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RECORD_LEN);
        out.extend_from_slice(&self.generation.0.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.length.to_le_bytes());
        out.extend_from_slice(&self.cells[..]);
        out
    }

    /// Decode a record produced by [`to_record`](Self::to_record).
    ///
    /// Bytes beyond [`RECORD_LEN`] are ignored. Cell bytes past `length`
    /// are zeroed in the result.
    pub fn from_record(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < RECORD_LEN {
            return Err(RecordError::Truncated { len: bytes.len() });
        }
        let word = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let generation = Generation(word(0));
        let width = word(4);
        let height = word(8);
        let length = word(12);

        if length as usize > CAP {
            return Err(RecordError::LengthExceedsCapacity { length });
        }
        if u64::from(length) > u64::from(width) * u64::from(height) {
            return Err(RecordError::LengthExceedsGrid {
                length,
                width,
                height,
            });
        }

        let mut cells = Box::new([0u8; CAP]);
        let payload = &bytes[RECORD_HEADER_LEN..RECORD_HEADER_LEN + length as usize];
        cells[..length as usize].copy_from_slice(payload);
        Ok(Self {
            generation,
            width,
            height,
            length,
            cells,
        })
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("generation", &self.generation)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("length", &self.length)
            .field("alive", &self.alive_count())
            .finish()
    }
}
