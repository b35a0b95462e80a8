//! Packed one-byte cell encoding and the Conway transition rule.
//!
//! Each grid position is stored as a single byte:
//!
//! ```text
//!  bit  7 6 5 4 3 2 1 | 0
//!      neighbour count | alive
//! ```
//!
//! The neighbour count is kept pre-shifted left by one, so adding or
//! removing a live neighbour is a plain `±2` on the byte and never touches
//! the alive bit. [`Cell`] is the unpacked view; storage code works on raw
//! bytes and goes through the constants and helpers here instead of
//! repeating the bit arithmetic.

use std::fmt;

/// Unpacked cell: alive flag plus live-neighbour count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    alive: bool,
    neighbors: u8,
}

/// Outcome of applying the Life rule to one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Dead cell with exactly three live neighbours becomes alive.
    Birth,
    /// Live cell without two or three live neighbours dies.
    Death,
    /// State does not change.
    Unchanged,
}

/// A byte whose neighbour field exceeds [`Cell::MAX_NEIGHBORS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidCell(pub u8);

impl fmt::Display for InvalidCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell byte {:#04x} encodes {} neighbours (max {})",
            self.0,
            self.0 >> Cell::NEIGHBOR_SHIFT,
            Cell::MAX_NEIGHBORS
        )
    }
}

impl std::error::Error for InvalidCell {}

impl Cell {
    /// Mask of the alive flag inside a packed byte.
    pub const ALIVE_BIT: u8 = 0x01;
    /// Left shift applied to the neighbour count.
    pub const NEIGHBOR_SHIFT: u32 = 1;
    /// Byte delta corresponding to one live neighbour.
    pub const NEIGHBOR_STEP: u8 = 1 << Self::NEIGHBOR_SHIFT;
    /// A torus cell has exactly eight neighbour slots.
    pub const MAX_NEIGHBORS: u8 = 8;
    /// Dead, no live neighbours. Packs to `0`.
    pub const EMPTY: Cell = Cell {
        alive: false,
        neighbors: 0,
    };

    /// Build a cell, or `None` if `neighbors` exceeds [`Self::MAX_NEIGHBORS`].
    pub fn new(alive: bool, neighbors: u8) -> Option<Self> {
        (neighbors <= Self::MAX_NEIGHBORS).then_some(Self { alive, neighbors })
    }

    /// Whether the cell is alive.
    pub fn is_alive(self) -> bool {
        self.alive
    }

    /// Number of live neighbours.
    pub fn neighbors(self) -> u8 {
        self.neighbors
    }

    /// Encode into the packed byte form.
    pub fn pack(self) -> u8 {
        (self.neighbors << Self::NEIGHBOR_SHIFT) | u8::from(self.alive)
    }

    /// Decode a packed byte, rejecting neighbour counts above eight.
    pub fn unpack(byte: u8) -> Result<Self, InvalidCell> {
        let neighbors = byte >> Self::NEIGHBOR_SHIFT;
        if neighbors > Self::MAX_NEIGHBORS {
            return Err(InvalidCell(byte));
        }
        Ok(Self {
            alive: byte & Self::ALIVE_BIT != 0,
            neighbors,
        })
    }

    /// Alive flag of a packed byte.
    #[inline]
    pub fn alive_bit(byte: u8) -> bool {
        byte & Self::ALIVE_BIT != 0
    }

    /// Neighbour count of a packed byte.
    #[inline]
    pub fn neighbor_bits(byte: u8) -> u8 {
        byte >> Self::NEIGHBOR_SHIFT
    }

    /// Standard Conway rule (B3/S23).
    pub fn transition(self) -> Transition {
        match (self.alive, self.neighbors) {
            (true, 2 | 3) => Transition::Unchanged,
            (true, _) => Transition::Death,
            (false, 3) => Transition::Birth,
            (false, _) => Transition::Unchanged,
        }
    }

    /// Alive state in the next generation.
    pub fn next_alive(self) -> bool {
        match self.transition() {
            Transition::Birth => true,
            Transition::Death => false,
            Transition::Unchanged => self.alive,
        }
    }
}
