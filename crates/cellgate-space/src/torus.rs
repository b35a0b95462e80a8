//! 2D torus with 8-connected neighbourhood.

use crate::error::SpaceError;

/// Neighbour directions, in the order [`Torus::neighbours`] returns them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row above, column to the left.
    NorthWest,
    /// Row above.
    North,
    /// Row above, column to the right.
    NorthEast,
    /// Column to the left.
    West,
    /// Column to the right.
    East,
    /// Row below, column to the left.
    SouthWest,
    /// Row below.
    South,
    /// Row below, column to the right.
    SouthEast,
}

impl Direction {
    /// All eight directions in output order.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// `(row, col)` offset of this direction.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// A `width × height` grid whose edges connect to the opposite edge.
///
/// Cells are addressed by row-major linear index `row * width + col`.
/// Every cell has exactly eight neighbours. On a torus narrower or shorter
/// than three cells some of those neighbours coincide (a 1×1 torus is its
/// own neighbour eight times); that is the torus topology, not an error.
///
/// Dimensions are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Torus {
    width: u32,
    height: u32,
    /// `cell_count - 1` when the cell count is a power of two.
    mask: Option<u32>,
}

impl Torus {
    /// Create a torus with `width * height` cells.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::CellCountOverflow)` if the product overflows `u32`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        let cells = width
            .checked_mul(height)
            .ok_or(SpaceError::CellCountOverflow { width, height })?;
        let mask = cells.is_power_of_two().then(|| cells - 1);
        Ok(Self {
            width,
            height,
            mask,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells, `width * height`.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `index` addresses a cell of this torus.
    pub fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Whether [`neighbours`](Self::neighbours) takes the bitmask path.
    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    /// `(row, col)` of a linear index.
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index / w) as u32, (index % w) as u32)
    }

    /// Linear index of `(row, col)`. Both must be in range.
    pub fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width);
        (row as usize) * (self.width as usize) + col as usize
    }

    /// The eight neighbours of `index` in [`Direction::ALL`] order.
    ///
    /// `index` must be `< cell_count()`. Every returned index is.
    #[inline]
    pub fn neighbours(&self, index: usize) -> [usize; 8] {
        match self.mask {
            Some(mask) => self.neighbours_masked(index, mask),
            None => self.neighbours_wrapped(index),
        }
    }

    /// Branch-based wrap: column wrap at columns 0 and `width - 1`, row
    /// wrap at rows 0 and `height - 1`.
    pub fn neighbours_wrapped(&self, index: usize) -> [usize; 8] {
        debug_assert!(self.contains(index), "index {index} out of range");
        let w = self.width as usize;
        let h = self.height as usize;
        let row = index / w;
        let col = index % w;

        let left = if col == 0 { w - 1 } else { col - 1 };
        let right = if col == w - 1 { 0 } else { col + 1 };
        let up = (if row == 0 { h - 1 } else { row - 1 }) * w;
        let here = row * w;
        let down = (if row == h - 1 { 0 } else { row + 1 }) * w;

        [
            up + left,
            up + col,
            up + right,
            here + left,
            here + right,
            down + left,
            down + col,
            down + right,
        ]
    }

    /// Bitmask wrap for power-of-two cell counts.
    ///
    /// Only the column needs an explicit wrap; row wrap falls out of
    /// truncating `index ± width` modulo the cell count. Offsets are applied
    /// in wrapping `u32` arithmetic, and since the cell count divides 2^32
    /// the masked result equals the true modulo.
    fn neighbours_masked(&self, index: usize, mask: u32) -> [usize; 8] {
        debug_assert!(self.contains(index), "index {index} out of range");
        let w = self.width;
        let i = index as u32;
        let col = i % w;

        let left = if col == 0 { w - 1 } else { 1u32.wrapping_neg() };
        let right = if col == w - 1 { (w - 1).wrapping_neg() } else { 1 };
        let up = w.wrapping_neg();
        let down = w;

        let at = |dy: u32, dx: u32| (i.wrapping_add(dy).wrapping_add(dx) & mask) as usize;
        [
            at(up, left),
            at(up, 0),
            at(up, right),
            at(0, left),
            at(0, right),
            at(down, left),
            at(down, 0),
            at(down, right),
        ]
    }

    /// The neighbour of `index` in one direction.
    pub fn neighbour(&self, index: usize, direction: Direction) -> usize {
        self.neighbours(index)[direction as usize]
    }
}
