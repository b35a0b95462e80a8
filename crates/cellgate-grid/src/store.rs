//! The double-buffered cell store.

use cellgate_core::{Cell, CAP};
use cellgate_space::Torus;

use crate::error::GridError;

/// Owner of the `live` and `frozen` cell buffers of one grid.
///
/// A store starts uninitialized; every cell operation fails with
/// [`GridError::NotReady`] until [`initialize`](Self::initialize) fixes
/// the dimensions. Dimensions cannot change afterwards.
///
/// Cells are held as packed bytes (see [`Cell`]). The store maintains the
/// neighbour-count invariant itself: after any sequence of
/// [`set_alive`](Self::set_alive) / [`set_dead`](Self::set_dead) calls,
/// every cell's count equals the number of live cells among its eight
/// torus neighbours.
pub struct GridStore {
    live: Box<[u8; CAP]>,
    frozen: Box<[u8; CAP]>,
    topology: Option<Torus>,
}

impl GridStore {
    /// Create an uninitialized store with zeroed buffers.
    pub fn new() -> Self {
        Self {
            live: Box::new([0; CAP]),
            frozen: Box::new([0; CAP]),
            topology: None,
        }
    }

    /// Fix the grid dimensions and zero both buffers.
    ///
    /// # Errors
    ///
    /// - [`GridError::AlreadyInitialized`] if dimensions are already set.
    /// - [`GridError::CapacityExceeded`] if `width * height > CAP`.
    /// - [`GridError::Space`] if either dimension is zero.
    pub fn initialize(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        if let Some(t) = &self.topology {
            return Err(GridError::AlreadyInitialized {
                width: t.width(),
                height: t.height(),
            });
        }
        let requested = u64::from(width) * u64::from(height);
        if requested > CAP as u64 {
            return Err(GridError::CapacityExceeded {
                requested,
                capacity: CAP,
            });
        }
        let topology = Torus::new(width, height)?;
        self.live.fill(0);
        self.frozen.fill(0);
        self.topology = Some(topology);
        Ok(())
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.topology.is_some()
    }

    /// The grid topology, or [`GridError::NotReady`].
    pub fn topology(&self) -> Result<&Torus, GridError> {
        self.topology.as_ref().ok_or(GridError::NotReady)
    }

    /// Grid width; 0 before initialization.
    pub fn width(&self) -> u32 {
        self.topology.map_or(0, |t| t.width())
    }

    /// Grid height; 0 before initialization.
    pub fn height(&self) -> u32 {
        self.topology.map_or(0, |t| t.height())
    }

    /// Number of cells in use, `width * height`; 0 before initialization.
    pub fn len(&self) -> usize {
        self.topology.map_or(0, |t| t.cell_count())
    }

    /// Whether the grid has no cells in use (i.e. is uninitialized).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packed `live` bytes, bounded by the grid length.
    pub fn live(&self) -> &[u8] {
        &self.live[..self.len()]
    }

    /// Packed `frozen` bytes, bounded by the grid length.
    pub fn frozen(&self) -> &[u8] {
        &self.frozen[..self.len()]
    }

    /// Decoded cell from the `live` buffer.
    pub fn cell(&self, index: usize) -> Result<Cell, GridError> {
        let i = self.check_index(index)?;
        Ok(Cell::unpack(self.live[i])?)
    }

    /// Decoded cell from the `frozen` buffer.
    pub fn frozen_cell(&self, index: usize) -> Result<Cell, GridError> {
        let i = self.check_index(index)?;
        Ok(Cell::unpack(self.frozen[i])?)
    }

    /// Number of alive cells in the `live` buffer.
    pub fn alive_count(&self) -> usize {
        self.live().iter().filter(|&&b| Cell::alive_bit(b)).count()
    }

    /// Add `delta` to the neighbour-count field of the eight torus
    /// neighbours of `index`, leaving every alive bit untouched.
    ///
    /// `delta` must be `+NEIGHBOR_STEP` or `-NEIGHBOR_STEP` (one neighbour
    /// in packed form). The update is all-or-nothing: if any count would
    /// leave `0..=8` nothing is written. On tori narrower or shorter than
    /// three cells a neighbour may appear several times and receives the
    /// delta once per appearance.
    pub fn toggle_neighbors(&mut self, index: usize, delta: i8) -> Result<(), GridError> {
        let i = self.check_index(index)?;
        let step = Cell::NEIGHBOR_STEP as i8;
        if delta != step && delta != -step {
            return Err(GridError::InvalidDelta { delta });
        }
        let neighbours = self.topology()?.neighbours(i);

        // Stage every write first so a failing cell leaves the grid untouched.
        let mut staged = [(0usize, 0u8); 8];
        for (slot, &n) in neighbours.iter().enumerate() {
            let current = staged[..slot]
                .iter()
                .rev()
                .find(|(idx, _)| *idx == n)
                .map_or(self.live[n], |&(_, byte)| byte);
            let next = current
                .checked_add_signed(delta)
                .filter(|&b| Cell::neighbor_bits(b) <= Cell::MAX_NEIGHBORS)
                .ok_or(GridError::NeighborOverflow { index: n })?;
            staged[slot] = (n, next);
        }
        for (n, byte) in staged {
            self.live[n] = byte;
        }
        Ok(())
    }

    /// Make `index` alive and credit its neighbours.
    ///
    /// Returns `Ok(false)` without touching anything if the cell is already
    /// alive; crediting the neighbours twice would break the count
    /// invariant.
    pub fn set_alive(&mut self, index: usize) -> Result<bool, GridError> {
        let i = self.check_index(index)?;
        if Cell::alive_bit(self.live[i]) {
            return Ok(false);
        }
        self.toggle_neighbors(i, Cell::NEIGHBOR_STEP as i8)?;
        self.live[i] |= Cell::ALIVE_BIT;
        Ok(true)
    }

    /// Make `index` dead and debit its neighbours.
    ///
    /// Returns `Ok(false)` without touching anything if the cell is already
    /// dead.
    pub fn set_dead(&mut self, index: usize) -> Result<bool, GridError> {
        let i = self.check_index(index)?;
        if !Cell::alive_bit(self.live[i]) {
            return Ok(false);
        }
        self.toggle_neighbors(i, -(Cell::NEIGHBOR_STEP as i8))?;
        self.live[i] &= !Cell::ALIVE_BIT;
        Ok(true)
    }

    /// Copy `live` into `frozen`, bounded by the grid length.
    pub fn snapshot_into_frozen(&mut self) -> Result<(), GridError> {
        let len = self.topology()?.cell_count();
        self.frozen[..len].copy_from_slice(&self.live[..len]);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<usize, GridError> {
        let length = self.topology()?.cell_count();
        if index >= length {
            return Err(GridError::IndexOutOfRange { index, length });
        }
        Ok(index)
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GridStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridStore")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("alive", &self.alive_count())
            .finish()
    }
}
