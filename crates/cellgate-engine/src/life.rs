//! Generation stepping over a [`GridStore`].
//!
//! [`LifeEngine`] reads every decision from the frozen buffer and applies
//! the resulting transitions to the live buffer through
//! [`GridStore::set_alive`] / [`GridStore::set_dead`], so neighbour counts
//! are maintained incrementally and a cell's transition never influences
//! another cell's decision within the same generation.

use cellgate_core::{Cell, Transition};
use cellgate_grid::{GridError, GridStore};
use rand::Rng;

/// Summary of one stepping pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// One past the last cell index processed.
    pub next_index: usize,
    /// Cells that were dead and became alive.
    pub births: usize,
    /// Cells that were alive and died.
    pub deaths: usize,
}

impl StepOutcome {
    /// Total number of cells whose state changed.
    pub fn transitions(&self) -> usize {
        self.births + self.deaths
    }

    fn absorb(&mut self, other: StepOutcome) {
        self.next_index = other.next_index;
        self.births += other.births;
        self.deaths += other.deaths;
    }
}

/// Conway's Game of Life (B3/S23) on a toroidal [`GridStore`].
#[derive(Debug, Default)]
pub struct LifeEngine {
    grid: GridStore,
}

impl LifeEngine {
    /// Create an engine over an uninitialized grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the grid already initialized.
    pub fn with_dimensions(width: u32, height: u32) -> Result<Self, GridError> {
        let mut engine = Self::new();
        engine.initialize(width, height)?;
        Ok(engine)
    }

    /// Fix the grid dimensions. See [`GridStore::initialize`].
    pub fn initialize(&mut self, width: u32, height: u32) -> Result<(), GridError> {
        self.grid.initialize(width, height)
    }

    /// Read-only access to the underlying store.
    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Flat index of `(row, col)`, checked against the grid shape.
    pub fn index_of(&self, row: u32, col: u32) -> Result<usize, GridError> {
        let topology = self.grid.topology()?;
        if row >= topology.height() || col >= topology.width() {
            return Err(GridError::IndexOutOfRange {
                index: (row as usize) * (topology.width() as usize) + col as usize,
                length: topology.cell_count(),
            });
        }
        Ok(topology.index(row, col))
    }

    /// Bring a cell to life. Returns `Ok(false)` if it was already alive.
    pub fn set_cell(&mut self, index: usize) -> Result<bool, GridError> {
        self.grid.set_alive(index)
    }

    /// Kill a cell. Returns `Ok(false)` if it was already dead.
    pub fn clear_cell(&mut self, index: usize) -> Result<bool, GridError> {
        self.grid.set_dead(index)
    }

    /// Make `count` independent uniform picks over the grid and bring each
    /// picked cell to life.
    ///
    /// Repeated picks of the same cell are no-ops, so the number of live
    /// cells added is at most `count`. Returns that number.
    pub fn seed_random<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<usize, GridError> {
        let len = self.grid.topology()?.cell_count();
        let mut added = 0;
        for _ in 0..count {
            let index = rng.random_range(0..len);
            if self.grid.set_alive(index)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Copy the live buffer into the frozen buffer.
    ///
    /// Must be called before [`step_generation`](Self::step_generation) or
    /// the first [`step_range`](Self::step_range) of a generation.
    pub fn freeze(&mut self) -> Result<(), GridError> {
        self.grid.snapshot_into_frozen()
    }

    /// Freeze, then step the whole grid once.
    pub fn tick(&mut self) -> Result<StepOutcome, GridError> {
        self.freeze()?;
        self.step_generation()
    }

    /// Advance the whole grid by one generation.
    ///
    /// Requires a fresh [`freeze`](Self::freeze) since the last external
    /// mutation. The grid is walked one row per [`step_range`](Self::step_range)
    /// call, so the pass is bounded by the grid height.
    pub fn step_generation(&mut self) -> Result<StepOutcome, GridError> {
        let topology = *self.grid.topology()?;
        let row = topology.width() as usize;
        let len = topology.cell_count();

        let mut outcome = StepOutcome::default();
        while outcome.next_index < len {
            let part = self.step_range(outcome.next_index, row)?;
            outcome.absorb(part);
        }
        Ok(outcome)
    }

    /// Step at most `max_cells` cells starting at `start`.
    ///
    /// Cells whose frozen byte is zero (dead, no live neighbours) are
    /// skipped without decoding. The returned `next_index` is where the
    /// next call should resume; it equals the grid length once the pass is
    /// complete.
    pub fn step_range(&mut self, start: usize, max_cells: usize) -> Result<StepOutcome, GridError> {
        let len = self.grid.topology()?.cell_count();
        if start > len {
            return Err(GridError::IndexOutOfRange {
                index: start,
                length: len,
            });
        }
        let end = start.saturating_add(max_cells).min(len);

        let mut outcome = StepOutcome {
            next_index: end,
            ..StepOutcome::default()
        };
        for index in start..end {
            let byte = self.grid.frozen()[index];
            if byte == 0 {
                continue;
            }
            match Cell::unpack(byte)?.transition() {
                Transition::Birth => {
                    self.grid.set_alive(index)?;
                    outcome.births += 1;
                }
                Transition::Death => {
                    self.grid.set_dead(index)?;
                    outcome.deaths += 1;
                }
                Transition::Unchanged => {}
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine_with(width: u32, height: u32, alive: &[(u32, u32)]) -> LifeEngine {
        let mut e = LifeEngine::with_dimensions(width, height).unwrap();
        for &(r, c) in alive {
            let i = e.index_of(r, c).unwrap();
            e.set_cell(i).unwrap();
        }
        e
    }

    fn alive_set(e: &LifeEngine) -> Vec<usize> {
        (0..e.grid().len())
            .filter(|&i| e.grid().cell(i).unwrap().is_alive())
            .collect()
    }

    /// Plain B3/S23 over a bool grid, recomputing every neighbour count.
    fn naive_step(width: usize, height: usize, cells: &[bool]) -> Vec<bool> {
        let mut next = vec![false; cells.len()];
        for r in 0..height {
            for c in 0..width {
                let mut n = 0;
                for (dr, dc) in [
                    (-1i64, -1i64),
                    (-1, 0),
                    (-1, 1),
                    (0, -1),
                    (0, 1),
                    (1, -1),
                    (1, 0),
                    (1, 1),
                ] {
                    let rr = (r as i64 + dr).rem_euclid(height as i64) as usize;
                    let cc = (c as i64 + dc).rem_euclid(width as i64) as usize;
                    if cells[rr * width + cc] {
                        n += 1;
                    }
                }
                let alive = cells[r * width + c];
                next[r * width + c] = matches!((alive, n), (true, 2 | 3) | (false, 3));
            }
        }
        next
    }

    // ── Still lifes and oscillators ─────────────────────────────

    #[test]
    fn block_is_stable() {
        let mut e = engine_with(8, 8, &[(3, 3), (3, 4), (4, 3), (4, 4)]);
        let before = alive_set(&e);
        for _ in 0..4 {
            let out = e.tick().unwrap();
            assert_eq!(out.transitions(), 0);
        }
        assert_eq!(alive_set(&e), before);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut e = engine_with(8, 8, &[(4, 3), (4, 4), (4, 5)]);
        let horizontal = alive_set(&e);

        let out = e.tick().unwrap();
        assert_eq!(out.births, 2);
        assert_eq!(out.deaths, 2);
        let vertical: Vec<usize> = [(3, 4), (4, 4), (5, 4)]
            .iter()
            .map(|&(r, c)| e.index_of(r, c).unwrap())
            .collect();
        assert_eq!(alive_set(&e), vertical);

        e.tick().unwrap();
        assert_eq!(alive_set(&e), horizontal);
    }

    #[test]
    fn lone_cell_dies() {
        let mut e = engine_with(4, 4, &[(1, 1)]);
        let out = e.tick().unwrap();
        assert_eq!(out.deaths, 1);
        assert_eq!(e.grid().alive_count(), 0);
    }

    #[test]
    fn glider_wraps_around_torus() {
        let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut e = engine_with(8, 8, &glider);
        let start = alive_set(&e);
        // A glider moves one cell diagonally every four generations, so
        // 32 generations carry it around an 8x8 torus.
        for _ in 0..32 {
            e.tick().unwrap();
        }
        assert_eq!(alive_set(&e), start);
    }

    // ── Partial passes ──────────────────────────────────────────

    #[test]
    fn step_range_resumes_where_it_stopped() {
        let mut chunked = engine_with(8, 8, &[(4, 3), (4, 4), (4, 5), (1, 1), (1, 2), (2, 1)]);
        let mut whole = engine_with(8, 8, &[(4, 3), (4, 4), (4, 5), (1, 1), (1, 2), (2, 1)]);

        chunked.freeze().unwrap();
        let mut next = 0;
        let mut calls = 0;
        while next < 64 {
            next = chunked.step_range(next, 5).unwrap().next_index;
            calls += 1;
        }
        assert_eq!(calls, 13);

        whole.tick().unwrap();
        assert_eq!(chunked.grid().live(), whole.grid().live());
    }

    #[test]
    fn step_range_past_end_is_rejected() {
        let mut e = engine_with(4, 4, &[]);
        e.freeze().unwrap();
        assert_eq!(e.step_range(16, 4).unwrap().next_index, 16);
        assert!(matches!(
            e.step_range(17, 4),
            Err(GridError::IndexOutOfRange { index: 17, length: 16 })
        ));
    }

    #[test]
    fn step_generation_reports_grid_length() {
        let mut e = engine_with(5, 3, &[]);
        assert_eq!(e.tick().unwrap().next_index, 15);
    }

    // ── Seeding ─────────────────────────────────────────────────

    #[test]
    fn seed_random_is_bounded_by_count() {
        let mut e = LifeEngine::with_dimensions(16, 16).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let added = e.seed_random(100, &mut rng).unwrap();
        assert!(added <= 100);
        assert!(added > 0);
        assert_eq!(e.grid().alive_count(), added);
    }

    #[test]
    fn seed_random_same_seed_same_grid() {
        let mut a = LifeEngine::with_dimensions(64, 64).unwrap();
        let mut b = LifeEngine::with_dimensions(64, 64).unwrap();
        a.seed_random(400, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        b.seed_random(400, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a.grid().live(), b.grid().live());
    }

    #[test]
    fn seed_random_saturates_tiny_grid() {
        let mut e = LifeEngine::with_dimensions(2, 2).unwrap();
        let added = e.seed_random(1000, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert_eq!(added, 4);
        assert_eq!(e.grid().alive_count(), 4);
    }

    // ── Readiness ───────────────────────────────────────────────

    #[test]
    fn uninitialized_engine_is_not_ready() {
        let mut e = LifeEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(e.set_cell(0), Err(GridError::NotReady));
        assert_eq!(e.seed_random(1, &mut rng), Err(GridError::NotReady));
        assert_eq!(e.freeze(), Err(GridError::NotReady));
        assert_eq!(e.step_generation(), Err(GridError::NotReady));
        assert_eq!(e.index_of(0, 0), Err(GridError::NotReady));
    }

    #[test]
    fn index_of_rejects_outside_coords() {
        let e = LifeEngine::with_dimensions(4, 3).unwrap();
        assert_eq!(e.index_of(2, 3), Ok(11));
        assert!(e.index_of(3, 0).is_err());
        assert!(e.index_of(0, 4).is_err());
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn step_matches_naive_rule(
            width in 1u32..=12,
            height in 1u32..=12,
            seed in any::<u64>(),
            density in 0usize..=60,
        ) {
            let mut e = LifeEngine::with_dimensions(width, height).unwrap();
            let len = (width * height) as usize;
            e.seed_random(len * density / 100, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();

            let before: Vec<bool> = (0..len)
                .map(|i| e.grid().cell(i).unwrap().is_alive())
                .collect();
            let expected = naive_step(width as usize, height as usize, &before);

            e.tick().unwrap();
            let after: Vec<bool> = (0..len)
                .map(|i| e.grid().cell(i).unwrap().is_alive())
                .collect();
            prop_assert_eq!(after, expected);
        }
    }
}
