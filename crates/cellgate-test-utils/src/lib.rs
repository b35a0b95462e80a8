//! Test utilities for cellgate development.
//!
//! Pattern placement, a from-scratch reference Life step to check the
//! incremental engine against, and mock [`SnapshotSink`]s in [`fixtures`].
//!
//! [`SnapshotSink`]: cellgate_engine::SnapshotSink

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{RecordingSink, RejectingSink, ThrottledSink};

use cellgate_engine::LifeEngine;
use cellgate_grid::GridError;

/// Offsets (row, col) of well-known patterns, relative to their top-left.
pub mod patterns {
    /// 2x2 still life.
    pub const BLOCK: &[(u32, u32)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
    /// Period-2 oscillator, horizontal phase.
    pub const BLINKER: &[(u32, u32)] = &[(0, 0), (0, 1), (0, 2)];
    /// Period-2 oscillator, vertical phase.
    pub const BLINKER_VERTICAL: &[(u32, u32)] = &[(0, 0), (1, 0), (2, 0)];
    /// South-east travelling glider.
    pub const GLIDER: &[(u32, u32)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    /// Period-2 oscillator of six cells.
    pub const TOAD: &[(u32, u32)] = &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)];
    /// 6-cell still life.
    pub const BEEHIVE: &[(u32, u32)] = &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)];
}

/// Bring `pattern` to life with its top-left corner at `(row, col)`.
/// Offsets wrap around the torus.
pub fn place(
    engine: &mut LifeEngine,
    pattern: &[(u32, u32)],
    row: u32,
    col: u32,
) -> Result<(), GridError> {
    let topology = *engine.grid().topology()?;
    for &(dr, dc) in pattern {
        let r = (row + dr) % topology.height();
        let c = (col + dc) % topology.width();
        engine.set_cell(topology.index(r, c))?;
    }
    Ok(())
}

/// Engine of the given size with `pattern` placed at `(row, col)`.
///
/// # Panics
///
/// Panics if the dimensions are rejected.
pub fn engine_with(
    width: u32,
    height: u32,
    pattern: &[(u32, u32)],
    row: u32,
    col: u32,
) -> LifeEngine {
    let mut engine = LifeEngine::with_dimensions(width, height).unwrap();
    place(&mut engine, pattern, row, col).unwrap();
    engine
}

/// Sorted indices of all live cells.
pub fn live_cells(engine: &LifeEngine) -> Vec<usize> {
    let grid = engine.grid();
    (0..grid.len())
        .filter(|&i| grid.cell(i).map(|c| c.is_alive()).unwrap_or(false))
        .collect()
}

/// Liveness of every cell as a flat `Vec<bool>`.
pub fn alive_vec(engine: &LifeEngine) -> Vec<bool> {
    let grid = engine.grid();
    (0..grid.len())
        .map(|i| grid.cell(i).map(|c| c.is_alive()).unwrap_or(false))
        .collect()
}

const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One B3/S23 generation over a flat bool torus, recounting every
/// neighbourhood from scratch. Slow, obviously correct.
pub fn reference_step(width: usize, height: usize, cells: &[bool]) -> Vec<bool> {
    assert_eq!(cells.len(), width * height);
    let (w, h) = (width as i64, height as i64);
    let mut next = vec![false; cells.len()];
    for r in 0..h {
        for c in 0..w {
            let mut n = 0;
            for (dr, dc) in NEIGHBOUR_OFFSETS {
                let rr = (r + dr).rem_euclid(h);
                let cc = (c + dc).rem_euclid(w);
                n += usize::from(cells[(rr * w + cc) as usize]);
            }
            let i = (r * w + c) as usize;
            next[i] = matches!((cells[i], n), (true, 2 | 3) | (false, 3));
        }
    }
    next
}
