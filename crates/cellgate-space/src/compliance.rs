//! Torus compliance test helpers.
//!
//! These functions check the neighbour contract against a brute-force
//! modulo model. Reused by every torus test in this crate.

use crate::torus::{Direction, Torus};

/// Neighbours computed with `rem_euclid` on `(row, col)`.
pub fn reference_neighbours(t: &Torus, index: usize) -> [usize; 8] {
    let w = i64::from(t.width());
    let h = i64::from(t.height());
    let (row, col) = t.coords(index);
    let mut out = [0usize; 8];
    for (slot, dir) in Direction::ALL.iter().enumerate() {
        let (dr, dc) = dir.offset();
        let r = (i64::from(row) + dr).rem_euclid(h);
        let c = (i64::from(col) + dc).rem_euclid(w);
        out[slot] = (r * w + c) as usize;
    }
    out
}

/// Assert every neighbour index lies in `[0, cell_count)`.
pub fn assert_neighbours_in_range(t: &Torus) {
    for i in 0..t.cell_count() {
        for n in t.neighbours(i) {
            assert!(
                n < t.cell_count(),
                "neighbour {n} of {i} out of range for {}x{}",
                t.width(),
                t.height()
            );
        }
    }
}

/// Assert `neighbours` equals the modulo reference for every cell.
pub fn assert_matches_reference(t: &Torus) {
    for i in 0..t.cell_count() {
        assert_eq!(
            t.neighbours(i),
            reference_neighbours(t, i),
            "neighbours({i}) diverge on {}x{}",
            t.width(),
            t.height()
        );
    }
}

/// Assert that `b` appears in N(a) exactly as often as `a` appears in N(b).
pub fn assert_neighbours_symmetric(t: &Torus) {
    for a in 0..t.cell_count() {
        for b in t.neighbours(a) {
            let ab = t.neighbours(a).iter().filter(|&&x| x == b).count();
            let ba = t.neighbours(b).iter().filter(|&&x| x == a).count();
            assert_eq!(ab, ba, "neighbour multiplicity asymmetric: {a} <-> {b}");
        }
    }
}

/// Assert each cell is counted as a neighbour exactly eight times overall.
pub fn assert_uniform_in_degree(t: &Torus) {
    let mut in_degree = vec![0usize; t.cell_count()];
    for i in 0..t.cell_count() {
        for n in t.neighbours(i) {
            in_degree[n] += 1;
        }
    }
    assert!(
        in_degree.iter().all(|&d| d == 8),
        "non-uniform in-degree on {}x{}",
        t.width(),
        t.height()
    );
}

/// Run every compliance check.
pub fn run_full_compliance(t: &Torus) {
    assert_neighbours_in_range(t);
    assert_matches_reference(t);
    assert_neighbours_symmetric(t);
    assert_uniform_in_degree(t);
}
