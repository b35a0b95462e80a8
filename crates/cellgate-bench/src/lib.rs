//! Benchmark profiles for the cellgate Life engine.
//!
//! - [`reference_engine`]: the default 64x64 torus seeded with 400 picks
//! - [`dense_engine`]: a 64x64 torus at roughly half density
//! - [`wrapped_engine`]: a 63x65 torus, forcing the non-masked wrap path

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cellgate_engine::{EngineConfig, LifeEngine};
use cellgate_grid::GridError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Engine of `width` x `height` seeded with `picks` random picks.
pub fn seeded_engine(
    width: u32,
    height: u32,
    picks: usize,
    seed: u64,
) -> Result<LifeEngine, GridError> {
    let mut engine = LifeEngine::with_dimensions(width, height)?;
    engine.seed_random(picks, &mut ChaCha8Rng::seed_from_u64(seed))?;
    Ok(engine)
}

/// The default configuration: 64x64, 400 seed picks.
pub fn reference_engine(seed: u64) -> Result<LifeEngine, GridError> {
    let cfg = EngineConfig::default();
    seeded_engine(cfg.width, cfg.height, cfg.seed_count, seed)
}

/// 64x64 with 2800 picks (about half the cells alive).
pub fn dense_engine(seed: u64) -> Result<LifeEngine, GridError> {
    seeded_engine(64, 64, 2800, seed)
}

/// 63x65: cell count is not a power of two, so neighbour lookups take
/// the branching wrap path.
pub fn wrapped_engine(seed: u64) -> Result<LifeEngine, GridError> {
    seeded_engine(63, 65, 400, seed)
}
