//! cellgate: Conway's Game of Life on a fixed torus, armed once and
//! ticked periodically.
//!
//! This is the facade crate that re-exports the public API of the
//! `cellgate-*` sub-crates and adds terminal rendering for snapshots.
//!
//! # Quick start
//!
//! ```rust
//! use cellgate::prelude::*;
//! use std::time::Duration;
//!
//! let config = EngineConfig {
//!     width: 16,
//!     height: 16,
//!     seed_count: 40,
//!     tick_interval: Duration::from_millis(10),
//!     rng_seed: Some(7),
//!     ..EngineConfig::default()
//! };
//! let (tx, rx) = config.snapshot_channel();
//! let activation = Activation::new(config, tx).unwrap();
//! assert!(activation.try_activate().unwrap());
//!
//! let first = rx.recv().unwrap();
//! assert_eq!(first.generation(), Generation(0));
//! let next = rx.recv().unwrap();
//! assert_eq!(next.generation(), Generation(1));
//! activation.shutdown();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cellgate-core` | `Cell`, `Generation`, `CAP` |
//! | [`space`] | `cellgate-space` | `Torus` neighbour arithmetic |
//! | [`grid`] | `cellgate-grid` | `GridStore` double-buffered cells |
//! | [`engine`] | `cellgate-engine` | Life rule, scheduler, publishing, activation |
//! | [`render`] | this crate | ANSI and plain-text snapshot rendering |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod render;

/// Cell value type, generation counter and buffer capacity (`cellgate-core`).
pub use cellgate_core as types;

/// Toroidal neighbour arithmetic (`cellgate-space`).
pub use cellgate_space as space;

/// Double-buffered cell storage with incremental neighbour counts
/// (`cellgate-grid`).
pub use cellgate_grid as grid;

/// Life engine, scheduler, snapshot publishing and activation
/// (`cellgate-engine`).
pub use cellgate_engine as engine;

/// Common imports.
///
/// ```rust
/// use cellgate::prelude::*;
/// ```
pub mod prelude {
    pub use cellgate_core::{Cell, Generation, Transition, CAP};

    pub use cellgate_space::{Direction, SpaceError, Torus};

    pub use cellgate_grid::{GridError, GridStore};

    pub use cellgate_engine::{
        Activation, ActivationError, ActivationLatch, ArmError, ConfigError, EngineConfig,
        LifeEngine, LifeWorld, PacketTrigger, PublishError, RecordRing, Scheduler, Snapshot,
        SnapshotSink, TickMetrics,
    };

    pub use crate::render::{render_ansi, render_plain};
}
