//! Core types for the cellgate Life engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! packed [`Cell`] encoding shared by storage, engine and snapshot consumers,
//! the [`Generation`] counter, and the fixed grid capacity [`CAP`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod id;

pub use cell::{Cell, Transition};
pub use id::Generation;

/// Hard upper bound on the number of cells in a grid.
///
/// Every cell buffer and snapshot payload is allocated at exactly this size,
/// regardless of the configured width and height.
pub const CAP: usize = 4096;
