//! Toroidal grid topology for cellgate.
//!
//! [`Torus`] maps linear cell indices on a `width × height` grid to their
//! eight wrap-around neighbours. It is the only place in the workspace that
//! knows how rows and columns wrap; storage and the Life engine consume the
//! neighbour arrays it returns.
//!
//! Two strategies are provided:
//!
//! - branch-based row/column wrap, valid for every grid shape;
//! - bitmask truncation, used automatically when the cell count is a power
//!   of two and tested against the true modulo result.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod torus;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::SpaceError;
pub use torus::{Direction, Torus};
