//! Fixed-capacity, double-buffered cell storage for cellgate.
//!
//! [`GridStore`] owns the two cell buffers of a Life grid:
//!
//! - `live`: mutated incrementally as cells are born and die;
//! - `frozen`: a point-in-time copy the engine reads while it rewrites
//!   `live`, so decisions for generation N+1 only ever see generation N.
//!
//! Both buffers are allocated once at exactly [`CAP`](cellgate_core::CAP)
//! bytes. Grid dimensions are fixed by [`GridStore::initialize`] and every
//! loop is bounded by the initialized cell count, never by capacity.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod store;

pub use error::GridError;
pub use store::GridStore;
