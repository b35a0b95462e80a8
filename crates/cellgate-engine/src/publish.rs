//! Non-blocking snapshot delivery.
//!
//! The tick thread never waits on a consumer. A [`SnapshotSink`] either
//! accepts a snapshot immediately or rejects it; a rejected snapshot is
//! dropped and counted, and the tick completes normally.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use cellgate_core::{Generation, CAP};
use cellgate_grid::GridStore;
use crossbeam_channel::{Sender, TrySendError};

use crate::metrics::PublishStats;
use crate::snapshot::Snapshot;

// ── PublishError ───────────────────────────────────────────────────

/// Why a snapshot did not reach its consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublishError {
    /// The sink is at capacity (back-pressure).
    ChannelFull,
    /// The consumer side has gone away.
    Disconnected,
    /// The grid has no dimensions yet.
    NotReady,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelFull => write!(f, "snapshot channel full"),
            Self::Disconnected => write!(f, "snapshot consumer disconnected"),
            Self::NotReady => write!(f, "grid not initialized"),
        }
    }
}

impl Error for PublishError {}

// ── SnapshotSink ───────────────────────────────────────────────────

/// Destination for published snapshots.
///
/// Implementations must not block.
pub trait SnapshotSink: Send {
    /// Hand over a snapshot, or reject it without waiting.
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError>;
}

impl SnapshotSink for Sender<Snapshot> {
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        self.try_send(snapshot).map_err(|e| match e {
            TrySendError::Full(_) => PublishError::ChannelFull,
            TrySendError::Disconnected(_) => PublishError::Disconnected,
        })
    }
}

impl<T: SnapshotSink + Sync + ?Sized> SnapshotSink for Arc<T> {
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        (**self).offer(snapshot)
    }
}

impl<T: SnapshotSink + ?Sized> SnapshotSink for Box<T> {
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        (**self).offer(snapshot)
    }
}

// ── SnapshotPublisher ──────────────────────────────────────────────

/// Captures snapshots from a grid and offers them to a sink.
pub struct SnapshotPublisher<S> {
    sink: S,
    payload_capacity: usize,
    stats: PublishStats,
}

impl<S: SnapshotSink> SnapshotPublisher<S> {
    /// Wrap `sink`, copying at most `payload_capacity` cell bytes
    /// (clamped to [`CAP`]) per snapshot.
    pub fn new(sink: S, payload_capacity: usize) -> Self {
        Self {
            sink,
            payload_capacity: payload_capacity.min(CAP),
            stats: PublishStats::default(),
        }
    }

    /// Capture the live buffer of `grid` as `generation` and offer it.
    ///
    /// Rejections are logged and counted; the caller decides whether they
    /// matter.
    pub fn publish(&mut self, grid: &GridStore, generation: Generation) -> Result<(), PublishError> {
        let snapshot = Snapshot::capture(grid, generation, self.payload_capacity)
            .map_err(|_| PublishError::NotReady)?;
        match self.sink.offer(snapshot) {
            Ok(()) => {
                self.stats.published += 1;
                Ok(())
            }
            Err(PublishError::ChannelFull) => {
                self.stats.dropped_full += 1;
                log::warn!("snapshot for generation {generation} dropped: channel full");
                Err(PublishError::ChannelFull)
            }
            Err(PublishError::Disconnected) => {
                self.stats.dropped_disconnected += 1;
                log::debug!("snapshot for generation {generation} dropped: consumer gone");
                Err(PublishError::Disconnected)
            }
            Err(e) => Err(e),
        }
    }

    /// Cumulative outcomes since construction.
    pub fn stats(&self) -> PublishStats {
        self.stats
    }

    /// Effective payload capacity.
    pub fn payload_capacity(&self) -> usize {
        self.payload_capacity
    }

    /// The wrapped sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Unwrap the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
