//! Mock snapshot sinks.
//!
//! - [`RejectingSink`]: refuses everything with a fixed error.
//! - [`RecordingSink`]: keeps every snapshot; clones share storage.
//! - [`ThrottledSink`]: accepts the first N snapshots, then reports full.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cellgate_engine::{PublishError, Snapshot, SnapshotSink};

/// Rejects every snapshot and counts the attempts.
pub struct RejectingSink {
    error: PublishError,
    attempts: Arc<AtomicUsize>,
}

impl RejectingSink {
    /// Reject with [`PublishError::ChannelFull`].
    pub fn full() -> Self {
        Self::with_error(PublishError::ChannelFull)
    }

    /// Reject with [`PublishError::Disconnected`].
    pub fn disconnected() -> Self {
        Self::with_error(PublishError::Disconnected)
    }

    pub fn with_error(error: PublishError) -> Self {
        Self {
            error,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `offer` calls, readable after the sink moves.
    pub fn attempts(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempts)
    }
}

impl SnapshotSink for RejectingSink {
    fn offer(&self, _snapshot: Snapshot) -> Result<(), PublishError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(self.error.clone())
    }
}

/// Accepts and stores every snapshot.
///
/// Clones share the same storage, so a test can keep one clone and move
/// the other into the engine.
#[derive(Clone, Default)]
pub struct RecordingSink {
    received: Arc<Mutex<Vec<Snapshot>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn received(&self) -> MutexGuard<'_, Vec<Snapshot>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything received so far, in arrival order.
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.received().clone()
    }

    /// Generations received so far, in arrival order.
    pub fn generations(&self) -> Vec<u32> {
        self.received()
            .iter()
            .map(|s| s.generation().0)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.received().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotSink for RecordingSink {
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        self.received().push(snapshot);
        Ok(())
    }
}

/// Accepts the first `accept` snapshots, then reports full forever.
pub struct ThrottledSink {
    inner: RecordingSink,
    accept: usize,
}

impl ThrottledSink {
    /// Returns the sink and a handle to what it accepted.
    pub fn new(accept: usize) -> (Self, RecordingSink) {
        let inner = RecordingSink::new();
        (
            Self {
                inner: inner.clone(),
                accept,
            },
            inner,
        )
    }
}

impl SnapshotSink for ThrottledSink {
    fn offer(&self, snapshot: Snapshot) -> Result<(), PublishError> {
        if self.inner.len() >= self.accept {
            return Err(PublishError::ChannelFull);
        }
        self.inner.offer(snapshot)
    }
}
