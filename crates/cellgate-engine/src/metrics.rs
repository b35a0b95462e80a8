//! Per-tick and cumulative counters for the Life engine.

use cellgate_core::Generation;

/// Timing and transition counts for a single tick.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Generation published (or attempted) by this tick.
    pub generation: Generation,
    /// Wall-clock time for the entire tick.
    pub total_us: u64,
    /// Time spent copying live into frozen.
    pub freeze_us: u64,
    /// Time spent in the stepping pass.
    pub step_us: u64,
    /// Time spent building and offering the snapshot.
    pub publish_us: u64,
    /// Cells born this tick.
    pub births: usize,
    /// Cells that died this tick.
    pub deaths: usize,
    /// Live cells after the tick.
    pub alive: usize,
    /// Whether the snapshot reached the sink.
    pub published: bool,
}

/// Cumulative publish outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishStats {
    /// Snapshots accepted by the sink.
    pub published: u64,
    /// Snapshots dropped because the sink was full.
    pub dropped_full: u64,
    /// Snapshots dropped because the consumer went away.
    pub dropped_disconnected: u64,
}

impl PublishStats {
    /// Every snapshot that did not reach the sink.
    pub fn dropped(&self) -> u64 {
        self.dropped_full + self.dropped_disconnected
    }
}
