//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is fixed at initialization: nothing in it can be
//! changed once the engine is armed. [`validate()`](EngineConfig::validate)
//! checks every structural invariant up front so that a bad configuration
//! is rejected before the activation latch is ever consulted.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use cellgate_core::CAP;
use cellgate_grid::GridError;
use crossbeam_channel::{Receiver, Sender};

use crate::snapshot::Snapshot;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EngineConfig::validate()`] or world construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    EmptyGrid,
    /// `width * height` exceeds [`CAP`].
    CapacityExceeded {
        /// Requested cell count.
        requested: u64,
        /// Maximum supported cell count.
        capacity: usize,
    },
    /// Snapshot payload capacity is zero or above [`CAP`].
    InvalidPayloadCapacity {
        /// The configured capacity.
        value: usize,
    },
    /// Tick interval is zero.
    ZeroInterval,
    /// Snapshot channel capacity is zero.
    ZeroChannelCapacity,
    /// Grid storage rejected the configuration.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid width and height must be non-zero"),
            Self::CapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "grid of {requested} cells exceeds capacity of {capacity}"
            ),
            Self::InvalidPayloadCapacity { value } => {
                write!(f, "payload_capacity must be in 1..={CAP}, got {value}")
            }
            Self::ZeroInterval => write!(f, "tick_interval must be non-zero"),
            Self::ZeroChannelCapacity => write!(f, "channel_capacity must be at least 1"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for one Life engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid width in cells. Default: 64.
    pub width: u32,
    /// Grid height in cells. Default: 64.
    pub height: u32,
    /// Number of random picks made when seeding. Default: 400.
    ///
    /// Picks are independent, so the number of live cells after seeding
    /// is at most this value.
    pub seed_count: usize,
    /// Pause between the end of one tick and the start of the next.
    /// Default: 2 s.
    pub tick_interval: Duration,
    /// Maximum number of cell bytes copied into each snapshot.
    /// Default: [`CAP`].
    pub payload_capacity: usize,
    /// Bound of the snapshot channel built by
    /// [`snapshot_channel`](Self::snapshot_channel). Default: 4.
    pub channel_capacity: usize,
    /// Fixed RNG seed for reproducible seeding. `None` draws a fresh seed.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            seed_count: 400,
            tick_interval: Duration::from_secs(2),
            payload_capacity: CAP,
            channel_capacity: 4,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Non-empty grid.
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        // 2. Fits the fixed buffers.
        let requested = u64::from(self.width) * u64::from(self.height);
        if requested > CAP as u64 {
            return Err(ConfigError::CapacityExceeded {
                requested,
                capacity: CAP,
            });
        }
        // 3. Payload fits the record.
        if self.payload_capacity == 0 || self.payload_capacity > CAP {
            return Err(ConfigError::InvalidPayloadCapacity {
                value: self.payload_capacity,
            });
        }
        // 4. Scheduler and channel.
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }

    /// `width * height`.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// A bounded snapshot channel sized by `channel_capacity`.
    pub fn snapshot_channel(&self) -> (Sender<Snapshot>, Receiver<Snapshot>) {
        crossbeam_channel::bounded(self.channel_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.cell_count(), 4096);
        assert_eq!(cfg.tick_interval, Duration::from_secs(2));
    }

    #[test]
    fn validate_zero_dimension_fails() {
        let cfg = EngineConfig {
            height: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn validate_over_capacity_fails() {
        let cfg = EngineConfig {
            width: 128,
            height: 64,
            ..EngineConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::CapacityExceeded {
                requested: 8192,
                capacity: CAP,
            }) => {}
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn validate_payload_capacity_bounds() {
        for value in [0, CAP + 1] {
            let cfg = EngineConfig {
                payload_capacity: value,
                ..EngineConfig::default()
            };
            assert_eq!(
                cfg.validate(),
                Err(ConfigError::InvalidPayloadCapacity { value })
            );
        }
    }

    #[test]
    fn validate_zero_interval_fails() {
        let cfg = EngineConfig {
            tick_interval: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn validate_zero_channel_capacity_fails() {
        let cfg = EngineConfig {
            channel_capacity: 0,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroChannelCapacity));
    }

    #[test]
    fn snapshot_channel_is_bounded() {
        let cfg = EngineConfig {
            channel_capacity: 2,
            ..EngineConfig::default()
        };
        let (tx, _rx) = cfg.snapshot_channel();
        assert_eq!(tx.capacity(), Some(2));
    }

    #[test]
    fn grid_error_display_chains() {
        let err = ConfigError::from(GridError::NotReady);
        assert!(format!("{err}").contains("not initialized"));
        assert!(err.source().is_some());
    }
}
