//! One-shot activation: build, seed, publish generation 0, and arm.
//!
//! [`Activation`] is shared (typically behind an `Arc`) by every thread
//! that may trigger the engine. The [`ActivationLatch`] decides which
//! caller performs initialization; every other call is a no-op, so
//! initialization happens exactly once no matter how many triggers race.

use std::error::Error;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cellgate_grid::GridError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, EngineConfig};
use crate::latch::ActivationLatch;
use crate::publish::SnapshotSink;
use crate::scheduler::{ArmError, Scheduler};
use crate::trigger::PacketTrigger;
use crate::world::LifeWorld;

// ── ActivationError ────────────────────────────────────────────────

/// Errors from the activating call.
///
/// The latch stays armed after any of these: activation is never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivationError {
    /// The world could not be built from the configuration.
    Config(ConfigError),
    /// Seeding failed.
    Grid(GridError),
    /// The tick thread could not be started.
    Arm(ArmError),
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Grid(e) => write!(f, "seeding: {e}"),
            Self::Arm(e) => write!(f, "arming: {e}"),
        }
    }
}

impl Error for ActivationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Arm(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ActivationError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for ActivationError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ArmError> for ActivationError {
    fn from(e: ArmError) -> Self {
        Self::Arm(e)
    }
}

// ── Activation ─────────────────────────────────────────────────────

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared entry point that starts the engine on the first trigger.
pub struct Activation<S: SnapshotSink + 'static> {
    config: EngineConfig,
    trigger: PacketTrigger,
    latch: ActivationLatch,
    sink: Mutex<Option<S>>,
    scheduler: Mutex<Option<Scheduler<S>>>,
}

impl<S: SnapshotSink + 'static> Activation<S> {
    /// Validate `config` and hold `sink` until activation.
    pub fn new(config: EngineConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            trigger: PacketTrigger::default(),
            latch: ActivationLatch::new(),
            sink: Mutex::new(Some(sink)),
            scheduler: Mutex::new(None),
        })
    }

    /// Replace the packet trigger.
    pub fn with_trigger(mut self, trigger: PacketTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The packet trigger.
    pub fn trigger(&self) -> PacketTrigger {
        self.trigger
    }

    /// Feed one raw IPv4 packet. Activates on the first match.
    ///
    /// Returns `Ok(true)` only for the call that activated the engine.
    pub fn observe_packet(&self, packet: &[u8]) -> Result<bool, ActivationError> {
        if !self.trigger.matches(packet) {
            return Ok(false);
        }
        self.try_activate()
    }

    /// Report a TCP peer whose source port is already known, e.g. from an
    /// accepted connection. Activates when it is the trigger port.
    pub fn observe_source_port(&self, port: u16) -> Result<bool, ActivationError> {
        if port != self.trigger.source_port() {
            return Ok(false);
        }
        self.try_activate()
    }

    /// Activate unconditionally (first caller only).
    ///
    /// The winning caller initializes the grid, seeds it, publishes
    /// generation 0, and arms the scheduler, in that order. Returns
    /// `Ok(false)` for every later call.
    ///
    /// The scheduler slot stays locked from the latch claim until the tick
    /// thread is stored, so [`shutdown`](Self::shutdown) either waits for
    /// arming to finish or runs before the latch is claimed.
    pub fn try_activate(&self) -> Result<bool, ActivationError> {
        let mut slot = lock(&self.scheduler);
        if !self.latch.try_arm() {
            log::trace!("activation ignored: already armed");
            return Ok(false);
        }
        let Some(sink) = lock(&self.sink).take() else {
            return Ok(false);
        };

        let mut world = LifeWorld::new(&self.config, sink)?;
        let seed = self.config.rng_seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let alive = world.seed(self.config.seed_count, &mut rng)?;
        log::info!(
            "activated: {}x{} grid, {} live cells (rng seed {seed})",
            self.config.width,
            self.config.height,
            alive
        );

        if let Err(e) = world.publish_current() {
            log::warn!("initial snapshot not delivered: {e}");
        }

        let mut scheduler = Scheduler::new(world, self.config.tick_interval);
        scheduler.arm()?;
        *slot = Some(scheduler);
        Ok(true)
    }

    /// Whether activation has been claimed.
    pub fn is_armed(&self) -> bool {
        self.latch.is_armed()
    }

    /// Whether the tick thread is running.
    pub fn is_running(&self) -> bool {
        lock(&self.scheduler)
            .as_ref()
            .is_some_and(Scheduler::is_armed)
    }

    /// Ticks completed by the scheduler so far.
    pub fn completed_ticks(&self) -> u64 {
        lock(&self.scheduler)
            .as_ref()
            .map_or(0, Scheduler::completed_ticks)
    }

    /// Stop the tick thread and return the world it was running.
    ///
    /// Returns `None` if the engine never started or was already shut
    /// down. The latch stays armed.
    pub fn shutdown(&self) -> Option<LifeWorld<S>> {
        let mut scheduler = lock(&self.scheduler).take()?;
        scheduler.stop()
    }
}

const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Activation<crossbeam_channel::Sender<crate::snapshot::Snapshot>>>();
};
