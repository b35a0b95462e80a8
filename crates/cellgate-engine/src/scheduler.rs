//! Periodic tick driver.
//!
//! Once armed, a dedicated thread owns the [`LifeWorld`] exclusively
//! (moved in at spawn) and runs one tick per interval. The interval is
//! measured from the end of one tick to the start of the next, and ticks
//! never overlap: the loop is strictly sequential. Stopping sends on a
//! channel the thread waits on, so a stop request interrupts the wait
//! immediately instead of after a full interval.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::publish::SnapshotSink;
use crate::world::LifeWorld;

// ── ArmError ───────────────────────────────────────────────────────

/// Errors from [`Scheduler::arm`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArmError {
    /// The tick thread is already running.
    AlreadyArmed,
    /// The OS refused to start the tick thread. The world is lost.
    SpawnFailed {
        /// OS error text.
        reason: String,
    },
    /// The scheduler was stopped or failed earlier and holds no world.
    NoWorld,
}

impl fmt::Display for ArmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyArmed => write!(f, "scheduler already armed"),
            Self::SpawnFailed { reason } => write!(f, "failed to spawn tick thread: {reason}"),
            Self::NoWorld => write!(f, "scheduler has no world to run"),
        }
    }
}

impl Error for ArmError {}

// ── Tick thread ────────────────────────────────────────────────────

struct TickLoop<S> {
    world: LifeWorld<S>,
    stop_rx: Receiver<()>,
    interval: Duration,
    completed: Arc<AtomicU64>,
}

impl<S: SnapshotSink> TickLoop<S> {
    /// Sleep, tick, repeat. Returns the world when told to stop or when
    /// the scheduler handle is dropped.
    fn run(mut self) -> LifeWorld<S> {
        loop {
            match self.stop_rx.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
            match self.world.tick() {
                Ok(_) => {
                    self.completed.fetch_add(1, Ordering::Release);
                }
                Err(e) => log::error!(
                    "tick for generation {} failed: {e}",
                    self.world.generation().next()
                ),
            }
        }
        log::info!(
            "tick thread stopped at generation {} after {} ticks",
            self.world.generation(),
            self.completed.load(Ordering::Acquire)
        );
        self.world
    }
}

// ── Scheduler ──────────────────────────────────────────────────────

enum State<S> {
    Idle(LifeWorld<S>),
    Armed {
        stop_tx: Sender<()>,
        handle: JoinHandle<LifeWorld<S>>,
    },
    Retired,
}

/// Owner of the tick thread.
///
/// Lifecycle: `Idle` (holds the world) → [`arm`](Self::arm) → `Armed`
/// (thread holds the world) → [`stop`](Self::stop) → `Retired`.
/// Dropping an armed scheduler stops and joins the thread.
pub struct Scheduler<S: SnapshotSink + 'static> {
    state: State<S>,
    interval: Duration,
    completed: Arc<AtomicU64>,
}

impl<S: SnapshotSink + 'static> Scheduler<S> {
    /// Wrap a ready world. Nothing runs until [`arm`](Self::arm).
    pub fn new(world: LifeWorld<S>, interval: Duration) -> Self {
        Self {
            state: State::Idle(world),
            interval,
            completed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start the tick thread. The first tick fires one interval from now.
    pub fn arm(&mut self) -> Result<(), ArmError> {
        let world = match std::mem::replace(&mut self.state, State::Retired) {
            State::Idle(world) => world,
            armed @ State::Armed { .. } => {
                self.state = armed;
                log::warn!("arm rejected: scheduler already armed");
                return Err(ArmError::AlreadyArmed);
            }
            State::Retired => {
                log::warn!("arm rejected: no world");
                return Err(ArmError::NoWorld);
            }
        };

        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let tick_loop = TickLoop {
            world,
            stop_rx,
            interval: self.interval,
            completed: Arc::clone(&self.completed),
        };
        let handle = thread::Builder::new()
            .name("cellgate-tick".into())
            .spawn(move || tick_loop.run())
            .map_err(|e| {
                log::warn!("tick thread spawn failed: {e}");
                ArmError::SpawnFailed {
                    reason: e.to_string(),
                }
            })?;

        log::info!("scheduler armed, interval {:?}", self.interval);
        self.state = State::Armed { stop_tx, handle };
        Ok(())
    }

    /// Whether the tick thread is running.
    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }

    /// Ticks completed so far.
    pub fn completed_ticks(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop the tick thread (if running) and hand back the world.
    ///
    /// A tick already in progress completes first. Returns `None` if the
    /// scheduler was already retired or the tick thread panicked.
    pub fn stop(&mut self) -> Option<LifeWorld<S>> {
        match std::mem::replace(&mut self.state, State::Retired) {
            State::Idle(world) => Some(world),
            State::Armed { stop_tx, handle } => {
                // The thread may already be gone; either way join below.
                let _ = stop_tx.try_send(());
                drop(stop_tx);
                match handle.join() {
                    Ok(world) => Some(world),
                    Err(_) => {
                        log::error!("tick thread panicked");
                        None
                    }
                }
            }
            State::Retired => None,
        }
    }
}

impl<S: SnapshotSink + 'static> Drop for Scheduler<S> {
    fn drop(&mut self) {
        if self.is_armed() {
            self.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::snapshot::Snapshot;
    use std::time::Instant;

    fn world(tx: Sender<Snapshot>) -> LifeWorld<Sender<Snapshot>> {
        let cfg = EngineConfig {
            width: 8,
            height: 8,
            ..EngineConfig::default()
        };
        LifeWorld::new(&cfg, tx).unwrap()
    }

    #[test]
    fn does_not_tick_before_arm() {
        let (tx, rx) = crossbeam_channel::bounded::<Snapshot>(4);
        let mut s = Scheduler::new(world(tx), Duration::from_millis(1));
        assert_eq!(s.interval(), Duration::from_millis(1));
        thread::sleep(Duration::from_millis(20));
        assert!(!s.is_armed());
        assert_eq!(s.completed_ticks(), 0);
        assert!(rx.try_recv().is_err());
        let w = s.stop().unwrap();
        assert_eq!(w.generation().0, 0);
    }

    #[test]
    fn armed_scheduler_publishes_in_order() {
        let (tx, rx) = crossbeam_channel::bounded::<Snapshot>(64);
        let mut s = Scheduler::new(world(tx), Duration::from_millis(2));
        s.arm().unwrap();
        assert!(s.is_armed());

        let mut seen = Vec::new();
        while seen.len() < 5 {
            let snap = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            seen.push(snap.generation().0);
        }
        let w = s.stop().unwrap();
        assert!(!s.is_armed());
        assert_eq!(&seen[..5], &[1, 2, 3, 4, 5]);
        assert!(u64::from(w.generation().0) >= 5);
        assert_eq!(s.completed_ticks(), u64::from(w.generation().0));
    }

    #[test]
    fn second_arm_is_rejected() {
        let (tx, _rx) = crossbeam_channel::bounded::<Snapshot>(1);
        let mut s = Scheduler::new(world(tx), Duration::from_millis(5));
        s.arm().unwrap();
        assert_eq!(s.arm(), Err(ArmError::AlreadyArmed));
        assert!(s.is_armed());
        assert!(s.stop().is_some());
        assert_eq!(s.arm(), Err(ArmError::NoWorld));
        assert!(s.stop().is_none());
    }

    #[test]
    fn stop_interrupts_long_interval() {
        let (tx, rx) = crossbeam_channel::bounded::<Snapshot>(1);
        let mut s = Scheduler::new(world(tx), Duration::from_secs(3600));
        s.arm().unwrap();
        let started = Instant::now();
        let w = s.stop().unwrap();
        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(w.generation().0, 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn full_channel_does_not_stall_ticks() {
        let (tx, rx) = crossbeam_channel::bounded::<Snapshot>(1);
        let mut s = Scheduler::new(world(tx), Duration::from_millis(1));
        s.arm().unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        while s.completed_ticks() < 10 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        let w = s.stop().unwrap();
        assert!(s.completed_ticks() >= 10);
        assert!(w.publish_stats().dropped_full >= 1);
        // The one queued snapshot is the first generation.
        assert_eq!(rx.recv().unwrap().generation().0, 1);
    }

    #[test]
    fn drop_joins_tick_thread() {
        let (tx, rx) = crossbeam_channel::bounded::<Snapshot>(1);
        {
            let mut s = Scheduler::new(world(tx), Duration::from_millis(1));
            s.arm().unwrap();
        }
        // The world (and its sender) went down with the thread.
        let _ = rx.try_recv();
        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(1)),
            Err(crossbeam_channel::RecvTimeoutError::Disconnected)
        ));
    }
}
