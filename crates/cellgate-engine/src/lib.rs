//! Life engine, periodic scheduler, snapshot publishing and one-shot
//! activation for cellgate.
//!
//! # Architecture
//!
//! ```text
//! Trigger thread(s)            Activation              Tick thread
//!     |                            |                        |
//!     |--observe_packet()--------->| latch.try_arm()        |
//!     |   (first match wins)       | LifeWorld::new()       |
//!     |                            | seed_random(count)     |
//!     |                            | publish gen 0          |
//!     |                            | scheduler.arm() ------>| recv_timeout(interval)
//!     |                            |                        | freeze live -> frozen
//!     |                            |                        | step_generation()
//!     |                            |                        | publish gen N (try_send)
//!     |                            |                        | loop
//! ```
//!
//! The [`LifeWorld`](world::LifeWorld) is built and seeded on the arming
//! thread and then moved into the tick thread, so the first tick can never
//! observe a half-initialized grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod activation;
pub mod config;
pub mod latch;
pub mod life;
pub mod metrics;
pub mod publish;
pub mod ring;
pub mod scheduler;
pub mod snapshot;
pub mod trigger;
pub mod world;

pub use activation::{Activation, ActivationError};
pub use config::{ConfigError, EngineConfig};
pub use latch::ActivationLatch;
pub use life::{LifeEngine, StepOutcome};
pub use metrics::{PublishStats, TickMetrics};
pub use publish::{PublishError, SnapshotPublisher, SnapshotSink};
pub use ring::RecordRing;
pub use scheduler::{ArmError, Scheduler};
pub use snapshot::{RecordError, Snapshot, RECORD_HEADER_LEN, RECORD_LEN};
pub use trigger::{PacketTrigger, DEFAULT_TRIGGER_PORT};
pub use world::LifeWorld;
