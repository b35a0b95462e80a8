//! One engine, its generation counter, and its publisher.

use std::time::Instant;

use cellgate_core::Generation;
use cellgate_grid::GridError;
use rand::Rng;

use crate::config::{ConfigError, EngineConfig};
use crate::life::LifeEngine;
use crate::metrics::{PublishStats, TickMetrics};
use crate::publish::{PublishError, SnapshotPublisher, SnapshotSink};

/// Everything a tick touches, owned in one place.
///
/// A `LifeWorld` is built and seeded on the activating thread, then moved
/// whole into the scheduler's tick thread. Only that thread mutates it
/// afterwards, so no locking is needed around the grid.
pub struct LifeWorld<S> {
    engine: LifeEngine,
    publisher: SnapshotPublisher<S>,
    generation: Generation,
    last_metrics: TickMetrics,
}

const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<LifeWorld<crossbeam_channel::Sender<crate::snapshot::Snapshot>>>();
};

impl<S: SnapshotSink> LifeWorld<S> {
    /// Validate `config` and build an empty world at generation 0.
    pub fn new(config: &EngineConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = LifeEngine::with_dimensions(config.width, config.height)?;
        Ok(Self {
            engine,
            publisher: SnapshotPublisher::new(sink, config.payload_capacity),
            generation: Generation::ZERO,
            last_metrics: TickMetrics::default(),
        })
    }

    /// Random seeding. See [`LifeEngine::seed_random`].
    pub fn seed<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<usize, GridError> {
        self.engine.seed_random(count, rng)
    }

    /// Publish the current live buffer under the current generation
    /// without stepping.
    pub fn publish_current(&mut self) -> Result<(), PublishError> {
        self.publisher.publish(self.engine.grid(), self.generation)
    }

    /// Run one tick: freeze, step, advance the generation, publish.
    ///
    /// A failed publish does not fail the tick; it shows up as
    /// `published == false` in the returned metrics. The generation
    /// advances either way.
    pub fn tick(&mut self) -> Result<TickMetrics, GridError> {
        let tick_start = Instant::now();

        let freeze_start = Instant::now();
        self.engine.freeze()?;
        let freeze_us = freeze_start.elapsed().as_micros() as u64;

        let step_start = Instant::now();
        let outcome = self.engine.step_generation()?;
        let step_us = step_start.elapsed().as_micros() as u64;

        self.generation = self.generation.next();

        let publish_start = Instant::now();
        let published = self
            .publisher
            .publish(self.engine.grid(), self.generation)
            .is_ok();
        let publish_us = publish_start.elapsed().as_micros() as u64;

        let metrics = TickMetrics {
            generation: self.generation,
            total_us: tick_start.elapsed().as_micros() as u64,
            freeze_us,
            step_us,
            publish_us,
            births: outcome.births,
            deaths: outcome.deaths,
            alive: self.engine.grid().alive_count(),
            published,
        };
        log::debug!(
            "generation {}: {} births, {} deaths, {} alive",
            metrics.generation,
            metrics.births,
            metrics.deaths,
            metrics.alive
        );
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// The generation of the most recent publish attempt.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The underlying engine.
    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    /// Mutable access for placing patterns before the world is armed.
    pub fn engine_mut(&mut self) -> &mut LifeEngine {
        &mut self.engine
    }

    /// Metrics from the most recent [`tick`](Self::tick).
    pub fn last_metrics(&self) -> &TickMetrics {
        &self.last_metrics
    }

    /// Cumulative publish outcomes.
    pub fn publish_stats(&self) -> PublishStats {
        self.publisher.stats()
    }

    /// Consume the world and return its sink.
    pub fn into_sink(self) -> S {
        self.publisher.into_sink()
    }
}
