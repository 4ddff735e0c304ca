use std::time::Duration;

use glam::Vec3;

use crate::config::RopeConfig;
use crate::constraints::distance::relax_segments;
use crate::error::ConfigError;
use crate::integrator::verlet_step;
use crate::particle::RopeParticles;
use crate::ports::{AnchorSource, FrameSink};
use crate::projection::{Camera, ProjectedPoint};
use crate::raster::{Frame, GridSize, Rasterizer};
use crate::schedule::{FrameThrottle, TickScheduler};

/// One rope, stepped at a fixed rate and rendered at a throttled rate.
pub struct Simulation {
    pub particles: RopeParticles,
    pub camera: Camera,
    config: RopeConfig,
    rasterizer: Rasterizer,
    scheduler: TickScheduler,
    throttle: FrameThrottle,
    projected: Vec<Option<ProjectedPoint>>,
    grid: GridSize,
    clock: Duration,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: RopeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let particles = RopeParticles::slack_line(config.particle_count, config.initial_spacing);
        let camera = Camera::from_config(&config);
        log::info!(
            "rope: {} particles, gravity {}, camera at x = {}",
            config.particle_count,
            config.gravity,
            camera.x
        );

        let mut sim = Self {
            projected: Vec::with_capacity(particles.count),
            particles,
            camera,
            rasterizer: Rasterizer::new(config.glyphs),
            scheduler: TickScheduler::new(config.tick_interval(), config.max_ticks_per_update),
            throttle: FrameThrottle::new(config.frame_interval()),
            grid: GridSize::default(),
            clock: Duration::ZERO,
            ticks: 0,
            config,
        };
        sim.project();
        Ok(sim)
    }

    pub fn config(&self) -> &RopeConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn set_grid(&mut self, grid: GridSize) {
        self.grid = grid;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn projected(&self) -> &[Option<ProjectedPoint>] {
        &self.projected
    }

    /// Physics for one tick: anchor, integrate, relax, project.
    pub fn step(&mut self, anchor: Vec3) {
        self.particles.set_anchor(anchor);
        verlet_step(
            &mut self.particles,
            self.config.gravity,
            self.config.dt,
            self.config.damping,
        );
        relax_segments(
            &mut self.particles,
            self.config.segment_length,
            self.config.solver_iterations,
        );
        self.project();
        self.ticks += 1;
    }

    /// Rasterize the latest projection regardless of the frame throttle.
    pub fn render(&mut self) -> Frame {
        let tail_depth = self.particles.tail().map_or(0.0, |tail| tail.x);
        let frame = self.rasterizer.rasterize(&self.projected, tail_depth, self.grid);
        log::trace!(
            "frame: {} cells, {} culled, {} occluded",
            frame.cell_count(),
            frame.culled,
            frame.occluded
        );
        frame
    }

    /// Run one tick after `elapsed` wall-clock time, returning a frame if the
    /// throttle allows one.
    ///
    /// Shares the frame clock with [`Simulation::pump`] but bypasses the tick
    /// scheduler.
    pub fn tick(&mut self, anchor: Vec3, elapsed: Duration) -> Option<Frame> {
        self.step(anchor);
        self.clock += elapsed;
        if self.throttle.ready(self.clock) {
            Some(self.render())
        } else {
            None
        }
    }

    /// Advance by `elapsed` wall-clock time.
    ///
    /// Runs every tick the scheduler has due, sampling the anchor each tick,
    /// then presents at most one frame. Returns the number of ticks run.
    pub fn pump<A, S>(&mut self, elapsed: Duration, source: &mut A, sink: &mut S) -> Result<u32, S::Error>
    where
        A: AnchorSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        self.clock += elapsed;
        let due = self.scheduler.advance(elapsed);
        for _ in 0..due {
            let anchor = source.anchor();
            self.step(anchor);
        }
        if self.throttle.ready(self.clock) {
            let frame = self.render();
            sink.present(&frame)?;
        }
        Ok(due)
    }

    fn project(&mut self) {
        self.camera.project_all(&self.particles.position, &mut self.projected);
    }
}
