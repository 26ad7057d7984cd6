//! Frame loop
//!
//! Each frame reads the clock, drains every due tick, handles pending events
//! and finally draws the world extrapolated by the leftover lag. Quit is only
//! honoured between frames, never mid-tick.

use std::time::Duration;

use crate::config::{ConfigError, GasConfig};
use crate::platform::{Clock, Event, EventSource};
use crate::renderer::{Canvas, render_frame};
use crate::sim::{FixedTimestep, FrameReport, World, tick};

/// Rolling per-second counters for the debug log
#[derive(Debug, Default)]
struct FrameStats {
    window_start: Duration,
    frames: u32,
    ticks: u32,
    collisions: usize,
}

/// A running simulation instance
pub struct GasApp<C: Clock> {
    world: World,
    timestep: FixedTimestep,
    clock: C,
    stats: FrameStats,
}

impl<C: Clock> GasApp<C> {
    /// Validate `config`, scatter bodies from `seed` and start the clock
    pub fn new(config: &GasConfig, seed: u64, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::new(config, seed);
        let now = clock.now();

        log::info!(
            "Ideal gas: {} bodies in {}x{} ({} preset, tick {:?}, seed {})",
            world.len(),
            config.width,
            config.height,
            config.preset.as_str(),
            config.tick(),
            seed
        );

        Ok(Self {
            world,
            timestep: FixedTimestep::new(config.tick(), config.max_ticks_per_frame, now),
            clock,
            stats: FrameStats {
                window_start: now,
                ..Default::default()
            },
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Leftover lag that the next render will extrapolate by
    pub fn lag(&self) -> Duration {
        self.timestep.lag()
    }

    /// Run due ticks for the current time without drawing
    pub fn update(&mut self) -> FrameReport {
        let now = self.clock.now();
        let world = &mut self.world;
        let report = self.timestep.frame(now, || tick(world).collisions);
        self.record(now, &report);
        report
    }

    /// Draw the current state extrapolated by the leftover lag
    pub fn render<K: Canvas>(&self, canvas: &mut K, texture: &K::Texture) {
        render_frame(canvas, texture, &self.world, self.timestep.lag());
    }

    /// One full frame: ticks, events, render
    ///
    /// Returns `None` once a quit request is seen; the frame is then not drawn.
    pub fn frame<E, K>(&mut self, events: &mut E, canvas: &mut K, texture: &K::Texture) -> Option<FrameReport>
    where
        E: EventSource + ?Sized,
        K: Canvas,
    {
        let report = self.update();

        while let Some(event) = events.poll_event() {
            match event {
                Event::Quit => {
                    log::info!("Quit requested after {} ticks", self.world.time_ticks);
                    return None;
                }
            }
        }

        self.render(canvas, texture);
        Some(report)
    }

    fn record(&mut self, now: Duration, report: &FrameReport) {
        let stats = &mut self.stats;
        stats.frames += 1;
        stats.ticks += report.ticks;
        stats.collisions += report.collisions;

        let elapsed = now.saturating_sub(stats.window_start);
        if elapsed >= Duration::from_secs(1) {
            let secs = elapsed.as_secs_f32();
            log::debug!(
                "{:.0} fps, {:.0} ticks/s, {} collisions, energy {:.1}, angular momentum {:.1}",
                stats.frames as f32 / secs,
                stats.ticks as f32 / secs,
                stats.collisions,
                self.world.kinetic_energy(),
                self.world.angular_momentum()
            );
            *stats = FrameStats {
                window_start: now,
                ..Default::default()
            };
        }
    }
}
