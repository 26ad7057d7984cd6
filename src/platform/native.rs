//! Native driver: blocking run loop with a text-mode canvas

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::{Clock, Deadline, PlatformError};
use crate::app::GasApp;
use crate::config::GasConfig;
use crate::renderer::TextCanvas;

/// Frame pacing for the headless loop (~60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Glyph used for every body in the text canvas
pub const BODY_GLYPH: char = 'o';

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Seed derived from the current wall-clock time
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Call `frame` until it returns false, sleeping between frames
pub fn main_loop<F: FnMut() -> bool>(mut frame: F) {
    while frame() {
        thread::sleep(FRAME_INTERVAL);
    }
}

/// Create the text canvas standing in for a window and renderer
pub fn create_canvas(config: &GasConfig, cols: usize) -> Result<TextCanvas, PlatformError> {
    if cols == 0 {
        return Err(PlatformError::Window("canvas needs at least one column".into()));
    }
    // Terminal cells are roughly twice as tall as they are wide
    let rows = ((cols as f32 * config.height / config.width) / 2.0).ceil().max(1.0) as usize;
    Ok(TextCanvas::new(cols, rows, config.width, config.height))
}

/// Run the simulation for `run_for` of wall-clock time and return the final canvas
pub fn run_headless(config: &GasConfig, run_for: Duration, cols: usize) -> Result<TextCanvas, PlatformError> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    let clock = SystemClock::new();
    let mut app = GasApp::new(config, seed, clock)?;
    let mut canvas = create_canvas(config, cols)?;
    let mut quit = Deadline::new(clock, run_for);

    let mut frames = 0u64;
    main_loop(|| match app.frame(&mut quit, &mut canvas, &BODY_GLYPH) {
        Some(_) => {
            frames += 1;
            true
        }
        None => false,
    });

    log::info!(
        "Finished: {} frames, {} ticks, energy {:.1}",
        frames,
        app.world().time_ticks,
        app.world().kinetic_energy()
    );

    // Draw the final state so the caller always gets a complete frame
    app.render(&mut canvas, &BODY_GLYPH);
    Ok(canvas)
}
