//! Ideal Gas entry point
//!
//! Handles platform-specific initialization and runs the simulation loop.
//!
//! Native usage: `ideal-gas [PRESET | CONFIG.json] [SECONDS]`

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    ideal_gas::platform::web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ideal gas (native) starting...");

    match run() {
        Ok(frame) => print!("{}", frame),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Default headless run length
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SECONDS: f32 = 5.0;

/// Text canvas width in characters
#[cfg(not(target_arch = "wasm32"))]
const CANVAS_COLUMNS: usize = 60;

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<String, ideal_gas::platform::PlatformError> {
    use ideal_gas::platform::native::run_headless;
    use ideal_gas::{GasConfig, Preset};
    use std::time::Duration;

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(arg) => match Preset::from_str(&arg) {
            Some(preset) => GasConfig::from_preset(preset),
            None => GasConfig::load(&arg)?,
        },
        None => GasConfig::default(),
    };

    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);

    let canvas = run_headless(&config, Duration::from_secs_f32(seconds), CANVAS_COLUMNS)?;
    Ok(canvas.frame().to_string())
}
