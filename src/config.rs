//! Run configuration and presets
//!
//! Everything here is fixed at startup. Native builds can load a JSON file;
//! the browser build reads the same JSON from LocalStorage.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::WorldBounds;

/// The two tunings the demo ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// 20 ms ticks, 400 bodies, wide soft collisions
    #[default]
    Classic,
    /// 16 ms ticks, 250 bodies, tighter collisions with full separation
    Brisk,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Brisk => "Brisk",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "brisk" | "fast" => Some(Preset::Brisk),
            _ => None,
        }
    }

    pub fn tick_millis(&self) -> u64 {
        match self {
            Preset::Classic => TICK_MILLIS,
            Preset::Brisk => 16,
        }
    }

    pub fn body_count(&self) -> usize {
        match self {
            Preset::Classic => BODY_COUNT,
            Preset::Brisk => 250,
        }
    }

    pub fn collision_multiplier(&self) -> f32 {
        match self {
            Preset::Classic => COLLISION_MULTIPLIER,
            Preset::Brisk => 3.0,
        }
    }

    pub fn separation_scale(&self) -> f32 {
        match self {
            Preset::Classic => SEPARATION_SCALE,
            Preset::Brisk => 1.0,
        }
    }
}

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("arena size must be positive and finite, got {width}x{height}")]
    BadArena { width: f32, height: f32 },
    #[error("body diameter {diameter} does not fit in a {width}x{height} arena")]
    ArenaTooSmall { width: f32, height: f32, diameter: f32 },
    #[error("body radius must be positive and finite, got {0}")]
    BadRadius(f32),
    #[error("collision multiplier must be positive and finite, got {0}")]
    BadCollisionMultiplier(f32),
    #[error("separation scale must be in (0, 1], got {0}")]
    BadSeparationScale(f32),
    #[error("wall damping must be in (0, 1], got {0}")]
    BadWallDamping(f32),
    #[error("max speed must be non-negative and finite, got {0}")]
    BadMaxSpeed(f32),
    #[error("tick duration must be at least 1 ms")]
    ZeroTick,
    #[error("catch-up cap must allow at least one tick per frame")]
    ZeroCatchUp,
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasConfig {
    /// Preset the remaining fields were derived from (informational)
    pub preset: Preset,

    // === Arena ===
    pub width: f32,
    pub height: f32,
    /// Drawn body radius
    pub body_radius: f32,

    // === Physics ===
    /// Collision radius as a multiple of `body_radius`
    pub collision_multiplier: f32,
    /// Fraction of the collision radius a colliding pair is pushed out to
    pub separation_scale: f32,
    /// Velocity factor applied on wall reflection (1.0 = elastic)
    pub wall_damping: f32,
    /// Fixed tick duration (milliseconds)
    pub tick_millis: u64,

    // === Population ===
    pub body_count: usize,
    /// Initial velocity per axis is drawn from [-max_speed, max_speed)
    pub max_speed: f32,
    /// RNG seed for initial placement (`None` = pick from the clock)
    pub seed: Option<u64>,

    // === Loop ===
    /// Maximum ticks simulated per frame; excess lag is dropped (`None` = catch up fully)
    pub max_ticks_per_frame: Option<u32>,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Classic)
    }
}

impl GasConfig {
    /// Create a config from a preset (applies preset defaults)
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            width: WORLD_SIZE,
            height: WORLD_SIZE,
            body_radius: BODY_RADIUS,
            collision_multiplier: preset.collision_multiplier(),
            separation_scale: preset.separation_scale(),
            wall_damping: 1.0,
            tick_millis: preset.tick_millis(),
            body_count: preset.body_count(),
            max_speed: MAX_SPEED,
            seed: None,
            max_ticks_per_frame: None,
        }
    }

    /// Check every startup invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_positive = |v: f32| v.is_finite() && v > 0.0;
        if !(finite_positive(self.width) && finite_positive(self.height)) {
            return Err(ConfigError::BadArena {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.body_radius.is_finite() && self.body_radius > 0.0) {
            return Err(ConfigError::BadRadius(self.body_radius));
        }
        let diameter = self.body_radius * 2.0;
        if !(diameter < self.width.min(self.height)) {
            return Err(ConfigError::ArenaTooSmall {
                width: self.width,
                height: self.height,
                diameter,
            });
        }
        if !(self.collision_multiplier.is_finite() && self.collision_multiplier > 0.0) {
            return Err(ConfigError::BadCollisionMultiplier(self.collision_multiplier));
        }
        if !(self.separation_scale > 0.0 && self.separation_scale <= 1.0) {
            return Err(ConfigError::BadSeparationScale(self.separation_scale));
        }
        if !(self.wall_damping > 0.0 && self.wall_damping <= 1.0) {
            return Err(ConfigError::BadWallDamping(self.wall_damping));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(ConfigError::BadMaxSpeed(self.max_speed));
        }
        if self.tick_millis == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.max_ticks_per_frame == Some(0) {
            return Err(ConfigError::ZeroCatchUp);
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take Classic defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ideal_gas_config";

    /// Load config from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_stored() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(self.width, self.height, self.body_radius)
    }

    /// Pair-interaction distance
    pub fn collision_radius(&self) -> f32 {
        self.body_radius * self.collision_multiplier
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Tick duration in seconds
    pub fn dt(&self) -> f32 {
        self.tick().as_secs_f32()
    }
}
