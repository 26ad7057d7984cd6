//! Ideal Gas - elastic particles bouncing around a box
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, wall reflection, pair collisions, fixed timestep)
//! - `config`: Presets and validated run configuration
//! - `renderer`: Renderer adapter (extrapolated sprite placement onto a canvas)
//! - `platform`: Clock, events and native/browser drivers
//! - `app`: Frame loop tying the pieces together

pub mod app;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use app::GasApp;
pub use config::{ConfigError, GasConfig, Preset};

use glam::Vec2;

/// Default constants (the Classic preset)
pub mod consts {
    /// Square arena side length
    pub const WORLD_SIZE: f32 = 300.0;
    /// Rendered body radius
    pub const BODY_RADIUS: f32 = 5.0;
    /// Collision radius as a multiple of the body radius
    pub const COLLISION_MULTIPLIER: f32 = 5.0;
    /// Fraction of the collision radius enforced when separating a pair
    pub const SEPARATION_SCALE: f32 = 0.7;
    /// Fixed simulation tick (milliseconds)
    pub const TICK_MILLIS: u64 = 20;
    /// Number of bodies
    pub const BODY_COUNT: usize = 400;
    /// Initial per-axis speed range, units per second
    pub const MAX_SPEED: f32 = 30.0;

    /// Guards the contact normal against coincident bodies
    pub const CONTACT_EPSILON: f32 = 1.0e-4;
}

/// Signed perpendicular product `a.x * b.y - a.y * b.x`
#[inline]
pub fn wedge(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Squared Euclidean norm `dot(a, a)`
#[inline]
pub fn squared_norm(a: Vec2) -> f32 {
    a.length_squared()
}
