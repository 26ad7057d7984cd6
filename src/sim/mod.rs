//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body index)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod collision;
pub mod integrator;
pub mod state;
pub mod tick;
pub mod timestep;

pub use bounds::WorldBounds;
pub use collision::{detect, resolve, resolve_collisions};
pub use integrator::{advance, integrate};
pub use state::{Body, SimParams, World};
pub use tick::{TickStats, tick};
pub use timestep::{FixedTimestep, FrameReport};
