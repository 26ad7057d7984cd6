//! Simulation state: the body store and the constants it is stepped with
//!
//! Positions and velocities live in two index-aligned vectors owned by
//! [`World`]. Their length is fixed at construction; nothing spawns or
//! despawns bodies afterwards.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::WorldBounds;
use crate::config::GasConfig;
use crate::wedge;

/// Per-run physics constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub bounds: WorldBounds,
    /// Pair-interaction distance (larger than the drawn radius)
    pub collision_radius: f32,
    /// Fraction of `collision_radius` a colliding pair is pushed out to
    pub separation_scale: f32,
    /// Velocity factor applied on wall reflection (1.0 = elastic)
    pub wall_damping: f32,
    /// Fixed tick duration in seconds
    pub dt: f32,
}

impl SimParams {
    pub fn from_config(config: &GasConfig) -> Self {
        Self {
            bounds: config.world_bounds(),
            collision_radius: config.collision_radius(),
            separation_scale: config.separation_scale,
            wall_damping: config.wall_damping,
            dt: config.dt(),
        }
    }
}

/// A single body as a value (identity is its index in the store)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// Seed the initial placement was drawn from
    pub seed: u64,
    pub params: SimParams,
    /// Ticks simulated so far
    pub time_ticks: u64,
    positions: Vec<Vec2>,
    velocities: Vec<Vec2>,
}

impl World {
    /// Scatter `config.body_count` bodies uniformly over the playable interior
    pub fn new(config: &GasConfig, seed: u64) -> Self {
        let params = SimParams::from_config(config);
        let mut rng = Pcg32::seed_from_u64(seed);
        let (lo, hi) = (params.bounds.min(), params.bounds.max());
        let n = config.body_count;

        // All positions first, then all velocities
        let positions: Vec<Vec2> = (0..n)
            .map(|_| Vec2::new(rng.random_range(lo.x..hi.x), rng.random_range(lo.y..hi.y)))
            .collect();

        let speed = config.max_speed;
        let velocities: Vec<Vec2> = (0..n)
            .map(|_| {
                if speed > 0.0 {
                    Vec2::new(
                        rng.random_range(-speed..speed),
                        rng.random_range(-speed..speed),
                    )
                } else {
                    Vec2::ZERO
                }
            })
            .collect();

        Self {
            seed,
            params,
            time_ticks: 0,
            positions,
            velocities,
        }
    }

    /// Build a world from explicit bodies (scenarios and tests)
    pub fn with_bodies(params: SimParams, bodies: impl IntoIterator<Item = Body>) -> Self {
        let (positions, velocities): (Vec<Vec2>, Vec<Vec2>) = bodies.into_iter().map(|b| (b.pos, b.vel)).unzip();
        Self {
            seed: 0,
            params,
            time_ticks: 0,
            positions,
            velocities,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Iterate bodies in index order
    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.positions
            .iter()
            .zip(&self.velocities)
            .map(|(&pos, &vel)| Body::new(pos, vel))
    }

    /// Mutable view of both arrays; slices cannot change the body count
    pub fn split_mut(&mut self) -> (&mut [Vec2], &mut [Vec2]) {
        (&mut self.positions, &mut self.velocities)
    }

    /// Total kinetic energy with unit mass
    pub fn kinetic_energy(&self) -> f32 {
        self.velocities.iter().map(|v| 0.5 * v.length_squared()).sum()
    }

    /// Total angular momentum about the arena center with unit mass
    pub fn angular_momentum(&self) -> f32 {
        let c = self.params.bounds.center();
        self.bodies().map(|b| wedge(b.pos - c, b.vel)).sum()
    }
}
