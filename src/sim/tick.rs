//! Fixed timestep simulation tick
//!
//! One tick integrates every body, then sweeps pairs for collisions. The
//! collision pass only ever sees fully integrated, clamped positions.

use super::collision::resolve_collisions;
use super::integrator::integrate;
use super::state::World;

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Pairs resolved in the collision sweep
    pub collisions: usize,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World) -> TickStats {
    integrate(world);
    let collisions = resolve_collisions(world);
    world.time_ticks += 1;
    TickStats { collisions }
}
