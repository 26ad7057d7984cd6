//! Explicit Euler position update with wall reflection

use glam::Vec2;

use super::bounds::WorldBounds;
use super::state::World;

/// Advance one body by `dt`, reflecting off walls and clamping into bounds
pub fn advance(pos: &mut Vec2, vel: &mut Vec2, bounds: &WorldBounds, damping: f32, dt: f32) {
    *pos += *vel * dt;

    if bounds.touches_x(*pos) {
        vel.x = -vel.x * damping;
    }
    if bounds.touches_y(*pos) {
        vel.y = -vel.y * damping;
    }

    *pos = bounds.clamp(*pos);
}

/// Run [`advance`] over every body in index order
pub fn integrate(world: &mut World) {
    let params = world.params;
    let (positions, velocities) = world.split_mut();
    for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
        advance(pos, vel, &params.bounds, params.wall_damping, params.dt);
    }
}
