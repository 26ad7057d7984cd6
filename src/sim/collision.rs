//! Pairwise collision detection and response
//!
//! Bodies interact inside a collision radius that is several times their
//! drawn radius, so the gas behaves like soft repelling disks.
//!
//! Every unordered pair is tested once per tick in index order. A colliding
//! pair is resolved immediately, so later pairs in the same sweep see the
//! updated positions and velocities. Dense clusters may stay slightly
//! overlapped after one sweep and drift apart over the next few ticks.

use glam::Vec2;

use super::state::{SimParams, World};
use crate::consts::CONTACT_EPSILON;
use crate::squared_norm;

/// True if bodies `i` and `j` are within `collision_radius` of each other
#[inline]
pub fn detect(positions: &[Vec2], i: usize, j: usize, collision_radius: f32) -> bool {
    squared_norm(positions[i] - positions[j]) <= collision_radius * collision_radius
}

/// Contact normal scaled so that `dot(v, n) * d` is the projection of `v` onto `d`
#[inline]
fn contact_normal(d: Vec2) -> Vec2 {
    d / (squared_norm(d) + CONTACT_EPSILON)
}

/// Velocity of one body after exchanging the normal component with another
///
/// `d` points from the other body toward this one.
#[inline]
fn exchange(v_self: Vec2, v_other: Vec2, d: Vec2) -> Vec2 {
    v_self - (v_self - v_other).dot(contact_normal(d)) * d
}

/// Resolve a colliding pair in place
///
/// Velocities swap their components along the line of centers. Positions are
/// then pushed apart symmetrically about the pair midpoint until their
/// separation is at least `separation_scale * collision_radius`. Coincident
/// bodies are split along the x axis.
pub fn resolve(positions: &mut [Vec2], velocities: &mut [Vec2], i: usize, j: usize, params: &SimParams) {
    let (p1, p2) = (positions[i], positions[j]);
    let (v1, v2) = (velocities[i], velocities[j]);
    let d = p1 - p2;

    velocities[i] = exchange(v1, v2, d);
    velocities[j] = exchange(v2, v1, -d);

    let dist = d.length();
    let target = (params.separation_scale * params.collision_radius).max(dist);
    let axis = d.try_normalize().unwrap_or(Vec2::X);
    let mid = (p1 + p2) * 0.5;
    let half = axis * (target * 0.5);
    positions[i] = mid + half;
    positions[j] = mid - half;
}

/// Sweep all unordered pairs once, resolving collisions as they are found
///
/// Returns the number of pairs resolved.
pub fn resolve_collisions(world: &mut World) -> usize {
    let params = world.params;
    let (positions, velocities) = world.split_mut();
    let n = positions.len();
    let mut resolved = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            if detect(positions, i, j, params.collision_radius) {
                resolve(positions, velocities, i, j, &params);
                resolved += 1;
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bounds::WorldBounds;
    use crate::sim::state::Body;
    use proptest::prelude::*;

    fn params(separation_scale: f32) -> SimParams {
        SimParams {
            bounds: WorldBounds::new(300.0, 300.0, 5.0),
            collision_radius: 25.0,
            separation_scale,
            wall_damping: 1.0,
            dt: 0.02,
        }
    }

    #[test]
    fn test_detect_threshold_inclusive() {
        let positions = [Vec2::new(100.0, 100.0), Vec2::new(125.0, 100.0), Vec2::new(125.1, 100.0)];
        assert!(detect(&positions, 0, 1, 25.0));
        assert!(!detect(&positions, 0, 2, 25.0));
        assert!(!detect(&[Vec2::ZERO, Vec2::new(0.0, 30.0)], 0, 1, 25.0));
    }

    #[test]
    fn test_resting_pair_separates_without_gaining_speed() {
        for scale in [1.0, 0.7] {
            let p = params(scale);
            let mut pos = [Vec2::new(100.0, 150.0), Vec2::new(110.0, 150.0)];
            let mut vel = [Vec2::ZERO, Vec2::ZERO];
            resolve(&mut pos, &mut vel, 0, 1, &p);

            let sep = pos[1] - pos[0];
            assert!((sep.x - scale * p.collision_radius).abs() < 1e-4);
            assert_eq!(sep.y, 0.0);
            assert_eq!(vel, [Vec2::ZERO, Vec2::ZERO]);
        }
    }

    #[test]
    fn test_head_on_exchange() {
        let p = params(1.0);
        let mut pos = [Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)];
        let mut vel = [Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)];
        resolve(&mut pos, &mut vel, 0, 1, &p);
        assert!((vel[0] - Vec2::new(-1.0, 0.0)).length() < 1e-4);
        assert!((vel[1] - Vec2::new(1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_oblique_exchange_conserves_energy() {
        // Off-axis contact at distance 13: exchange must not scale with |d|
        let p = params(1.0);
        let mut pos = [Vec2::new(100.0, 100.0), Vec2::new(112.0, 105.0)];
        let mut vel = [Vec2::new(4.0, 1.0), Vec2::new(-2.0, 3.0)];
        let momentum = vel[0] + vel[1];
        let energy = vel[0].length_squared() + vel[1].length_squared();
        resolve(&mut pos, &mut vel, 0, 1, &p);
        assert!((vel[0] + vel[1] - momentum).length() < 1e-4);
        let after = vel[0].length_squared() + vel[1].length_squared();
        assert!((after - energy).abs() < 1e-3, "energy {} -> {}", energy, after);
    }

    #[test]
    fn test_tangential_motion_untouched() {
        let p = params(1.0);
        let mut pos = [Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0)];
        let mut vel = [Vec2::new(0.0, 3.0), Vec2::new(0.0, -3.0)];
        resolve(&mut pos, &mut vel, 0, 1, &p);
        assert_eq!(vel, [Vec2::new(0.0, 3.0), Vec2::new(0.0, -3.0)]);
    }

    #[test]
    fn test_coincident_bodies_split() {
        let p = params(1.0);
        let mut pos = [Vec2::new(50.0, 50.0); 2];
        let mut vel = [Vec2::new(2.0, 0.0), Vec2::ZERO];
        resolve(&mut pos, &mut vel, 0, 1, &p);
        assert!(vel.iter().all(|v| v.is_finite()));
        assert!(((pos[0] - pos[1]).length() - p.collision_radius).abs() < 1e-4);
    }

    #[test]
    fn test_sweep_applies_immediately() {
        // Resolving (0,1) pushes body 1 into range of body 2 in the same sweep
        let p = params(1.0);
        let mut world = World::with_bodies(
            p,
            [
                Body::new(Vec2::new(100.0, 150.0), Vec2::ZERO),
                Body::new(Vec2::new(110.0, 150.0), Vec2::ZERO),
                Body::new(Vec2::new(140.0, 150.0), Vec2::ZERO),
            ],
        );
        let resolved = resolve_collisions(&mut world);
        assert_eq!(resolved, 2);
        assert!((world.positions()[2].x - 141.25).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_detect_symmetric(
            ax in 0.0f32..300.0, ay in 0.0f32..300.0,
            bx in 0.0f32..300.0, by in 0.0f32..300.0,
            r in 0.0f32..100.0,
        ) {
            let positions = [Vec2::new(ax, ay), Vec2::new(bx, by)];
            prop_assert_eq!(detect(&positions, 0, 1, r), detect(&positions, 1, 0, r));
        }

        #[test]
        fn prop_resolved_pair_separated(
            ax in 50.0f32..250.0, ay in 50.0f32..250.0,
            dx in -25.0f32..25.0, dy in -25.0f32..25.0,
            vx in -30.0f32..30.0, vy in -30.0f32..30.0,
            scale in prop::sample::select(vec![1.0f32, 0.7]),
        ) {
            let p = params(scale);
            let mut pos = [Vec2::new(ax, ay), Vec2::new(ax + dx, ay + dy)];
            let mut vel = [Vec2::new(vx, vy), Vec2::ZERO];
            resolve(&mut pos, &mut vel, 0, 1, &p);
            let sep = (pos[0] - pos[1]).length();
            prop_assert!(sep >= scale * p.collision_radius - 1e-3);
        }
    }
}
