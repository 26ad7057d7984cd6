//! Rectangular arena bounds
//!
//! The playable interior is the rectangle shrunk by one body radius on every
//! side, so a body centered anywhere inside it is fully visible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed rectangular domain plus the body radius that shrinks it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32, radius: f32) -> Self {
        Self {
            width,
            height,
            radius,
        }
    }

    /// Smallest legal center coordinate on either axis
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::splat(self.radius)
    }

    /// Largest legal center coordinate per axis
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width - self.radius, self.height - self.radius)
    }

    /// Center of the arena
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Clamp each axis independently into the playable interior
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        let (lo, hi) = (self.min(), self.max());
        Vec2::new(p.x.max(lo.x).min(hi.x), p.y.max(lo.y).min(hi.y))
    }

    /// Whether `p` lies on or outside the left/right walls
    #[inline]
    pub fn touches_x(&self, p: Vec2) -> bool {
        p.x <= self.radius || p.x >= self.width - self.radius
    }

    /// Whether `p` lies on or outside the top/bottom walls
    #[inline]
    pub fn touches_y(&self, p: Vec2) -> bool {
        p.y <= self.radius || p.y >= self.height - self.radius
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let (lo, hi) = (self.min(), self.max());
        p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y
    }
}
