//! Renderer adapter
//!
//! Draws every body as one circular sprite. Drawn positions are extrapolated
//! by the leftover lag (`pos + vel * lag`) so motion stays smooth between
//! ticks. Extrapolation never touches the simulation state and is neither
//! clamped nor collision checked.

pub mod text;

pub use text::TextCanvas;

use std::time::Duration;

use glam::Vec2;

use crate::sim::{Body, World};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// CSS color string (`rgba(r, g, b, a)`)
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Arena background
pub const BACKGROUND: Color = Color::rgb(50, 50, 50);

/// Integer destination rectangle in arena pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Square of side `2 * radius` centered on `center` (truncated like the sprite blit)
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            x: (center.x - radius) as i32,
            y: (center.y - radius) as i32,
            w: (2.0 * radius) as i32,
            h: (2.0 * radius) as i32,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Drawing surface provided by the platform layer
pub trait Canvas {
    /// Sprite image handle
    type Texture;

    fn clear(&mut self, color: Color);
    fn draw_sprite(&mut self, texture: &Self::Texture, dest: Rect);
    fn present(&mut self);
}

/// Where a body is drawn `lag` seconds after its last simulated tick
#[inline]
pub fn extrapolate(body: Body, lag: f32) -> Vec2 {
    body.pos + body.vel * lag
}

/// Draw one frame of the world, extrapolated by the leftover lag
pub fn render_frame<C: Canvas>(canvas: &mut C, texture: &C::Texture, world: &World, lag: Duration) {
    let lag = lag.as_secs_f32();
    let radius = world.params.bounds.radius;

    canvas.clear(BACKGROUND);
    for body in world.bodies() {
        canvas.draw_sprite(texture, Rect::around(extrapolate(body, lag), radius));
    }
    canvas.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GasConfig;
    use crate::sim::SimParams;

    /// Records every call for inspection
    #[derive(Default)]
    struct RecordingCanvas {
        cleared: Vec<Color>,
        sprites: Vec<Rect>,
        presented: usize,
    }

    impl Canvas for RecordingCanvas {
        type Texture = ();

        fn clear(&mut self, color: Color) {
            self.cleared.push(color);
        }

        fn draw_sprite(&mut self, _texture: &(), dest: Rect) {
            self.sprites.push(dest);
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    fn world(bodies: &[Body]) -> World {
        World::with_bodies(SimParams::from_config(&GasConfig::default()), bodies.iter().copied())
    }

    #[test]
    fn test_rect_around() {
        let r = Rect::around(Vec2::new(100.0, 50.0), 5.0);
        assert_eq!(r, Rect { x: 95, y: 45, w: 10, h: 10 });
        assert_eq!(r.center(), (100, 50));
    }

    #[test]
    fn test_frame_sequence() {
        let w = world(&[
            Body::new(Vec2::new(100.0, 100.0), Vec2::ZERO),
            Body::new(Vec2::new(200.0, 200.0), Vec2::ZERO),
        ]);
        let mut canvas = RecordingCanvas::default();
        render_frame(&mut canvas, &(), &w, Duration::ZERO);
        assert_eq!(canvas.cleared, vec![BACKGROUND]);
        assert_eq!(canvas.sprites.len(), 2);
        assert_eq!(canvas.presented, 1);
    }

    #[test]
    fn test_extrapolation_does_not_mutate_or_clamp() {
        // Drawn 50 ms ahead, the sprite runs past the right wall at x = 295
        let body = Body::new(Vec2::new(294.5, 150.0), Vec2::new(100.0, 0.0));
        let w = world(&[body]);
        let before = w.clone();
        let mut canvas = RecordingCanvas::default();
        render_frame(&mut canvas, &(), &w, Duration::from_millis(50));

        assert_eq!(w, before);
        assert_eq!(canvas.sprites[0].center().0, 299);
        assert!((extrapolate(body, 0.05).x - 299.5).abs() < 1e-4);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(BACKGROUND.to_css(), "rgba(50, 50, 50, 1.000)");
    }
}
