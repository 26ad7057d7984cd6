//! Browser driver: 2D canvas rendering on a `requestAnimationFrame` loop
//!
//! The browser owns the main loop, so frames run as callbacks instead of a
//! blocking `while`. Simulation time follows the `requestAnimationFrame`
//! timestamps. Escape stops scheduling further frames.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

use super::{Event, EventQueue, FrameClock, PlatformError};
use crate::app::GasApp;
use crate::config::GasConfig;
use crate::renderer::{Canvas, Color, Rect};

/// Sprite drawn for every body
pub const SPRITE_PATH: &str = "assets/circle.bmp";

/// Seed derived from the current wall-clock time
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// HTML canvas with a 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas for CanvasSurface {
    type Texture = HtmlImageElement;

    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_sprite(&mut self, texture: &HtmlImageElement, dest: Rect) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            texture,
            dest.x as f64,
            dest.y as f64,
            dest.w as f64,
            dest.h as f64,
        ) {
            log::warn!("Sprite draw failed: {:?}", e);
        }
    }

    fn present(&mut self) {
        // The browser presents after the animation frame callback returns
    }
}

/// Size the `#canvas` element to the arena and grab its 2D context
pub fn create_surface(width: u32, height: u32) -> Result<CanvasSurface, PlatformError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| PlatformError::Window("no document".into()))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| PlatformError::Window("no #canvas element".into()))?
        .dyn_into()
        .map_err(|_| PlatformError::Window("#canvas is not a canvas".into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = canvas
        .get_context("2d")
        .map_err(|e| PlatformError::Renderer(format!("{:?}", e)))?
        .ok_or_else(|| PlatformError::Renderer("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| PlatformError::Renderer("unexpected context type".into()))?;

    Ok(CanvasSurface {
        ctx,
        width: width as f64,
        height: height as f64,
    })
}

/// Start loading the sprite image; it draws once the browser has decoded it
pub fn load_texture(path: &str) -> Result<HtmlImageElement, PlatformError> {
    let image = HtmlImageElement::new().map_err(|e| PlatformError::Texture {
        path: path.to_string(),
        reason: format!("{:?}", e),
    })?;
    image.set_src(path);
    Ok(image)
}

/// Call `frame` with each animation frame timestamp (ms) until it returns false
pub fn main_loop<F: FnMut(f64) -> bool + 'static>(frame: F) {
    request_animation_frame(Rc::new(RefCell::new(frame)));
}

fn request_animation_frame<F: FnMut(f64) -> bool + 'static>(frame: Rc<RefCell<F>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        let keep_going = {
            let mut f = frame.borrow_mut();
            (&mut *f)(time)
        };
        if keep_going {
            request_animation_frame(frame);
        }
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn setup_quit_key(events: Rc<RefCell<EventQueue>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            events.borrow_mut().push(Event::Quit);
        }
    });
    let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn start() -> Result<(), PlatformError> {
    let config = GasConfig::load_stored();
    let seed = config.seed.unwrap_or_else(clock_seed);

    let mut surface = create_surface(config.width as u32, config.height as u32)?;
    let texture = load_texture(SPRITE_PATH)?;
    let clock = Rc::new(FrameClock::new());
    let mut app = GasApp::new(&config, seed, clock.clone())?;

    let events = Rc::new(RefCell::new(EventQueue::new()));
    setup_quit_key(events.clone());

    main_loop(move |time| {
        clock.stamp(time);
        let mut events = events.borrow_mut();
        app.frame(&mut *events, &mut surface, &texture).is_some()
    });

    log::info!("Ideal gas running!");
    Ok(())
}

/// Browser entry point
pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    log::info!("Ideal gas starting...");
    if let Err(e) = start() {
        log::error!("Startup failed: {}", e);
    }
}
