//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic clock)
//! - Input events (quit requests)
//! - The run loop (blocking natively, `requestAnimationFrame` on web)
//! - Startup failures of the window, renderer and sprite texture

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

/// Fatal startup failures from the windowing/graphics side
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create renderer: {0}")]
    Renderer(String),
    #[error("failed to load texture {path}: {reason}")]
    Texture { path: String, reason: String },
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Monotonic time source
pub trait Clock {
    /// Time since an arbitrary fixed epoch
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Clock advanced by hand (tests, replays)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Clock driven by frame timestamps in milliseconds (e.g. `requestAnimationFrame`)
///
/// The first stamp becomes the epoch. Time never runs backwards and
/// non-finite stamps are ignored.
#[derive(Debug, Default)]
pub struct FrameClock {
    origin: Cell<Option<f64>>,
    now: Cell<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the timestamp of the frame about to run
    pub fn stamp(&self, millis: f64) {
        if !millis.is_finite() {
            return;
        }
        let origin = self.origin.get().unwrap_or(millis);
        self.origin.set(Some(origin));
        let nanos = ((millis - origin) * 1.0e6).round().max(0.0);
        let elapsed = Duration::from_nanos(nanos as u64);
        self.now.set(self.now.get().max(elapsed));
    }
}

impl Clock for FrameClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Platform events the loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Window close / quit request
    Quit,
}

/// Source of pending platform events
pub trait EventSource {
    fn poll_event(&mut self) -> Option<Event>;
}

/// FIFO of events pushed by input handlers
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push_back(event);
    }
}

impl EventSource for EventQueue {
    fn poll_event(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }
}

/// Emits a single quit request once its clock reaches a deadline
#[derive(Debug)]
pub struct Deadline<C: Clock> {
    clock: C,
    at: Duration,
    fired: bool,
}

impl<C: Clock> Deadline<C> {
    pub fn new(clock: C, at: Duration) -> Self {
        Self {
            clock,
            at,
            fired: false,
        }
    }
}

impl<C: Clock> EventSource for Deadline<C> {
    fn poll_event(&mut self) -> Option<Event> {
        if !self.fired && self.clock.now() >= self.at {
            self.fired = true;
            return Some(Event::Quit);
        }
        None
    }
}
