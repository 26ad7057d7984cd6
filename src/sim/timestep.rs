//! Fixed timestep accumulator
//!
//! Wall-clock time is accumulated as lag and drained in whole ticks. The
//! remainder is always shorter than one tick and is handed to the renderer
//! for extrapolation. Durations are kept as `Duration` so the accounting is
//! exact.

use std::time::Duration;

/// Outcome of draining one frame's worth of lag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Ticks simulated this frame
    pub ticks: u32,
    /// Whole ticks discarded by the catch-up cap
    pub dropped: u32,
    /// Leftover lag (always below one tick)
    pub lag: Duration,
    /// Collision pairs resolved across all ticks this frame
    pub collisions: usize,
}

/// Lag accumulator driving a fixed-rate simulation from variable frames
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick: Duration,
    lag: Duration,
    last_time: Duration,
    /// Maximum ticks per frame before excess lag is discarded (`None` = uncapped)
    max_ticks_per_frame: Option<u32>,
}

impl FixedTimestep {
    /// Start accumulating from timestamp `now`
    pub fn new(tick: Duration, max_ticks_per_frame: Option<u32>, now: Duration) -> Self {
        Self {
            tick,
            lag: Duration::ZERO,
            last_time: now,
            max_ticks_per_frame,
        }
    }

    #[inline]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    #[inline]
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Record the current frame timestamp and add the elapsed time to the lag
    ///
    /// A clock that steps backwards contributes nothing.
    pub fn observe(&mut self, now: Duration) -> Duration {
        let elapsed = now.saturating_sub(self.last_time);
        self.last_time = now;
        self.accumulate(elapsed);
        elapsed
    }

    /// Add an already measured frame delta to the lag
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.lag = self.lag.saturating_add(elapsed);
    }

    /// Run `step` once per whole tick of accumulated lag
    ///
    /// `step` returns the number of collisions it resolved.
    pub fn drain<F>(&mut self, mut step: F) -> FrameReport
    where
        F: FnMut() -> usize,
    {
        let mut report = FrameReport::default();

        while self.lag >= self.tick {
            if self.max_ticks_per_frame.is_some_and(|cap| report.ticks >= cap) {
                let (lag, tick) = (self.lag.as_nanos(), self.tick.as_nanos());
                let dropped = u32::try_from(lag / tick).unwrap_or(u32::MAX);
                // Remainder of a division by a `Duration` always fits in u64 nanoseconds
                self.lag = Duration::from_nanos((lag % tick) as u64);
                report.dropped = dropped;
                log::warn!(
                    "Frame stalled: skipped {} ticks ({:?} of simulation time)",
                    dropped,
                    Duration::from_nanos((lag - lag % tick).min(u64::MAX as u128) as u64)
                );
                break;
            }
            report.collisions += step();
            self.lag -= self.tick;
            report.ticks += 1;
        }

        report.lag = self.lag;
        report
    }

    /// Observe `now` and drain in one call
    pub fn frame<F>(&mut self, now: Duration, step: F) -> FrameReport
    where
        F: FnMut() -> usize,
    {
        self.observe(now);
        self.drain(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TICK: Duration = Duration::from_millis(20);

    fn run(ts: &mut FixedTimestep, delta: Duration) -> FrameReport {
        ts.accumulate(delta);
        ts.drain(|| 0)
    }

    #[test]
    fn test_three_half_ticks() {
        let mut ts = FixedTimestep::new(TICK, None, Duration::ZERO);
        let half = TICK / 2;

        assert_eq!(run(&mut ts, half).ticks, 0);
        assert_eq!(run(&mut ts, half).ticks, 1);
        assert_eq!(run(&mut ts, half).ticks, 0);
        assert_eq!(ts.lag(), half * 3 - TICK);
    }

    #[test]
    fn test_catch_up_after_stall() {
        let mut ts = FixedTimestep::new(TICK, None, Duration::ZERO);
        let mut steps = 0;
        let report = ts.frame(Duration::from_millis(1005), || {
            steps += 1;
            0
        });
        assert_eq!(report.ticks, 50);
        assert_eq!(steps, 50);
        assert_eq!(report.dropped, 0);
        assert_eq!(report.lag, Duration::from_millis(5));
    }

    #[test]
    fn test_cap_discards_whole_ticks_only() {
        let mut ts = FixedTimestep::new(TICK, Some(8), Duration::ZERO);
        let report = ts.frame(Duration::from_millis(1005), || 0);
        assert_eq!(report.ticks, 8);
        assert_eq!(report.dropped, 42);
        assert_eq!(report.lag, Duration::from_millis(5));
    }

    #[test]
    fn test_cap_saturates_on_huge_stall() {
        // Ten million seconds of 1 ms ticks overflows a u32 tick count
        let tick = Duration::from_millis(1);
        let mut ts = FixedTimestep::new(tick, Some(1), Duration::ZERO);
        ts.accumulate(Duration::from_secs(10_000_000) + Duration::from_micros(300));
        let report = ts.drain(|| 0);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.dropped, u32::MAX);
        assert!(report.lag < tick);
        assert_eq!(report.lag, Duration::from_micros(300));
    }

    #[test]
    fn test_accumulate_saturates() {
        let mut ts = FixedTimestep::new(TICK, Some(1), Duration::ZERO);
        ts.accumulate(Duration::MAX);
        ts.accumulate(Duration::MAX);
        let report = ts.drain(|| 0);
        assert_eq!(report.dropped, u32::MAX);
        assert!(report.lag < TICK);
    }

    #[test]
    fn test_backwards_clock_adds_nothing() {
        let mut ts = FixedTimestep::new(TICK, None, Duration::from_secs(10));
        let report = ts.frame(Duration::from_secs(9), || 0);
        assert_eq!(report.ticks, 0);
        assert_eq!(ts.lag(), Duration::ZERO);
        // Accumulation resumes from the new timestamp
        assert_eq!(ts.frame(Duration::from_millis(9030), || 0).ticks, 1);
    }

    #[test]
    fn test_collisions_summed() {
        let mut ts = FixedTimestep::new(TICK, None, Duration::ZERO);
        let report = ts.frame(Duration::from_millis(60), || 2);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.collisions, 6);
    }

    proptest! {
        #[test]
        fn prop_accounting(
            deltas in prop::collection::vec(0u64..100_000_000, 0..50),
            tick_ms in 1u64..40,
            cap in prop::option::of(1u32..10),
        ) {
            let tick = Duration::from_millis(tick_ms);
            let mut ts = FixedTimestep::new(tick, cap, Duration::ZERO);
            let mut ticks = 0u32;
            let mut total = Duration::ZERO;

            for nanos in deltas {
                let delta = Duration::from_nanos(nanos);
                total += delta;
                let report = run(&mut ts, delta);
                ticks += report.ticks + report.dropped;
                prop_assert!(report.lag < tick);
            }

            prop_assert_eq!(total, tick * ticks + ts.lag());
        }
    }
}
