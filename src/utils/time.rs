#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Per-frame time source.
///
/// Each [`tick`](Self::tick) reports the time elapsed since the previous tick
/// (or since the last [`reset`](Self::reset)). Resetting flushes whatever idle
/// time has accumulated, so the next tick only measures time spent after it.
#[derive(Debug, Clone)]
pub struct Clock {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Creates a new clock starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advances the clock to the current instant and returns the delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`. Instants earlier than the last update yield a zero delta.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = now.saturating_duration_since(self.last_update);
        self.elapsed = now.saturating_duration_since(self.start_time);
        self.last_update = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    /// Discards the time accumulated since the last tick.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.last_update = now;
        self.delta = Duration::ZERO;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_measures_since_previous_tick() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0);
        let dt = clock.tick_at(t0 + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn reset_flushes_idle_time() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0);
        clock.reset_at(t0 + Duration::from_secs(30));
        let dt = clock.tick_at(t0 + Duration::from_millis(30_016));
        assert!(dt < 0.02, "idle time leaked into delta: {dt}");
    }

    #[test]
    fn earlier_instant_yields_zero_delta() {
        let t0 = Instant::now();
        let mut clock = Clock::starting_at(t0 + Duration::from_secs(1));
        assert_eq!(clock.tick_at(t0), 0.0);
    }
}
