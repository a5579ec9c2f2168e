use std::time::{Duration, Instant};

/// Timing snapshot for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Milliseconds since the clock was created, unclamped.
    ///
    /// Mirrors the high-resolution timestamp animation callbacks receive.
    pub timestamp_ms: f64,

    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Instant taken at the tick.
    pub now: Instant,

    pub frame_index: u64,
}

impl FrameTime {
    /// `timestamp_ms` rescaled to seconds.
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.timestamp_ms * 0.001
    }
}

/// Produces `FrameTime` snapshots.
///
/// Only `dt` is clamped (a debugger pause or a minimised window should not
/// yield a huge step); the timestamp always reflects wall time so that
/// time-driven animation stays in phase.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Clock whose zero timestamp is `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            timestamp_ms: now.saturating_duration_since(self.start).as_secs_f64() * 1000.0,
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
