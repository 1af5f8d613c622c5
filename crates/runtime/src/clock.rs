//! Fixed-rate frame timing.
use std::time::{Duration, Instant};

/// Measures the time between frames and clamps long stalls.
///
/// The first tick reports one nominal period, so a session never starts
/// with a zero or unbounded delta.
#[derive(Clone, Debug)]
pub struct FrameClock {
    period: Duration,
    max_delta: f32,
    last: Option<Instant>,
}

impl FrameClock {
    pub const DEFAULT_FPS: u32 = 60;
    /// Longest delta handed to the simulation, in seconds.
    pub const MAX_DELTA: f32 = 0.1;

    pub fn new(target_fps: u32) -> Self {
        let fps = target_fps.max(1);
        Self {
            period: Duration::from_secs(1) / fps,
            max_delta: Self::MAX_DELTA,
            last: None,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta.max(0.0);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Seconds since the previous tick, clamped to the maximum delta.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => self.period.as_secs_f32(),
        };
        self.last = Some(now);
        delta.min(self.max_delta)
    }

    /// Forgets the previous tick, e.g. after a pause.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FPS)
    }
}
