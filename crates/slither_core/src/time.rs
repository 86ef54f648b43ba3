//! Frame clocks and simulation time
//!
//! The game loop asks a [`FrameClock`] for the seconds elapsed since the last
//! frame and feeds that `dt` to every system of the tick.

use std::time::{Duration, Instant};

/// Nominal frame rate used by [`FixedClock::default`].
pub const TICK_RATE_HZ: u32 = 60;
pub const TICK_DURATION: Duration = Duration::from_micros(16_666); // ~16.666ms

/// Largest `dt` handed to systems. Longer stalls (window drags, breakpoints)
/// are clamped so nothing tunnels through walls on the next frame.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Source of per-frame elapsed time.
pub trait FrameClock {
    /// Seconds since the previous call.
    fn frame_delta_seconds(&mut self) -> f32;
}

/// Wall-clock frame timing.
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn frame_delta_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DELTA)
    }
}

/// Constant `dt`, for tests and headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(TICK_DURATION.as_secs_f32())
    }
}

impl FrameClock for FixedClock {
    fn frame_delta_seconds(&mut self) -> f32 {
        self.dt
    }
}

/// Simulation time tracker
#[derive(Debug, Default)]
pub struct SimulationTime {
    tick_count: u64,
    elapsed: f32,
}

impl SimulationTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn advance_tick(&mut self, dt: f32) {
        self.tick_count += 1;
        self.elapsed += dt;
    }

    /// Simulated seconds, paused time excluded.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }
}
