//! Frame pacing for the fixed-cadence loop.
//!
//! Each tick records a start tick, does its work, then sleeps for whatever is
//! left of the tick budget (20ms for a 50Hz target). Ticks are 32-bit
//! millisecond counters that wrap, so every subtraction is done with wrapping
//! arithmetic.
//!
//! Two pacing modes exist:
//!
//! - **Corrected** (default): `sleep = budget - (now - start)`, floored at zero.
//!   A slow tick runs the next one immediately instead of oversleeping.
//! - **Legacy**: `sleep = budget - (start - now)`, evaluated the way the first
//!   version of the loop did it (unsigned 32-bit). The operands are swapped, so the result
//!   is `budget + elapsed` and every slow tick is followed by an even longer
//!   sleep. Kept selectable so the old cadence can be reproduced.

use std::time::{Duration, Instant};

const FRAME_SAMPLE_COUNT: usize = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PacingMode {
    #[default]
    Corrected,
    Legacy,
}

/// Millisecond tick counter measured from construction, wrapping at `u32::MAX`.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    origin: Instant,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn ticks(&self) -> u32 {
        // Truncation is the wrap.
        self.origin.elapsed().as_millis() as u32
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    pub budget_ms: u32,
    pub mode: PacingMode,
}

impl FramePacer {
    pub fn new(budget_ms: u64, mode: PacingMode) -> Self {
        Self {
            budget_ms: budget_ms.min(u32::MAX as u64) as u32,
            mode,
        }
    }

    /// Milliseconds to sleep at the end of a tick that started at `start_tick`
    /// and finished at `now_tick`.
    pub fn sleep_ms(&self, start_tick: u32, now_tick: u32) -> u32 {
        match self.mode {
            PacingMode::Corrected => {
                let elapsed = now_tick.wrapping_sub(start_tick);
                self.budget_ms.saturating_sub(elapsed)
            }
            PacingMode::Legacy => self.budget_ms.wrapping_sub(start_tick.wrapping_sub(now_tick)),
        }
    }

    pub fn sleep_for(&self, start_tick: u32, now_tick: u32) -> Duration {
        Duration::from_millis(u64::from(self.sleep_ms(start_tick, now_tick)))
    }
}

/// Rolling tick-duration statistics, logged at trace level by the game loop.
pub struct FrameStats {
    pub frame_count: u64,
    samples_ms: [u32; FRAME_SAMPLE_COUNT],
    sample_index: usize,
    pub smoothed_frame_time_ms: f64,
    pub smoothed_fps: f64,
}

impl FrameStats {
    pub fn new(budget_ms: u32) -> Self {
        let budget = budget_ms.max(1);
        Self {
            frame_count: 0,
            samples_ms: [budget; FRAME_SAMPLE_COUNT],
            sample_index: 0,
            smoothed_frame_time_ms: f64::from(budget),
            smoothed_fps: 1000.0 / f64::from(budget),
        }
    }

    /// Record the full duration of one tick, sleep included.
    pub fn record(&mut self, tick_ms: u32) {
        self.frame_count += 1;
        self.samples_ms[self.sample_index] = tick_ms;
        self.sample_index = (self.sample_index + 1) % FRAME_SAMPLE_COUNT;

        let total: u64 = self.samples_ms.iter().map(|&ms| u64::from(ms)).sum();
        let avg_ms = total as f64 / FRAME_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_ms;
        self.smoothed_fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
    }
}
