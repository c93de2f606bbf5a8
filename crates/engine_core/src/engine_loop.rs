// crates/engine_core/src/engine_loop.rs

use std::time::Instant;

/// Longest frame delta handed to the plugin, in seconds.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Frame timing. The plugin runs once per rendered frame with the elapsed
/// wall time, so there is no fixed-step accumulator.
pub struct EngineLoop {
    last_frame_time: Instant,
}

impl EngineLoop {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last_frame_time: now,
        }
    }

    /// Update the frame timer and return the clamped frame delta.
    /// Clamps to 0.25s to avoid giant spikes when dragging the window,
    /// hitting breakpoints, etc.
    pub fn tick_timer(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let frame_dt = now
            .saturating_duration_since(self.last_frame_time)
            .as_secs_f32();
        self.last_frame_time = now;

        frame_dt.min(MAX_FRAME_DT)
    }
}

impl Default for EngineLoop {
    fn default() -> Self {
        Self::new()
    }
}
