//! Frame timing
//!
//! Converts `requestAnimationFrame` timestamps (milliseconds) into the
//! per-frame delta fed to the simulation. The delta is always clamped to
//! `[0, MAX_FRAME_DT]` so a stalled or backgrounded tab resumes with one
//! small step instead of a huge one.

use crate::consts::MAX_FRAME_DT;

/// Clamp a raw elapsed time (seconds) to the simulation's allowed range
#[inline]
pub fn clamp_dt(elapsed_secs: f32) -> f32 {
    if elapsed_secs.is_nan() {
        return 0.0;
    }
    elapsed_secs.clamp(0.0, MAX_FRAME_DT)
}

/// Tracks the last frame timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Re-anchor the clock, e.g. when a run starts or resumes
    pub fn reset(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Consume a frame timestamp and return the clamped delta in seconds
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            // First frame after page load: the page clock starts at zero
            None => (now_ms / 1000.0) as f32,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(elapsed)
    }
}
