//! Spike Jumper - An underwater endless runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, spawning, eel hazards, collisions, session state)
//! - `timing`: Frame clock that turns animation-frame timestamps into bounded deltas
//! - `platform`: Input mapping and DOM helpers shared by the browser front-ends
//! - `renderer`: Draw-command scene builder and its Canvas 2D backend (browser only)
//! - `highscore`: Best score persisted to LocalStorage
//! - `settings`: Player preferences (seahorse color scheme)
//! - `contrast`: WCAG luminance / contrast math for the contrast preview widget

pub mod contrast;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod timing;

pub use highscore::HighScore;
pub use settings::{ColorScheme, Settings};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (logical pixels)
    pub const WORLD_WIDTH: f32 = 1280.0;
    pub const WORLD_HEIGHT: f32 = 720.0;
    /// Sea floor line; everything stands on this
    pub const GROUND_Y: f32 = WORLD_HEIGHT - 140.0;

    /// Largest step ever fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player placement and physics (pixels, pixels/s, pixels/s²)
    pub const PLAYER_X: f32 = 160.0;
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 72.0;
    pub const GRAVITY: f32 = 900.0;
    pub const JUMP_VELOCITY: f32 = -480.0;
    pub const DOUBLE_JUMP_VELOCITY: f32 = -440.0;

    /// Scroll speed ramp
    pub const BASE_SPEED: f32 = 280.0;
    pub const MAX_SPEED: f32 = 680.0;
    /// Speed gained per second of play
    pub const SPEED_RAMP: f32 = 14.0;
    /// Score gained per pixel scrolled
    pub const SCORE_PER_PIXEL: f32 = 0.08;
    /// Backdrop drift when not playing
    pub const IDLE_SCROLL_SPEED: f32 = 90.0;

    /// Spawn timing (seconds)
    pub const OBSTACLE_INTERVAL_START: f32 = 2.2;
    pub const OBSTACLE_INTERVAL_MIN: f32 = 0.75;
    pub const OBSTACLE_INTERVAL_DECAY: f32 = 0.005;
    pub const OBSTACLE_PAIR_CHANCE: f64 = 0.28;
    pub const SHELL_INTERVAL: f32 = 1.6;
    pub const EEL_INTERVAL_MIN: f32 = 4.0;
    pub const EEL_INTERVAL_DECAY: f32 = 0.01;

    /// Where collected shells fly to (the HUD shell counter)
    pub const HUD_SHELL_ANCHOR: (f32, f32) = (WORLD_WIDTH - 70.0, 25.0);
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Decelerating curve `1 - (1 - t)²`
#[inline]
pub fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
