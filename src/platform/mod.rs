//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard codes and UI buttons to actions)
//! - DOM access for screens and HUD text (wasm only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use input::{Action, GAME_BUTTONS, action_for_button, action_for_key};
