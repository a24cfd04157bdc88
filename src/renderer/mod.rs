//! Canvas 2D rendering module
//!
//! Plain shapes only. `scene` builds draw commands from the game state,
//! `canvas` replays them on the page's 2D context.

pub mod palette;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, build_scene};
