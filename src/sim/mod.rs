//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! dependencies:
//! - Caller-supplied `dt`, clamped per frame
//! - Seeded RNG only
//! - Results reported through `GameEvent`s, never callbacks

pub mod backdrop;
pub mod collision;
pub mod effects;
pub mod entities;
pub mod hazard;
pub mod player;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use backdrop::Backdrop;
pub use collision::{CollisionReport, Fatal, Rect, resolve_collisions};
pub use effects::{Particle, ScorePopup};
pub use entities::{Rarity, Shell, ShellKind, Urchin};
pub use hazard::{Eel, EelPhase, HazardSignal};
pub use player::{Player, Pose};
pub use rng::SimRng;
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
