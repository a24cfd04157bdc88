//! Input mapping
//!
//! Browser events are reduced to [`Action`]s before they touch the game, so
//! the mapping can be tested without a DOM.

use crate::sim::TickInput;

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    TogglePause,
    Start,
    Resume,
    /// Front-end only; never reaches the simulation
    CycleColor,
}

/// Buttons wired on the game page
pub const GAME_BUTTONS: [&str; 5] = [
    "btn-play",
    "btn-restart-pause",
    "btn-retry",
    "btn-resume",
    "btn-color",
];

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_key(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
        "Escape" | "KeyP" => Some(Action::TogglePause),
        _ => None,
    }
}

/// Map a button element id to an action
pub fn action_for_button(id: &str) -> Option<Action> {
    match id {
        "btn-play" | "btn-restart-pause" | "btn-retry" => Some(Action::Start),
        "btn-resume" => Some(Action::Resume),
        "btn-color" => Some(Action::CycleColor),
        _ => None,
    }
}

impl Action {
    /// Latch this action into the next tick's input.
    ///
    /// Returns false for actions the simulation does not handle.
    pub fn apply(self, input: &mut TickInput) -> bool {
        match self {
            Action::Jump => input.jump = true,
            Action::TogglePause => input.toggle_pause = true,
            Action::Start => input.start = true,
            Action::Resume => input.resume = true,
            Action::CycleColor => return false,
        }
        true
    }

    /// Keys that should not scroll the page
    pub fn prevents_default(self) -> bool {
        self == Action::Jump
    }
}
