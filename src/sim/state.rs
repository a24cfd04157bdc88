//! Session state and lifecycle
//!
//! `GameState` owns every entity pool, the spawner and the RNG. The
//! front-end only ever mutates it through [`super::tick`] and reads it back
//! for drawing and HUD updates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::backdrop::Backdrop;
use super::effects::{Particle, ScorePopup};
use super::entities::{Shell, ShellKind, Urchin};
use super::hazard::{Eel, EelPhase, HazardSignal};
use super::player::Player;
use super::rng::SimRng;
use super::spawner::Spawner;
use crate::consts::*;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first input
    Start,
    /// Active run
    Playing,
    /// Run frozen, resumable
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Things the front-end reacts to (screens, storage, HUD)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    Jumped,
    DoubleJumped,
    EelWarning,
    ShellCollected {
        kind: ShellKind,
        points: u32,
    },
    GameOver {
        score: u64,
        shells: u32,
        /// High score after this run
        best: u64,
        new_best: bool,
    },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Fractional; shown floored
    pub score: f32,
    pub shell_count: u32,
    /// Meters travelled
    pub distance: f32,
    /// Current scroll speed (pixels/s)
    pub speed: f32,
    /// Seconds spent in `Playing` this run
    pub play_time: f32,
    /// Best score seen, loaded from storage at startup
    pub high_score: u64,
    /// An eel telegraph marker should be shown
    pub eel_warning: bool,

    pub player: Player,
    pub obstacles: Vec<Urchin>,
    pub eels: Vec<Eel>,
    pub shells: Vec<Shell>,
    pub particles: Vec<Particle>,
    pub popups: Vec<ScorePopup>,
    pub spawner: Spawner,
    pub backdrop: Backdrop,
    pub rng: SimRng,

    /// Drained by the front-end every frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Title-screen state for the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let spawner = Spawner::new(&mut rng);
        Self {
            phase: GamePhase::Start,
            score: 0.0,
            shell_count: 0,
            distance: 0.0,
            speed: BASE_SPEED,
            play_time: 0.0,
            high_score: 0,
            eel_warning: false,
            player: Player::new(),
            obstacles: Vec::new(),
            eels: Vec::new(),
            shells: Vec::new(),
            particles: Vec::new(),
            popups: Vec::new(),
            spawner,
            backdrop: Backdrop::default(),
            rng,
            events: Vec::new(),
        }
    }

    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Begin a fresh run (from the title, game over, or the pause menu)
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0.0;
        self.shell_count = 0;
        self.distance = 0.0;
        self.speed = BASE_SPEED;
        self.play_time = 0.0;
        self.eel_warning = false;
        self.player = Player::new();
        self.obstacles.clear();
        self.eels.clear();
        self.shells.clear();
        self.particles.clear();
        self.popups.clear();
        self.spawner = Spawner::new(&mut self.rng);
        self.backdrop = Backdrop::default();
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (best {})", self.high_score);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Score as displayed and stored
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// End the run after a fatal collision
    pub fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;

        let score = self.display_score();
        let new_best = score > self.high_score;
        if new_best {
            self.high_score = score;
        }

        let origin = self.player.center();
        Particle::burst(&mut self.particles, &mut self.rng, origin, 22, 0xFF6B9D);

        self.events.push(GameEvent::GameOver {
            score,
            shells: self.shell_count,
            best: self.high_score,
            new_best,
        });
        log::info!(
            "Game over: score {}, shells {}, distance {:.0}m{}",
            score,
            self.shell_count,
            self.distance,
            if new_best { " (new best)" } else { "" }
        );
    }

    /// Some eel is telegraphing or up
    pub fn eel_active(&self) -> bool {
        self.eels.iter().any(|e| e.is_active())
    }

    /// Consume a signal raised by a hazard
    pub fn apply_hazard_signal(&mut self, signal: HazardSignal) {
        match signal {
            HazardSignal::Telegraph { x } => {
                self.player.enable_double_jump();
                self.eel_warning = true;
                self.events.push(GameEvent::EelWarning);
                log::debug!("Eel telegraph at x={:.0}", x);
            }
        }
    }

    /// Screen x of the eel warning marker, kept inside the canvas
    pub fn warning_marker_x(&self) -> Option<f32> {
        if self.phase != GamePhase::Playing || !self.eel_warning {
            return None;
        }
        self.eels
            .iter()
            .find(|e| e.phase == EelPhase::Warn)
            .map(|e| e.x.clamp(80.0, WORLD_WIDTH - 80.0))
    }

    /// Where the trailing bubble is released
    pub(crate) fn bubble_origin(&mut self) -> Vec2 {
        Vec2::new(
            self.player.x + self.rng.range(-6.0, 6.0),
            self.player.y + self.rng.range(20.0, 60.0),
        )
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_title_screen() {
        let state = GameState::new(1).with_high_score(77);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.high_score, 77);
        assert_eq!(state.speed, BASE_SPEED);
        assert!((7.0..12.0).contains(&state.spawner.eel_interval));
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut state = GameState::new(1);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Start);

        state.start_run();
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Playing);

        state.end_run();
        state.resume();
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_keeps_best_and_clears_run() {
        let mut state = GameState::new(5);
        state.start_run();
        state.score = 321.7;
        state.shell_count = 4;
        state.obstacles.push(Urchin::with_size(500.0, 30.0));
        state.end_run();
        assert_eq!(state.high_score, 321);

        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.high_score, 321);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.shell_count, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_telegraph_grants_double_jump() {
        let mut state = GameState::new(3);
        state.start_run();
        let mut eel = Eel::new(900.0);
        let signal = eel.start(&mut state.rng);
        state.eels.push(eel);
        state.apply_hazard_signal(signal);

        assert!(state.player.double_jump_ready);
        assert_eq!(state.warning_marker_x(), Some(900.0));
        assert_eq!(state.drain_events().last(), Some(&GameEvent::EelWarning));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_warning_marker_clamped() {
        let mut state = GameState::new(3);
        state.start_run();
        let mut eel = Eel::new(WORLD_WIDTH + 110.0);
        let signal = eel.start(&mut state.rng);
        state.eels.push(eel);
        state.apply_hazard_signal(signal);
        assert_eq!(state.warning_marker_x(), Some(WORLD_WIDTH - 80.0));
    }
}
