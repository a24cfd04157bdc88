//! Spawn timers for urchins, shells and eels
//!
//! Each timer accumulates play time and fires once it reaches its
//! threshold. Urchins come faster the longer the run lasts; eels only spawn
//! when no other eel is active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Shell, Urchin};
use super::hazard::{Eel, HazardSignal};
use super::rng::SimRng;
use crate::consts::*;

/// Spacing between paired urchins
const URCHIN_PAIR_GAP: f32 = 58.0;

/// Off-screen spawn offsets (right of the canvas)
const URCHIN_SPAWN_X: f32 = WORLD_WIDTH + 60.0;
const SHELL_SPAWN_X: f32 = WORLD_WIDTH + 40.0;
const EEL_SPAWN_X: f32 = WORLD_WIDTH + 110.0;

/// What a spawn pass produced
#[derive(Debug, Default)]
pub struct SpawnOutcome {
    pub urchins: Vec<Urchin>,
    pub shell: Option<Shell>,
    pub eel: Option<(Eel, HazardSignal)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub obstacle_timer: f32,
    pub shell_timer: f32,
    pub eel_timer: f32,
    /// Current threshold for the next eel
    pub eel_interval: f32,
}

impl Spawner {
    pub fn new(rng: &mut SimRng) -> Self {
        Self {
            obstacle_timer: 0.0,
            shell_timer: 0.0,
            eel_timer: 0.0,
            eel_interval: rng.range(7.0, 12.0),
        }
    }

    /// Seconds between urchin spawns at the given play time
    pub fn obstacle_interval(play_time: f32) -> f32 {
        (OBSTACLE_INTERVAL_START - play_time * OBSTACLE_INTERVAL_DECAY).max(OBSTACLE_INTERVAL_MIN)
    }

    /// Fresh eel threshold, re-rolled after each eel
    pub fn roll_eel_interval(play_time: f32, rng: &mut SimRng) -> f32 {
        (rng.range(6.0, 10.0) - play_time * EEL_INTERVAL_DECAY).max(EEL_INTERVAL_MIN)
    }

    /// Advance timers and build whatever is due.
    ///
    /// `eel_active` must reflect the eel pool before this step so at most
    /// one eel is ever a live threat.
    pub fn step(
        &mut self,
        dt: f32,
        play_time: f32,
        eel_active: bool,
        rng: &mut SimRng,
    ) -> SpawnOutcome {
        let mut out = SpawnOutcome::default();

        self.obstacle_timer += dt;
        if self.obstacle_timer >= Self::obstacle_interval(play_time) {
            self.obstacle_timer = 0.0;
            let count = if rng.chance(OBSTACLE_PAIR_CHANCE) { 2 } else { 1 };
            for i in 0..count {
                let x = URCHIN_SPAWN_X + i as f32 * URCHIN_PAIR_GAP;
                out.urchins.push(Urchin::spawn(x, rng));
            }
        }

        self.shell_timer += dt;
        if self.shell_timer >= SHELL_INTERVAL {
            self.shell_timer = 0.0;
            let y = GROUND_Y - rng.range(60.0, 210.0);
            out.shell = Some(Shell::spawn(Vec2::new(SHELL_SPAWN_X, y), rng));
        }

        self.eel_timer += dt;
        if self.eel_timer >= self.eel_interval && !eel_active {
            self.eel_timer = 0.0;
            self.eel_interval = Self::roll_eel_interval(play_time, rng);
            let mut eel = Eel::new(EEL_SPAWN_X);
            let signal = eel.start(rng);
            log::debug!("Eel spawned, next in {:.1}s", self.eel_interval);
            out.eel = Some((eel, signal));
        }

        out
    }
}
