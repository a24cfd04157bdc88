//! Moray eel hazard
//!
//! Each eel runs its own phase sequence:
//!
//! ```text
//! Hidden -> Warn (1.4s) -> Emerge (0.4s) -> Visible (2-3s) -> Retreat (0.4s) -> Hidden
//! ```
//!
//! Only `Emerge` and `Visible` have a hitbox. Starting the warn phase returns
//! a [`HazardSignal`] that the session turns into the player's double jump.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::{Particle, ParticleSpec};
use super::rng::SimRng;
use crate::consts::GROUND_Y;
use crate::{ease_out, lerp};

pub const WARN_SECS: f32 = 1.4;
pub const EMERGE_SECS: f32 = 0.4;
pub const VISIBLE_SECS_MIN: f32 = 2.0;
pub const VISIBLE_SECS_MAX: f32 = 3.0;
pub const RETREAT_SECS: f32 = 0.4;

/// Head height when fully raised
pub const RAISED_Y: f32 = GROUND_Y - 95.0;
/// Head height when tucked under the sand
pub const SUBMERGED_Y: f32 = GROUND_Y + 20.0;
const HALF_WIDTH: f32 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EelPhase {
    Hidden,
    Warn,
    Emerge,
    Visible,
    Retreat,
}

impl EelPhase {
    /// Warn, Emerge or Visible: the eel is the current threat
    pub fn is_active(self) -> bool {
        matches!(self, EelPhase::Warn | EelPhase::Emerge | EelPhase::Visible)
    }

    /// Emerge or Visible: the eel can hit the player
    pub fn is_dangerous(self) -> bool {
        matches!(self, EelPhase::Emerge | EelPhase::Visible)
    }
}

/// Emitted by a hazard for the session to act on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HazardSignal {
    /// Warn phase began: grant the double jump and show the marker
    Telegraph { x: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eel {
    pub x: f32,
    pub phase: EelPhase,
    /// Time left in the current phase
    pub timer: f32,
    /// Current head height
    pub current_y: f32,
    /// Body undulation clock (visual)
    pub body_wave: f32,
    /// Bubbles rising from the burrow during the telegraph
    pub bubbles: Vec<Particle>,
}

impl Eel {
    pub fn new(x: f32) -> Self {
        Self {
            x,
            phase: EelPhase::Hidden,
            timer: 0.0,
            current_y: SUBMERGED_Y,
            body_wave: 0.0,
            bubbles: Vec::new(),
        }
    }

    /// Begin the warn telegraph
    pub fn start(&mut self, rng: &mut SimRng) -> HazardSignal {
        self.phase = EelPhase::Warn;
        self.timer = WARN_SECS;
        for _ in 0..7 {
            let at = Vec2::new(self.x + rng.range(-14.0, 14.0), GROUND_Y);
            let spec = ParticleSpec {
                vel: Vec2::new(0.0, rng.range(-95.0, -50.0)),
                life: 1.0,
                size: rng.range(3.0, 7.0),
                color: 0xC8F0FF,
                alpha: 0.8,
                gravity: 0.0,
                star: false,
            };
            self.bubbles.push(Particle::spawn(at, spec, rng));
        }
        HazardSignal::Telegraph { x: self.x }
    }

    /// Scroll and advance the phase timer. Leftover time past a phase
    /// boundary carries into the next phase.
    pub fn update(&mut self, dt: f32, speed: f32, rng: &mut SimRng) {
        self.x -= speed * dt;
        self.body_wave += dt * 3.0;
        for bubble in self.bubbles.iter_mut() {
            bubble.pos.x -= speed * dt;
        }
        self.bubbles.retain_mut(|b| b.update(dt));

        if self.phase == EelPhase::Hidden {
            return;
        }

        self.timer -= dt;

        match self.phase {
            EelPhase::Warn => {
                if self.timer <= 0.0 {
                    self.phase = EelPhase::Emerge;
                    self.timer += EMERGE_SECS;
                    self.current_y = Self::emerge_y(self.timer);
                }
            }
            EelPhase::Emerge => {
                if self.timer <= 0.0 {
                    self.phase = EelPhase::Visible;
                    self.current_y = RAISED_Y;
                    self.timer += rng.range(VISIBLE_SECS_MIN, VISIBLE_SECS_MAX);
                } else {
                    self.current_y = Self::emerge_y(self.timer);
                }
            }
            EelPhase::Visible => {
                if self.timer <= 0.0 {
                    self.phase = EelPhase::Retreat;
                    self.timer += RETREAT_SECS;
                    self.current_y = Self::retreat_y(self.timer);
                }
            }
            EelPhase::Retreat => {
                if self.timer <= 0.0 {
                    self.phase = EelPhase::Hidden;
                    self.timer = 0.0;
                    self.current_y = SUBMERGED_Y;
                } else {
                    self.current_y = Self::retreat_y(self.timer);
                }
            }
            EelPhase::Hidden => {}
        }
    }

    fn emerge_y(timer: f32) -> f32 {
        let t = (1.0 - timer / EMERGE_SECS).clamp(0.0, 1.0);
        lerp(SUBMERGED_Y, RAISED_Y, ease_out(t))
    }

    fn retreat_y(timer: f32) -> f32 {
        let t = (1.0 - timer / RETREAT_SECS).clamp(0.0, 1.0);
        lerp(RAISED_Y, SUBMERGED_Y, ease_out(t))
    }

    /// Collision box, only while emerging or up
    pub fn hitbox(&self) -> Option<Rect> {
        if !self.phase.is_dangerous() {
            return None;
        }
        Some(Rect::new(
            self.x - HALF_WIDTH,
            self.current_y,
            HALF_WIDTH * 2.0,
            GROUND_Y - self.current_y,
        ))
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.01;

    /// Step until the phase changes, returning elapsed time
    fn time_in_phase(eel: &mut Eel, rng: &mut SimRng) -> f32 {
        let phase = eel.phase;
        let mut elapsed = 0.0;
        while eel.phase == phase {
            eel.update(DT, 0.0, rng);
            elapsed += DT;
            assert!(elapsed < 10.0, "stuck in {:?}", phase);
        }
        elapsed
    }

    #[test]
    fn test_phase_durations() {
        let mut rng = SimRng::new(99);
        let mut eel = Eel::new(600.0);
        eel.start(&mut rng);
        assert_eq!(eel.phase, EelPhase::Warn);

        let warn = time_in_phase(&mut eel, &mut rng);
        assert!((warn - WARN_SECS).abs() <= DT + 1e-4, "warn {}", warn);
        assert_eq!(eel.phase, EelPhase::Emerge);

        let emerge = time_in_phase(&mut eel, &mut rng);
        assert!((emerge - EMERGE_SECS).abs() <= DT + 1e-4, "emerge {}", emerge);
        assert_eq!(eel.phase, EelPhase::Visible);

        let visible = time_in_phase(&mut eel, &mut rng);
        assert!(visible >= VISIBLE_SECS_MIN - DT && visible <= VISIBLE_SECS_MAX + DT);
        assert_eq!(eel.phase, EelPhase::Retreat);

        let retreat = time_in_phase(&mut eel, &mut rng);
        assert!((retreat - RETREAT_SECS).abs() <= DT + 1e-4, "retreat {}", retreat);
        assert_eq!(eel.phase, EelPhase::Hidden);
        assert_eq!(eel.current_y, SUBMERGED_Y);
    }

    #[test]
    fn test_hitbox_only_when_dangerous() {
        let mut rng = SimRng::new(5);
        let mut eel = Eel::new(600.0);
        assert!(eel.hitbox().is_none());
        eel.start(&mut rng);
        for _ in 0..800 {
            assert_eq!(eel.hitbox().is_some(), eel.phase.is_dangerous());
            eel.update(DT, 0.0, &mut rng);
        }
        assert_eq!(eel.phase, EelPhase::Hidden);
        assert!(eel.hitbox().is_none());
    }

    #[test]
    fn test_emerge_rises_monotonically() {
        let mut rng = SimRng::new(1);
        let mut eel = Eel::new(600.0);
        eel.start(&mut rng);
        while eel.phase != EelPhase::Emerge {
            eel.update(DT, 0.0, &mut rng);
        }
        let mut last = eel.current_y;
        while eel.phase == EelPhase::Emerge {
            eel.update(DT, 0.0, &mut rng);
            assert!(eel.current_y <= last);
            last = eel.current_y;
        }
        assert_eq!(eel.current_y, RAISED_Y);
    }

    #[test]
    fn test_start_signals_telegraph() {
        let mut rng = SimRng::new(1);
        let mut eel = Eel::new(1390.0);
        let signal = eel.start(&mut rng);
        assert_eq!(signal, HazardSignal::Telegraph { x: 1390.0 });
        assert!(eel.is_active());
    }

    #[test]
    fn test_scrolls_with_world() {
        let mut rng = SimRng::new(1);
        let mut eel = Eel::new(1000.0);
        eel.update(0.5, 300.0, &mut rng);
        assert_eq!(eel.x, 850.0);
        assert_eq!(eel.phase, EelPhase::Hidden);
    }
}
