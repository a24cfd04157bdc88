//! Transient visual effects: particles and floating score text
//!
//! None of this affects gameplay, but it lives in the simulation so the
//! random jitter comes from the run's seeded RNG.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::SimRng;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Hard cap on live particles
pub const MAX_PARTICLES: usize = 512;

/// Particles further than this outside the canvas are dropped
const OFFSCREEN_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
    pub gravity: f32,
    /// Drawn as a star instead of a dot
    pub star: bool,
}

/// Launch parameters for [`Particle::spawn`]
#[derive(Debug, Clone, Copy)]
pub struct ParticleSpec {
    pub vel: Vec2,
    pub life: f32,
    pub size: f32,
    pub color: u32,
    pub alpha: f32,
    pub gravity: f32,
    pub star: bool,
}

impl Default for ParticleSpec {
    fn default() -> Self {
        Self {
            vel: Vec2::new(0.0, -60.0),
            life: 1.0,
            size: 5.0,
            color: 0xFFFFFF,
            alpha: 1.0,
            gravity: 120.0,
            star: false,
        }
    }
}

impl Particle {
    /// New particle with a little velocity jitter
    pub fn spawn(pos: Vec2, spec: ParticleSpec, rng: &mut SimRng) -> Self {
        let jitter = Vec2::new(rng.range(-12.0, 12.0), rng.range(-12.0, 12.0));
        Self {
            pos,
            vel: spec.vel + jitter,
            life: spec.life,
            max_life: spec.life,
            size: spec.size,
            color: spec.color,
            alpha: spec.alpha,
            gravity: spec.gravity,
            star: spec.star,
        }
    }

    /// Returns false once the particle has burned out
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel.y += self.gravity * dt;
        self.life -= dt;
        self.life > 0.0
    }

    /// Still near enough to the canvas to be worth keeping
    pub fn on_screen(&self) -> bool {
        self.pos.x > -OFFSCREEN_MARGIN
            && self.pos.x < WORLD_WIDTH + OFFSCREEN_MARGIN
            && self.pos.y > -OFFSCREEN_MARGIN
            && self.pos.y < WORLD_HEIGHT + OFFSCREEN_MARGIN
    }

    /// Remaining life as a 0..1 fraction
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }

    /// Ring of `count` particles flying outward from `origin`
    pub fn burst(
        particles: &mut Vec<Particle>,
        rng: &mut SimRng,
        origin: Vec2,
        count: usize,
        color: u32,
    ) {
        for i in 0..count {
            let angle = (i as f32 / count as f32) * std::f32::consts::TAU;
            let speed = rng.range(55.0, 140.0);
            let spec = ParticleSpec {
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: rng.range(0.5, 1.0),
                size: rng.range(4.0, 9.0),
                color,
                gravity: 90.0,
                star: rng.chance(0.3),
                ..Default::default()
            };
            push_capped(particles, Particle::spawn(origin, spec, rng));
        }
    }

    /// Downward splash under the feet after a jump press
    pub fn splash(particles: &mut Vec<Particle>, rng: &mut SimRng, feet: Vec2) {
        for _ in 0..8 {
            let at = feet + Vec2::new(rng.range(-8.0, 8.0), 0.0);
            let spec = ParticleSpec {
                vel: Vec2::new(rng.range(-50.0, 50.0), rng.range(40.0, 100.0)),
                life: rng.range(0.3, 0.7),
                size: rng.range(3.0, 6.0),
                color: 0x9BE6FF,
                alpha: 0.8,
                gravity: 60.0,
                star: false,
            };
            push_capped(particles, Particle::spawn(at, spec, rng));
        }
    }

    /// A single rising bubble
    pub fn bubble(particles: &mut Vec<Particle>, rng: &mut SimRng, at: Vec2) {
        let spec = ParticleSpec {
            vel: Vec2::new(rng.range(-8.0, 8.0), rng.range(-55.0, -25.0)),
            life: rng.range(0.5, 1.1),
            size: rng.range(2.0, 5.0),
            color: 0x9BE1FF,
            alpha: 0.7,
            gravity: 0.0,
            star: false,
        };
        push_capped(particles, Particle::spawn(at, spec, rng));
    }
}

fn push_capped(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Floating "+N" text after collecting a shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub vy: f32,
    pub points: u32,
    pub color: u32,
    pub life: f32,
    pub max_life: f32,
}

impl ScorePopup {
    pub const LIFETIME: f32 = 1.2;

    pub fn new(pos: Vec2, points: u32, color: u32) -> Self {
        Self {
            pos,
            vy: -55.0,
            points,
            color,
            life: Self::LIFETIME,
            max_life: Self::LIFETIME,
        }
    }

    pub fn label(&self) -> String {
        format!("+{}", self.points)
    }

    /// Returns false once expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos.y += self.vy * dt;
        // 4% drag per 60 Hz frame
        self.vy *= 0.96f32.powf(dt * 60.0);
        self.life -= dt;
        self.life > 0.0
    }

    pub fn fade(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_expires() {
        let mut rng = SimRng::new(1);
        let mut p = Particle::spawn(
            Vec2::new(640.0, 360.0),
            ParticleSpec {
                life: 0.5,
                ..Default::default()
            },
            &mut rng,
        );
        let mut frames = 0;
        while p.update(0.05) {
            frames += 1;
        }
        assert!(frames <= 10);
    }

    #[test]
    fn test_particle_culled_offscreen() {
        let mut rng = SimRng::new(1);
        let mut p = Particle::spawn(
            Vec2::new(-WORLD_WIDTH, 360.0),
            ParticleSpec::default(),
            &mut rng,
        );
        assert!(p.update(0.01));
        assert!(!p.on_screen());
    }

    #[test]
    fn test_burst_count_and_cap() {
        let mut rng = SimRng::new(9);
        let mut particles = Vec::new();
        Particle::burst(&mut particles, &mut rng, Vec2::ZERO, 22, 0xFF6B9D);
        assert_eq!(particles.len(), 22);

        for _ in 0..100 {
            Particle::burst(&mut particles, &mut rng, Vec2::ZERO, 16, 0xFFFFFF);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_popup_rises_and_expires() {
        let mut popup = ScorePopup::new(Vec2::new(160.0, 400.0), 25, 0xFF69B4);
        assert_eq!(popup.label(), "+25");
        let mut alive = true;
        let mut t = 0.0;
        while alive {
            alive = popup.update(0.02);
            t += 0.02;
        }
        assert!(popup.pos.y < 400.0);
        assert!((t - ScorePopup::LIFETIME).abs() < 0.05);
    }
}
