//! Scrolling world entities: urchins (obstacles) and shells (collectibles)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::rng::SimRng;
use crate::consts::GROUND_Y;
use crate::ease_out;

/// Urchin body colors
pub const URCHIN_COLORS: [u32; 4] = [0x9B59B6, 0xE74C3C, 0xFF6B9D, 0xE85000];

/// A sea urchin sitting on the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Urchin {
    pub x: f32,
    /// Body radius
    pub size: f32,
    pub spines: u32,
    pub color: u32,
    pub pulse_phase: f32,
}

impl Urchin {
    /// Random urchin at `x`
    pub fn spawn(x: f32, rng: &mut SimRng) -> Self {
        let size = rng.range(28.0, 40.0);
        let spines = rng.range_inclusive(10, 15);
        let color = URCHIN_COLORS[rng.range_inclusive(0, 3) as usize];
        let pulse_phase = rng.range(0.0, std::f32::consts::TAU);
        Self {
            x,
            size,
            spines,
            color,
            pulse_phase,
        }
    }

    /// Plain urchin of a given size
    pub fn with_size(x: f32, size: f32) -> Self {
        Self {
            x,
            size,
            spines: 12,
            color: URCHIN_COLORS[0],
            pulse_phase: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.x -= speed * dt;
    }

    /// Spines stick up well above the dome, so the box is taller than wide
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x - self.size * 0.7,
            GROUND_Y - self.size * 1.85,
            self.size * 1.4,
            self.size * 1.85,
        )
    }
}

/// Shell rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    /// One uniform roll `u`: below 0.05 legendary, below 0.30 rare
    pub fn from_roll(u: f32) -> Self {
        if u < 0.05 {
            Rarity::Legendary
        } else if u < 0.30 {
            Rarity::Rare
        } else {
            Rarity::Common
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Rarity::Common => 10,
            Rarity::Rare => 25,
            Rarity::Legendary => 100,
        }
    }

    /// The two shell kinds of this tier
    pub fn kinds(self) -> [ShellKind; 2] {
        match self {
            Rarity::Common => [ShellKind::Scallop, ShellKind::Clam],
            Rarity::Rare => [ShellKind::Conch, ShellKind::Nautilus],
            Rarity::Legendary => [ShellKind::Cowrie, ShellKind::Abalone],
        }
    }

    /// Particles in the collect burst
    pub fn burst_count(self) -> usize {
        match self {
            Rarity::Common => 6,
            Rarity::Rare => 10,
            Rarity::Legendary => 16,
        }
    }

    /// Color of the floating "+N" text
    pub fn popup_color(self) -> u32 {
        match self {
            Rarity::Common => 0xFFFFFF,
            Rarity::Rare => 0xFF69B4,
            Rarity::Legendary => 0xFFD700,
        }
    }
}

/// Per-kind parameters
#[derive(Debug, Clone, Copy)]
pub struct ShellInfo {
    pub name: &'static str,
    pub rarity: Rarity,
    pub color: u32,
    pub glow: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellKind {
    Scallop,
    Clam,
    Conch,
    Nautilus,
    Cowrie,
    Abalone,
}

impl ShellKind {
    pub const ALL: [ShellKind; 6] = [
        ShellKind::Scallop,
        ShellKind::Clam,
        ShellKind::Conch,
        ShellKind::Nautilus,
        ShellKind::Cowrie,
        ShellKind::Abalone,
    ];

    pub fn info(self) -> ShellInfo {
        let (name, rarity, color, glow) = match self {
            ShellKind::Scallop => ("scallop", Rarity::Common, 0xFFB3D9, 0xFF6B9D),
            ShellKind::Clam => ("clam", Rarity::Common, 0xFFF44F, 0xFFD700),
            ShellKind::Conch => ("conch", Rarity::Rare, 0xFF8C69, 0xFF4500),
            ShellKind::Nautilus => ("nautilus", Rarity::Rare, 0xD8B4FE, 0x9370DB),
            ShellKind::Cowrie => ("cowrie", Rarity::Legendary, 0xFFD700, 0xFFA500),
            ShellKind::Abalone => ("abalone", Rarity::Legendary, 0xA8F0E0, 0x40E0D0),
        };
        ShellInfo {
            name,
            rarity,
            color,
            glow,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn rarity(self) -> Rarity {
        self.info().rarity
    }

    pub fn points(self) -> u32 {
        self.rarity().points()
    }

    pub fn color(self) -> u32 {
        self.info().color
    }

    /// Draw a tier, then a kind uniformly within it
    pub fn roll(rng: &mut SimRng) -> Self {
        let rarity = Rarity::from_roll(rng.unit());
        let kinds = rarity.kinds();
        kinds[rng.range_inclusive(0, 1) as usize]
    }
}

/// How fast a collected shell flies to the HUD (progress per second)
const FLY_RATE: f32 = 3.0;

/// A collectible shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shell {
    pub pos: Vec2,
    pub kind: ShellKind,
    pub anim_t: f32,
    /// 0 while drifting, then (0, 1] while flying to the HUD
    pub fly_progress: f32,
    pub fly_from: Vec2,
    pub fly_to: Vec2,
    /// Reached the HUD; remove
    pub done: bool,
}

impl Shell {
    pub fn new(pos: Vec2, kind: ShellKind) -> Self {
        Self {
            pos,
            kind,
            anim_t: 0.0,
            fly_progress: 0.0,
            fly_from: pos,
            fly_to: pos,
            done: false,
        }
    }

    pub fn spawn(pos: Vec2, rng: &mut SimRng) -> Self {
        Self::new(pos, ShellKind::roll(rng))
    }

    pub fn is_flying(&self) -> bool {
        self.fly_progress > 0.0
    }

    /// Start the fly-to-HUD animation
    pub fn collect(&mut self, target: Vec2) {
        self.fly_from = self.pos;
        self.fly_to = target;
        self.fly_progress = 0.001;
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.anim_t += dt;
        if self.is_flying() {
            self.fly_progress += dt * FLY_RATE;
            if self.fly_progress >= 1.0 {
                self.fly_progress = 1.0;
                self.done = true;
                return;
            }
            self.pos = self.fly_from.lerp(self.fly_to, ease_out(self.fly_progress));
        } else {
            self.pos.x -= speed * dt;
            // Gentle bob, ~0.6px per frame at 60 fps
            self.pos.y += (self.anim_t * 2.0).sin() * 36.0 * dt;
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x - 16.0, self.pos.y - 16.0, 32.0, 32.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rarity_distribution() {
        let mut rng = SimRng::new(2024);
        let trials = 10_000;
        let mut counts: HashMap<Rarity, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(ShellKind::roll(&mut rng).rarity()).or_default() += 1;
        }
        let share = |r| *counts.get(&r).unwrap_or(&0) as f32 / trials as f32;
        assert!((share(Rarity::Legendary) - 0.05).abs() <= 0.03);
        assert!((share(Rarity::Rare) - 0.25).abs() <= 0.03);
        assert!((share(Rarity::Common) - 0.70).abs() <= 0.03);
    }

    #[test]
    fn test_rarity_thresholds() {
        assert_eq!(Rarity::from_roll(0.0), Rarity::Legendary);
        assert_eq!(Rarity::from_roll(0.049), Rarity::Legendary);
        assert_eq!(Rarity::from_roll(0.05), Rarity::Rare);
        assert_eq!(Rarity::from_roll(0.299), Rarity::Rare);
        assert_eq!(Rarity::from_roll(0.30), Rarity::Common);
    }

    #[test]
    fn test_kind_table_consistent() {
        let mut names = std::collections::HashSet::new();
        for kind in ShellKind::ALL {
            assert!(kind.rarity().kinds().contains(&kind));
            assert!(names.insert(kind.name()), "duplicate name {}", kind.name());
        }
        assert_eq!(ShellKind::Cowrie.name(), "cowrie");
        assert_eq!(ShellKind::Clam.points(), 10);
        assert_eq!(ShellKind::Nautilus.points(), 25);
        assert_eq!(ShellKind::Abalone.points(), 100);
    }

    #[test]
    fn test_flight_reaches_hud() {
        let mut shell = Shell::new(Vec2::new(200.0, 400.0), ShellKind::Conch);
        shell.collect(Vec2::new(1210.0, 25.0));
        let mut steps = 0;
        while !shell.done {
            shell.update(1.0 / 60.0, 500.0);
            assert!(shell.fly_progress <= 1.0);
            steps += 1;
            assert!(steps < 100);
        }
        // About a third of a second
        assert!((19..=21).contains(&steps));
    }

    #[test]
    fn test_urchin_box_sits_on_floor() {
        let u = Urchin::with_size(500.0, 30.0);
        let hb = u.hitbox();
        assert!((hb.y + hb.h - GROUND_Y).abs() < 1e-3);
        assert!((hb.x + hb.w / 2.0 - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_spawned_urchin_ranges() {
        let mut rng = SimRng::new(3);
        for _ in 0..200 {
            let u = Urchin::spawn(0.0, &mut rng);
            assert!((28.0..40.0).contains(&u.size));
            assert!((10..=15).contains(&u.spines));
            assert!(URCHIN_COLORS.contains(&u.color));
        }
    }
}
