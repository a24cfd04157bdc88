//! The seahorse: vertical kinematics plus a little animation state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Animation pose tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Swim,
    Jump,
    DoubleJump,
}

/// Player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Top of the body
    pub y: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    /// Granted while an eel is telegraphed or up
    pub double_jump_ready: bool,
    pub pose: Pose,

    // Animation (not gameplay-affecting)
    pub anim_t: f32,
    pub fin_angle: f32,
    pub bob_offset: f32,
    /// Wiggle after collecting a shell, counts down to 0
    pub shimmy: f32,
    /// Crown glow after a double jump, counts down to 0
    pub crown_glow: f32,
    /// Time since the last trailing bubble
    pub bubble_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: Self::floor_y(),
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            on_ground: true,
            double_jump_ready: false,
            pose: Pose::Idle,
            anim_t: 0.0,
            fin_angle: 0.0,
            bob_offset: 0.0,
            shimmy: 0.0,
            crown_glow: 0.0,
            bubble_timer: 0.0,
        }
    }

    /// Resting `y` when standing on the sea floor
    fn floor_y() -> f32 {
        GROUND_Y - PLAYER_HEIGHT
    }

    /// Jump off the ground. Returns false when airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = JUMP_VELOCITY;
        self.on_ground = false;
        self.pose = Pose::Jump;
        true
    }

    /// Mid-air jump, only while granted. Returns false otherwise.
    pub fn double_jump(&mut self) -> bool {
        if !self.double_jump_ready {
            return false;
        }
        self.vy = DOUBLE_JUMP_VELOCITY;
        self.double_jump_ready = false;
        self.on_ground = false;
        self.pose = Pose::DoubleJump;
        self.crown_glow = 1.0;
        true
    }

    /// One press of the jump control: ground jump first, then double jump
    pub fn request_jump(&mut self) -> bool {
        self.jump() || self.double_jump()
    }

    pub fn enable_double_jump(&mut self) {
        self.double_jump_ready = true;
    }

    pub fn revoke_double_jump(&mut self) {
        self.double_jump_ready = false;
    }

    /// Start the collect wiggle
    pub fn celebrate(&mut self) {
        self.shimmy = 0.45;
    }

    /// Advance animation, and physics when `apply_physics` is set
    pub fn update(&mut self, dt: f32, apply_physics: bool) {
        self.anim_t += dt;
        self.fin_angle = (self.anim_t * 9.0).sin() * 0.32;
        if self.shimmy > 0.0 {
            self.shimmy = (self.shimmy - dt * 2.5).max(0.0);
        }
        if self.crown_glow > 0.0 {
            self.crown_glow = (self.crown_glow - dt * 1.4).max(0.0);
        }

        if !apply_physics {
            self.bob_offset = (self.anim_t * 2.0).sin() * 3.0;
            return;
        }

        self.bubble_timer += dt;

        if !self.on_ground {
            self.vy += GRAVITY * dt;
            self.y += self.vy * dt;
        }

        let floor = Self::floor_y();
        if self.y >= floor {
            self.y = floor;
            self.vy = 0.0;
            self.on_ground = true;
        }

        self.bob_offset = if self.on_ground {
            (self.anim_t * 2.0).sin() * 3.0
        } else {
            0.0
        };
        self.pose = if self.on_ground {
            Pose::Swim
        } else if self.pose == Pose::DoubleJump {
            Pose::DoubleJump
        } else {
            Pose::Jump
        };
    }

    /// Collision box: narrower than the sprite, trimmed at the tail
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x - 13.0, self.y, 26.0, self.height * 0.82)
    }

    /// Middle of the body, where bursts originate
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height / 2.0)
    }

    /// Bottom of the body
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_jump_then_jump_again() {
        let mut p = Player::new();
        assert!(p.jump());
        assert!(!p.on_ground);
        assert_eq!(p.vy, JUMP_VELOCITY);

        p.update(DT, true);
        let vy = p.vy;
        assert!(!p.jump());
        assert_eq!(p.vy, vy);
    }

    #[test]
    fn test_double_jump_requires_grant() {
        let mut p = Player::new();
        p.jump();
        p.update(DT, true);
        let vy = p.vy;
        assert!(!p.double_jump());
        assert_eq!(p.vy, vy);

        p.enable_double_jump();
        assert!(p.double_jump());
        assert_eq!(p.vy, DOUBLE_JUMP_VELOCITY);
        assert_eq!(p.pose, Pose::DoubleJump);
        // Consumed
        assert!(!p.double_jump_ready);
        assert!(!p.double_jump());
    }

    #[test]
    fn test_request_jump_does_one_action_per_press() {
        let mut p = Player::new();
        p.enable_double_jump();
        assert!(p.request_jump());
        // Ground jump used, grant still available
        assert_eq!(p.vy, JUMP_VELOCITY);
        assert!(p.double_jump_ready);

        assert!(p.request_jump());
        assert_eq!(p.vy, DOUBLE_JUMP_VELOCITY);
        assert!(!p.request_jump());
    }

    #[test]
    fn test_lands_back_on_floor() {
        let mut p = Player::new();
        let floor = p.y;
        p.jump();
        let mut peak = floor;
        for _ in 0..240 {
            p.update(DT, true);
            peak = peak.min(p.y);
        }
        assert!(peak < floor - 100.0);
        assert!(p.on_ground);
        assert_eq!(p.y, floor);
        assert_eq!(p.vy, 0.0);
        assert_eq!(p.pose, Pose::Swim);
    }

    #[test]
    fn test_no_physics_when_frozen() {
        let mut p = Player::new();
        p.jump();
        let y = p.y;
        p.update(0.05, false);
        assert_eq!(p.y, y);
        assert_eq!(p.bubble_timer, 0.0);
    }
}
