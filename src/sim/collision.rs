//! Collision detection and resolution
//!
//! Everything in the world collides as an axis-aligned box. Each step the
//! player box is tested against obstacles, then live eels (first hit ends the
//! run), then every uncollected shell (all hits count).

use glam::Vec2;

use super::effects::{Particle, ScorePopup};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Axis-aligned bounding box, `(x, y)` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    Urchin,
    Eel,
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub fatal: Option<Fatal>,
    pub shells_collected: u32,
}

/// First fatal contact, obstacles before hazards
pub fn find_fatal(state: &GameState) -> Option<Fatal> {
    let player_box = state.player.hitbox();

    if state
        .obstacles
        .iter()
        .any(|urchin| player_box.overlaps(&urchin.hitbox()))
    {
        return Some(Fatal::Urchin);
    }

    if state
        .eels
        .iter()
        .filter_map(|eel| eel.hitbox())
        .any(|hb| player_box.overlaps(&hb))
    {
        return Some(Fatal::Eel);
    }

    None
}

/// Run the collision pass and apply its effects to the session
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    if let Some(fatal) = find_fatal(state) {
        log::info!("Hit {:?}", fatal);
        state.end_run();
        report.fatal = Some(fatal);
        return report;
    }

    let player_box = state.player.hitbox();
    let anchor = Vec2::new(HUD_SHELL_ANCHOR.0, HUD_SHELL_ANCHOR.1);
    let burst_origin = state.player.center();
    let popup_origin = Vec2::new(state.player.x, state.player.y);

    // Deferred so the shell borrow ends before touching the other pools
    let mut collected = Vec::new();
    for shell in state.shells.iter_mut() {
        if shell.is_flying() || !player_box.overlaps(&shell.hitbox()) {
            continue;
        }
        shell.collect(anchor);
        collected.push(shell.kind);
    }

    for kind in collected {
        let points = kind.points();
        let rarity = kind.rarity();
        state.shell_count += 1;
        state.score += points as f32;
        state
            .popups
            .push(ScorePopup::new(popup_origin, points, rarity.popup_color()));
        Particle::burst(
            &mut state.particles,
            &mut state.rng,
            burst_origin,
            rarity.burst_count(),
            kind.color(),
        );
        state.player.celebrate();
        state.events.push(GameEvent::ShellCollected { kind, points });
        report.shells_collected += 1;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Shell, ShellKind, Urchin};
    use crate::sim::hazard::Eel;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(1234);
        state.start_run();
        state
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_player_box_matches_layout() {
        let state = playing_state();
        let hb = state.player.hitbox();
        assert_eq!(hb.x, 147.0);
        assert_eq!(hb.y, GROUND_Y - PLAYER_HEIGHT);
        assert_eq!(hb.w, 26.0);
        assert!((hb.h - PLAYER_HEIGHT * 0.82).abs() < 1e-4);
    }

    #[test]
    fn test_urchin_hit_ends_run_same_step() {
        let mut state = playing_state();
        state.score = 50.0;
        state.high_score = 10;
        state.obstacles.push(Urchin::with_size(PLAYER_X, 34.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.fatal, Some(Fatal::Urchin));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 50);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver { new_best: true, best: 50, .. }
        )));
    }

    #[test]
    fn test_high_score_kept_when_not_beaten() {
        let mut state = playing_state();
        state.score = 50.0;
        state.high_score = 500;
        state.obstacles.push(Urchin::with_size(PLAYER_X, 34.0));

        resolve_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 500);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::GameOver { new_best: false, best: 500, .. }
        )));
    }

    #[test]
    fn test_warning_eel_is_harmless() {
        let mut state = playing_state();
        let mut eel = Eel::new(PLAYER_X);
        eel.start(&mut state.rng);
        state.eels.push(eel);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.fatal, None);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_visible_eel_is_fatal() {
        let mut state = playing_state();
        let mut eel = Eel::new(PLAYER_X);
        eel.start(&mut state.rng);
        // Run through warn and emerge
        for _ in 0..200 {
            eel.update(0.01, 0.0, &mut state.rng);
        }
        assert!(eel.hitbox().is_some());
        state.eels.push(eel);

        let report = resolve_collisions(&mut state);
        assert_eq!(report.fatal, Some(Fatal::Eel));
    }

    #[test]
    fn test_several_shells_in_one_step() {
        let mut state = playing_state();
        let at = state.player.center();
        state.shells.push(Shell::new(at, ShellKind::Scallop));
        state.shells.push(Shell::new(at, ShellKind::Cowrie));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.shells_collected, 2);
        assert_eq!(state.shell_count, 2);
        assert_eq!(state.score, 110.0);
        assert_eq!(state.popups.len(), 2);
        assert!(state.shells.iter().all(|s| s.is_flying()));

        // Already flying shells are not collected twice
        let report = resolve_collisions(&mut state);
        assert_eq!(report.shells_collected, 0);
        assert_eq!(state.shell_count, 2);
    }

    #[test]
    fn test_fatal_hit_skips_shells() {
        let mut state = playing_state();
        state
            .shells
            .push(Shell::new(state.player.center(), ShellKind::Conch));
        state.obstacles.push(Urchin::with_size(PLAYER_X, 30.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.fatal, Some(Fatal::Urchin));
        assert_eq!(state.shell_count, 0);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
