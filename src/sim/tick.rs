//! Per-frame simulation step
//!
//! Order within a frame is fixed: input actions, backdrop and player
//! animation, then (only while playing) spawn, entity updates and collisions.

use super::collision::resolve_collisions;
use super::effects::Particle;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::timing::clamp_dt;

/// Culling lines (left of the canvas) per entity type
const URCHIN_CULL_X: f32 = -80.0;
const EEL_CULL_X: f32 = -100.0;
const SHELL_CULL_X: f32 = -60.0;

/// Seconds between trailing bubbles
const BUBBLE_INTERVAL: f32 = 0.1;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump press (also starts a run from the title or game over)
    pub jump: bool,
    /// Pause toggle (Escape / P)
    pub toggle_pause: bool,
    /// Start a new run (play / restart / retry buttons)
    pub start: bool,
    /// Resume button
    pub resume: bool,
}

/// Advance the game by one frame of `dt` seconds (clamped to the frame cap)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);

    if input.start {
        state.start_run();
    }
    if input.resume {
        state.resume();
    }
    if input.toggle_pause {
        state.toggle_pause();
    }
    if input.jump {
        handle_jump(state);
    }

    let playing = state.phase == GamePhase::Playing;
    let scroll = if playing { state.speed } else { IDLE_SCROLL_SPEED };
    state.backdrop.update(dt, scroll);
    state.player.update(dt, playing);

    match state.phase {
        GamePhase::Playing => step_playing(state, dt),
        GamePhase::GameOver => {
            state.particles.retain_mut(|p| p.update(dt) && p.on_screen());
        }
        GamePhase::Start | GamePhase::Paused => {}
    }
}

fn handle_jump(state: &mut GameState) {
    match state.phase {
        GamePhase::Start | GamePhase::GameOver => state.start_run(),
        GamePhase::Playing => {
            if state.player.jump() {
                state.events.push(GameEvent::Jumped);
            } else if state.player.double_jump() {
                state.events.push(GameEvent::DoubleJumped);
            }
            if !state.player.on_ground {
                let feet = state.player.feet();
                Particle::splash(&mut state.particles, &mut state.rng, feet);
            }
        }
        GamePhase::Paused => {}
    }
}

fn step_playing(state: &mut GameState, dt: f32) {
    // Speed ramps linearly, so the trapezoid rule integrates distance exactly
    let prev_speed = state.speed;
    state.play_time += dt;
    state.speed = (BASE_SPEED + state.play_time * SPEED_RAMP).min(MAX_SPEED);
    state.distance += (prev_speed + state.speed) * 0.5 * dt / 100.0;
    state.score += state.speed * dt * SCORE_PER_PIXEL;

    let eel_active = state.eel_active();
    let spawned = state
        .spawner
        .step(dt, state.play_time, eel_active, &mut state.rng);
    state.obstacles.extend(spawned.urchins);
    if let Some(shell) = spawned.shell {
        state.shells.push(shell);
    }
    if let Some((eel, signal)) = spawned.eel {
        state.eels.push(eel);
        state.apply_hazard_signal(signal);
    }

    let speed = state.speed;
    state.obstacles.retain_mut(|u| {
        u.update(dt, speed);
        u.x > URCHIN_CULL_X
    });

    let rng = &mut state.rng;
    state.eels.retain_mut(|e| {
        e.update(dt, speed, rng);
        e.x > EEL_CULL_X
    });
    if !state.eel_active() {
        state.eel_warning = false;
        state.player.revoke_double_jump();
    }

    state.shells.retain_mut(|s| {
        s.update(dt, speed);
        !s.done && s.pos.x > SHELL_CULL_X
    });
    state.particles.retain_mut(|p| p.update(dt) && p.on_screen());
    state.popups.retain_mut(|p| p.update(dt));

    if state.player.bubble_timer > BUBBLE_INTERVAL {
        state.player.bubble_timer = 0.0;
        let at = state.bubble_origin();
        Particle::bubble(&mut state.particles, &mut state.rng, at);
    }

    resolve_collisions(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Urchin;
    use crate::sim::hazard::EelPhase;

    const DT: f32 = 0.01;

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    /// Playing state with spawning pushed far into the future
    fn quiet_run(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &jump(), 0.0);
        state.spawner.obstacle_timer = f32::NEG_INFINITY;
        state.spawner.shell_timer = f32::NEG_INFINITY;
        state.spawner.eel_timer = f32::NEG_INFINITY;
        state
    }

    #[test]
    fn test_first_jump_starts_run() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.play_time, 0.0);

        tick(&mut state, &jump(), 0.016);
        assert_eq!(state.phase, GamePhase::Playing);
        // Starting does not also jump
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut state = quiet_run(1);
        tick(&mut state, &TickInput::default(), 3.0);
        assert!((state.play_time - MAX_FRAME_DT).abs() < 1e-6);
        tick(&mut state, &TickInput::default(), -1.0);
        assert!((state.play_time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_speed_and_distance_ramp() {
        let mut state = quiet_run(2);
        let t = 10.0;
        let steps = (t / DT).round() as usize;
        for _ in 0..steps {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        let elapsed = state.play_time;
        assert!((elapsed - t).abs() < 1e-3);

        let expected_speed = (BASE_SPEED + SPEED_RAMP * elapsed).min(MAX_SPEED);
        assert!((state.speed - expected_speed).abs() < 1e-2);

        // ∫ (280 + 14t) dt / 100
        let expected_distance = (BASE_SPEED * elapsed + 0.5 * SPEED_RAMP * elapsed * elapsed) / 100.0;
        assert!(
            (state.distance - expected_distance).abs() < 1e-2,
            "distance {} vs {}",
            state.distance,
            expected_distance
        );
    }

    #[test]
    fn test_speed_caps() {
        let mut state = quiet_run(3);
        let mut last = state.speed;
        for _ in 0..(40.0 / MAX_FRAME_DT) as usize {
            tick(&mut state, &TickInput::default(), MAX_FRAME_DT);
            assert!(state.speed >= last);
            last = state.speed;
        }
        assert_eq!(state.speed, MAX_SPEED);
    }

    #[test]
    fn test_paused_is_frozen() {
        let mut state = quiet_run(4);
        tick(&mut state, &TickInput::default(), DT);
        let toggle = TickInput {
            toggle_pause: true,
            ..Default::default()
        };
        tick(&mut state, &toggle, DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let (score, time, timer) = (state.score, state.play_time, state.spawner.eel_timer);
        for _ in 0..100 {
            tick(&mut state, &jump(), DT);
        }
        assert_eq!(state.score, score);
        assert_eq!(state.play_time, time);
        assert_eq!(state.spawner.eel_timer, timer);

        let resume = TickInput {
            resume: true,
            ..Default::default()
        };
        tick(&mut state, &resume, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.play_time > time);
    }

    #[test]
    fn test_score_never_decreases_while_playing() {
        let mut state = GameState::new(77);
        tick(&mut state, &jump(), 0.0);
        let mut last = state.score;
        for i in 0..3000 {
            // Hop regularly so the run lasts a while
            let input = if i % 40 == 0 { jump() } else { TickInput::default() };
            tick(&mut state, &input, 1.0 / 60.0);
            if state.phase != GamePhase::Playing {
                break;
            }
            assert!(state.score >= last);
            last = state.score;
        }
    }

    #[test]
    fn test_urchin_collision_ends_run_and_records_best() {
        let mut state = quiet_run(5);
        state.high_score = 3;
        state.score = 40.0;
        state
            .obstacles
            .push(Urchin::with_size(PLAYER_X + 10.0, 34.0));
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 40);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { new_best: true, .. })));

        // Particles keep moving after the run ends, nothing else does
        let distance = state.distance;
        let particles = state.particles.len();
        assert!(particles > 0);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.distance, distance);
    }

    #[test]
    fn test_single_active_eel_and_double_jump_grant() {
        let mut state = GameState::new(42);
        tick(&mut state, &jump(), 0.0);
        state.spawner.obstacle_timer = f32::NEG_INFINITY;
        state.spawner.shell_timer = f32::NEG_INFINITY;

        let mut saw_grant = false;
        for _ in 0..(120.0 / 0.02) as usize {
            // Force the eel timer to be due on every frame
            state.spawner.eel_timer = state.spawner.eel_interval;
            tick(&mut state, &TickInput::default(), 0.02);
            if state.phase != GamePhase::Playing {
                break;
            }
            let active = state.eels.iter().filter(|e| e.is_active()).count();
            assert!(active <= 1);
            if active == 1 {
                assert!(state.player.double_jump_ready);
                saw_grant = true;
            } else {
                assert!(!state.player.double_jump_ready);
                assert!(!state.eel_warning);
            }
        }
        assert!(saw_grant);
    }

    #[test]
    fn test_double_jump_over_eel_telegraph() {
        let mut state = quiet_run(8);
        state.spawner.eel_timer = f32::INFINITY;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.eels.len(), 1);
        assert_eq!(state.eels[0].phase, EelPhase::Warn);
        assert!(state.player.double_jump_ready);
        state.spawner.eel_timer = f32::NEG_INFINITY;

        tick(&mut state, &jump(), DT);
        tick(&mut state, &jump(), DT);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Jumped));
        assert!(events.contains(&GameEvent::DoubleJumped));
        assert!(!state.player.double_jump_ready);
    }
}
