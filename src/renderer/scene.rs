//! Scene building
//!
//! Turns a [`GameState`] into a flat list of plain-shape draw commands. The
//! list is replayed by the canvas backend; keeping it data-only lets the
//! layering rules be checked without a browser.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::palette::{self, adjust};
use crate::consts::*;
use crate::settings::ColorScheme;
use crate::sim::{Eel, GamePhase, GameState, Particle, Player, Pose, ScorePopup, Shell, Urchin};

/// One primitive. Colors are 0xRRGGBB, `alpha` in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        pos: Vec2,
        size: Vec2,
        color: u32,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
        alpha: f32,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: u32,
        alpha: f32,
    },
    Polygon {
        points: Vec<Vec2>,
        fill: u32,
        stroke: Option<u32>,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: u32,
        alpha: f32,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: u32,
        alpha: f32,
    },
}

/// Build the full frame, back to front
pub fn build_scene(state: &GameState, scheme: ColorScheme) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(256 + state.particles.len());

    backdrop(&mut cmds, state);

    if state.phase != GamePhase::Start {
        for shell in &state.shells {
            shell_shape(&mut cmds, shell);
        }
        for urchin in &state.obstacles {
            urchin_shape(&mut cmds, urchin);
        }
        for eel in &state.eels {
            eel_shape(&mut cmds, eel);
        }
    }

    seahorse(&mut cmds, &state.player, scheme);

    for particle in &state.particles {
        particle_shape(&mut cmds, particle);
    }
    for popup in &state.popups {
        popup_text(&mut cmds, popup);
    }

    if let Some(x) = state.warning_marker_x() {
        warning_marker(&mut cmds, x, state.backdrop.t);
    }

    cmds
}

fn backdrop(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let band_h = GROUND_Y / palette::WATER_BANDS.len() as f32;
    for (i, color) in palette::WATER_BANDS.iter().enumerate() {
        cmds.push(DrawCmd::Rect {
            pos: Vec2::new(0.0, i as f32 * band_h),
            size: Vec2::new(WORLD_WIDTH, band_h + 1.0),
            color: *color,
            alpha: 1.0,
        });
    }

    let t = state.backdrop.t;
    for (layer, (offset, color)) in state
        .backdrop
        .offsets
        .iter()
        .zip(palette::LAYER_COLORS)
        .enumerate()
    {
        let depth = layer as f32;
        let spacing = 260.0 - depth * 40.0;
        let count = (WORLD_WIDTH / spacing) as usize + 2;
        for i in 0..count {
            let x = (i as f32 * spacing - offset).rem_euclid(WORLD_WIDTH + spacing) - spacing * 0.5;
            let height = 60.0 + depth * 35.0 + ((i as f32 * 1.7).sin() * 0.5 + 0.5) * 40.0;
            if layer < 2 {
                // Distant rock mounds
                cmds.push(DrawCmd::Ellipse {
                    center: Vec2::new(x, GROUND_Y),
                    radii: Vec2::new(spacing * 0.45, height),
                    rotation: 0.0,
                    color,
                    alpha: 0.55 + depth * 0.15,
                });
            } else {
                // Seaweed, swaying
                let sway = (t * 1.6 + i as f32).sin() * 10.0;
                cmds.push(DrawCmd::Line {
                    from: Vec2::new(x, GROUND_Y),
                    to: Vec2::new(x + sway, GROUND_Y - height),
                    width: 6.0 + depth * 2.0,
                    color,
                    alpha: 0.85,
                });
            }
        }
    }

    cmds.push(DrawCmd::Rect {
        pos: Vec2::new(0.0, GROUND_Y),
        size: Vec2::new(WORLD_WIDTH, (WORLD_HEIGHT - GROUND_Y) * 0.3),
        color: palette::SAND_TOP,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Rect {
        pos: Vec2::new(0.0, GROUND_Y + (WORLD_HEIGHT - GROUND_Y) * 0.3),
        size: Vec2::new(WORLD_WIDTH, (WORLD_HEIGHT - GROUND_Y) * 0.7),
        color: palette::SAND_BOTTOM,
        alpha: 1.0,
    });
}

fn shell_shape(cmds: &mut Vec<DrawCmd>, shell: &Shell) {
    let info = shell.kind.info();
    let scale = if shell.is_flying() {
        1.0 - 0.5 * shell.fly_progress
    } else {
        1.0
    };
    let pulse = 0.35 + 0.15 * (shell.anim_t * 4.0).sin();
    cmds.push(DrawCmd::Circle {
        center: shell.pos,
        radius: 22.0 * scale,
        color: info.glow,
        alpha: pulse,
    });
    cmds.push(DrawCmd::Circle {
        center: shell.pos,
        radius: 14.0 * scale,
        color: info.color,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Circle {
        center: shell.pos + Vec2::new(-4.0, -4.0) * scale,
        radius: 4.0 * scale,
        color: adjust(info.color, 45),
        alpha: 0.9,
    });
}

fn urchin_shape(cmds: &mut Vec<DrawCmd>, urchin: &Urchin) {
    let center = Vec2::new(urchin.x, GROUND_Y - urchin.size * 0.55);
    let spine_len = urchin.size * 1.3;
    for i in 0..urchin.spines {
        // Spread over the upper half only
        let a = PI + (i as f32 + 0.5) / urchin.spines as f32 * PI;
        let tip = center + Vec2::new(a.cos(), a.sin()) * spine_len;
        cmds.push(DrawCmd::Line {
            from: center,
            to: tip,
            width: 3.0,
            color: adjust(urchin.color, -30),
            alpha: 1.0,
        });
    }
    cmds.push(DrawCmd::Ellipse {
        center,
        radii: Vec2::new(urchin.size * 0.7, urchin.size * 0.55),
        rotation: 0.0,
        color: urchin.color,
        alpha: 1.0,
    });
}

fn eel_shape(cmds: &mut Vec<DrawCmd>, eel: &Eel) {
    for bubble in &eel.bubbles {
        particle_shape(cmds, bubble);
    }
    let visible = GROUND_Y - eel.current_y;
    if visible <= 0.0 {
        return;
    }
    let segments = 6;
    for i in 0..segments {
        let t = i as f32 / segments as f32;
        let y = eel.current_y + t * visible;
        let sway = (eel.body_wave * 6.0 + t * TAU).sin() * 6.0 * (1.0 - t);
        cmds.push(DrawCmd::Circle {
            center: Vec2::new(eel.x + sway, y),
            radius: 18.0 - t * 3.0,
            color: palette::EEL_BODY,
            alpha: 1.0,
        });
    }
    // Head
    cmds.push(DrawCmd::Ellipse {
        center: Vec2::new(eel.x, eel.current_y),
        radii: Vec2::new(20.0, 16.0),
        rotation: 0.0,
        color: palette::EEL_BODY,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Ellipse {
        center: Vec2::new(eel.x - 4.0, eel.current_y + 6.0),
        radii: Vec2::new(12.0, 6.0),
        rotation: 0.0,
        color: palette::EEL_BELLY,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Circle {
        center: Vec2::new(eel.x - 8.0, eel.current_y - 4.0),
        radius: 3.5,
        color: 0xFFFFFF,
        alpha: 1.0,
    });
}

fn seahorse(cmds: &mut Vec<DrawCmd>, player: &Player, scheme: ColorScheme) {
    let colors = scheme.colors();
    let wiggle = (player.anim_t * 30.0).sin() * player.shimmy * 8.0;
    let top = Vec2::new(player.x + wiggle, player.y + player.bob_offset);
    let tilt = match player.pose {
        Pose::Jump => -0.15,
        Pose::DoubleJump => -0.3,
        Pose::Idle | Pose::Swim => 0.0,
    };

    if player.crown_glow > 0.0 {
        cmds.push(DrawCmd::Circle {
            center: top + Vec2::new(0.0, 8.0),
            radius: 26.0,
            color: 0xFFD700,
            alpha: player.crown_glow * 0.6,
        });
    }

    // Curled tail
    cmds.push(DrawCmd::Circle {
        center: top + Vec2::new(6.0, player.height - 8.0),
        radius: 8.0,
        color: colors.dark,
        alpha: 1.0,
    });
    // Body
    cmds.push(DrawCmd::Ellipse {
        center: top + Vec2::new(0.0, player.height * 0.52),
        radii: Vec2::new(player.width * 0.42, player.height * 0.34),
        rotation: tilt,
        color: colors.body,
        alpha: 1.0,
    });
    // Dorsal fin
    let fin_base = top + Vec2::new(player.width * 0.4, player.height * 0.5);
    let fin_dir = Vec2::new(player.fin_angle.cos(), player.fin_angle.sin());
    cmds.push(DrawCmd::Polygon {
        points: vec![
            fin_base + Vec2::new(0.0, -10.0),
            fin_base + fin_dir * 14.0,
            fin_base + Vec2::new(0.0, 10.0),
        ],
        fill: colors.fin,
        stroke: None,
        alpha: 0.9,
    });
    // Belly spots
    for i in 0..3 {
        cmds.push(DrawCmd::Circle {
            center: top + Vec2::new(-3.0, player.height * (0.38 + i as f32 * 0.11)),
            radius: 3.0,
            color: colors.spot,
            alpha: 1.0,
        });
    }
    // Head and snout
    let head = top + Vec2::new(2.0, 12.0);
    cmds.push(DrawCmd::Circle {
        center: head,
        radius: 12.0,
        color: colors.body,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Ellipse {
        center: head + Vec2::new(15.0, 3.0),
        radii: Vec2::new(9.0, 4.0),
        rotation: tilt,
        color: colors.dark,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Circle {
        center: head + Vec2::new(4.0, -3.0),
        radius: 3.0,
        color: 0x1A1A2E,
        alpha: 1.0,
    });
}

fn star_points(center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius * 0.45 };
            let a = -PI / 2.0 + i as f32 * PI / 5.0;
            center + Vec2::new(a.cos(), a.sin()) * r
        })
        .collect()
}

fn particle_shape(cmds: &mut Vec<DrawCmd>, p: &Particle) {
    let alpha = p.alpha * p.fade();
    if alpha <= 0.0 {
        return;
    }
    if p.star {
        cmds.push(DrawCmd::Polygon {
            points: star_points(p.pos, p.size),
            fill: p.color,
            stroke: None,
            alpha,
        });
    } else {
        cmds.push(DrawCmd::Circle {
            center: p.pos,
            radius: p.size * 0.5,
            color: p.color,
            alpha,
        });
    }
}

fn popup_text(cmds: &mut Vec<DrawCmd>, popup: &ScorePopup) {
    cmds.push(DrawCmd::Text {
        pos: popup.pos,
        text: popup.label(),
        size: 22.0,
        color: popup.color,
        alpha: popup.fade(),
    });
}

fn warning_marker(cmds: &mut Vec<DrawCmd>, x: f32, t: f32) {
    let y = GROUND_Y - 28.0;
    let alpha = 0.7 + 0.3 * (t * 12.0).sin();
    cmds.push(DrawCmd::Polygon {
        points: vec![
            Vec2::new(x, y),
            Vec2::new(x - 13.0, y - 22.0),
            Vec2::new(x + 13.0, y - 22.0),
        ],
        fill: palette::WARNING_FILL,
        stroke: Some(palette::WARNING_STROKE),
        alpha,
    });
    cmds.push(DrawCmd::Text {
        pos: Vec2::new(x, y - 28.0),
        text: "JUMP!".to_string(),
        size: 13.0,
        color: palette::WARNING_FILL,
        alpha,
    });
}
