//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::palette::css;
use super::scene::{DrawCmd, build_scene};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::settings::ColorScheme;
use crate::sim::GameState;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Size the canvas to the fixed world and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    pub fn render(&self, state: &GameState, scheme: ColorScheme) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);
        for cmd in build_scene(state, scheme) {
            self.draw(&cmd)?;
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Rect {
                pos,
                size,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(*color, *alpha));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(*color, *alpha));
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCmd::Ellipse {
                center,
                radii,
                rotation,
                color,
                alpha,
            } => {
                ctx.set_fill_style_str(&css(*color, *alpha));
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x.max(0.0) as f64,
                    radii.y.max(0.0) as f64,
                    *rotation as f64,
                    0.0,
                    TAU,
                )?;
                ctx.fill();
            }
            DrawCmd::Polygon {
                points,
                fill,
                stroke,
                alpha,
            } => {
                let Some((first, rest)) = points.split_first() else {
                    return Ok(());
                };
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.set_fill_style_str(&css(*fill, *alpha));
                ctx.fill();
                if let Some(stroke) = stroke {
                    ctx.set_line_width(2.0);
                    ctx.set_stroke_style_str(&css(*stroke, *alpha));
                    ctx.stroke();
                }
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
                alpha,
            } => {
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                ctx.set_stroke_style_str(&css(*color, *alpha));
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCmd::Text {
                pos,
                text,
                size,
                color,
                alpha,
            } => {
                ctx.set_font(&format!("bold {}px Quicksand, sans-serif", size));
                ctx.set_text_align("center");
                ctx.set_fill_style_str(&css(*color, *alpha));
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}
