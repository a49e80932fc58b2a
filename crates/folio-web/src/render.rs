//! Canvas 2D rendering of composed frames.
//!
//! Sprites are projected with the backdrop camera and drawn far to near as
//! discs (points) or rings (wireframe solids).

use folio_core::{Backdrop, Frame, FrameRenderer, InstanceData};
use glam::Vec3;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct Canvas2dRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    pub backdrop: Backdrop,
    // reused between frames
    projected: Vec<(f32, f32, f32, InstanceData)>,
}

impl Canvas2dRenderer {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas,
            ctx,
            backdrop: Backdrop::default(),
            projected: Vec::new(),
        })
    }
}

fn css_rgb(c: [f32; 4]) -> String {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({}, {}, {})", to_u8(c[0]), to_u8(c[1]), to_u8(c[2]))
}

impl FrameRenderer for Canvas2dRenderer {
    type Error = JsValue;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        let width = self.canvas.width() as f32;
        let height = self.canvas.height() as f32;
        let camera = self.backdrop.camera(width / height.max(1.0));
        // pixels per world unit at unit distance
        let focal = height / (2.0 * (camera.fovy_radians * 0.5).tan());

        self.projected.clear();
        for sprite in frame.instances() {
            if let Some((x, y, w)) = camera.project(Vec3::from(sprite.pos), width, height) {
                self.projected.push((x, y, w, sprite));
            }
        }
        // painter's order: farthest first
        self.projected
            .sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        for (x, y, w, sprite) in &self.projected {
            let radius = (0.5 * sprite.size * focal / w).max(0.5) as f64;
            ctx.set_global_alpha(sprite.color[3].clamp(0.0, 1.0) as f64);
            ctx.begin_path();
            ctx.arc(*x as f64, *y as f64, radius, 0.0, TAU)?;
            if sprite.ring > 0.5 {
                ctx.set_stroke_style_str(&css_rgb(sprite.color));
                ctx.set_line_width((radius * 0.12).max(1.0));
                ctx.stroke();
            } else {
                ctx.set_fill_style_str(&css_rgb(sprite.color));
                ctx.fill();
            }
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}
