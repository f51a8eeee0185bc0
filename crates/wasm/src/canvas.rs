//! `DrawSurface` over an HTML canvas 2D context.

use glam::DVec2;
use particle_field_core::color::Rgba;
use particle_field_core::surface::DrawSurface;
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Inline style that keeps the field behind page content and out of the way of clicks.
pub const BACKDROP_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("inset", "0"),
    ("pointer-events", "none"),
    ("z-index", "0"),
    ("opacity", "0.3"),
];

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the canvas's 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Applies [`BACKDROP_STYLE`] to the canvas element.
    pub fn apply_backdrop_style(&self) -> Result<(), JsValue> {
        let style = self.canvas.style();
        for (name, value) in BACKDROP_STYLE {
            style.set_property(name, value)?;
        }
        Ok(())
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// A canvas detached from the document is treated as torn down.
    fn is_available(&self) -> bool {
        self.canvas.is_connected()
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }
}
