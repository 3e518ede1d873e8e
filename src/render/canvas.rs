//! Canvas 2D drawing surface.
//!
//! Implements `DrawingSurface` on an `HtmlCanvasElement` via web-sys. The
//! backing store is sized in physical pixels and the context is scaled by
//! the device pixel ratio, so all drawing uses logical coordinates.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::backend::{DrawingSurface, LineStyle, Rect, Stroke, TextStyle};
use crate::error::Result;

/// A Canvas 2D backed surface.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    scale: f64,
}

impl CanvasSurface {
    /// Wrap a canvas, sizing it from its CSS box.
    pub fn new(canvas: HtmlCanvasElement, scale: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = f64::from(canvas.client_width());
        let height = f64::from(canvas.client_height());
        let mut surface = Self {
            canvas,
            ctx,
            width,
            height,
            scale,
        };
        surface.resize(width, height, scale);
        Ok(surface)
    }

    /// The element, for hit testing against its bounding box.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_line_style(&self, style: LineStyle) {
        let segments = js_sys::Array::new();
        let offset = match style {
            LineStyle::Solid => 0.0,
            LineStyle::Dashed { dash, gap, offset } => {
                segments.push(&JsValue::from_f64(dash));
                segments.push(&JsValue::from_f64(gap));
                offset
            }
        };
        let _ = self.ctx.set_line_dash(&segments);
        self.ctx.set_line_dash_offset(offset);
    }
}

impl DrawingSurface for CanvasSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke<'_>) {
        self.set_line_style(stroke.style);
        self.ctx.set_line_width(stroke.width);
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx
            .stroke_rect(rect.x, rect.y, rect.width, rect.height);
        if stroke.style != LineStyle::Solid {
            self.set_line_style(LineStyle::Solid);
        }
        self.ctx.set_line_width(1.0);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle<'_>) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        let _ = self
            .ctx
            .fill_text_with_max_width(text, x, y, style.max_width.max(0.0));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, width: f64, height: f64, scale: f64) {
        self.width = width;
        self.height = height;
        self.scale = scale;

        // Backing store in physical pixels; resizing also resets the transform.
        self.canvas.set_width((width * scale).floor().max(0.0) as u32);
        self.canvas.set_height((height * scale).floor().max(0.0) as u32);
        let _ = self.ctx.scale(scale, scale);
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn scale(&self) -> f64 {
        self.scale
    }
}
