//! Drawing surface trait for pluggable rendering implementations.
//!
//! Each of the three panes (body, column header, row header) draws onto its
//! own surface. The Canvas 2D implementation is used in the browser; the
//! recording implementation keeps the engine testable without a DOM.

/// An axis-aligned rectangle in logical surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Solid or dashed outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    /// Alternating `dash`/`gap` segments, shifted by `offset`
    Dashed { dash: f64, gap: f64, offset: f64 },
}

/// How to outline a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    pub style: LineStyle,
}

impl<'a> Stroke<'a> {
    /// A solid stroke.
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
        }
    }
}

/// Text drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    /// CSS font shorthand
    pub font: &'a str,
    pub color: &'a str,
    /// Text is squeezed to fit this width
    pub max_width: f64,
}

/// One rendering surface.
///
/// Coordinates are logical pixels; implementations apply the device scale.
pub trait DrawingSurface {
    /// Erase a region to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Outline a region.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke<'_>);

    /// Fill a region with a CSS color.
    fn fill_rect(&mut self, rect: Rect, color: &str);

    /// Draw text with its baseline at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle<'_>);

    /// Resize the backing store; `width`/`height` are logical pixels.
    fn resize(&mut self, width: f64, height: f64, scale: f64);

    /// Logical width
    fn width(&self) -> f64;

    /// Logical height
    fn height(&self) -> f64;

    /// Device pixel ratio
    fn scale(&self) -> f64 {
        1.0
    }

    /// Erase the whole surface.
    fn clear(&mut self) {
        let rect = Rect::new(0.0, 0.0, self.width(), self.height());
        self.clear_rect(rect);
    }
}
