//! Headless drawing surface that records every call.
//!
//! Used by the native build and the test suite. The op log is shared, so a
//! test can keep a handle after boxing the surface into a grid.

use std::cell::RefCell;
use std::rc::Rc;

use super::backend::{DrawingSurface, LineStyle, Rect, Stroke, TextStyle};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rect),
    Stroke {
        rect: Rect,
        color: String,
        width: f64,
        style: LineStyle,
    },
    Fill {
        rect: Rect,
        color: String,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
    },
}

/// Shared handle to a surface's op log.
pub type DrawLog = Rc<RefCell<Vec<DrawOp>>>;

/// A [`DrawingSurface`] that only records.
#[derive(Debug)]
pub struct RecordingSurface {
    ops: DrawLog,
    width: f64,
    height: f64,
    scale: f64,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            ops: Rc::new(RefCell::new(Vec::new())),
            width,
            height,
            scale: 1.0,
        }
    }

    /// A handle to the op log that outlives boxing the surface.
    pub fn log(&self) -> DrawLog {
        Rc::clone(&self.ops)
    }

    fn push(&self, op: DrawOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.push(DrawOp::Clear(rect));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke<'_>) {
        self.push(DrawOp::Stroke {
            rect,
            color: stroke.color.to_string(),
            width: stroke.width,
            style: stroke.style,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.push(DrawOp::Fill {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _style: &TextStyle<'_>) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn resize(&mut self, width: f64, height: f64, scale: f64) {
        self.width = width;
        self.height = height;
        self.scale = scale;
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
