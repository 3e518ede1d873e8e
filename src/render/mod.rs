//! Rendering for the three panes.
//!
//! This module provides:
//! - The `DrawingSurface` trait the grids draw through
//! - Canvas 2D surface (wasm32) and a recording surface (native, tests)
//! - The body grid and the two header strips
//! - Selection overlay geometry

pub mod backend;
mod body;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
mod headers;
mod paint;
pub mod recording;
pub mod selection;

pub use backend::{DrawingSurface, LineStyle, Rect, Stroke, TextStyle};
pub use body::BodyGrid;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use headers::{header_label, ColumnHeaderGrid, HeaderGrid, RowHeaderGrid};
pub use paint::CellLook;
pub use recording::{DrawLog, DrawOp, RecordingSurface};
