//! Geometry engine: offset tables, viewport state and the shared model.
//!
//! This module handles:
//! - Cumulative offset tables with binary-search lookup
//! - Viewport shifts and visible index ranges
//! - The single `AxisModel` every surface renders from

mod axis;
mod offsets;
mod viewport;

pub use axis::AxisModel;
pub use offsets::{index_for_offset, OffsetTable};
pub use viewport::Viewport;
