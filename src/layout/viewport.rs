//! Viewport state: how far the body surface is shifted into the virtual
//! content area, and which rows/columns that window intersects.

use std::ops::Range;

use super::OffsetTable;
use crate::types::Axis;

/// The visible pixel window into the full content area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    /// Body surface width in logical pixels
    pub width: f64,
    /// Body surface height in logical pixels
    pub height: f64,
    pub shift_top: f64,
    pub shift_bottom: f64,
    pub shift_left: f64,
    pub shift_right: f64,
    /// First visible row
    pub top_index: usize,
    /// One past the last visible row
    pub bottom_index: usize,
    /// First visible column
    pub left_index: usize,
    /// One past the last visible column
    pub right_index: usize,
}

impl Viewport {
    /// A viewport at the origin of the content.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shift_bottom: height,
            shift_right: width,
            ..Self::default()
        }
    }

    /// Size of the window along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.height,
            Axis::Column => self.width,
        }
    }

    /// Leading shift along `axis`.
    pub fn shift(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.shift_top,
            Axis::Column => self.shift_left,
        }
    }

    /// Visible half-open index range along `axis`.
    pub fn visible(&self, axis: Axis) -> Range<usize> {
        match axis {
            Axis::Row => self.top_index..self.bottom_index,
            Axis::Column => self.left_index..self.right_index,
        }
    }

    /// Move the window along `axis` and recompute its visible range.
    ///
    /// The shift is clamped so the window never leaves the content.
    pub fn set_shift(&mut self, axis: Axis, shift: f64, table: &OffsetTable) {
        let max_shift = (table.total() - self.extent(axis)).max(0.0);
        let shift = if shift.is_finite() {
            shift.clamp(0.0, max_shift)
        } else {
            0.0
        };
        match axis {
            Axis::Row => self.shift_top = shift,
            Axis::Column => self.shift_left = shift,
        }
        self.update(axis, table);
    }

    /// Recompute the trailing shift and visible range along `axis` from the
    /// leading shift. Always keeps `0 <= first <= last <= count`.
    pub fn update(&mut self, axis: Axis, table: &OffsetTable) {
        let count = table.count();
        let (lead, extent) = (self.shift(axis), self.extent(axis));
        let trail = lead + extent;
        let first = table.index_for_offset(lead).min(count);
        // The section under the trailing edge is partially visible, so it is
        // included in the half-open range.
        let last = (table.index_for_offset(trail) + 1).min(count).max(first);
        match axis {
            Axis::Row => {
                self.shift_bottom = trail;
                self.top_index = first;
                self.bottom_index = last;
            }
            Axis::Column => {
                self.shift_right = trail;
                self.left_index = first;
                self.right_index = last;
            }
        }
    }

    /// Resize the window; callers recompute visible ranges afterwards.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Convert a content offset along `axis` to a surface coordinate.
    pub fn to_surface(&self, axis: Axis, offset: f64) -> f64 {
        offset - self.shift(axis)
    }

    /// Convert a surface coordinate along `axis` to a content offset.
    pub fn to_content(&self, axis: Axis, coordinate: f64) -> f64 {
        coordinate + self.shift(axis)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn initial_range_covers_partial_trailing_row() {
        let rows = OffsetTable::uniform(100, 20.0);
        let mut viewport = Viewport::new(300.0, 210.0);
        viewport.update(Axis::Row, &rows);
        assert_eq!(viewport.visible(Axis::Row), 0..11);
        assert_eq!(viewport.shift_bottom, 210.0);
    }

    #[test]
    fn range_never_exceeds_count() {
        let rows = OffsetTable::uniform(5, 20.0);
        let mut viewport = Viewport::new(300.0, 400.0);
        viewport.update(Axis::Row, &rows);
        assert_eq!(viewport.visible(Axis::Row), 0..5);
    }

    #[test]
    fn shift_is_clamped_to_content() {
        let cols = OffsetTable::uniform(10, 60.0);
        let mut viewport = Viewport::new(300.0, 200.0);
        viewport.set_shift(Axis::Column, 1_000.0, &cols);
        assert_eq!(viewport.shift_left, 300.0);
        assert_eq!(viewport.visible(Axis::Column), 5..10);
        viewport.set_shift(Axis::Column, -4.0, &cols);
        assert_eq!(viewport.shift_left, 0.0);
        viewport.set_shift(Axis::Column, f64::NAN, &cols);
        assert_eq!(viewport.shift_left, 0.0);
    }

    #[test]
    fn surface_conversion_round_trips() {
        let rows = OffsetTable::uniform(100, 20.0);
        let mut viewport = Viewport::new(300.0, 200.0);
        viewport.set_shift(Axis::Row, 55.0, &rows);
        assert_eq!(viewport.to_surface(Axis::Row, 60.0), 5.0);
        assert_eq!(viewport.to_content(Axis::Row, 5.0), 60.0);
    }
}
