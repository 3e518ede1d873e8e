//! The shared geometry and selection model.
//!
//! One `AxisModel` exists per grid. Every surface and controller reads it by
//! reference; only the owning [`Sheet`](crate::viewer::Sheet) hands out
//! mutable access, one event at a time.

use super::{OffsetTable, Viewport};
use crate::config::GridConfig;
use crate::types::{Axis, SelectionRect};

/// Row/column geometry, viewport position and the canonical selection.
#[derive(Debug, Clone)]
pub struct AxisModel {
    /// Cumulative row heights (`rowOffsets`)
    pub rows: OffsetTable,
    /// Cumulative column widths (`columnOffsets`)
    pub columns: OffsetTable,
    /// Default width of a new column
    pub cell_width: f64,
    /// Default height of a new row
    pub cell_height: f64,
    /// Device pixel ratio of the surfaces
    pub scale: f64,
    /// Floor for any resized row/column
    pub min_section_size: f64,
    pub viewport: Viewport,
    /// The selected block of body cells, if any
    pub selection: Option<SelectionRect>,
    /// The cell under the last pointer-down
    pub active: Option<(usize, usize)>,
    /// Current marching-ants dash offset
    pub dash_offset: f64,
}

impl AxisModel {
    /// An empty model; [`BodyGrid::initialize`](crate::render::BodyGrid::initialize)
    /// seeds the offset tables.
    pub fn new(config: &GridConfig, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            rows: OffsetTable::default(),
            columns: OffsetTable::default(),
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            scale: config.scale,
            min_section_size: config.min_section_size,
            viewport: Viewport::new(viewport_width, viewport_height),
            selection: None,
            active: None,
            dash_offset: 0.0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    pub fn column_count(&self) -> usize {
        self.columns.count()
    }

    /// The offset table for `axis`.
    pub fn offsets(&self, axis: Axis) -> &OffsetTable {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    pub fn offsets_mut(&mut self, axis: Axis) -> &mut OffsetTable {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.columns,
        }
    }

    /// Size given to new rows/columns along `axis`.
    pub fn default_size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.cell_height,
            Axis::Column => self.cell_width,
        }
    }

    /// Index along `axis` of the content coordinate `coordinate`.
    pub fn index_for_offset(&self, axis: Axis, coordinate: f64) -> usize {
        self.offsets(axis).index_for_offset(coordinate)
    }

    /// Body cell `(row, col)` under a point on the body surface.
    pub fn cell_at(&self, x: f64, y: f64) -> (usize, usize) {
        let row = self.index_for_offset(Axis::Row, self.viewport.to_content(Axis::Row, y));
        let col = self.index_for_offset(Axis::Column, self.viewport.to_content(Axis::Column, x));
        (row, col)
    }

    /// Append `count` default-size sections along `axis`.
    pub fn append(&mut self, axis: Axis, count: usize) {
        let size = self.default_size(axis);
        self.offsets_mut(axis).append(count, size);
    }

    /// Recompute both visible ranges from the current shifts.
    pub fn update_visible(&mut self) {
        self.viewport.update(Axis::Row, &self.rows);
        self.viewport.update(Axis::Column, &self.columns);
    }

    /// Move the viewport along `axis` and recompute its visible range.
    pub fn set_shift(&mut self, axis: Axis, shift: f64) {
        match axis {
            Axis::Row => self.viewport.set_shift(axis, shift, &self.rows),
            Axis::Column => self.viewport.set_shift(axis, shift, &self.columns),
        }
    }

    /// Remove one row's geometry; the selection is left to the caller.
    pub fn remove_row(&mut self, row: usize) -> Option<f64> {
        let removed = self.rows.remove(row)?;
        let shift = self.viewport.shift_top;
        self.set_shift(Axis::Row, shift);
        Some(removed)
    }

    /// Body cells in the selection, row-major (`selectedMain`).
    pub fn selected_main(&self) -> Vec<(usize, usize)> {
        self.selection.map(|s| s.cells().collect()).unwrap_or_default()
    }

    /// Selected column indices (`selectedTop`).
    pub fn selected_top(&self) -> Vec<usize> {
        self.selection.map(|s| s.cols().collect()).unwrap_or_default()
    }

    /// Selected row indices (`selectedSide`).
    pub fn selected_side(&self) -> Vec<usize> {
        self.selection.map(|s| s.rows().collect()).unwrap_or_default()
    }

    /// Whether body cell `(row, col)` is selected.
    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.selection.is_some_and(|s| s.contains(row, col))
    }

    /// Whether header section `index` along `axis` is part of the selection.
    pub fn is_header_selected(&self, axis: Axis, index: usize) -> bool {
        self.selection.is_some_and(|s| match axis {
            Axis::Row => s.rows().contains(&index),
            Axis::Column => s.cols().contains(&index),
        })
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

    fn model() -> AxisModel {
        let mut model = AxisModel::new(&GridConfig::default(), 300.0, 200.0);
        model.append(Axis::Row, 100);
        model.append(Axis::Column, 10);
        model.update_visible();
        model
    }

    #[test]
    fn cell_at_accounts_for_shift() {
        let mut model = model();
        assert_eq!(model.cell_at(65.0, 25.0), (1, 1));
        model.set_shift(Axis::Row, 20.0);
        assert_eq!(model.cell_at(65.0, 25.0), (2, 1));
    }

    #[test]
    fn selection_views_stay_rectangular() {
        let mut model = model();
        model.selection = Some(SelectionRect::spanning((2, 2), (4, 4)));
        assert_eq!(model.selected_main().len(), 9);
        assert_eq!(model.selected_top(), vec![2, 3, 4]);
        assert_eq!(model.selected_side(), vec![2, 3, 4]);
        assert!(model.is_header_selected(Axis::Column, 3));
        assert!(!model.is_header_selected(Axis::Row, 5));
    }

    #[test]
    fn remove_row_keeps_viewport_in_bounds() {
        let mut model = model();
        model.set_shift(Axis::Row, 100.0);
        assert_eq!(model.remove_row(9), Some(20.0));
        assert_eq!(model.row_count(), 99);
        assert_eq!(model.rows.total(), 1980.0);
        assert_eq!(model.viewport.shift_top, 100.0);
        assert_eq!(model.remove_row(500), None);

        model.set_shift(Axis::Row, 2_000.0);
        for _ in 0..95 {
            model.remove_row(0);
        }
        assert!(model.viewport.bottom_index <= model.row_count());
        assert_eq!(model.viewport.shift_top, 0.0);
    }
}
