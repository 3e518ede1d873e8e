//! Row and column header strips.
//!
//! - Column header: A, B, C, ... Z, AA, AB, ... scrolled horizontally with
//!   the body
//! - Row header: 1, 2, 3, ... scrolled vertically with the body
//!
//! Both tint the headers of selected sections and draw a highlight line on
//! the edge facing the body.

use super::backend::{DrawingSurface, Stroke};
use super::paint::{draw_cell, CellLook};
use super::selection::{header_edge, HALF_PIXEL};
use crate::cell_ref::column_name_for_number;
use crate::layout::AxisModel;
use crate::types::{Axis, Cell};

const EDGE_LINE_WIDTH: f64 = 2.0;

/// Label shown on header `index` (0-based) along `axis`.
pub fn header_label(axis: Axis, index: usize) -> String {
    match axis {
        Axis::Column => column_name_for_number(index + 1),
        Axis::Row => (index + 1).to_string(),
    }
}

/// One header strip. `axis` is the direction it labels: a `Column` strip
/// sits above the body, a `Row` strip to its left.
pub struct HeaderGrid {
    axis: Axis,
    cells: Vec<Cell>,
    surface: Box<dyn DrawingSurface>,
    look: CellLook,
}

/// The strip above the body.
pub type ColumnHeaderGrid = HeaderGrid;
/// The strip left of the body.
pub type RowHeaderGrid = HeaderGrid;

impl HeaderGrid {
    pub fn new(axis: Axis, surface: Box<dyn DrawingSurface>, look: CellLook) -> Self {
        Self {
            axis,
            cells: Vec::new(),
            surface,
            look,
        }
    }

    /// Column header strip.
    pub fn columns(surface: Box<dyn DrawingSurface>, look: CellLook) -> ColumnHeaderGrid {
        Self::new(Axis::Column, surface, look)
    }

    /// Row header strip.
    pub fn rows(surface: Box<dyn DrawingSurface>, look: CellLook) -> RowHeaderGrid {
        Self::new(Axis::Row, surface, look)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|c| c.value.as_str())
    }

    /// Rebuild the labels to match the model's section count.
    pub fn initialize(&mut self, model: &AxisModel) {
        self.cells.clear();
        self.add_cells(model, model.offsets(self.axis).count());
    }

    /// Append `count` labelled header cells.
    pub fn add_cells(&mut self, model: &AxisModel, count: usize) {
        let start = self.cells.len();
        let size = model.default_size(self.axis);
        self.cells.extend((start..start + count).map(|index| {
            let label = header_label(self.axis, index);
            match self.axis {
                Axis::Column => Cell::labeled(label, size, model.cell_height),
                Axis::Row => Cell::labeled(label, model.cell_width, size),
            }
        }));
    }

    /// Drop header `index`; later headers are relabelled so numbering stays
    /// contiguous.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.cells.len() {
            return false;
        }
        self.cells.remove(index);
        for (i, cell) in self.cells.iter_mut().enumerate().skip(index) {
            cell.value = header_label(self.axis, i);
        }
        true
    }

    pub fn surface(&self) -> &dyn DrawingSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn DrawingSurface {
        self.surface.as_mut()
    }

    /// Redraw the visible headers and the selection edge line.
    pub fn render(&mut self, model: &AxisModel) {
        let axis = self.axis;
        let Self {
            cells,
            surface,
            look,
            ..
        } = self;
        surface.clear();

        let table = model.offsets(axis);
        let depth = match axis {
            Axis::Column => surface.height(),
            Axis::Row => surface.width(),
        };
        let cross = (depth - 1.0).max(0.0);
        for index in model.viewport.visible(axis) {
            let Some(cell) = cells.get_mut(index) else {
                break;
            };
            let along = model.viewport.to_surface(axis, table.start(index)) + HALF_PIXEL;
            let size = table.size(index);
            match axis {
                Axis::Column => {
                    cell.x = along;
                    cell.y = HALF_PIXEL;
                    cell.width = size;
                    cell.height = cross;
                }
                Axis::Row => {
                    cell.x = HALF_PIXEL;
                    cell.y = along;
                    cell.width = cross;
                    cell.height = size;
                }
            }
            cell.selected = model.is_header_selected(axis, index);
            draw_cell(
                surface.as_mut(),
                cell,
                look,
                Some(&look.palette.header_background),
            );
        }

        if let Some(selection) = model.selection {
            let edge = header_edge(&selection, model, axis, depth);
            surface.stroke_rect(
                edge,
                &Stroke::solid(&look.palette.selection_stroke, EDGE_LINE_WIDTH),
            );
        }
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
    use crate::config::{GridConfig, Palette};
    use crate::render::{DrawOp, RecordingSurface};
    use crate::types::SelectionRect;

    fn model() -> AxisModel {
        let mut model = AxisModel::new(&GridConfig::default(), 300.0, 200.0);
        model.append(Axis::Row, 40);
        model.append(Axis::Column, 30);
        model.update_visible();
        model
    }

    fn look() -> CellLook {
        CellLook::new(Palette::default(), 12.0)
    }

    #[test]
    fn labels_follow_axis() {
        let model = model();
        let mut top = HeaderGrid::columns(Box::new(RecordingSurface::new(300.0, 20.0)), look());
        let mut side = HeaderGrid::rows(Box::new(RecordingSurface::new(40.0, 200.0)), look());
        top.initialize(&model);
        side.initialize(&model);
        assert_eq!(top.len(), 30);
        assert_eq!(top.label(0), Some("A"));
        assert_eq!(top.label(26), Some("AA"));
        assert_eq!(side.label(0), Some("1"));
        assert_eq!(side.label(39), Some("40"));
    }

    #[test]
    fn add_cells_continues_labels() {
        let model = model();
        let mut top = HeaderGrid::columns(Box::new(RecordingSurface::new(300.0, 20.0)), look());
        top.initialize(&model);
        top.add_cells(&model, 2);
        assert_eq!(top.label(31), Some("AF"));
    }

    #[test]
    fn remove_relabels_tail() {
        let model = model();
        let mut side = HeaderGrid::rows(Box::new(RecordingSurface::new(40.0, 200.0)), look());
        side.initialize(&model);
        assert!(side.remove(4));
        assert_eq!(side.len(), 39);
        assert_eq!(side.label(4), Some("5"));
        assert_eq!(side.label(38), Some("39"));
        assert!(!side.remove(100));
    }

    #[test]
    fn render_scrolls_with_body_and_strokes_edge() {
        let mut model = model();
        model.set_shift(Axis::Column, 60.0);
        model.selection = Some(SelectionRect::whole_column(2, 40));
        let surface = RecordingSurface::new(300.0, 20.0);
        let log = surface.log();
        let mut top = HeaderGrid::columns(Box::new(surface), look());
        top.initialize(&model);
        top.render(&model);

        assert_eq!(model.viewport.left_index, 1);
        let texts: Vec<_> = log
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.first().map(String::as_str), Some("B"));
        assert!(top.cells[2].selected);
        assert!(!top.cells[1].selected);
        assert!(log.borrow().iter().any(|op| matches!(
            op,
            DrawOp::Stroke { rect, width, .. } if *width == 2.0 && rect.y == 18.0 && rect.x == 60.5
        )));
    }
}
