//! The body grid: the matrix of editable cells and its surface.

use super::backend::{DrawingSurface, LineStyle, Stroke};
use super::paint::{draw_cell, CellLook};
use super::selection::{selection_bounds, HALF_PIXEL};
use crate::error::{GridError, Result};
use crate::layout::AxisModel;
use crate::types::{Axis, Cell, SelectionRect};

/// Selection bounding box line width.
const SELECTION_LINE_WIDTH: f64 = 2.0;
/// Marching-ants dash pattern.
const ANTS_DASH: f64 = 4.0;
const ANTS_GAP: f64 = 2.0;

/// Row-major cell matrix plus the backend id of each row.
pub struct BodyGrid {
    cells: Vec<Vec<Cell>>,
    row_ids: Vec<u64>,
    next_row_id: u64,
    surface: Box<dyn DrawingSurface>,
    look: CellLook,
}

impl BodyGrid {
    pub fn new(surface: Box<dyn DrawingSurface>, look: CellLook) -> Self {
        Self {
            cells: Vec::new(),
            row_ids: Vec::new(),
            next_row_id: 1,
            surface,
            look,
        }
    }

    /// Seed the offset tables and the matrix with `rows` x `columns` blank
    /// cells. Any previous content is dropped.
    pub fn initialize(&mut self, model: &mut AxisModel, rows: usize, columns: usize) {
        model.rows = Default::default();
        model.columns = Default::default();
        model.append(Axis::Column, columns);
        model.append(Axis::Row, rows);
        self.cells.clear();
        self.row_ids.clear();
        self.next_row_id = 1;
        self.push_rows(model, rows);
        model.update_visible();
    }

    fn push_rows(&mut self, model: &AxisModel, count: usize) {
        let columns = model.column_count();
        self.cells.reserve(count);
        self.row_ids.reserve(count);
        for _ in 0..count {
            self.cells
                .push(vec![Cell::blank(model.cell_width, model.cell_height); columns]);
            self.row_ids.push(self.next_row_id);
            self.next_row_id += 1;
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Append `count` blank rows at the bottom.
    pub fn add_rows(&mut self, model: &mut AxisModel, count: usize) {
        model.append(Axis::Row, count);
        self.push_rows(model, count);
        model.update_visible();
    }

    /// Append `count` blank columns on the right of every row.
    pub fn add_columns(&mut self, model: &mut AxisModel, count: usize) {
        model.append(Axis::Column, count);
        let blank = Cell::blank(model.cell_width, model.cell_height);
        for row in &mut self.cells {
            row.extend(std::iter::repeat(blank.clone()).take(count));
        }
        model.update_visible();
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(col)
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).map(|c| c.value.as_str())
    }

    /// Overwrite a cell's value; the matrix is never grown implicitly.
    pub fn set_value(&mut self, row: usize, col: usize, value: String) -> Result<()> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(GridError::OutOfBounds { row, col })?;
        cell.value = value;
        Ok(())
    }

    /// Backend identifier of the row currently at `row`.
    pub fn row_id(&self, row: usize) -> Option<u64> {
        self.row_ids.get(row).copied()
    }

    /// Replace the contents of `row` with a record fetched from the backend.
    ///
    /// Values past the current column count are ignored.
    pub fn load_row(&mut self, row: usize, id: u64, values: &[String]) -> Result<()> {
        let line = self
            .cells
            .get_mut(row)
            .ok_or(GridError::OutOfBounds { row, col: 0 })?;
        for (col, cell) in line.iter_mut().enumerate() {
            cell.value = values.get(col).cloned().unwrap_or_default();
        }
        if let Some(slot) = self.row_ids.get_mut(row) {
            *slot = id;
        }
        self.next_row_id = self.next_row_id.max(id.saturating_add(1));
        Ok(())
    }

    /// Splice out `row`, returning its backend id.
    ///
    /// Later rows shift up by one; the caller removes the geometry.
    pub fn remove_row(&mut self, row: usize) -> Option<u64> {
        if row >= self.cells.len() {
            return None;
        }
        self.cells.remove(row);
        Some(self.row_ids.remove(row))
    }

    /// Values inside `selection`, one `Vec` per row.
    pub fn values_in(&self, selection: &SelectionRect) -> Vec<Vec<String>> {
        selection
            .rows()
            .map(|row| {
                selection
                    .cols()
                    .map(|col| self.value(row, col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }

    /// Replace the value of every cell that holds exactly `find`.
    ///
    /// Returns the coordinates of the cells that changed.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> Vec<(usize, usize)> {
        if find.is_empty() {
            return Vec::new();
        }
        let mut changed = Vec::new();
        for (row, line) in self.cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if cell.value == find {
                    cell.value = replace.to_string();
                    changed.push((row, col));
                }
            }
        }
        changed
    }

    pub fn surface(&self) -> &dyn DrawingSurface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn DrawingSurface {
        self.surface.as_mut()
    }

    /// Redraw the visible window and the selection bounding box.
    pub fn render(&mut self, model: &AxisModel) {
        let Self {
            cells,
            surface,
            look,
            ..
        } = self;
        surface.clear();

        let viewport = &model.viewport;
        let columns = viewport.visible(Axis::Column);
        for row in viewport.visible(Axis::Row) {
            let Some(line) = cells.get_mut(row) else {
                break;
            };
            let y = viewport.to_surface(Axis::Row, model.rows.start(row)) + HALF_PIXEL;
            let height = model.rows.size(row);
            for col in columns.clone() {
                let Some(cell) = line.get_mut(col) else {
                    break;
                };
                cell.x = viewport.to_surface(Axis::Column, model.columns.start(col)) + HALF_PIXEL;
                cell.y = y;
                cell.width = model.columns.size(col);
                cell.height = height;
                cell.selected = model.is_selected(row, col);
                cell.clicked = model.active == Some((row, col));
                draw_cell(surface.as_mut(), cell, look, None);
            }
        }

        if let Some(selection) = model.selection {
            let bounds = selection_bounds(&selection, model);
            surface.stroke_rect(
                bounds,
                &Stroke::solid(&look.palette.selection_stroke, SELECTION_LINE_WIDTH),
            );
        }
    }

    /// Stroke the dashed "copied" outline over the selection at the model's
    /// current dash offset.
    pub fn draw_ants(&mut self, model: &AxisModel) {
        let Some(selection) = model.selection else {
            return;
        };
        let bounds = selection_bounds(&selection, model);
        let stroke = Stroke {
            color: &self.look.palette.ants_stroke,
            width: SELECTION_LINE_WIDTH,
            style: LineStyle::Dashed {
                dash: ANTS_DASH,
                gap: ANTS_GAP,
                offset: -model.dash_offset,
            },
        };
        self.surface.stroke_rect(bounds, &stroke);
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
    use crate::render::{DrawLog, DrawOp, RecordingSurface};

    fn grid(rows: usize, columns: usize) -> (BodyGrid, AxisModel, DrawLog) {
        let surface = RecordingSurface::new(300.0, 200.0);
        let log = surface.log();
        let mut model = AxisModel::new(&GridConfig::default(), 300.0, 200.0);
        let mut body = BodyGrid::new(Box::new(surface), CellLook::new(Palette::default(), 12.0));
        body.initialize(&mut model, rows, columns);
        (body, model, log)
    }

    #[test]
    fn initialize_builds_matrix_and_ids() {
        let (body, model, _) = grid(10, 4);
        assert_eq!(body.rows(), 10);
        assert_eq!(body.columns(), 4);
        assert_eq!(model.rows.total(), 200.0);
        assert_eq!(body.row_id(0), Some(1));
        assert_eq!(body.row_id(9), Some(10));
    }

    #[test]
    fn growth_keeps_offsets_and_matrix_in_step() {
        let (mut body, mut model, _) = grid(10, 4);
        body.add_rows(&mut model, 5);
        body.add_columns(&mut model, 2);
        assert_eq!(body.rows(), model.row_count());
        assert_eq!(body.columns(), model.column_count());
        assert_eq!(body.row_id(14), Some(15));
        assert!(body.cell(14, 5).unwrap().is_blank());
    }

    #[test]
    fn render_positions_visible_cells_on_half_pixels() {
        let (mut body, mut model, log) = grid(100, 10);
        body.set_value(1, 1, "hi".to_string()).unwrap();
        model.set_shift(Axis::Row, 10.0);
        body.render(&model);

        let cell = body.cell(1, 1).unwrap();
        assert_eq!((cell.x, cell.y), (60.5, 10.5));
        let texts: Vec<_> = log
            .borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, .. } => Some((text.clone(), *x)),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![("hi".to_string(), 72.5)]);
    }

    #[test]
    fn render_draws_one_bounding_box() {
        let (mut body, mut model, log) = grid(10, 10);
        model.selection = Some(SelectionRect::spanning((2, 2), (4, 4)));
        body.render(&model);
        let boxes = log
            .borrow()
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { width, .. } if *width == 2.0))
            .count();
        assert_eq!(boxes, 1);
        assert!(body.cell(3, 3).unwrap().selected);
        assert!(!body.cell(5, 5).unwrap().selected);
    }

    #[test]
    fn remove_row_splices_values_and_ids() {
        let (mut body, _, _) = grid(5, 2);
        body.set_value(3, 0, "d".to_string()).unwrap();
        assert_eq!(body.remove_row(2), Some(3));
        assert_eq!(body.value(2, 0), Some("d"));
        assert_eq!(body.row_id(2), Some(4));
        assert_eq!(body.remove_row(9), None);
    }

    #[test]
    fn out_of_bounds_writes_are_errors() {
        let (mut body, _, _) = grid(2, 2);
        assert!(matches!(
            body.set_value(5, 0, "x".to_string()),
            Err(GridError::OutOfBounds { row: 5, col: 0 })
        ));
    }

    #[test]
    fn replace_all_reports_changed_cells() {
        let (mut body, _, _) = grid(3, 3);
        body.set_value(0, 0, "foo".to_string()).unwrap();
        body.set_value(1, 2, "foo bar".to_string()).unwrap();
        body.set_value(2, 1, "foo".to_string()).unwrap();
        assert_eq!(body.replace_all("foo", "x"), vec![(0, 0), (2, 1)]);
        assert_eq!(body.value(2, 1), Some("x"));
        assert_eq!(body.value(1, 2), Some("foo bar"));
        assert!(body.replace_all("", "y").is_empty());
    }
}
