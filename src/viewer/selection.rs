//! Pointer-driven selection and live statistics.

use std::fmt;

use crate::layout::AxisModel;
use crate::types::{Axis, SelectionRect};

/// Where the selection state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectState {
    #[default]
    Idle,
    Selecting,
}

/// Turns body pointer events into a rectangular selection on the model.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectState,
    /// Cell under the last pointer-down
    anchor: Option<(usize, usize)>,
    /// Last cell processed while dragging
    current: Option<(usize, usize)>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        self.state == SelectState::Selecting
    }

    /// Paste target and edit-box cell.
    pub fn anchor(&self) -> Option<(usize, usize)> {
        self.anchor
    }

    /// Start a selection at the body point `(x, y)`. Returns the cell.
    pub fn pointer_down(&mut self, model: &mut AxisModel, x: f64, y: f64) -> (usize, usize) {
        let cell = model.cell_at(x, y);
        model.selection = Some(SelectionRect::cell(cell.0, cell.1));
        model.active = Some(cell);
        self.anchor = Some(cell);
        self.current = Some(cell);
        self.state = SelectState::Selecting;
        cell
    }

    /// Extend the selection to the body point `(x, y)`.
    ///
    /// Returns `false` when idle or when the pointer is still over the last
    /// processed cell.
    pub fn pointer_move(&mut self, model: &mut AxisModel, x: f64, y: f64) -> bool {
        if self.state != SelectState::Selecting {
            return false;
        }
        let Some(anchor) = self.anchor else {
            return false;
        };
        let cell = model.cell_at(x, y);
        if self.current == Some(cell) {
            return false;
        }
        self.current = Some(cell);
        model.selection = Some(SelectionRect::spanning(anchor, cell));
        true
    }

    /// Stop extending; the selection itself persists.
    pub fn pointer_up(&mut self) {
        self.state = SelectState::Idle;
    }

    /// Select every cell of section `index` along `axis`.
    pub fn select_whole(&mut self, model: &mut AxisModel, axis: Axis, index: usize) {
        let rect = match axis {
            Axis::Row => SelectionRect::whole_row(index, model.column_count()),
            Axis::Column => SelectionRect::whole_column(index, model.row_count()),
        };
        model.selection = Some(rect);
        self.state = SelectState::Idle;
        self.current = None;
    }

    /// Select an explicit block and move the anchor to its top-left cell.
    pub fn select_rect(&mut self, model: &mut AxisModel, rect: SelectionRect) {
        model.selection = Some(rect);
        model.active = Some((rect.top, rect.left));
        self.anchor = Some((rect.top, rect.left));
        self.current = None;
        self.state = SelectState::Idle;
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self, model: &mut AxisModel) {
        model.selection = None;
        model.active = None;
        self.anchor = None;
        self.current = None;
        self.state = SelectState::Idle;
    }

    /// Keep the anchor on the same cell after row `removed` is deleted.
    pub fn row_removed(&mut self, removed: usize) {
        self.current = None;
        self.anchor = match self.anchor {
            Some((row, _)) if row == removed => None,
            Some((row, col)) if row > removed => Some((row - 1, col)),
            other => other,
        };
    }
}

/// Aggregates over the numeric values of a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistics {
    /// Fold `values`, skipping blanks and anything that is not a finite
    /// number. `None` unless at least two numbers were found.
    pub fn collect<'a, I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut stats = Self {
            count: 0,
            sum: 0.0,
            min: f64::MAX,
            max: f64::MIN,
        };
        let numbers = values
            .into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .filter_map(|v| v.parse::<f64>().ok())
            .filter(|n| n.is_finite());
        for n in numbers {
            stats.count += 1;
            stats.sum += n;
            stats.min = stats.min.min(n);
            stats.max = stats.max.max(n);
        }
        (stats.count > 1).then_some(stats)
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Count: {}  Sum: {}  Min: {}  Max: {}  Average: {:.2}",
            self.count,
            self.sum,
            self.min,
            self.max,
            self.average()
        )
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
    use crate::config::GridConfig;

    fn model() -> AxisModel {
        let mut model = AxisModel::new(&GridConfig::default(), 600.0, 200.0);
        model.append(Axis::Row, 10);
        model.append(Axis::Column, 10);
        model.update_visible();
        model
    }

    #[test]
    fn drag_in_any_direction_builds_rectangle() {
        let mut model = model();
        let mut controller = SelectionController::new();
        assert_eq!(controller.pointer_down(&mut model, 250.0, 90.0), (4, 4));
        assert!(controller.pointer_move(&mut model, 130.0, 45.0));
        assert_eq!(model.selection, Some(SelectionRect::spanning((2, 2), (4, 4))));
        assert_eq!(model.selected_main().len(), 9);
        assert_eq!(model.active, Some((4, 4)));
        assert_eq!(controller.anchor(), Some((4, 4)));
    }

    #[test]
    fn moves_within_the_same_cell_are_ignored() {
        let mut model = model();
        let mut controller = SelectionController::new();
        controller.pointer_down(&mut model, 10.0, 10.0);
        assert!(controller.pointer_move(&mut model, 70.0, 10.0));
        assert!(!controller.pointer_move(&mut model, 90.0, 15.0));
        controller.pointer_up();
        assert!(!controller.pointer_move(&mut model, 200.0, 100.0));
        assert_eq!(model.selected_top(), vec![0, 1]);
    }

    #[test]
    fn whole_row_and_column() {
        let mut model = model();
        let mut controller = SelectionController::new();
        controller.select_whole(&mut model, Axis::Row, 3);
        assert_eq!(model.selected_top().len(), 10);
        assert_eq!(model.selected_side(), vec![3]);
        controller.select_whole(&mut model, Axis::Column, 7);
        assert_eq!(model.selected_side().len(), 10);
        assert_eq!(model.selected_top(), vec![7]);
    }

    #[test]
    fn statistics_skip_blanks_and_text() {
        let stats = Statistics::collect(["1", "", "x", " 2 ", "3.5"]).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.sum, 6.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.5);
        assert_eq!(
            stats.to_string(),
            "Count: 3  Sum: 6.5  Min: 1  Max: 3.5  Average: 2.17"
        );
    }

    #[test]
    fn statistics_need_two_numbers() {
        assert_eq!(Statistics::collect(["5", "", "abc"]), None);
        assert_eq!(Statistics::collect(["inf", "NaN", "1"]), None);
    }
}
