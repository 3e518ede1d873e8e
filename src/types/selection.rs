use serde::Serialize;
use std::ops::RangeInclusive;

/// Which axis a header strip, offset table, or scrollbar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    /// Vertical axis: rows, the row-header strip, the vertical scrollbar
    Row,
    /// Horizontal axis: columns, the column-header strip, the horizontal scrollbar
    Column,
}

/// The one canonical selection: an inclusive block of body cells.
///
/// The body, column-header and row-header selections are all derived from
/// this rectangle, so they cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl SelectionRect {
    /// A single-cell selection.
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            top: row,
            left: col,
            bottom: row,
            right: col,
        }
    }

    /// The rectangle spanned by two corners, dragged in any direction.
    pub fn spanning(anchor: (usize, usize), current: (usize, usize)) -> Self {
        Self {
            top: anchor.0.min(current.0),
            left: anchor.1.min(current.1),
            bottom: anchor.0.max(current.0),
            right: anchor.1.max(current.1),
        }
    }

    /// Every column of one row.
    pub fn whole_row(row: usize, column_count: usize) -> Self {
        Self {
            top: row,
            left: 0,
            bottom: row,
            right: column_count.saturating_sub(1),
        }
    }

    /// Every row of one column.
    pub fn whole_column(col: usize, row_count: usize) -> Self {
        Self {
            top: 0,
            left: col,
            bottom: row_count.saturating_sub(1),
            right: col,
        }
    }

    /// Selected row indices (the row-header view).
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.top..=self.bottom
    }

    /// Selected column indices (the column-header view).
    pub fn cols(&self) -> RangeInclusive<usize> {
        self.left..=self.right
    }

    /// Selected body cells in row-major order (the body view).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows()
            .flat_map(move |row| self.cols().map(move |col| (row, col)))
    }

    pub fn row_len(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn col_len(&self) -> usize {
        self.right - self.left + 1
    }

    /// Number of selected body cells; always `row_len * col_len`.
    pub fn cell_len(&self) -> usize {
        self.row_len() * self.col_len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows().contains(&row) && self.cols().contains(&col)
    }

    /// Whether the block spans every column of the grid.
    pub fn spans_all_columns(&self, column_count: usize) -> bool {
        self.left == 0 && self.right + 1 >= column_count
    }

    /// Clamp to a grid of the given size; `None` if nothing is left.
    pub fn clamped(&self, row_count: usize, column_count: usize) -> Option<Self> {
        if row_count == 0 || column_count == 0 || self.top >= row_count || self.left >= column_count
        {
            return None;
        }
        Some(Self {
            top: self.top,
            left: self.left,
            bottom: self.bottom.min(row_count - 1),
            right: self.right.min(column_count - 1),
        })
    }
}

/// What a charting consumer receives after every selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub rect: SelectionRect,
    /// Column letters, left to right
    pub column_names: Vec<String>,
    /// 1-based row numbers, top to bottom
    pub row_numbers: Vec<usize>,
    /// Cell values, one inner vector per selected row
    pub values: Vec<Vec<String>>,
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn spanning_normalizes_any_drag_direction() {
        let down_right = SelectionRect::spanning((2, 2), (4, 4));
        let up_left = SelectionRect::spanning((4, 4), (2, 2));
        let up_right = SelectionRect::spanning((4, 2), (2, 4));
        assert_eq!(down_right, up_left);
        assert_eq!(down_right, up_right);
        assert_eq!(down_right.cell_len(), 9);
    }

    #[test]
    fn derived_views_agree() {
        let rect = SelectionRect::spanning((1, 3), (5, 4));
        assert_eq!(rect.cells().count(), rect.rows().count() * rect.cols().count());
        assert_eq!(rect.cells().next(), Some((1, 3)));
        assert_eq!(rect.cells().last(), Some((5, 4)));
    }

    #[test]
    fn whole_row_spans_columns() {
        let rect = SelectionRect::whole_row(3, 10);
        assert!(rect.spans_all_columns(10));
        assert!(!SelectionRect::cell(3, 0).spans_all_columns(10));
        assert!(SelectionRect::cell(3, 0).spans_all_columns(1));
    }

    #[test]
    fn clamped_trims_to_grid() {
        let rect = SelectionRect::spanning((2, 2), (9, 9));
        assert_eq!(
            rect.clamped(5, 4),
            Some(SelectionRect::spanning((2, 2), (4, 3)))
        );
        assert_eq!(rect.clamped(2, 4), None);
    }
}
