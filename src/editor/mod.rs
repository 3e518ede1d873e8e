//! In-place cell editing.
//!
//! `EditBox` holds the state of the single text editor that floats over the
//! active body cell:
//! - which cell it edits and the value that cell held when editing began
//! - the text typed so far
//! - where the box sits on the body surface
//!
//! The box is positioned from the offset tables on every call, never from a
//! cell's cached geometry, so it stays aligned after scrolls and resizes.

#[cfg(target_arch = "wasm32")]
mod input;

#[cfg(target_arch = "wasm32")]
pub(crate) use input::InputOverlay;

use crate::config::GridConfig;
use crate::layout::AxisModel;
use crate::render::Rect;
use crate::types::Axis;

/// A finished edit whose value differs from what the cell held before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedEdit {
    pub row: usize,
    pub col: usize,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Session {
    row: usize,
    col: usize,
    original: String,
    value: String,
}

/// The floating editor over the active cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBox {
    session: Option<Session>,
    rect: Rect,
    inset: f64,
    shrink: f64,
}

impl EditBox {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            session: None,
            rect: Rect::default(),
            inset: config.edit_inset,
            shrink: config.edit_shrink,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The cell being edited.
    pub fn cell(&self) -> Option<(usize, usize)> {
        self.session.as_ref().map(|s| (s.row, s.col))
    }

    /// Current text in the box.
    pub fn value(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.value.as_str())
    }

    /// Value the cell held when the box opened.
    pub fn original(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.original.as_str())
    }

    /// Position on the body surface, in logical pixels.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Open the box over `(row, col)`, seeded with the cell's value.
    pub fn open(&mut self, model: &AxisModel, row: usize, col: usize, current: &str) {
        self.session = Some(Session {
            row,
            col,
            original: current.to_string(),
            value: current.to_string(),
        });
        self.reposition(model);
    }

    /// Replace the typed text. Ignored while closed.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if let Some(session) = &mut self.session {
            session.value = value.into();
        }
    }

    /// Recompute the box geometry after a scroll, resize or deletion.
    pub fn reposition(&mut self, model: &AxisModel) {
        let Some((row, col)) = self.cell() else {
            return;
        };
        let viewport = &model.viewport;
        self.rect = Rect::new(
            viewport.to_surface(Axis::Column, model.columns.start(col)) + self.inset,
            viewport.to_surface(Axis::Row, model.rows.start(row)) + self.inset,
            (model.columns.size(col) - self.shrink).max(0.0),
            (model.rows.size(row) - self.shrink).max(0.0),
        );
    }

    /// Close the box. Returns the edit only if the value changed.
    pub fn commit(&mut self) -> Option<CommittedEdit> {
        let session = self.session.take()?;
        (session.value != session.original).then_some(CommittedEdit {
            row: session.row,
            col: session.col,
            value: session.value,
        })
    }

    /// Close the box, discarding the typed text.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Keep the session pointed at the same cell after row `removed` is
    /// deleted. Closes the box if its own row went away.
    pub fn row_removed(&mut self, removed: usize) {
        let Some(session) = &mut self.session else {
            return;
        };
        if session.row == removed {
            self.session = None;
        } else if session.row > removed {
            session.row -= 1;
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

    fn model() -> AxisModel {
        let mut model = AxisModel::new(&GridConfig::default(), 300.0, 200.0);
        model.append(Axis::Row, 100);
        model.append(Axis::Column, 20);
        model.update_visible();
        model
    }

    #[test]
    fn rect_is_inset_from_offsets() {
        let mut model = model();
        let mut edit = EditBox::new(&GridConfig::default());
        edit.open(&model, 2, 1, "x");
        assert_eq!(edit.rect(), Rect::new(63.0, 43.0, 55.0, 15.0));

        model.set_shift(Axis::Row, 30.0);
        edit.reposition(&model);
        assert_eq!(edit.rect().y, 13.0);
    }

    #[test]
    fn unchanged_value_commits_nothing() {
        let model = model();
        let mut edit = EditBox::new(&GridConfig::default());
        edit.open(&model, 0, 0, "same");
        edit.set_value("same");
        assert_eq!(edit.commit(), None);
        assert!(!edit.is_open());
    }

    #[test]
    fn changed_value_commits_once() {
        let model = model();
        let mut edit = EditBox::new(&GridConfig::default());
        edit.open(&model, 4, 3, "");
        edit.set_value("42");
        assert_eq!(
            edit.commit(),
            Some(CommittedEdit {
                row: 4,
                col: 3,
                value: "42".to_string()
            })
        );
        assert_eq!(edit.commit(), None);
    }

    #[test]
    fn follows_row_deletion() {
        let model = model();
        let mut edit = EditBox::new(&GridConfig::default());
        edit.open(&model, 5, 0, "");
        edit.row_removed(2);
        assert_eq!(edit.cell(), Some((4, 0)));
        edit.row_removed(4);
        assert!(!edit.is_open());
    }
}
