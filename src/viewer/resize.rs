//! Row/column resizing by dragging header boundaries.

use crate::layout::AxisModel;
use crate::types::Axis;

/// Pointer affordance over a header strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    ColResize,
    RowResize,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::ColResize => "col-resize",
            Self::RowResize => "row-resize",
        }
    }

    fn resize(axis: Axis) -> Self {
        match axis {
            Axis::Column => Self::ColResize,
            Axis::Row => Self::RowResize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    axis: Axis,
    boundary: usize,
}

/// Drag state for one resize gesture.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    tolerance: f64,
    drag: Option<Drag>,
}

impl ResizeController {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            drag: None,
        }
    }

    /// The boundary entry near `coordinate` on the `axis` header strip.
    ///
    /// `coordinate` is relative to the strip; the current shift is added
    /// before searching the offset table.
    pub fn hit_test(&self, model: &AxisModel, axis: Axis, coordinate: f64) -> Option<usize> {
        let content = model.viewport.to_content(axis, coordinate);
        model.offsets(axis).boundary_near(content, self.tolerance)
    }

    /// Cursor to show while hovering the `axis` strip at `coordinate`.
    pub fn cursor(&self, model: &AxisModel, axis: Axis, coordinate: f64) -> Cursor {
        if let Some(drag) = self.drag {
            return Cursor::resize(drag.axis);
        }
        match self.hit_test(model, axis, coordinate) {
            Some(_) => Cursor::resize(axis),
            None => Cursor::Grab,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Axis of the active drag.
    pub fn axis(&self) -> Option<Axis> {
        self.drag.map(|d| d.axis)
    }

    /// Capture the boundary under the pointer, if any.
    pub fn pointer_down(&mut self, model: &AxisModel, axis: Axis, coordinate: f64) -> bool {
        self.drag = self
            .hit_test(model, axis, coordinate)
            .map(|boundary| Drag { axis, boundary });
        self.drag.is_some()
    }

    /// Apply one drag step of `delta` pixels along the captured axis.
    ///
    /// `None` when no drag is active; otherwise whether the step was
    /// applied. A step that would shrink the section below the model's
    /// floor is dropped but the drag stays active.
    pub fn pointer_move(&mut self, model: &mut AxisModel, delta: f64) -> Option<bool> {
        let drag = self.drag?;
        let floor = model.min_section_size;
        let applied = model
            .offsets_mut(drag.axis)
            .resize_boundary(drag.boundary, delta, floor);
        if applied {
            let shift = model.viewport.shift(drag.axis);
            model.set_shift(drag.axis, shift);
        }
        Some(applied)
    }

    /// End the gesture, returning the axis that was being resized.
    pub fn pointer_up(&mut self) -> Option<Axis> {
        self.drag.take().map(|d| d.axis)
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
        let mut model = AxisModel::new(&GridConfig::default(), 300.0, 200.0);
        model.append(Axis::Row, 50);
        model.append(Axis::Column, 20);
        model.update_visible();
        model
    }

    #[test]
    fn hit_test_uses_tolerance_and_shift() {
        let mut model = model();
        let resize = ResizeController::new(3.0);
        assert_eq!(resize.hit_test(&model, Axis::Column, 62.0), Some(1));
        assert_eq!(resize.hit_test(&model, Axis::Column, 64.0), None);
        assert_eq!(resize.hit_test(&model, Axis::Column, 1.0), None);
        model.set_shift(Axis::Column, 30.0);
        assert_eq!(resize.hit_test(&model, Axis::Column, 30.0), Some(1));
    }

    #[test]
    fn cursor_reflects_hit() {
        let model = model();
        let resize = ResizeController::new(3.0);
        assert_eq!(resize.cursor(&model, Axis::Row, 41.0), Cursor::RowResize);
        assert_eq!(resize.cursor(&model, Axis::Row, 30.0), Cursor::Grab);
        assert_eq!(Cursor::ColResize.css(), "col-resize");
    }

    #[test]
    fn drag_shifts_following_boundaries() {
        let mut model = model();
        let mut resize = ResizeController::new(3.0);
        assert!(resize.pointer_down(&model, Axis::Column, 120.0));
        assert_eq!(resize.pointer_move(&mut model, 15.0), Some(true));
        assert_eq!(model.columns.size(1), 75.0);
        assert_eq!(model.columns.size(2), 60.0);
        assert_eq!(model.columns.start(3), 195.0);
        assert_eq!(resize.pointer_up(), Some(Axis::Column));
        assert_eq!(resize.pointer_move(&mut model, 5.0), None);
    }

    #[test]
    fn step_below_floor_is_dropped_but_drag_continues() {
        let mut model = model();
        let before = model.rows.clone();
        let mut resize = ResizeController::new(3.0);
        assert!(resize.pointer_down(&model, Axis::Row, 20.0));
        assert_eq!(resize.pointer_move(&mut model, -15.0), Some(false));
        assert_eq!(model.rows, before);
        assert!(resize.is_dragging());
        assert_eq!(resize.pointer_move(&mut model, -10.0), Some(true));
        assert_eq!(model.rows.size(0), 10.0);
    }
}
