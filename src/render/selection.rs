//! Selection overlay geometry.
//!
//! These helpers keep selection math testable without depending on Canvas APIs.
//! All rectangles are in surface coordinates, half-pixel aligned like the
//! cell borders they sit on.

use super::backend::Rect;
use crate::layout::AxisModel;
use crate::types::{Axis, SelectionRect};

/// Half-pixel alignment for crisp 1px strokes.
pub(crate) const HALF_PIXEL: f64 = 0.5;

/// Span of sections `first..=last` along `axis`, as (surface start, length).
fn span(model: &AxisModel, axis: Axis, first: usize, last: usize) -> (f64, f64) {
    let table = model.offsets(axis);
    let start = table.start(first);
    let end = table.start(last + 1);
    (
        model.viewport.to_surface(axis, start) + HALF_PIXEL,
        end - start,
    )
}

/// The single bounding box around a selection on the body surface.
pub fn selection_bounds(selection: &SelectionRect, model: &AxisModel) -> Rect {
    let (x, width) = span(model, Axis::Column, selection.left, selection.right);
    let (y, height) = span(model, Axis::Row, selection.top, selection.bottom);
    Rect::new(x, y, width, height)
}

/// The highlight line a header strip draws along its body-facing edge.
///
/// For the column header this is a horizontal line along the bottom edge
/// spanning the selected columns; for the row header a vertical line along
/// the right edge spanning the selected rows. `depth` is the strip's cross
/// dimension (height of the column header, width of the row header).
pub fn header_edge(selection: &SelectionRect, model: &AxisModel, axis: Axis, depth: f64) -> Rect {
    let edge = (depth - 2.0).max(0.0);
    match axis {
        Axis::Column => {
            let (x, width) = span(model, Axis::Column, selection.left, selection.right);
            Rect::new(x, edge, width, 0.0)
        }
        Axis::Row => {
            let (y, height) = span(model, Axis::Row, selection.top, selection.bottom);
            Rect::new(edge, y, 0.0, height)
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
    use crate::config::GridConfig;

    fn model() -> AxisModel {
        let mut model = AxisModel::new(&GridConfig::default(), 300.0, 200.0);
        model.append(Axis::Row, 50);
        model.append(Axis::Column, 20);
        model.update_visible();
        model
    }

    #[test]
    fn bounds_cover_whole_block() {
        let model = model();
        let rect = selection_bounds(&SelectionRect::spanning((2, 1), (3, 2)), &model);
        assert_eq!(rect, Rect::new(60.5, 40.5, 120.0, 40.0));
    }

    #[test]
    fn bounds_follow_scroll_and_resize() {
        let mut model = model();
        model.columns.resize_boundary(1, 40.0, 10.0);
        model.set_shift(Axis::Column, 30.0);
        let rect = selection_bounds(&SelectionRect::cell(0, 1), &model);
        assert_eq!(rect.x, 70.5);
        assert_eq!(rect.width, 60.0);
    }

    #[test]
    fn header_edges_sit_on_body_side() {
        let model = model();
        let selection = SelectionRect::spanning((1, 1), (2, 3));
        let top = header_edge(&selection, &model, Axis::Column, 20.0);
        assert_eq!(top, Rect::new(60.5, 18.0, 180.0, 0.0));
        let side = header_edge(&selection, &model, Axis::Row, 40.0);
        assert_eq!(side, Rect::new(38.0, 20.5, 0.0, 40.0));
    }
}
