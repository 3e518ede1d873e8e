//! Row and column resizing tests
//!
//! Dragging a header boundary changes exactly one section and shifts every
//! later offset; sections never shrink below the configured floor.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{config, harness};
use sheetgrid::render::DrawOp;
use sheetgrid::viewer::{Cursor, Pane};

#[test]
fn dragging_a_column_boundary_widens_one_column() {
    let mut h = harness(config(10, 10));
    let before = h.sheet.model().columns.as_slice().to_vec();

    // Boundary between A and B sits at x = 60
    h.sheet.pointer_down(Pane::ColumnHeader, 61.0, 10.0);
    h.sheet.pointer_move(Pane::ColumnHeader, 81.0, 10.0, 20.0, 0.0);
    h.sheet.pointer_up();

    let after = h.sheet.model().columns.as_slice();
    assert_eq!(after[0], 0.0);
    assert_eq!(after[1], 80.0);
    for i in 2..after.len() {
        assert_eq!(after[i], before[i] + 20.0);
    }
    // Pressing on a boundary does not select anything
    assert_eq!(h.sheet.model().selection, None);
}

#[test]
fn dragging_a_row_boundary_uses_vertical_delta() {
    let mut h = harness(config(10, 10));

    // Boundary between rows 2 and 3 sits at y = 60
    h.sheet.pointer_down(Pane::RowHeader, 20.0, 60.0);
    h.sheet.pointer_move(Pane::RowHeader, 20.0, 75.0, 30.0, 15.0);
    h.sheet.pointer_up();

    let rows = &h.sheet.model().rows;
    assert_eq!(rows.size(2), 35.0);
    assert_eq!(rows.size(3), 20.0);
    assert_eq!(rows.total(), 215.0);
    assert_eq!(h.sheet.model().columns.total(), 600.0);
}

#[test]
fn sections_stop_at_the_floor() {
    let mut h = harness(config(10, 10));

    h.sheet.pointer_down(Pane::ColumnHeader, 120.0, 10.0);
    h.sheet.pointer_move(Pane::ColumnHeader, 75.0, 10.0, -45.0, 0.0);
    assert_eq!(h.sheet.model().columns.size(1), 15.0);

    // 15 - 10 would fall below the 10px floor
    h.sheet.pointer_move(Pane::ColumnHeader, 65.0, 10.0, -10.0, 0.0);
    assert_eq!(h.sheet.model().columns.size(1), 15.0);

    // The drag is still live, so growing works again
    h.sheet.pointer_move(Pane::ColumnHeader, 70.0, 10.0, 5.0, 0.0);
    assert_eq!(h.sheet.model().columns.size(1), 20.0);
    h.sheet.pointer_up();

    let columns = &h.sheet.model().columns;
    for i in 0..columns.count() {
        assert!(columns.size(i) >= 10.0);
    }
}

#[test]
fn cursor_reflects_boundary_hover() {
    let h = harness(config(10, 10));
    assert_eq!(h.sheet.cursor(Pane::ColumnHeader, 59.0, 5.0), Cursor::ColResize);
    assert_eq!(h.sheet.cursor(Pane::ColumnHeader, 30.0, 5.0), Cursor::Grab);
    assert_eq!(h.sheet.cursor(Pane::RowHeader, 5.0, 41.0), Cursor::RowResize);
    assert_eq!(h.sheet.cursor(Pane::Body, 59.0, 41.0), Cursor::Grab);
    assert_eq!(Cursor::ColResize.css(), "col-resize");
}

#[test]
fn leading_edge_is_not_a_boundary() {
    let mut h = harness(config(10, 10));
    h.sheet.pointer_down(Pane::ColumnHeader, 1.0, 10.0);
    h.sheet.pointer_move(Pane::ColumnHeader, 30.0, 10.0, 29.0, 0.0);
    h.sheet.pointer_up();
    assert_eq!(h.sheet.model().columns.size(0), 60.0);
}

#[test]
fn resize_moves_the_open_edit_box() {
    let mut h = harness(config(10, 10));
    h.click_cell(1, 1);
    let before = h.sheet.edit_box().rect();

    h.sheet.pointer_down(Pane::ColumnHeader, 60.0, 10.0);
    h.sheet.pointer_move(Pane::ColumnHeader, 100.0, 10.0, 40.0, 0.0);
    h.sheet.pointer_up();

    let after = h.sheet.edit_box().rect();
    assert_eq!(after.x, before.x + 40.0);
    assert_eq!(after.y, before.y);
}

#[test]
fn body_follows_the_drag_before_release() {
    let mut h = harness(config(10, 10));
    h.sheet.pointer_down(Pane::ColumnHeader, 61.0, 10.0);
    h.body.borrow_mut().clear();

    h.sheet.pointer_move(Pane::ColumnHeader, 81.0, 10.0, 20.0, 0.0);

    // Column B is already drawn at its new left edge while the drag is live
    let moved = h.body.borrow().iter().any(|op| {
        matches!(op, DrawOp::Stroke { rect, width, .. } if *width == 1.0 && rect.x == 80.5)
    });
    assert!(moved);
    h.sheet.pointer_up();
}
