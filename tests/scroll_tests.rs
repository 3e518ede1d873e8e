//! Scrolling and lazy growth tests
//!
//! Thumb sizing, drag-to-shift mapping, wheel scrolling, the growth
//! threshold and what growth does to the offset tables.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{config, harness, BODY_HEIGHT};
use sheetgrid::types::Axis;
use sheetgrid::viewer::Pane;

#[test]
fn thumb_is_proportional_to_the_viewport() {
    // 100 rows x 20px = 2000px of content seen through 400px
    let h = harness(config(100, 10));
    let bar = h.sheet.scroll().bar(Axis::Row);
    assert_eq!(bar.thumb_size(), 80.0);
    assert_eq!(bar.thumb_position(), 0.0);
    assert_eq!(bar.max_travel(), 320.0);

    // Content narrower than the viewport: the thumb fills the track
    let horizontal = h.sheet.scroll().bar(Axis::Column);
    assert_eq!(horizontal.thumb_size(), 600.0);
    assert_eq!(horizontal.max_travel(), 0.0);
}

#[test]
fn dragging_the_thumb_shifts_the_viewport() {
    let mut h = harness(config(100, 10));
    h.sheet.pointer_down(Pane::VerticalScrollbar, 4.0, 10.0);
    // Half of the travel: 10 + 160
    h.sheet.pointer_move(Pane::VerticalScrollbar, 4.0, 170.0, 0.0, 160.0);

    let viewport = &h.sheet.model().viewport;
    assert_eq!(viewport.shift_top, 800.0);
    assert_eq!(viewport.shift_bottom, 800.0 + BODY_HEIGHT);
    assert_eq!(viewport.top_index, 40);
    assert!(viewport.bottom_index >= 60);
    h.sheet.pointer_up();
    assert!(!h.sheet.scroll().is_dragging());
}

#[test]
fn pressing_the_track_outside_the_thumb_does_not_drag() {
    let mut h = harness(config(100, 10));
    h.sheet.pointer_down(Pane::VerticalScrollbar, 4.0, 300.0);
    h.sheet.pointer_move(Pane::VerticalScrollbar, 4.0, 350.0, 0.0, 50.0);
    assert_eq!(h.sheet.model().viewport.shift_top, 0.0);
}

#[test]
fn growth_fires_once_past_the_threshold() {
    let mut h = harness(config(100, 10));
    let before = h.sheet.model().rows.as_slice().to_vec();
    h.sheet.pointer_down(Pane::VerticalScrollbar, 4.0, 10.0);

    // Exactly 80% of the 320px travel is not past the threshold
    h.sheet.pointer_move(Pane::VerticalScrollbar, 4.0, 266.0, 0.0, 256.0);
    assert_eq!(h.sheet.row_count(), 100);

    h.sheet.pointer_move(Pane::VerticalScrollbar, 4.0, 267.0, 0.0, 1.0);
    assert_eq!(h.sheet.row_count(), 150);

    // The thumb jumped back after growth; continuing the drag does not
    // grow again until the new threshold is crossed
    h.sheet.pointer_move(Pane::VerticalScrollbar, 4.0, 268.0, 0.0, 1.0);
    assert_eq!(h.sheet.row_count(), 150);
    h.sheet.pointer_up();

    let after = h.sheet.model().rows.as_slice();
    assert_eq!(after.len(), before.len() + 50);
    assert_eq!(&after[..before.len()], before.as_slice());
    assert_eq!(h.sheet.row_header().len(), 150);
    assert_eq!(h.sheet.body().rows(), 150);

    // New rows were requested from the backend
    assert!(h.backend.borrow().fetches.contains(&(100, 50)));
}

#[test]
fn growth_keeps_the_shift() {
    let mut h = harness(config(100, 10));
    h.sheet.pointer_down(Pane::VerticalScrollbar, 4.0, 10.0);
    h.sheet.pointer_move(Pane::VerticalScrollbar, 4.0, 330.0, 0.0, 320.0);
    let shift = h.sheet.model().viewport.shift_top;
    assert_eq!(shift, 1600.0);
    assert_eq!(h.sheet.row_count(), 150);
    assert_eq!(h.sheet.model().viewport.shift_top, shift);
    assert!(h.sheet.scroll().bar(Axis::Row).thumb_position() < 320.0);
}

#[test]
fn horizontal_growth_adds_columns() {
    // 40 columns x 60px = 2400px through 600px
    let mut h = harness(config(10, 40));
    let thumb = h.sheet.scroll().bar(Axis::Column).thumb_size();
    assert_eq!(thumb, 150.0);

    h.sheet.pointer_down(Pane::HorizontalScrollbar, 10.0, 4.0);
    h.sheet.pointer_move(Pane::HorizontalScrollbar, 460.0, 4.0, 450.0, 0.0);
    h.sheet.pointer_up();

    assert_eq!(h.sheet.column_count(), 50);
    assert_eq!(h.sheet.column_header().len(), 50);
    assert_eq!(h.sheet.body().columns(), 50);
    assert_eq!(h.sheet.column_header().label(49), Some("AX"));
}

#[test]
fn wheel_scrolls_and_clamps() {
    let mut h = harness(config(100, 20));
    h.sheet.scroll_by(30.0, 100.0);
    let viewport = &h.sheet.model().viewport;
    assert_eq!(viewport.shift_top, 100.0);
    assert_eq!(viewport.shift_left, 30.0);
    assert_eq!(viewport.top_index, 5);
    assert_eq!(viewport.left_index, 0);

    h.sheet.scroll_by(-500.0, -500.0);
    let viewport = &h.sheet.model().viewport;
    assert_eq!(viewport.shift_top, 0.0);
    assert_eq!(viewport.shift_left, 0.0);
}

#[test]
fn wheel_to_the_end_grows_rows_once() {
    let mut h = harness(config(100, 10));
    h.sheet.scroll_by(0.0, 10_000.0);
    assert_eq!(h.sheet.row_count(), 150);
    assert_eq!(h.sheet.model().viewport.shift_top, 1600.0);

    // Not past the threshold of the grown content yet
    h.sheet.scroll_by(0.0, 20.0);
    assert_eq!(h.sheet.row_count(), 150);
}

#[test]
fn add_rows_extends_by_exactly_n() {
    let mut h = harness(config(1000, 5));
    let before = h.sheet.model().rows.as_slice().to_vec();
    h.sheet.add_rows(500);

    let after = h.sheet.model().rows.as_slice();
    assert_eq!(after.len(), before.len() + 500);
    assert_eq!(&after[..before.len()], before.as_slice());
    assert_eq!(h.sheet.model().rows.total(), 1500.0 * 20.0);
    assert_eq!(h.sheet.row_header().label(1499), Some("1500"));
}

#[test]
fn visible_range_stays_within_bounds() {
    let mut h = harness(config(30, 12));
    for (dx, dy) in [(45.0, 17.0), (500.0, 900.0), (-13.0, -7.0), (1e9, 1e9), (-1e9, 3.0)] {
        h.sheet.scroll_by(dx, dy);
        let model = h.sheet.model();
        let v = &model.viewport;
        assert!(v.top_index <= v.bottom_index);
        assert!(v.bottom_index <= model.row_count());
        assert!(v.left_index <= v.right_index);
        assert!(v.right_index <= model.column_count());
        assert!(v.shift_top >= 0.0);
        assert!(v.shift_left >= 0.0);
    }
}
