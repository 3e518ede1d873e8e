//! Copy, paste and marching-ants tests

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{config, harness, harness_with, rows};
use sheetgrid::backend::{MemoryBackend, RowRecord};
use sheetgrid::render::{DrawOp, LineStyle};
use sheetgrid::viewer::Pane;

fn dashed_strokes(log: &sheetgrid::render::DrawLog) -> Vec<f64> {
    log.borrow()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Stroke {
                style: LineStyle::Dashed { dash, gap, offset },
                ..
            } => {
                assert_eq!((*dash, *gap), (4.0, 2.0));
                Some(*offset)
            }
            _ => None,
        })
        .collect()
}

#[test]
fn copy_writes_tsv_and_starts_the_ants() {
    let backend = MemoryBackend::with_rows(rows(3, 3, 1));
    let mut h = harness_with(config(3, 3), backend);
    assert!(h.sheet.select_reference("A1:B2"));
    h.body.borrow_mut().clear();

    assert!(h.sheet.key_down("c", true));

    assert_eq!(h.clipboard.contents(), "r0c0\tr0c1\nr1c0\tr1c1");
    assert!(h.sheet.is_animating());
    assert_eq!(h.frames.pending(), 1);
    assert_eq!(h.sheet.model().dash_offset, 1.0);
    assert_eq!(dashed_strokes(&h.body), vec![-1.0]);
}

#[test]
fn copy_quotes_awkward_values() {
    let backend = MemoryBackend::with_rows(vec![RowRecord {
        id: 1,
        values: vec!["a\tb".into(), "say \"hi\"".into()],
    }]);
    let mut h = harness_with(config(2, 2), backend);
    assert!(h.sheet.select_reference("A1:B1"));
    h.sheet.copy();
    assert_eq!(h.clipboard.contents(), "\"a\tb\"\t\"say \"\"hi\"\"\"");
}

#[test]
fn frames_march_and_wrap() {
    let mut h = harness(config(5, 5));
    assert!(h.sheet.select_reference("B2"));
    h.sheet.copy();

    h.frames.fire().unwrap();
    h.sheet.animation_frame();
    assert_eq!(h.sheet.model().dash_offset, 2.0);
    assert_eq!(h.frames.pending(), 1);

    for _ in 0..15 {
        h.frames.fire().unwrap();
        h.sheet.animation_frame();
    }
    // 17 > 16 wraps back to zero
    assert_eq!(h.sheet.model().dash_offset, 0.0);
    assert!(h.sheet.is_animating());
}

#[test]
fn clicking_the_body_stops_the_ants() {
    let mut h = harness(config(5, 5));
    assert!(h.sheet.select_reference("A1:C3"));
    h.sheet.copy();
    assert_eq!(h.frames.pending(), 1);

    h.click_cell(4, 4);
    assert!(!h.sheet.is_animating());
    assert_eq!(h.frames.pending(), 0);
    assert_eq!(h.frames.cancelled(), 1);

    // A frame that was already in flight is ignored
    let offset = h.sheet.model().dash_offset;
    h.body.borrow_mut().clear();
    h.sheet.animation_frame();
    assert_eq!(h.sheet.model().dash_offset, offset);
    assert!(h.body.borrow().is_empty());
}

#[test]
fn selecting_a_header_stops_the_ants() {
    let mut h = harness(config(5, 5));
    assert!(h.sheet.select_reference("A1"));
    h.sheet.copy();
    h.sheet.pointer_down(Pane::ColumnHeader, 90.0, 10.0);
    assert!(!h.sheet.is_animating());
}

#[test]
fn paste_writes_at_the_anchor() {
    let mut h = harness(config(5, 5));
    h.clipboard.set_contents("x\ty\nz\tw\n");
    h.click_cell(1, 1);

    assert!(h.sheet.key_down("V", true));

    assert_eq!(h.sheet.value(1, 1), Some("x"));
    assert_eq!(h.sheet.value(1, 2), Some("y"));
    assert_eq!(h.sheet.value(2, 1), Some("z"));
    assert_eq!(h.sheet.value(2, 2), Some("w"));
    assert_eq!(h.backend.borrow().updates.len(), 4);
    // The open editor now shows the pasted value and has nothing to save
    assert_eq!(h.sheet.edit_box().value(), Some("x"));
    h.sheet.commit_edit();
    assert_eq!(h.backend.borrow().updates.len(), 4);

    // Pasting the same block again changes nothing
    h.sheet.paste();
    assert_eq!(h.backend.borrow().updates.len(), 4);
}

#[test]
fn paste_grows_the_grid() {
    let mut h = harness(config(3, 3));
    assert!(h.sheet.select_reference("C3"));
    h.clipboard.set_contents("a\tb\r\nc\td");
    h.sheet.paste();

    assert_eq!(h.sheet.row_count(), 4);
    assert_eq!(h.sheet.column_count(), 4);
    assert_eq!(h.sheet.row_header().len(), 4);
    assert_eq!(h.sheet.column_header().len(), 4);
    assert_eq!(h.sheet.value(3, 3), Some("d"));
    assert_eq!(h.sheet.scroll().container_height, 80.0);
    assert_eq!(h.sheet.scroll().container_width, 240.0);
}

#[test]
fn paste_without_an_anchor_is_ignored() {
    let mut h = harness(config(3, 3));
    h.clipboard.set_contents("a");
    h.sheet.paste();
    assert!(h.backend.borrow().updates.is_empty());
    assert_eq!(h.sheet.value(0, 0), Some(""));
}
