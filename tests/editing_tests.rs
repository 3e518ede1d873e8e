//! In-place editing tests
//!
//! The edit box follows the active cell, only changed values reach the
//! backend, and failed saves surface as notices without undoing the edit.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{config, harness, harness_with, rows};
use sheetgrid::backend::{CellUpdate, MemoryBackend};
use sheetgrid::render::Rect;

#[test]
fn clicking_opens_the_box_over_the_cell() {
    let mut h = harness(config(10, 10));
    h.click_cell(2, 1);

    let edit = h.sheet.edit_box();
    assert!(edit.is_open());
    assert_eq!(edit.cell(), Some((2, 1)));
    assert_eq!(edit.value(), Some(""));
    assert_eq!(edit.rect(), Rect::new(63.0, 43.0, 55.0, 15.0));
}

#[test]
fn unchanged_value_is_not_persisted() {
    let backend = MemoryBackend::with_rows(rows(5, 5, 1));
    let mut h = harness_with(config(5, 5), backend);
    let calls = h.backend.borrow().call_count();

    h.click_cell(1, 1);
    h.sheet.set_edit_value("r1c1");
    h.click_cell(3, 3);
    h.sheet.commit_edit();

    assert_eq!(h.backend.borrow().call_count(), calls);
    assert_eq!(h.sheet.value(1, 1), Some("r1c1"));
}

#[test]
fn changed_value_is_written_and_upserted() {
    let backend = MemoryBackend::with_rows(rows(5, 5, 40));
    let mut h = harness_with(config(5, 5), backend);

    h.click_cell(2, 3);
    h.sheet.set_edit_value("hello");
    assert!(h.sheet.key_down("Enter", false));

    assert!(!h.sheet.edit_box().is_open());
    assert_eq!(h.sheet.value(2, 3), Some("hello"));
    let state = h.backend.borrow();
    assert_eq!(
        state.updates,
        vec![CellUpdate {
            row_id: 42,
            column: 3,
            column_name: "D".to_string(),
            value: "hello".to_string(),
        }]
    );
    let stored = state.rows.iter().find(|r| r.id == 42).unwrap();
    assert_eq!(stored.values[3], "hello");
}

#[test]
fn clicking_another_cell_commits_the_previous_edit() {
    let mut h = harness(config(5, 5));
    h.click_cell(0, 0);
    h.sheet.set_edit_value("42");
    h.click_cell(4, 4);

    assert_eq!(h.sheet.value(0, 0), Some("42"));
    assert_eq!(h.sheet.edit_box().cell(), Some((4, 4)));
    // Rows with no backend record get positional ids
    assert_eq!(h.backend.borrow().updates[0].row_id, 1);
}

#[test]
fn escape_discards_the_typed_text() {
    let mut h = harness(config(5, 5));
    let calls = h.backend.borrow().call_count();
    h.click_cell(1, 1);
    h.sheet.set_edit_value("draft");
    assert!(h.sheet.key_down("Escape", false));

    assert!(!h.sheet.edit_box().is_open());
    assert_eq!(h.sheet.value(1, 1), Some(""));
    assert_eq!(h.backend.borrow().call_count(), calls);
}

#[test]
fn the_box_follows_scrolling() {
    let mut h = harness(config(100, 30));
    h.click_cell(3, 2);
    assert_eq!(h.sheet.edit_box().rect().y, 63.0);

    h.sheet.scroll_by(60.0, 40.0);
    let rect = h.sheet.input_box().unwrap();
    assert_eq!(rect.x, 123.0 - 60.0);
    assert_eq!(rect.y, 63.0 - 40.0);
}

#[test]
fn failed_save_keeps_the_value_and_reports() {
    let mut h = harness(config(5, 5));
    h.backend.borrow_mut().failure = Some("offline".to_string());

    h.click_cell(1, 2);
    h.sheet.set_edit_value("kept");
    h.sheet.commit_edit();

    assert_eq!(h.sheet.value(1, 2), Some("kept"));
    let notices = h.sheet.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("offline"));
    assert!(h.sheet.take_notices().is_empty());
}
