//! Row deletion tests
//!
//! Deleting splices the matrix, the offset table and the row header
//! together, keeps every other row's size, and tells the backend which
//! row ids went away.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{config, harness_with, rows, Harness};
use sheetgrid::backend::MemoryBackend;
use sheetgrid::viewer::Pane;

fn sheet_with_ids() -> Harness {
    harness_with(config(10, 5), MemoryBackend::with_rows(rows(10, 5, 11)))
}

#[test]
fn deleting_a_row_splices_everything() {
    let mut h = sheet_with_ids();

    // Make row 5 taller so we can see sizes move with their rows
    h.sheet.pointer_down(Pane::RowHeader, 20.0, 120.0);
    h.sheet.pointer_move(Pane::RowHeader, 20.0, 140.0, 0.0, 20.0);
    h.sheet.pointer_up();
    assert_eq!(h.sheet.model().rows.size(5), 40.0);

    // Select row 2 from the header, then press Delete
    h.sheet.pointer_down(Pane::RowHeader, 20.0, 50.0);
    h.sheet.pointer_up();
    assert!(h.sheet.key_down("Delete", false));

    assert_eq!(h.backend.borrow().deletes, vec![13]);
    assert_eq!(h.sheet.row_count(), 9);
    assert_eq!(h.sheet.body().rows(), 9);
    assert_eq!(h.sheet.model().rows.size(4), 40.0);
    assert_eq!(h.sheet.model().rows.size(5), 20.0);
    assert_eq!(h.sheet.model().rows.total(), 200.0);
    assert_eq!(h.sheet.value(2, 0), Some("r3c0"));
    assert_eq!(h.sheet.body().row_id(2), Some(14));

    let header = h.sheet.row_header();
    assert_eq!(header.len(), 9);
    assert_eq!(header.label(0), Some("1"));
    assert_eq!(header.label(8), Some("9"));

    assert_eq!(h.sheet.model().selection, None);
    assert!(h.sheet.statistics().is_none());
}

#[test]
fn deleting_several_rows_goes_bottom_up() {
    let mut h = sheet_with_ids();
    assert!(h.sheet.select_reference("A2:E4"));

    assert_eq!(h.sheet.delete_selected_rows(), 3);

    assert_eq!(h.backend.borrow().deletes, vec![14, 13, 12]);
    assert_eq!(h.sheet.row_count(), 7);
    assert_eq!(h.sheet.value(0, 0), Some("r0c0"));
    assert_eq!(h.sheet.value(1, 0), Some("r4c0"));
    assert!(!h.sheet.edit_box().is_open());
    // Backend state mirrors the deletion
    assert_eq!(h.backend.borrow().rows.len(), 7);
}

#[test]
fn partial_rows_are_not_deleted() {
    let mut h = sheet_with_ids();
    assert!(h.sheet.select_reference("A1:B3"));
    assert_eq!(h.sheet.delete_selected_rows(), 0);
    assert!(h.backend.borrow().deletes.is_empty());
    assert_eq!(h.sheet.row_count(), 10);

    // Nothing selected at all
    let mut h = sheet_with_ids();
    assert!(!h.sheet.key_down("Delete", false));
    assert_eq!(h.sheet.row_count(), 10);
}

#[test]
fn backend_failure_still_deletes_locally() {
    let mut h = sheet_with_ids();
    h.backend.borrow_mut().failure = Some("503".to_string());
    assert!(h.sheet.select_reference("A1:E1"));

    assert_eq!(h.sheet.delete_selected_rows(), 1);
    assert_eq!(h.sheet.row_count(), 9);
    assert_eq!(h.sheet.value(0, 0), Some("r1c0"));
    let notices = h.sheet.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.starts_with("delete row"));
}

#[test]
fn deleting_the_edited_row_closes_the_editor() {
    let mut h = sheet_with_ids();
    assert!(h.sheet.select_reference("A1:E1"));
    // Edit box sits on A1 after selecting by reference
    assert_eq!(h.sheet.edit_box().cell(), Some((0, 0)));
    h.sheet.delete_selected_rows();
    // Deletion always ends the edit
    assert!(!h.sheet.edit_box().is_open());
}
