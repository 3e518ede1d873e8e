//! Selection tests
//!
//! Drag selection on the body, whole-row/column selection from the headers,
//! references, statistics and the selection listener.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{cell_centre, config, harness, harness_with};
use sheetgrid::backend::{MemoryBackend, RowRecord};
use sheetgrid::viewer::{Pane, SelectState};
use sheetgrid::{SelectionRect, SelectionSnapshot};

#[test]
fn drag_selects_a_block() {
    let mut h = harness(config(10, 10));
    let (x0, y0) = cell_centre(&h.sheet, 2, 2);
    let (x1, y1) = cell_centre(&h.sheet, 4, 4);

    h.sheet.pointer_down(Pane::Body, x0, y0);
    assert_eq!(h.sheet.selection_state(), SelectState::Selecting);
    h.sheet.pointer_move(Pane::Body, x1, y1, x1 - x0, y1 - y0);
    h.sheet.pointer_up();

    let model = h.sheet.model();
    assert_eq!(h.sheet.selection_state(), SelectState::Idle);
    assert_eq!(
        model.selection,
        Some(SelectionRect {
            top: 2,
            left: 2,
            bottom: 4,
            right: 4
        })
    );
    assert_eq!(model.selected_main().len(), 9);
    assert_eq!(model.selected_top(), vec![2, 3, 4]);
    assert_eq!(model.selected_side(), vec![2, 3, 4]);
    assert_eq!(model.active, Some((2, 2)));
}

#[test]
fn dragging_back_past_the_anchor_normalizes() {
    let mut h = harness(config(10, 10));
    let (x0, y0) = cell_centre(&h.sheet, 5, 5);
    let (x1, y1) = cell_centre(&h.sheet, 3, 1);

    h.sheet.pointer_down(Pane::Body, x0, y0);
    h.sheet.pointer_move(Pane::Body, x1, y1, 0.0, 0.0);

    let rect = h.sheet.model().selection.unwrap();
    assert_eq!((rect.top, rect.left, rect.bottom, rect.right), (3, 1, 5, 5));
}

#[test]
fn moves_without_pointer_down_do_nothing() {
    let mut h = harness(config(10, 10));
    h.sheet.pointer_move(Pane::Body, 100.0, 100.0, 5.0, 5.0);
    assert_eq!(h.sheet.model().selection, None);
}

#[test]
fn column_header_selects_the_whole_column() {
    let mut h = harness(config(30, 10));
    // Column B spans 60..120
    h.sheet.pointer_down(Pane::ColumnHeader, 90.0, 10.0);
    h.sheet.pointer_up();

    let rect = h.sheet.model().selection.unwrap();
    assert_eq!((rect.left, rect.right), (1, 1));
    assert_eq!((rect.top, rect.bottom), (0, 29));
    assert_eq!(h.sheet.model().selected_side().len(), 30);
}

#[test]
fn row_header_selects_the_whole_row() {
    let mut h = harness(config(10, 8));
    // Row 3 spans 60..80
    h.sheet.pointer_down(Pane::RowHeader, 20.0, 70.0);
    h.sheet.pointer_up();

    let rect = h.sheet.model().selection.unwrap();
    assert_eq!((rect.top, rect.bottom), (3, 3));
    assert!(rect.spans_all_columns(8));
}

#[test]
fn select_reference_clamps_and_rejects() {
    let mut h = harness(config(10, 5));
    assert!(h.sheet.select_reference("B2:Z99"));
    let rect = h.sheet.model().selection.unwrap();
    assert_eq!((rect.top, rect.left, rect.bottom, rect.right), (1, 1, 9, 4));

    assert!(!h.sheet.select_reference("K20"));
    assert!(!h.sheet.select_reference("not a ref"));
}

#[test]
fn statistics_skip_blanks_and_text() {
    let backend = MemoryBackend::with_rows(vec![
        RowRecord {
            id: 1,
            values: vec!["1".into(), " 2.5 ".into(), "x".into(), String::new()],
        },
        RowRecord {
            id: 2,
            values: vec!["-4".into(), "inf".into()],
        },
    ]);
    let mut h = harness_with(config(5, 4), backend);

    assert!(h.sheet.select_reference("A1:D2"));
    let stats = h.sheet.statistics().copied().unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.sum, -0.5);
    assert_eq!(stats.min, -4.0);
    assert_eq!(stats.max, 2.5);
    assert_eq!(
        stats.to_string(),
        "Count: 3  Sum: -0.5  Min: -4  Max: 2.5  Average: -0.17"
    );

    // A single number is not enough
    assert!(h.sheet.select_reference("A1"));
    assert!(h.sheet.statistics().is_none());
}

#[test]
fn listener_receives_labels_and_values() {
    let backend = MemoryBackend::with_rows(common::rows(4, 4, 100));
    let mut h = harness_with(config(4, 4), backend);
    let seen: Rc<RefCell<Vec<SelectionSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    h.sheet
        .set_selection_listener(Box::new(move |snapshot| sink.borrow_mut().push(snapshot.clone())));

    assert!(h.sheet.select_reference("B2:C3"));

    let seen = seen.borrow();
    let last = seen.last().unwrap();
    assert_eq!(last.column_names, vec!["B", "C"]);
    assert_eq!(last.row_numbers, vec![2, 3]);
    assert_eq!(
        last.values,
        vec![
            vec!["r1c1".to_string(), "r1c2".to_string()],
            vec!["r2c1".to_string(), "r2c2".to_string()],
        ]
    );
    assert_eq!(h.sheet.selection_snapshot().as_ref(), Some(last));
}

fn numbers() -> MemoryBackend {
    MemoryBackend::with_rows(vec![
        RowRecord {
            id: 1,
            values: vec!["1".into()],
        },
        RowRecord {
            id: 2,
            values: vec!["2".into()],
        },
    ])
}

#[test]
fn statistics_follow_edits_inside_the_selection() {
    let mut h = harness_with(config(4, 2), numbers());
    let seen: Rc<RefCell<Vec<SelectionSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    h.sheet
        .set_selection_listener(Box::new(move |snapshot| sink.borrow_mut().push(snapshot.clone())));

    assert!(h.sheet.select_reference("A1:A2"));
    assert_eq!(h.sheet.statistics().unwrap().sum, 3.0);

    h.sheet.set_edit_value("10");
    assert!(h.sheet.key_down("Enter", false));
    assert_eq!(h.sheet.value(0, 0), Some("10"));
    assert_eq!(h.sheet.statistics().unwrap().sum, 12.0);

    assert_eq!(h.sheet.find_and_replace("2", "20"), 1);
    assert_eq!(h.sheet.statistics().unwrap().sum, 30.0);
    assert_eq!(
        seen.borrow().last().unwrap().values,
        vec![vec!["10".to_string()], vec!["20".to_string()]]
    );
}

#[test]
fn statistics_follow_loaded_rows() {
    let mut h = harness_with(config(4, 2), numbers());
    assert!(h.sheet.select_reference("A1:A2"));

    h.sheet.load_rows(
        1,
        vec![RowRecord {
            id: 2,
            values: vec!["7".into()],
        }],
    );
    assert_eq!(h.sheet.statistics().unwrap().sum, 8.0);

    // The refetch after an upload goes through the same path
    h.backend.borrow_mut().rows[0].values[0] = "5".to_string();
    h.sheet.report_progress(100.0);
    assert_eq!(h.sheet.statistics().unwrap().sum, 7.0);
}
