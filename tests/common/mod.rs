//! Shared fixtures for the integration tests.
//!
//! Builds a headless [`Sheet`] over recording surfaces and in-memory
//! collaborators, keeping handles to everything so tests can inspect
//! what the sheet drew, stored and scheduled.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetgrid::backend::{BackendLog, MemoryBackend, RowRecord};
use sheetgrid::render::{DrawLog, DrawOp, RecordingSurface};
use sheetgrid::viewer::{ManualScheduler, MemoryClipboard, Pane};
use sheetgrid::{Collaborators, GridConfig, Sheet, Surfaces};

pub const BODY_WIDTH: f64 = 600.0;
pub const BODY_HEIGHT: f64 = 400.0;

/// A sheet plus handles to all of its collaborators.
pub struct Harness {
    pub sheet: Sheet,
    pub backend: BackendLog,
    pub clipboard: MemoryClipboard,
    pub frames: ManualScheduler,
    pub body: DrawLog,
    pub top: DrawLog,
    pub side: DrawLog,
}

impl Harness {
    /// Click the centre of body cell `(row, col)` with the viewport at the origin.
    pub fn click_cell(&mut self, row: usize, col: usize) {
        let (x, y) = cell_centre(&self.sheet, row, col);
        self.sheet.pointer_down(Pane::Body, x, y);
        self.sheet.pointer_up();
    }

    /// Texts drawn on a surface since its log was last cleared.
    pub fn texts(log: &DrawLog) -> Vec<String> {
        log.borrow()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

/// A small grid with the default 60x20 cells and 50-row growth steps.
pub fn config(rows: usize, columns: usize) -> GridConfig {
    GridConfig {
        rows,
        columns,
        growth_rows: 50,
        growth_columns: 10,
        ..GridConfig::default()
    }
}

/// Rows `0..count` with ids starting at `first_id` and `columns` values
/// named after their cell ("r0c0", "r0c1", ...).
pub fn rows(count: usize, columns: usize, first_id: u64) -> Vec<RowRecord> {
    (0..count)
        .map(|r| RowRecord {
            id: first_id + r as u64,
            values: (0..columns).map(|c| format!("r{r}c{c}")).collect(),
        })
        .collect()
}

pub fn harness(config: GridConfig) -> Harness {
    harness_with(config, MemoryBackend::new())
}

pub fn harness_with(config: GridConfig, backend: MemoryBackend) -> Harness {
    let body = RecordingSurface::new(BODY_WIDTH, BODY_HEIGHT);
    let top = RecordingSurface::new(BODY_WIDTH, config.header_height);
    let side = RecordingSurface::new(config.header_width, BODY_HEIGHT);
    let (body_log, top_log, side_log) = (body.log(), top.log(), side.log());
    let backend_log = backend.log();
    let clipboard = MemoryClipboard::new();
    let frames = ManualScheduler::new();

    let sheet = Sheet::new(
        config,
        Surfaces {
            body: Box::new(body),
            column_header: Box::new(top),
            row_header: Box::new(side),
        },
        Collaborators {
            backend: Box::new(backend),
            clipboard: Box::new(clipboard.clone()),
            scheduler: Box::new(frames.clone()),
        },
    )
    .expect("valid config");

    Harness {
        sheet,
        backend: backend_log,
        clipboard,
        frames,
        body: body_log,
        top: top_log,
        side: side_log,
    }
}

/// Surface coordinates of the centre of `(row, col)` at the current shift.
pub fn cell_centre(sheet: &Sheet, row: usize, col: usize) -> (f64, f64) {
    let model = sheet.model();
    let x = model.columns.start(col) + model.columns.size(col) / 2.0 - model.viewport.shift_left;
    let y = model.rows.start(row) + model.rows.size(row) / 2.0 - model.viewport.shift_top;
    (x, y)
}
