//! The interactive sheet.
//!
//! `Sheet` owns the shared [`AxisModel`], the three grids and every
//! controller, and routes input to them one event at a time. All state is
//! mutated synchronously; collaborators (persistence, clipboard, frame
//! scheduler) are called after local state has changed and their failures
//! are queued as [`Notice`]s rather than undone.

mod animation;
mod clipboard;
mod events;
mod resize;
mod scroll;
mod selection;
#[cfg(target_arch = "wasm32")]
mod web;

pub use animation::{FrameId, FrameScheduler, ManualScheduler, MarchingAnts};
#[cfg(target_arch = "wasm32")]
pub use animation::AnimationFrameScheduler;
pub use clipboard::{escape_cell_value, parse_tsv, to_tsv, Clipboard, MemoryClipboard};
#[cfg(target_arch = "wasm32")]
pub use clipboard::{TextSink, WebClipboard};
pub use events::{key_command, KeyCommand, Pane};
pub use resize::{Cursor, ResizeController};
pub use scroll::{ScrollController, ScrollStep, Scrollbar};
pub use selection::{SelectState, SelectionController, Statistics};
#[cfg(target_arch = "wasm32")]
pub use web::GridView;

use crate::backend::{CellUpdate, Delivery, Persistence, ProgressTracker, RowRecord};
use crate::cell_ref::{column_name_for_number, parse_cell_range};
use crate::config::GridConfig;
use crate::editor::EditBox;
use crate::error::{GridError, Result};
use crate::layout::AxisModel;
use crate::render::{BodyGrid, CellLook, DrawingSurface, HeaderGrid, Rect};
use crate::types::{Axis, SelectionRect, SelectionSnapshot};

/// A non-blocking message for the user (failed save, failed paste, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// The three drawing surfaces of one sheet.
pub struct Surfaces {
    pub body: Box<dyn DrawingSurface>,
    pub column_header: Box<dyn DrawingSurface>,
    pub row_header: Box<dyn DrawingSurface>,
}

/// External collaborators of one sheet.
pub struct Collaborators {
    pub backend: Box<dyn Persistence>,
    pub clipboard: Box<dyn Clipboard>,
    pub scheduler: Box<dyn FrameScheduler>,
}

/// Receives a snapshot after every selection change.
pub type SelectionListener = Box<dyn FnMut(&SelectionSnapshot)>;

/// One grid instance: model, grids, controllers and collaborators.
pub struct Sheet {
    config: GridConfig,
    model: AxisModel,
    body: BodyGrid,
    column_header: HeaderGrid,
    row_header: HeaderGrid,
    selection: SelectionController,
    resize: ResizeController,
    scroll: ScrollController,
    edit: EditBox,
    ants: MarchingAnts,
    progress: ProgressTracker,
    backend: Box<dyn Persistence>,
    clipboard: Box<dyn Clipboard>,
    scheduler: Box<dyn FrameScheduler>,
    listener: Option<SelectionListener>,
    statistics: Option<Statistics>,
    notices: Vec<Notice>,
}

impl Sheet {
    /// Build a sheet of `config.rows` x `config.columns`, request the first
    /// page of rows from the backend and draw everything.
    pub fn new(config: GridConfig, surfaces: Surfaces, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        let look = CellLook::new(config.palette.clone(), config.text_padding);
        let mut model = AxisModel::new(
            &config,
            surfaces.body.width(),
            surfaces.body.height(),
        );
        let mut body = BodyGrid::new(surfaces.body, look.clone());
        body.initialize(&mut model, config.rows, config.columns);
        let mut column_header = HeaderGrid::columns(surfaces.column_header, look.clone());
        let mut row_header = HeaderGrid::rows(surfaces.row_header, look);
        column_header.initialize(&model);
        row_header.initialize(&model);
        let mut scroll = ScrollController::new(&config);
        scroll.sync(&model);

        let mut sheet = Self {
            resize: ResizeController::new(config.resize_tolerance),
            edit: EditBox::new(&config),
            ants: MarchingAnts::new(config.ants_period),
            config,
            model,
            body,
            column_header,
            row_header,
            selection: SelectionController::new(),
            scroll,
            progress: ProgressTracker::new(),
            backend: collaborators.backend,
            clipboard: collaborators.clipboard,
            scheduler: collaborators.scheduler,
            listener: None,
            statistics: None,
            notices: Vec::new(),
        };
        let rows = sheet.model.row_count();
        sheet.fetch(0, rows);
        sheet.render();
        Ok(sheet)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn model(&self) -> &AxisModel {
        &self.model
    }

    pub fn body(&self) -> &BodyGrid {
        &self.body
    }

    pub fn column_header(&self) -> &HeaderGrid {
        &self.column_header
    }

    pub fn row_header(&self) -> &HeaderGrid {
        &self.row_header
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn edit_box(&self) -> &EditBox {
        &self.edit
    }

    pub fn selection_state(&self) -> SelectState {
        self.selection.state()
    }

    pub fn is_animating(&self) -> bool {
        self.ants.is_running()
    }

    /// Live statistics of the current selection, if it holds 2+ numbers.
    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.model.column_count()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.body.value(row, col)
    }

    /// Drain the queued user notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_selection_listener(&mut self, listener: SelectionListener) {
        self.listener = Some(listener);
    }

    /// Redraw all three surfaces.
    pub fn render(&mut self) {
        self.body.render(&self.model);
        self.column_header.render(&self.model);
        self.row_header.render(&self.model);
    }

    pub fn report(&mut self, context: &str, error: &GridError) {
        tracing::warn!(target: "sheetgrid::viewer", context, error = %error, "collaborator call failed");
        self.notices.push(Notice {
            message: format!("{context}: {error}"),
        });
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Pointer-down at `(x, y)` relative to `pane`.
    pub fn pointer_down(&mut self, pane: Pane, x: f64, y: f64) {
        match pane {
            Pane::Body => self.body_pointer_down(x, y),
            Pane::ColumnHeader => self.header_pointer_down(Axis::Column, x),
            Pane::RowHeader => self.header_pointer_down(Axis::Row, y),
            Pane::VerticalScrollbar => {
                self.scroll.pointer_down(Axis::Row, y);
            }
            Pane::HorizontalScrollbar => {
                self.scroll.pointer_down(Axis::Column, x);
            }
        }
    }

    fn body_pointer_down(&mut self, x: f64, y: f64) {
        if self.model.row_count() == 0 || self.model.column_count() == 0 {
            return;
        }
        self.ants.cancel(self.scheduler.as_mut());
        self.commit_edit();
        let (row, col) = self.selection.pointer_down(&mut self.model, x, y);
        let current = self.body.value(row, col).unwrap_or_default().to_string();
        self.edit.open(&self.model, row, col, &current);
        self.selection_changed();
    }

    fn header_pointer_down(&mut self, axis: Axis, coordinate: f64) {
        if self.resize.pointer_down(&self.model, axis, coordinate) {
            return;
        }
        let content = self.model.viewport.to_content(axis, coordinate);
        let Some(index) = self
            .model
            .offsets(axis)
            .section_at(content, self.config.resize_tolerance)
        else {
            return;
        };
        self.ants.cancel(self.scheduler.as_mut());
        self.commit_edit();
        self.selection.select_whole(&mut self.model, axis, index);
        self.selection_changed();
    }

    /// Pointer-move to `(x, y)` relative to `pane`, having moved `(dx, dy)`
    /// since the last event.
    pub fn pointer_move(&mut self, pane: Pane, x: f64, y: f64, dx: f64, dy: f64) {
        if self.resize.is_dragging() {
            self.resize_step(dx, dy);
        } else if self.scroll.is_dragging() {
            let (axis, pointer) = if self.scroll.vertical.is_dragging() {
                (Axis::Row, y)
            } else {
                (Axis::Column, x)
            };
            self.scroll_step(axis, pointer);
        } else if pane == Pane::Body && self.selection.pointer_move(&mut self.model, x, y) {
            self.selection_changed();
        }
    }

    fn resize_step(&mut self, dx: f64, dy: f64) {
        let delta = match self.resize.axis() {
            Some(Axis::Row) => dy,
            _ => dx,
        };
        let applied = self.resize.pointer_move(&mut self.model, delta);
        if applied == Some(true) {
            self.scroll.sync(&self.model);
            self.edit.reposition(&self.model);
            self.render();
        }
    }

    fn scroll_step(&mut self, axis: Axis, pointer: f64) {
        let step = self.scroll.pointer_move(&mut self.model, axis, pointer);
        if step.grow {
            self.grow(axis);
            self.scroll.regrown(&self.model, axis);
        }
        if step.scrolled || step.grow {
            self.edit.reposition(&self.model);
            self.render();
        }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.selection.pointer_up();
        self.scroll.pointer_up();
        if self.resize.pointer_up().is_some() {
            self.edit.reposition(&self.model);
            self.render();
        }
    }

    /// Cursor for a hover over `pane` at `(x, y)`.
    pub fn cursor(&self, pane: Pane, x: f64, y: f64) -> Cursor {
        match pane {
            Pane::ColumnHeader => self.resize.cursor(&self.model, Axis::Column, x),
            Pane::RowHeader => self.resize.cursor(&self.model, Axis::Row, y),
            _ => Cursor::Grab,
        }
    }

    /// Wheel scrolling by pixel deltas.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        let step = self.scroll.scroll_by(&mut self.model, dx, dy);
        if step.grow {
            self.grow(Axis::Row);
            self.scroll.regrown(&self.model, Axis::Row);
        }
        if step.scrolled || step.grow {
            self.edit.reposition(&self.model);
            self.render();
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    fn selection_changed(&mut self) {
        self.refresh_selection_view();
        self.render();
    }

    /// Recompute the statistics and notify the listener from the current
    /// cell values. Called whenever values under the selection may change.
    fn refresh_selection_view(&mut self) {
        let body = &self.body;
        self.statistics = self.model.selection.and_then(|rect| {
            Statistics::collect(rect.cells().filter_map(|(r, c)| body.value(r, c)))
        });
        if let (Some(listener), Some(rect)) = (self.listener.as_mut(), self.model.selection) {
            listener(&snapshot(&self.body, rect));
        }
    }

    /// The current selection with its labels and values.
    pub fn selection_snapshot(&self) -> Option<SelectionSnapshot> {
        self.model.selection.map(|rect| snapshot(&self.body, rect))
    }

    /// Select a block by reference ("B2", "A1:C4"). Returns `false` if the
    /// reference does not parse or lies outside the grid.
    pub fn select_reference(&mut self, reference: &str) -> bool {
        let Some((top, left, bottom, right)) = parse_cell_range(reference) else {
            return false;
        };
        let rect = SelectionRect {
            top,
            left,
            bottom,
            right,
        };
        let Some(rect) = rect.clamped(self.model.row_count(), self.model.column_count()) else {
            return false;
        };
        self.ants.cancel(self.scheduler.as_mut());
        self.commit_edit();
        self.selection.select_rect(&mut self.model, rect);
        let current = self.body.value(top, left).unwrap_or_default().to_string();
        self.edit.open(&self.model, top, left, &current);
        self.selection_changed();
        true
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Replace the text in the open edit box.
    pub fn set_edit_value(&mut self, value: &str) {
        self.edit.set_value(value);
    }

    /// Close the edit box, persisting its value if it changed.
    pub fn commit_edit(&mut self) {
        if let Some(edit) = self.edit.commit() {
            self.write_cell(edit.row, edit.col, edit.value);
            self.refresh_selection_view();
            self.body.render(&self.model);
        }
    }

    /// Close the edit box without saving.
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Re-anchor the edit box after an external layout change and return
    /// its rectangle on the body surface.
    pub fn input_box(&mut self) -> Option<Rect> {
        self.edit.reposition(&self.model);
        self.edit.is_open().then(|| self.edit.rect())
    }

    /// Write a value locally and upsert it remotely.
    fn write_cell(&mut self, row: usize, col: usize, value: String) {
        let Some(row_id) = self.body.row_id(row) else {
            self.report("edit", &GridError::OutOfBounds { row, col });
            return;
        };
        let update = CellUpdate {
            row_id,
            column: col,
            column_name: column_name_for_number(col + 1),
            value: value.clone(),
        };
        if let Err(e) = self.body.set_value(row, col, value) {
            self.report("edit", &e);
            return;
        }
        if let Err(e) = self.backend.update_cell(&update) {
            self.report("save cell", &e);
        }
    }

    // ------------------------------------------------------------------
    // Keyboard, clipboard and row deletion
    // ------------------------------------------------------------------

    /// Handle a key press. Returns `true` if it mapped to a command.
    pub fn key_down(&mut self, key: &str, command: bool) -> bool {
        let Some(action) = key_command(key, command) else {
            return false;
        };
        match action {
            KeyCommand::Copy => self.copy(),
            KeyCommand::Paste => self.paste(),
            KeyCommand::DeleteRow => return self.delete_selected_rows() > 0,
            KeyCommand::CommitEdit => self.commit_edit(),
            KeyCommand::CancelEdit => self.cancel_edit(),
        }
        true
    }

    /// Copy the selection as TSV and start the marching ants.
    pub fn copy(&mut self) {
        let Some(rect) = self.model.selection else {
            return;
        };
        let text = to_tsv(&self.body.values_in(&rect));
        if let Err(e) = self.clipboard.write_text(&text) {
            self.report("copy", &e);
        }
        if let Err(e) = self.ants.start(self.scheduler.as_mut()) {
            self.report("animation", &e);
            return;
        }
        self.ants.advance(&mut self.model);
        self.body.draw_ants(&self.model);
    }

    /// One marching-ants frame. Hosts call this from their frame callback.
    pub fn animation_frame(&mut self) {
        match self.ants.on_frame(self.scheduler.as_mut()) {
            Ok(true) => {
                self.body.render(&self.model);
                self.ants.advance(&mut self.model);
                self.body.draw_ants(&self.model);
            }
            Ok(false) => {}
            Err(e) => self.report("animation", &e),
        }
    }

    /// Read the clipboard and paste at the anchor cell.
    pub fn paste(&mut self) {
        match self.clipboard.read_text() {
            Ok(Delivery::Ready(text)) => self.paste_text(&text),
            Ok(Delivery::Pending) => {}
            Err(e) => self.report("paste", &e),
        }
    }

    /// Paste TSV text with its top-left at the anchor cell, growing the
    /// grid when the block runs past it. Each changed cell is persisted.
    pub fn paste_text(&mut self, text: &str) {
        let Some((row0, col0)) = self.selection.anchor() else {
            return;
        };
        let block = parse_tsv(text);
        let width = block.iter().map(Vec::len).max().unwrap_or(0);
        let need_rows = (row0 + block.len()).saturating_sub(self.model.row_count());
        let need_cols = (col0 + width).saturating_sub(self.model.column_count());
        if need_rows > 0 {
            self.add_rows(need_rows);
        }
        if need_cols > 0 {
            self.add_columns(need_cols);
        }

        for (i, line) in block.into_iter().enumerate() {
            for (j, value) in line.into_iter().enumerate() {
                let (row, col) = (row0 + i, col0 + j);
                if self.body.value(row, col) != Some(value.as_str()) {
                    self.write_cell(row, col, value);
                }
            }
        }

        if let Some((row, col)) = self.edit.cell() {
            let current = self.body.value(row, col).unwrap_or_default().to_string();
            self.edit.open(&self.model, row, col, &current);
        }
        self.scroll.sync(&self.model);
        self.selection_changed();
    }

    /// Delete every row of a full-width selection. Returns the number of
    /// rows removed; nothing happens unless whole rows are selected.
    pub fn delete_selected_rows(&mut self) -> usize {
        let Some(rect) = self.model.selection else {
            return 0;
        };
        if !rect.spans_all_columns(self.model.column_count()) {
            return 0;
        }
        self.ants.cancel(self.scheduler.as_mut());
        let mut removed = 0;
        for row in rect.rows().rev() {
            let Some(row_id) = self.body.remove_row(row) else {
                continue;
            };
            self.model.remove_row(row);
            self.row_header.remove(row);
            self.edit.row_removed(row);
            self.selection.row_removed(row);
            removed += 1;
            if let Err(e) = self.backend.delete_row(row_id) {
                self.report("delete row", &e);
            }
        }
        tracing::info!(target: "sheetgrid::viewer", removed, "deleted rows");
        self.selection.clear(&mut self.model);
        self.edit.cancel();
        self.statistics = None;
        self.scroll.sync(&self.model);
        self.render();
        removed
    }

    // ------------------------------------------------------------------
    // Growth and data loading
    // ------------------------------------------------------------------

    /// Append `count` blank rows to the body and the row header.
    pub fn add_rows(&mut self, count: usize) {
        self.body.add_rows(&mut self.model, count);
        self.row_header.add_cells(&self.model, count);
        self.scroll.sync(&self.model);
    }

    /// Append `count` blank columns to the body and the column header.
    pub fn add_columns(&mut self, count: usize) {
        self.body.add_columns(&mut self.model, count);
        self.column_header.add_cells(&self.model, count);
        self.scroll.sync(&self.model);
    }

    /// Lazy growth along `axis`. New rows are requested from the backend.
    fn grow(&mut self, axis: Axis) {
        match axis {
            Axis::Row => {
                let start = self.model.row_count();
                let count = self.config.growth_rows;
                self.add_rows(count);
                tracing::debug!(target: "sheetgrid::viewer", start, count, "grew rows");
                self.fetch(start, count);
            }
            Axis::Column => {
                let count = self.config.growth_columns;
                self.add_columns(count);
                tracing::debug!(target: "sheetgrid::viewer", count, "grew columns");
            }
        }
    }

    fn fetch(&mut self, offset: usize, limit: usize) {
        match self.backend.fetch_rows(offset, limit) {
            Ok(Delivery::Ready(rows)) => self.load_rows(offset, rows),
            Ok(Delivery::Pending) => {}
            Err(e) => self.report("fetch rows", &e),
        }
    }

    /// Write fetched rows into the matrix starting at `offset`. Rows past
    /// the materialized bounds are dropped.
    pub fn load_rows(&mut self, offset: usize, rows: Vec<RowRecord>) {
        let mut loaded = 0;
        for (i, record) in rows.into_iter().enumerate() {
            let row = offset + i;
            if self.body.load_row(row, record.id, &record.values).is_err() {
                break;
            }
            loaded += 1;
        }
        tracing::debug!(target: "sheetgrid::viewer", offset, loaded, "loaded rows");
        if loaded > 0 {
            self.refresh_selection_view();
        }
        self.body.render(&self.model);
    }

    /// Replace every cell whose value is exactly `find`, remotely then
    /// locally. Returns the number of local cells changed.
    pub fn find_and_replace(&mut self, find: &str, replace: &str) -> usize {
        if find.is_empty() {
            return 0;
        }
        if let Err(e) = self.backend.find_and_replace(find, replace) {
            self.report("find and replace", &e);
        }
        let changed = self.body.replace_all(find, replace).len();
        if changed > 0 {
            self.refresh_selection_view();
        }
        self.body.render(&self.model);
        changed
    }

    /// Feed an upload progress update; reaching 100% refetches every
    /// materialized row.
    pub fn report_progress(&mut self, percent: f64) {
        if self.progress.record(percent) {
            let rows = self.model.row_count();
            tracing::info!(target: "sheetgrid::viewer", rows, "upload complete, refetching");
            self.fetch(0, rows);
        }
    }

    /// Last reported upload percentage.
    pub fn progress(&self) -> u8 {
        self.progress.percent()
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Resize the body viewport (and the header strips along with it).
    pub fn resize_viewport(&mut self, width: f64, height: f64, scale: f64) {
        let (header_height, header_width) = (self.config.header_height, self.config.header_width);
        self.body.surface_mut().resize(width, height, scale);
        self.column_header
            .surface_mut()
            .resize(width, header_height, scale);
        self.row_header
            .surface_mut()
            .resize(header_width, height, scale);
        self.model.scale = scale;
        self.model.viewport.resize(width, height);
        let (top, left) = (self.model.viewport.shift_top, self.model.viewport.shift_left);
        self.model.set_shift(Axis::Row, top);
        self.model.set_shift(Axis::Column, left);
        self.scroll.sync(&self.model);
        self.edit.reposition(&self.model);
        self.render();
    }
}

fn snapshot(body: &BodyGrid, rect: SelectionRect) -> SelectionSnapshot {
    SelectionSnapshot {
        rect,
        column_names: rect.cols().map(|c| column_name_for_number(c + 1)).collect(),
        row_numbers: rect.rows().map(|r| r + 1).collect(),
        values: body.values_in(&rect),
    }
}
