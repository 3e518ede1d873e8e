//! JavaScript facade.
//!
//! `GridView` wires a [`Sheet`] to three canvases, the DOM input overlay,
//! `requestAnimationFrame`, `navigator.clipboard` and (optionally) a REST
//! backend. The sheet lives in a shared slot so asynchronous callbacks
//! (fetched rows, clipboard text, animation frames) can reach it after the
//! call that started them has returned.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use super::{AnimationFrameScheduler, Collaborators, Pane, Sheet, Surfaces, WebClipboard};
use crate::backend::{MemoryBackend, Persistence, RestBackend, RowRecord};
use crate::config::GridConfig;
use crate::editor::InputOverlay;
use crate::error::{GridError, Result};
use crate::render::CanvasSurface;

type Slot = Rc<RefCell<Option<Sheet>>>;

fn with_slot(slot: &Weak<RefCell<Option<Sheet>>>, f: impl FnOnce(&mut Sheet)) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let Ok(mut guard) = slot.try_borrow_mut() else {
        return;
    };
    if let Some(sheet) = guard.as_mut() {
        f(sheet);
    }
}

/// The grid exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    slot: Slot,
    overlay: InputOverlay,
    selection_callback: Rc<RefCell<Option<Function>>>,
}

#[wasm_bindgen]
impl GridView {
    /// Create a grid over three canvases. `config` is a (possibly partial)
    /// configuration object; `base_url` enables the REST backend.
    #[wasm_bindgen(constructor)]
    pub fn new(
        body: HtmlCanvasElement,
        column_header: HtmlCanvasElement,
        row_header: HtmlCanvasElement,
        config: JsValue,
        base_url: Option<String>,
    ) -> std::result::Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| GridError::Config(e.to_string()))?
        };
        config.validate()?;

        let anchor: HtmlElement = body.clone().unchecked_into();
        let surfaces = Surfaces {
            body: Box::new(CanvasSurface::new(body, config.scale)?),
            column_header: Box::new(CanvasSurface::new(column_header, config.scale)?),
            row_header: Box::new(CanvasSurface::new(row_header, config.scale)?),
        };

        let slot: Slot = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&slot);

        let backend: Box<dyn Persistence> = match base_url {
            Some(url) => {
                let mut rest = RestBackend::new(url);
                let rows_slot = weak.clone();
                rest.set_row_sink(Rc::new(move |offset: usize, rows: Vec<RowRecord>| {
                    with_slot(&rows_slot, |sheet| sheet.load_rows(offset, rows));
                }));
                let error_slot = weak.clone();
                rest.set_error_sink(Rc::new(move |error: GridError| {
                    with_slot(&error_slot, |sheet| sheet.report("backend", &error));
                }));
                Box::new(rest)
            }
            None => Box::new(MemoryBackend::new()),
        };

        let paste_slot = weak.clone();
        let clipboard = WebClipboard::new(Rc::new(move |text: Result<String>| {
            with_slot(&paste_slot, |sheet| match text {
                Ok(text) => sheet.paste_text(&text),
                Err(e) => sheet.report("paste", &e),
            });
        }));

        let frame_slot = weak;
        let scheduler = AnimationFrameScheduler::new(Closure::wrap(Box::new(move || {
            with_slot(&frame_slot, Sheet::animation_frame);
        }) as Box<dyn FnMut()>));

        let collaborators = Collaborators {
            backend,
            clipboard: Box::new(clipboard),
            scheduler: Box::new(scheduler),
        };
        let mut sheet = Sheet::new(config, surfaces, collaborators)?;

        let selection_callback: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        let callback = Rc::clone(&selection_callback);
        sheet.set_selection_listener(Box::new(move |snapshot| {
            let Some(function) = callback.borrow().clone() else {
                return;
            };
            if let Ok(value) = serde_wasm_bindgen::to_value(snapshot) {
                let _ = function.call1(&JsValue::NULL, &value);
            }
        }));
        *slot.borrow_mut() = Some(sheet);

        Ok(GridView {
            slot,
            overlay: InputOverlay::new(anchor),
            selection_callback,
        })
    }

    fn with_sheet<R>(&self, f: impl FnOnce(&mut Sheet) -> R) -> Option<R> {
        let mut guard = self.slot.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    }

    /// Copy the overlay's text into the sheet's edit box.
    fn pull_input(&self) {
        if let Some(text) = self.overlay.value() {
            self.with_sheet(|sheet| sheet.set_edit_value(&text));
        }
    }

    /// Show, move or hide the overlay to match the sheet's edit box.
    fn push_input(&mut self, reset_text: bool) {
        let state = self.with_sheet(|sheet| {
            let rect = sheet.input_box()?;
            let value = sheet.edit_box().value().unwrap_or_default().to_string();
            Some((rect, value))
        });
        match state.flatten() {
            Some((rect, value)) if reset_text => {
                self.overlay.show(rect, &value);
                self.overlay.focus();
            }
            Some((rect, _)) => self.overlay.place(rect),
            None => self.overlay.hide(),
        }
    }

    /// Redraw all three canvases.
    #[wasm_bindgen]
    pub fn render(&self) {
        self.with_sheet(Sheet::render);
    }

    /// Pointer-down on a pane ("body", "columnHeader", "rowHeader",
    /// "verticalScrollbar", "horizontalScrollbar").
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, pane: &str, x: f64, y: f64) {
        let Some(pane) = Pane::from_name(pane) else {
            return;
        };
        self.pull_input();
        self.with_sheet(|sheet| sheet.pointer_down(pane, x, y));
        self.push_input(true);
    }

    /// Pointer-move; returns the CSS cursor for the pane.
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, pane: &str, x: f64, y: f64, dx: f64, dy: f64) -> String {
        let Some(pane) = Pane::from_name(pane) else {
            return "default".to_string();
        };
        let cursor = self.with_sheet(|sheet| {
            sheet.pointer_move(pane, x, y, dx, dy);
            sheet.cursor(pane, x, y).css()
        });
        self.push_input(false);
        cursor.unwrap_or("default").to_string()
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) {
        self.with_sheet(Sheet::pointer_up);
        self.push_input(false);
    }

    /// Wheel scrolling.
    #[wasm_bindgen]
    pub fn wheel(&mut self, dx: f64, dy: f64) {
        self.with_sheet(|sheet| sheet.scroll_by(dx, dy));
        self.push_input(false);
    }

    /// Keyboard input; `ctrl`/`meta` select the command modifier.
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str, ctrl: bool, meta: bool) -> bool {
        self.pull_input();
        let handled = self
            .with_sheet(|sheet| sheet.key_down(key, ctrl || meta))
            .unwrap_or(false);
        if handled {
            self.push_input(true);
        }
        handled
    }

    /// Select a block by reference, e.g. "B2:D4".
    #[wasm_bindgen]
    pub fn select(&mut self, reference: &str) -> bool {
        self.pull_input();
        let selected = self
            .with_sheet(|sheet| sheet.select_reference(reference))
            .unwrap_or(false);
        self.push_input(true);
        selected
    }

    /// Statistics line for the current selection, if any.
    #[wasm_bindgen]
    pub fn statistics(&self) -> Option<String> {
        self.with_sheet(|sheet| sheet.statistics().map(ToString::to_string))
            .flatten()
    }

    /// The current selection (rectangle, labels, values).
    #[wasm_bindgen]
    pub fn selection(&self) -> std::result::Result<JsValue, JsValue> {
        let snapshot = self.with_sheet(|sheet| sheet.selection_snapshot()).flatten();
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Register a callback receiving the selection after every change.
    #[wasm_bindgen]
    pub fn on_selection(&self, callback: Option<Function>) {
        *self.selection_callback.borrow_mut() = callback;
    }

    /// Drain pending user notices; each is also logged to the console.
    #[wasm_bindgen]
    pub fn take_notices(&self) -> Vec<String> {
        let notices = self.with_sheet(Sheet::take_notices).unwrap_or_default();
        notices
            .into_iter()
            .map(|notice| {
                web_sys::console::warn_1(&JsValue::from_str(&notice.message));
                notice.message
            })
            .collect()
    }

    /// Resize the viewport in CSS pixels at device pixel ratio `dpr`.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.with_sheet(|sheet| sheet.resize_viewport(width, height, dpr));
        self.push_input(false);
    }

    /// Re-anchor the edit box after an external layout change.
    #[wasm_bindgen]
    pub fn input_box(&mut self) {
        self.push_input(false);
    }

    #[wasm_bindgen]
    pub fn find_and_replace(&self, find: &str, replace: &str) -> usize {
        self.with_sheet(|sheet| sheet.find_and_replace(find, replace))
            .unwrap_or(0)
    }

    /// Upload progress from the host's notification channel.
    #[wasm_bindgen]
    pub fn report_progress(&self, percent: f64) {
        self.with_sheet(|sheet| sheet.report_progress(percent));
    }

    #[wasm_bindgen]
    pub fn value(&self, row: usize, col: usize) -> Option<String> {
        self.with_sheet(|sheet| sheet.value(row, col).map(str::to_string))
            .flatten()
    }

    #[wasm_bindgen]
    pub fn row_count(&self) -> usize {
        self.with_sheet(|sheet| sheet.row_count()).unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn column_count(&self) -> usize {
        self.with_sheet(|sheet| sheet.column_count()).unwrap_or(0)
    }
}
