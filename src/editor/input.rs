//! DOM input overlay for cell editing.
//!
//! Creates an `<input>` element positioned over the active body cell. The
//! element is absolutely positioned inside the body canvas's parent, so the
//! canvas's own offset is added to the surface-relative edit rectangle.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::render::Rect;

/// Input overlay for cell editing.
pub(crate) struct InputOverlay {
    input: Option<HtmlInputElement>,
    /// Body canvas; its offsetLeft/offsetTop anchor the overlay
    anchor: HtmlElement,
}

impl InputOverlay {
    pub(crate) fn new(anchor: HtmlElement) -> Self {
        InputOverlay {
            input: None,
            anchor,
        }
    }

    /// Show the overlay at `rect` (body-surface pixels) holding `value`.
    pub(crate) fn show(&mut self, rect: Rect, value: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let left = rect.x + f64::from(self.anchor.offset_left());
        let top = rect.y + f64::from(self.anchor.offset_top());
        let Some(input) = self.get_or_create_input(&document) else {
            return;
        };
        let style = input.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{left}px"));
        let _ = style.set_property("top", &format!("{top}px"));
        let _ = style.set_property("width", &format!("{}px", rect.width));
        let _ = style.set_property("height", &format!("{}px", rect.height));
        input.set_value(value);
    }

    /// Move the overlay without touching its text.
    pub(crate) fn place(&mut self, rect: Rect) {
        if let Some(input) = &self.input {
            let style = input.style();
            let left = rect.x + f64::from(self.anchor.offset_left());
            let top = rect.y + f64::from(self.anchor.offset_top());
            let _ = style.set_property("left", &format!("{left}px"));
            let _ = style.set_property("top", &format!("{top}px"));
            let _ = style.set_property("width", &format!("{}px", rect.width));
            let _ = style.set_property("height", &format!("{}px", rect.height));
        }
    }

    pub(crate) fn focus(&self) {
        if let Some(input) = &self.input {
            let _ = input.focus();
        }
    }

    /// Hide the overlay.
    pub(crate) fn hide(&mut self) {
        if let Some(ref input) = self.input {
            let _ = input.style().set_property("display", "none");
            let _ = input.blur();
        }
    }

    /// Text currently typed into the overlay.
    pub(crate) fn value(&self) -> Option<String> {
        self.input.as_ref().map(HtmlInputElement::value)
    }

    fn get_or_create_input(&mut self, document: &Document) -> Option<&HtmlInputElement> {
        if self.input.is_none() {
            let input = document
                .create_element("input")
                .ok()?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            input.set_type("text");
            input.set_class_name("sheetgrid-input");
            let style = input.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("z-index", "10");
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("border", "none");
            let _ = style.set_property("outline", "none");
            let _ = style.set_property("padding", "0 4px");
            let _ = style.set_property("font", "inherit");
            let _ = style.set_property("background", "transparent");
            let _ = style.set_property("display", "none");

            match self.anchor.parent_node() {
                Some(parent) => {
                    let _ = parent.append_child(&input);
                }
                None => {
                    let _ = document.body()?.append_child(&input);
                }
            }
            self.input = Some(input);
        }
        self.input.as_ref()
    }
}

impl Drop for InputOverlay {
    fn drop(&mut self) {
        if let Some(ref input) = self.input {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}
