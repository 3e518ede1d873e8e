//! sheetgrid - virtualized spreadsheet grid for the web
//!
//! A canvas-rendered grid made of three synchronized panes (body, column
//! header, row header) over a single geometry model:
//! - Cumulative offset tables with binary-search hit testing
//! - Drag selection, whole-row/column selection, live statistics
//! - Interactive row/column resizing
//! - Custom scrollbars with lazy growth near the end of the content
//! - In-place editing, TSV copy/paste with marching ants, row deletion
//! - Pluggable persistence (in-memory or REST)
//!
//! The engine itself is platform independent; the browser bindings are
//! compiled for `wasm32` only.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'sheetgrid';
//! await init();
//! const grid = new GridView(body, top, side, { rows: 1000 }, '/api');
//! grid.pointer_down('body', x, y);
//! ```

pub mod backend;
pub mod cell_ref;
pub mod config;
pub mod editor;
pub mod error;
pub mod layout;
pub mod render;
pub mod types;
pub mod viewer;

pub use config::{GridConfig, Palette};
pub use error::{GridError, Result};
pub use types::*;
pub use viewer::{Collaborators, Notice, Sheet, Surfaces};

#[cfg(target_arch = "wasm32")]
pub use viewer::GridView;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Get the library version
#[must_use]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
