//! Structured error types for sheetgrid.
//!
//! Lookups on the grid geometry never fail (they clamp); these errors come
//! from the collaborators around the engine: persistence, clipboard, config.

/// All errors that can occur around the grid engine.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Persistence backend failure (network, server status, payload).
    #[error("Persistence: {0}")]
    Persistence(String),

    /// Clipboard read/write failure.
    #[error("Clipboard: {0}")]
    Clipboard(String),

    /// Invalid grid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error from serde_json.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell address outside the materialized matrix.
    #[error("Cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    /// Drawing surface error.
    #[error("Render error: {0}")]
    Render(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Format a JavaScript exception as an error message with some context.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_error(context: &str, value: &wasm_bindgen::JsValue) -> String {
    match value.as_string() {
        Some(s) => format!("{context}: {s}"),
        None => format!("{context}: {value:?}"),
    }
}
