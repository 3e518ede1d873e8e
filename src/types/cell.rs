use serde::Serialize;

/// A single drawable cell.
///
/// Body cells and header cells are distinct instances; they only share the
/// geometry computed from the offset tables on each render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Left edge on its surface (logical pixels, half-pixel aligned)
    pub x: f64,
    /// Top edge on its surface
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Text or number as typed
    pub value: String,
    /// Inside the current selection rectangle
    pub selected: bool,
    /// The anchor cell of the last pointer-down
    pub clicked: bool,
}

impl Cell {
    /// A blank cell of the given size, positioned on the next render.
    pub fn blank(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A header cell carrying a label.
    pub fn labeled(label: String, width: f64, height: f64) -> Self {
        Self {
            value: label,
            ..Self::blank(width, height)
        }
    }

    /// Whether the cell holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}
