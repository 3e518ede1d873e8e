//! Per-cell painting shared by the body and header grids.

use super::backend::{DrawingSurface, Rect, Stroke, TextStyle};
use crate::config::Palette;
use crate::types::Cell;

/// Text baseline sits this fraction of the way down a cell (`height / 1.2`).
const BASELINE_DIVISOR: f64 = 1.2;

/// Fixed drawing parameters for one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLook {
    pub palette: Palette,
    pub text_padding: f64,
}

impl CellLook {
    pub fn new(palette: Palette, text_padding: f64) -> Self {
        Self {
            palette,
            text_padding,
        }
    }
}

/// Paint one positioned cell: erase, border, text, then the selection tint.
pub(crate) fn draw_cell(
    surface: &mut dyn DrawingSurface,
    cell: &Cell,
    look: &CellLook,
    background: Option<&str>,
) {
    let rect = Rect::new(cell.x, cell.y, cell.width, cell.height);
    surface.clear_rect(rect);
    if let Some(color) = background {
        surface.fill_rect(rect, color);
    }
    surface.stroke_rect(rect, &Stroke::solid(&look.palette.grid_line, 1.0));
    if !cell.value.is_empty() {
        let style = TextStyle {
            font: &look.palette.font,
            color: &look.palette.text,
            max_width: cell.width,
        };
        surface.fill_text(
            &cell.value,
            cell.x + look.text_padding,
            cell.y + cell.height / BASELINE_DIVISOR,
            &style,
        );
    }
    if cell.selected {
        surface.fill_rect(rect, &look.palette.selection_fill);
    }
}
