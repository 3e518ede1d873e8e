//! Grid configuration.
//!
//! Hosts pass a JSON object (or a `JsValue` on wasm32); every field is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Colors and font used by all three surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    /// Hairline cell border
    pub grid_line: String,
    /// Cell text color
    pub text: String,
    /// CSS font shorthand for cell text
    pub font: String,
    /// Translucent fill composited over selected cells
    pub selection_fill: String,
    /// Bounding-box stroke around the selection
    pub selection_stroke: String,
    /// Marching-ants dash color
    pub ants_stroke: String,
    /// Header strip background
    pub header_background: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid_line: "#E0E0E0".to_string(),
            text: "#000".to_string(),
            font: "14px serif".to_string(),
            selection_fill: "rgba(19, 126, 67, 0.1)".to_string(),
            selection_stroke: "rgba(0, 128, 0, 0.8)".to_string(),
            ants_stroke: "rgba(255, 255, 255, 1)".to_string(),
            header_background: "#F3F3F3".to_string(),
        }
    }
}

/// Configuration for one grid instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Initial materialized rows
    pub rows: usize,
    /// Initial materialized columns
    pub columns: usize,
    /// Default column width in logical pixels
    pub cell_width: f64,
    /// Default row height in logical pixels
    pub cell_height: f64,
    /// Device pixel ratio
    pub scale: f64,
    /// Smallest size a row or column can be resized to
    pub min_section_size: f64,
    /// Half-width of the band around a boundary that counts as a resize hit
    pub resize_tolerance: f64,
    /// Rows appended per lazy-growth step
    pub growth_rows: usize,
    /// Columns appended per lazy-growth step
    pub growth_columns: usize,
    /// Fraction of the thumb travel that triggers lazy growth
    pub growth_threshold: f64,
    /// Scrollbar thumb never shrinks below this
    pub min_thumb_size: f64,
    /// Inset of the edit box from the cell's top-left corner
    pub edit_inset: f64,
    /// How much narrower/shorter the edit box is than its cell
    pub edit_shrink: f64,
    /// Left padding of cell text
    pub text_padding: f64,
    /// Dash offset wraps back to zero past this value
    pub ants_period: f64,
    /// Height of the column header strip
    pub header_height: f64,
    /// Width of the row header strip
    pub header_width: f64,
    pub palette: Palette,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 1000,
            columns: 50,
            cell_width: 60.0,
            cell_height: 20.0,
            scale: 1.0,
            min_section_size: 10.0,
            resize_tolerance: 3.0,
            growth_rows: 500,
            growth_columns: 50,
            growth_threshold: 0.8,
            min_thumb_size: 40.0,
            edit_inset: 3.0,
            edit_shrink: 5.0,
            text_padding: 12.0,
            ants_period: 16.0,
            header_height: 20.0,
            header_width: 40.0,
            palette: Palette::default(),
        }
    }
}

impl GridConfig {
    /// Parse a configuration from JSON, then validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GridError::Config(
                "rows and columns must be at least 1".to_string(),
            ));
        }
        let sizes = [
            ("cellWidth", self.cell_width),
            ("cellHeight", self.cell_height),
            ("scale", self.scale),
            ("minSectionSize", self.min_section_size),
            ("headerHeight", self.header_height),
            ("headerWidth", self.header_width),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(GridError::Config(format!("{name} must be positive")));
            }
        }
        if self.cell_width < self.min_section_size || self.cell_height < self.min_section_size {
            return Err(GridError::Config(
                "default cell size is below minSectionSize".to_string(),
            ));
        }
        if !(self.growth_threshold > 0.0 && self.growth_threshold <= 1.0) {
            return Err(GridError::Config(
                "growthThreshold must be in (0, 1]".to_string(),
            ));
        }
        if self.resize_tolerance < 0.0 || self.min_thumb_size < 0.0 {
            return Err(GridError::Config(
                "resizeTolerance and minThumbSize must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GridConfig::default();
        assert_eq!(config.rows, 1000);
        assert_eq!(config.columns, 50);
        assert_eq!(config.cell_width, 60.0);
        assert_eq!(config.cell_height, 20.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GridConfig::from_json(r#"{"rows": 10, "palette": {"text": "red"}}"#).unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.columns, 50);
        assert_eq!(config.palette.text, "red");
        assert_eq!(config.palette.grid_line, "#E0E0E0");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(GridConfig::from_json(r#"{"rows": 0}"#).is_err());
        assert!(GridConfig::from_json(r#"{"cellWidth": -1}"#).is_err());
        assert!(GridConfig::from_json(r#"{"growthThreshold": 1.5}"#).is_err());
        assert!(GridConfig::from_json(r#"{"cellHeight": 5}"#).is_err());
        assert!(matches!(
            GridConfig::from_json("not json"),
            Err(GridError::Json(_))
        ));
    }
}
