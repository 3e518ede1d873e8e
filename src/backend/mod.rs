//! Persistence seam.
//!
//! The grid never blocks on its backend: every call is issued after the
//! local state has already changed, and failures are reported, not undone.

mod memory;
mod progress;
#[cfg(target_arch = "wasm32")]
mod rest;

pub use memory::{BackendLog, MemoryBackend};
pub use progress::ProgressTracker;
#[cfg(target_arch = "wasm32")]
pub use rest::{RestBackend, RowSink};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A value that is either available now or will be delivered later through
/// a callback the implementation owns.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery<T> {
    Ready(T),
    Pending,
}

impl<T> Delivery<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending => None,
        }
    }
}

/// One stored row: its backend id and its cell values in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub id: u64,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Upsert of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellUpdate {
    pub row_id: u64,
    /// 0-based column index
    pub column: usize,
    /// Spreadsheet-style column name ("A", "B", ...)
    pub column_name: String,
    pub value: String,
}

/// A remote (or in-process) store for the grid's rows.
pub trait Persistence {
    /// Fetch `limit` rows starting at row `offset`.
    fn fetch_rows(&mut self, offset: usize, limit: usize) -> Result<Delivery<Vec<RowRecord>>>;

    /// Upsert one cell value.
    fn update_cell(&mut self, update: &CellUpdate) -> Result<()>;

    /// Delete the row with backend id `row_id`.
    fn delete_row(&mut self, row_id: u64) -> Result<()>;

    /// Replace every cell whose value is exactly `find`.
    fn find_and_replace(&mut self, find: &str, replace: &str) -> Result<()>;
}
