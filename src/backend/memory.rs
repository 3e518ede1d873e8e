//! In-process persistence, used natively and by the test suite.

use std::cell::RefCell;
use std::rc::Rc;

use super::{CellUpdate, Delivery, Persistence, RowRecord};
use crate::error::{GridError, Result};

/// Everything a [`MemoryBackend`] has stored and been asked to do.
#[derive(Debug, Default)]
pub struct BackendState {
    pub rows: Vec<RowRecord>,
    pub fetches: Vec<(usize, usize)>,
    pub updates: Vec<CellUpdate>,
    pub deletes: Vec<u64>,
    pub replacements: Vec<(String, String)>,
    /// When set, every call fails with this message
    pub failure: Option<String>,
}

impl BackendState {
    /// Number of calls that would have hit the network.
    pub fn call_count(&self) -> usize {
        self.fetches.len() + self.updates.len() + self.deletes.len() + self.replacements.len()
    }
}

/// Shared handle to a backend's state.
pub type BackendLog = Rc<RefCell<BackendState>>;

/// A [`Persistence`] implementation backed by a `Vec` of rows.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: BackendLog,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-populated with `rows`.
    pub fn with_rows(rows: Vec<RowRecord>) -> Self {
        let backend = Self::default();
        backend.state.borrow_mut().rows = rows;
        backend
    }

    /// A handle that outlives boxing the backend into a sheet.
    pub fn log(&self) -> BackendLog {
        Rc::clone(&self.state)
    }

    fn check(&self) -> Result<()> {
        match &self.state.borrow().failure {
            Some(message) => Err(GridError::Persistence(message.clone())),
            None => Ok(()),
        }
    }
}

impl Persistence for MemoryBackend {
    fn fetch_rows(&mut self, offset: usize, limit: usize) -> Result<Delivery<Vec<RowRecord>>> {
        let mut state = self.state.borrow_mut();
        state.fetches.push((offset, limit));
        drop(state);
        self.check()?;
        let state = self.state.borrow();
        let rows = state
            .rows
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(Delivery::Ready(rows))
    }

    fn update_cell(&mut self, update: &CellUpdate) -> Result<()> {
        self.state.borrow_mut().updates.push(update.clone());
        self.check()?;
        let mut state = self.state.borrow_mut();
        let position = state.rows.iter().position(|r| r.id == update.row_id);
        let index = match position {
            Some(index) => index,
            None => {
                state.rows.push(RowRecord {
                    id: update.row_id,
                    values: Vec::new(),
                });
                state.rows.len() - 1
            }
        };
        if let Some(record) = state.rows.get_mut(index) {
            if record.values.len() <= update.column {
                record.values.resize(update.column + 1, String::new());
            }
            if let Some(slot) = record.values.get_mut(update.column) {
                slot.clone_from(&update.value);
            }
        }
        Ok(())
    }

    fn delete_row(&mut self, row_id: u64) -> Result<()> {
        self.state.borrow_mut().deletes.push(row_id);
        self.check()?;
        self.state.borrow_mut().rows.retain(|r| r.id != row_id);
        Ok(())
    }

    fn find_and_replace(&mut self, find: &str, replace: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .replacements
            .push((find.to_string(), replace.to_string()));
        self.check()?;
        for record in &mut self.state.borrow_mut().rows {
            for value in &mut record.values {
                if value == find {
                    *value = replace.to_string();
                }
            }
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

    fn record(id: u64, values: &[&str]) -> RowRecord {
        RowRecord {
            id,
            values: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    #[test]
    fn fetch_slices_rows() {
        let mut backend =
            MemoryBackend::with_rows(vec![record(1, &["a"]), record(2, &["b"]), record(3, &["c"])]);
        let rows = backend.fetch_rows(1, 5).unwrap().ready().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 2);
        assert_eq!(backend.log().borrow().fetches, vec![(1, 5)]);
    }

    #[test]
    fn update_upserts_by_id() {
        let mut backend = MemoryBackend::with_rows(vec![record(7, &["x"])]);
        let update = CellUpdate {
            row_id: 7,
            column: 2,
            column_name: "C".to_string(),
            value: "z".to_string(),
        };
        backend.update_cell(&update).unwrap();
        backend
            .update_cell(&CellUpdate {
                row_id: 9,
                ..update
            })
            .unwrap();
        let log = backend.log();
        let state = log.borrow();
        assert_eq!(state.rows[0].values, vec!["x", "", "z"]);
        assert_eq!(state.rows[1].id, 9);
        assert_eq!(state.call_count(), 2);
    }

    #[test]
    fn failures_are_recorded_and_returned() {
        let mut backend = MemoryBackend::with_rows(vec![record(1, &["a"])]);
        backend.log().borrow_mut().failure = Some("offline".to_string());
        assert!(matches!(
            backend.delete_row(1),
            Err(GridError::Persistence(m)) if m == "offline"
        ));
        let log = backend.log();
        assert_eq!(log.borrow().deletes, vec![1]);
        assert_eq!(log.borrow().rows.len(), 1);
    }

    #[test]
    fn replace_matches_whole_values() {
        let mut backend = MemoryBackend::with_rows(vec![record(1, &["a", "ab", "a"])]);
        backend.find_and_replace("a", "q").unwrap();
        assert_eq!(backend.log().borrow().rows[0].values, vec!["q", "ab", "q"]);
    }
}
