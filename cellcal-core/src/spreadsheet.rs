//! Spreadsheet collaborator interface.
//!
//! The spreadsheet itself is external; the orchestrator only ever asks for
//! the active cell and for a cell's current value (snapshotted onto records
//! at creation time).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::cell::CellIdentity;

/// External spreadsheet data source.
pub trait SpreadsheetSource: Send + Sync {
    /// The currently selected cell, if any.
    fn active_cell(&self) -> Option<CellIdentity>;

    /// A cell's current content. Missing or unreadable cells read as "".
    fn read_cell_value(&self, cell: &CellIdentity) -> String;
}

/// In-memory spreadsheet for tests and embedders.
#[derive(Default)]
pub struct MemorySheet {
    active: Option<CellIdentity>,
    values: Mutex<HashMap<String, String>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        MemorySheet::default()
    }

    pub fn with_active(cell: CellIdentity) -> Self {
        MemorySheet { active: Some(cell), values: Mutex::new(HashMap::new()) }
    }

    pub fn set_value(&self, cell: &CellIdentity, value: &str) {
        let mut values = self.values.lock().expect("sheet lock poisoned");
        values.insert(cell.composite_key(), value.to_string());
    }
}

impl SpreadsheetSource for MemorySheet {
    fn active_cell(&self) -> Option<CellIdentity> {
        self.active.clone()
    }

    fn read_cell_value(&self, cell: &CellIdentity) -> String {
        let values = self.values.lock().expect("sheet lock poisoned");
        values.get(&cell.composite_key()).cloned().unwrap_or_default()
    }
}
