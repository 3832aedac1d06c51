//! Spreadsheet source fed from command-line arguments.
//!
//! There is no live spreadsheet on the CLI path; the active cell and its
//! content come from the invocation itself.

use cellcal_core::cell::CellIdentity;
use cellcal_core::spreadsheet::SpreadsheetSource;

pub struct ArgSheet {
    active: Option<CellIdentity>,
    value: Option<String>,
}

impl ArgSheet {
    pub fn new(cell: CellIdentity, value: Option<String>) -> Self {
        ArgSheet { active: Some(cell), value }
    }

    /// For commands that never touch a cell (list, delete).
    pub fn detached() -> Self {
        ArgSheet { active: None, value: None }
    }
}

impl SpreadsheetSource for ArgSheet {
    fn active_cell(&self) -> Option<CellIdentity> {
        self.active.clone()
    }

    fn read_cell_value(&self, _cell: &CellIdentity) -> String {
        self.value.clone().unwrap_or_default()
    }
}
