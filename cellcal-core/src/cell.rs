//! Cell identity: the composite key tying a record to one spreadsheet cell.

use serde::{Deserialize, Serialize};

use crate::error::{CellCalError, CellCalResult};

/// Identifies one cell across all spreadsheets the tool touches.
///
/// Serialized field names match the persisted wire format
/// (`spreadsheetId`, `sheetName`, `cellRef`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellIdentity {
    pub spreadsheet_id: String,
    pub spreadsheet_name: String,
    pub sheet_name: String,
    /// A1 notation, e.g. "B2"
    pub cell_ref: String,
}

impl CellIdentity {
    pub fn new(
        spreadsheet_id: &str,
        spreadsheet_name: &str,
        sheet_name: &str,
        cell_ref: &str,
    ) -> Self {
        CellIdentity {
            spreadsheet_id: spreadsheet_id.to_string(),
            spreadsheet_name: spreadsheet_name.to_string(),
            sheet_name: sheet_name.to_string(),
            cell_ref: cell_ref.to_string(),
        }
    }

    /// The record store key: `<spreadsheetId>_<sheetName>_<cellRef>`.
    pub fn composite_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.spreadsheet_id, self.sheet_name, self.cell_ref
        )
    }

    /// Human-readable label, e.g. "Sheet1!B2".
    pub fn label(&self) -> String {
        format!("{}!{}", self.sheet_name, self.cell_ref)
    }

    /// Check that `cell_ref` is a single-cell A1 reference (letters then digits).
    pub fn validate(&self) -> CellCalResult<()> {
        let letters = self
            .cell_ref
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        let digits = &self.cell_ref[letters..];

        let ok = (1..=3).contains(&letters)
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');

        if ok {
            Ok(())
        } else {
            Err(CellCalError::InvalidCellReference(self.cell_ref.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(cell_ref: &str) -> CellIdentity {
        CellIdentity::new("ss-1", "Budget", "Sheet1", cell_ref)
    }

    #[test]
    fn composite_key_format() {
        assert_eq!(cell("B2").composite_key(), "ss-1_Sheet1_B2");
    }

    #[test]
    fn label_format() {
        assert_eq!(cell("B2").label(), "Sheet1!B2");
    }

    #[test]
    fn valid_refs() {
        assert!(cell("A1").validate().is_ok());
        assert!(cell("ZZ99").validate().is_ok());
        assert!(cell("AAA1000").validate().is_ok());
    }

    #[test]
    fn invalid_refs() {
        assert!(cell("").validate().is_err());
        assert!(cell("A").validate().is_err());
        assert!(cell("12").validate().is_err());
        assert!(cell("A1B").validate().is_err());
        assert!(cell("A01").validate().is_err());
        assert!(cell("ABCD1").validate().is_err());
    }
}
