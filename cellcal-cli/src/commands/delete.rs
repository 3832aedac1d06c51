use anyhow::Result;
use owo_colors::OwoColorize;

use cellcal_core::cell::CellIdentity;
use cellcal_core::store::Namespace;

use super::{build_reminders, parse_cell};
use crate::sheet::ArgSheet;

pub async fn run(cell: &str, tasks: bool, spreadsheet_id: &str) -> Result<()> {
    let namespace = if tasks { Namespace::Tasks } else { Namespace::Events };
    let (sheet_name, cell_ref) = parse_cell(cell);
    let identity = CellIdentity::new(spreadsheet_id, "", sheet_name, cell_ref);

    let reminders = build_reminders(ArgSheet::detached())?;
    reminders.delete_record(namespace, &identity.composite_key()).await?;

    println!("{} Deleted record for {}", "✓".green(), identity.label().bold());
    Ok(())
}
