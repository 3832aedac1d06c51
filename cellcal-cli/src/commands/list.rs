use anyhow::Result;
use owo_colors::OwoColorize;

use cellcal_core::store::Namespace;

use super::build_reminders;
use crate::render::Render;
use crate::sheet::ArgSheet;

pub fn run(tasks: bool) -> Result<()> {
    let namespace = if tasks { Namespace::Tasks } else { Namespace::Events };
    let reminders = build_reminders(ArgSheet::detached())?;

    let records = reminders.list_records(namespace)?;

    if records.is_empty() {
        println!("{}", "No records found".dimmed());
        return Ok(());
    }

    for record in &records {
        println!("{}", record.render());
    }

    Ok(())
}
