use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use cellcal_core::notification::NotificationOffset;

use super::{CreateArgs, build_reminders};
use crate::sheet::ArgSheet;

pub async fn run(args: CreateArgs, all_day: bool) -> Result<()> {
    let recurrence = args.recurrence()?;
    let notification = args
        .notify
        .as_deref()
        .and_then(|value| NotificationOffset::from_form(value, &args.notify_unit));

    let reminders = build_reminders(ArgSheet::new(args.cell_identity(), args.value.clone()))?;
    let cell = reminders.active_cell().context("No cell selected")?;
    let label = cell.label();

    let event_id = reminders
        .create_reminder(cell, &args.due, &args.message, all_day, recurrence, notification)
        .await?;

    println!("{} Reminder created for {} (event {})", "✓".green(), label.bold(), event_id);
    Ok(())
}
