pub mod add;
pub mod delete;
pub mod list;
pub mod task;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use cellcal_core::cell::CellIdentity;
use cellcal_core::config::GlobalConfig;
use cellcal_core::provider::ProviderCalendar;
use cellcal_core::recurrence::{CustomRecurrence, EndCondition, Frequency, RecurrenceInput};
use cellcal_core::reminders::Reminders;
use cellcal_core::store::JsonFilePropertyBag;

use crate::sheet::ArgSheet;

/// Shared arguments for `add` and `task`.
#[derive(Args)]
pub struct CreateArgs {
    /// Cell reference, e.g. "Sheet1!B2" or "B2"
    pub cell: String,

    /// Reminder message
    pub message: String,

    /// Due date/time (e.g. "2030-01-01T10:00" or "2030-01-01")
    #[arg(short, long)]
    pub due: String,

    /// Repeat: none, daily, weekly, monthly or yearly
    #[arg(long, default_value = "none")]
    pub repeat: String,

    /// Repeat every N days/weeks/... (turns --repeat into a custom pattern)
    #[arg(long)]
    pub every: Option<u32>,

    /// Stop the series after N occurrences
    #[arg(long, conflicts_with = "until")]
    pub times: Option<u32>,

    /// Stop the series on this date (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Notification lead time value (paired with --notify-unit)
    #[arg(long)]
    pub notify: Option<String>,

    /// Notification lead time unit: minutes, hours, days or weeks
    #[arg(long, default_value = "minutes")]
    pub notify_unit: String,

    /// Current cell content to snapshot onto the record
    #[arg(long)]
    pub value: Option<String>,

    /// Spreadsheet name (used in the event description)
    #[arg(long, default_value = "Spreadsheet")]
    pub spreadsheet: String,

    /// Spreadsheet id (part of the record key)
    #[arg(long, default_value = "default")]
    pub spreadsheet_id: String,
}

impl CreateArgs {
    pub fn cell_identity(&self) -> CellIdentity {
        let (sheet_name, cell_ref) = parse_cell(&self.cell);
        CellIdentity::new(&self.spreadsheet_id, &self.spreadsheet, sheet_name, cell_ref)
    }

    /// Build the raw recurrence payload the core resolves at its boundary.
    pub fn recurrence(&self) -> Result<RecurrenceInput> {
        if self.every.is_none() && self.times.is_none() && self.until.is_none() {
            return Ok(RecurrenceInput::Keyword(self.repeat.clone()));
        }

        let frequency = match self.repeat.as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            "yearly" => Frequency::Yearly,
            other => bail!(
                "--every/--times/--until need a repeat frequency, got --repeat {other}"
            ),
        };

        let end = match (self.times, self.until) {
            (Some(count), _) => Some(EndCondition::After { count }),
            (_, Some(date)) => Some(EndCondition::On { date }),
            _ => None,
        };

        Ok(RecurrenceInput::Custom(CustomRecurrence {
            kind: "custom".to_string(),
            frequency,
            interval: self.every,
            end,
        }))
    }
}

/// Split "Sheet1!B2" into sheet name and cell ref; a bare "B2" lands on Sheet1.
pub fn parse_cell(input: &str) -> (&str, &str) {
    match input.split_once('!') {
        Some((sheet, cell_ref)) => (sheet, cell_ref),
        None => ("Sheet1", input),
    }
}

/// Wire the orchestrator up to the configured store and provider.
pub fn build_reminders(
    sheet: ArgSheet,
) -> Result<Reminders<JsonFilePropertyBag, ProviderCalendar, ArgSheet>> {
    let config = GlobalConfig::load().context("Failed to load configuration")?;
    let bag = JsonFilePropertyBag::new(&config.store_path);
    let calendar = ProviderCalendar::from_name(&config.provider);
    Ok(Reminders::new(bag, calendar, sheet, config.policy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_splits_sheet_and_ref() {
        assert_eq!(parse_cell("Budget!C7"), ("Budget", "C7"));
        assert_eq!(parse_cell("B2"), ("Sheet1", "B2"));
    }
}
