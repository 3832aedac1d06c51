//! Reminder/task records and due-date handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::CellIdentity;
use crate::error::{CellCalError, CellCalResult};
use crate::notification::NotificationOffset;
use crate::recurrence::RecurrenceSpec;

/// When a record is due.
///
/// Tasks (all-day records) carry a date only; reminders carry a full
/// timestamp. Persisted as a string: RFC 3339 for timed, `YYYY-MM-DD` for
/// date-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DueDate {
    Timed(DateTime<Utc>),
    DateOnly(NaiveDate),
}

impl DueDate {
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            DueDate::Timed(dt) => *dt,
            DueDate::DateOnly(date) => Utc.from_utc_datetime(&date.and_time(Default::default())),
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            DueDate::Timed(dt) => dt.date_naive(),
            DueDate::DateOnly(date) => *date,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.to_utc() < now
    }
}

impl From<DueDate> for String {
    fn from(due: DueDate) -> String {
        match due {
            DueDate::Timed(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            DueDate::DateOnly(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl TryFrom<String> for DueDate {
    type Error = CellCalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if let Ok(date) = NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
            return Ok(DueDate::DateOnly(date));
        }
        parse_timestamp(&value)
            .map(DueDate::Timed)
            .ok_or(CellCalError::InvalidDateFormat(value))
    }
}

fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Parse a raw due-date string from a form.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (read as UTC), and `YYYY-MM-DD`.
/// For all-day records any time-of-day component is dropped.
pub fn parse_due_date(input: &str, all_day: bool) -> CellCalResult<DueDate> {
    let input = input.trim();

    if all_day {
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(DueDate::DateOnly(date));
        }
        return parse_timestamp(input)
            .map(|dt| DueDate::DateOnly(dt.date_naive()))
            .ok_or_else(|| CellCalError::InvalidDateFormat(input.to_string()));
    }

    if let Some(dt) = parse_timestamp(input) {
        return Ok(DueDate::Timed(dt));
    }
    // A bare date on a timed reminder means midnight
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(DueDate::Timed(Utc.from_utc_datetime(
            &date.and_time(Default::default()),
        )));
    }
    Err(CellCalError::InvalidDateFormat(input.to_string()))
}

/// Whether due dates must lie in the future.
///
/// Off by default: past dates are accepted and simply show as overdue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationPolicy {
    pub require_future: bool,
}

/// Parse a due date and apply the validation policy.
pub fn validate_due_date(
    input: &str,
    all_day: bool,
    policy: ValidationPolicy,
    now: DateTime<Utc>,
) -> CellCalResult<DueDate> {
    let due = parse_due_date(input, all_day)?;
    if policy.require_future && due.to_utc() <= now {
        return Err(CellCalError::DateNotInFuture(input.trim().to_string()));
    }
    Ok(due)
}

/// A persisted reminder or task, tied to one spreadsheet cell.
///
/// Tasks are records with `all_day` forced true, stored in their own
/// namespace. At most one record exists per composite cell key per
/// namespace; creating a second one overwrites the first in the store.
/// Field names match the persisted wire format of the document property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "cellInfo")]
    pub cell: CellIdentity,
    pub message: String,
    #[serde(rename = "dueDate")]
    pub due: DueDate,
    #[serde(rename = "isAllDay")]
    pub all_day: bool,
    #[serde(rename = "repeatType")]
    pub recurrence: RecurrenceSpec,
    #[serde(default)]
    pub notification: Option<NotificationOffset>,
    #[serde(rename = "eventId")]
    pub calendar_event_id: String,
    /// The cell's content at creation time.
    #[serde(rename = "cellValue", default)]
    pub cell_snapshot: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn key(&self) -> String {
        self.cell.composite_key()
    }
}
