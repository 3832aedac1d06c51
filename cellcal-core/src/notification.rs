//! Notification offsets: lead time before an event at which a popup fires.

use serde::{Deserialize, Serialize};

/// Unit for a notification offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl OffsetUnit {
    pub fn minutes(&self) -> i64 {
        match self {
            OffsetUnit::Minutes => 1,
            OffsetUnit::Hours => 60,
            OffsetUnit::Days => 24 * 60,
            OffsetUnit::Weeks => 7 * 24 * 60,
        }
    }

    pub fn parse(unit: &str) -> Option<OffsetUnit> {
        match unit {
            "minutes" => Some(OffsetUnit::Minutes),
            "hours" => Some(OffsetUnit::Hours),
            "days" => Some(OffsetUnit::Days),
            "weeks" => Some(OffsetUnit::Weeks),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            OffsetUnit::Minutes => "minutes",
            OffsetUnit::Hours => "hours",
            OffsetUnit::Days => "days",
            OffsetUnit::Weeks => "weeks",
        }
    }
}

/// Lead time before an event for a popup reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOffset {
    pub value: u32,
    pub unit: OffsetUnit,
}

impl NotificationOffset {
    pub fn minutes(&self) -> i64 {
        self.value as i64 * self.unit.minutes()
    }

    /// Resolve raw form input into a typed offset.
    ///
    /// Anything that converts to zero minutes (non-numeric value, zero,
    /// unknown unit) means "no notification configured" and yields `None`,
    /// never an error.
    pub fn from_form(value: &str, unit: &str) -> Option<NotificationOffset> {
        let value = value.trim().parse::<u32>().ok()?;
        let unit = OffsetUnit::parse(unit)?;
        let offset = NotificationOffset { value, unit };
        if offset.minutes() > 0 { Some(offset) } else { None }
    }

    /// Display string, e.g. "2 hours before".
    pub fn describe(&self) -> String {
        format!("{} {} before", self.value, self.unit.keyword())
    }
}

/// Convert a raw (value, unit) form pair to minutes.
///
/// Non-numeric values and unrecognized units degrade to 0 ("no reminder")
/// rather than erroring.
pub fn minutes_from_offset(value: &str, unit: &str) -> i64 {
    let value = value.trim().parse::<i64>().unwrap_or(0);
    match OffsetUnit::parse(unit) {
        Some(unit) => value * unit.minutes(),
        None => 0,
    }
}
