//! Display-oriented projection of records.
//!
//! Pure functions only: a [`RecordView`] is handed to whatever renders the
//! UI (CLI list output, dialogs); nothing here has side effects.

use chrono::{DateTime, Utc};

use crate::record::{DueDate, Record};

/// Display fields for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    /// e.g. "Sheet1!B2"
    pub cell_label: String,
    pub message: String,
    /// Date only for all-day records, date and time otherwise.
    pub due_display: String,
    /// "" when the record does not repeat.
    pub repeat_display: String,
    /// "" when no notification is configured, else e.g. "Notify: 2 hours before".
    pub notify_display: String,
    pub overdue: bool,
}

impl RecordView {
    pub fn new(record: &Record, now: DateTime<Utc>) -> Self {
        let due_display = match record.due {
            DueDate::DateOnly(date) => date.format("%Y-%m-%d").to_string(),
            DueDate::Timed(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        };

        let notify_display = record
            .notification
            .as_ref()
            .map(|offset| format!("Notify: {}", offset.describe()))
            .unwrap_or_default();

        RecordView {
            cell_label: record.cell.label(),
            message: record.message.clone(),
            due_display,
            repeat_display: record.recurrence.describe(),
            notify_display,
            overdue: record.due.is_overdue(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellIdentity;
    use crate::notification::NotificationOffset;
    use crate::recurrence::{Frequency, RecurrenceSpec};
    use chrono::{NaiveDate, TimeZone};

    fn make_record() -> Record {
        Record {
            cell: CellIdentity::new("ss-1", "Budget", "Sheet1", "B2"),
            message: "Pay invoice".to_string(),
            due: DueDate::Timed(Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap()),
            all_day: false,
            recurrence: RecurrenceSpec::None,
            notification: None,
            calendar_event_id: "evt-1".to_string(),
            cell_snapshot: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn timed_record_view() {
        let view = RecordView::new(&make_record(), now());
        assert_eq!(view.cell_label, "Sheet1!B2");
        assert_eq!(view.due_display, "2030-01-01 10:00");
        assert_eq!(view.repeat_display, "");
        assert_eq!(view.notify_display, "");
        assert!(!view.overdue);
    }

    #[test]
    fn all_day_record_shows_date_only() {
        let mut record = make_record();
        record.all_day = true;
        record.due = DueDate::DateOnly(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());

        let view = RecordView::new(&record, now());
        assert_eq!(view.due_display, "2030-01-01");
    }

    #[test]
    fn repeat_and_notify_displays() {
        let mut record = make_record();
        record.recurrence = RecurrenceSpec::Simple(Frequency::Weekly);
        record.notification = NotificationOffset::from_form("2", "hours");

        let view = RecordView::new(&record, now());
        assert_eq!(view.repeat_display, "(weekly)");
        assert_eq!(view.notify_display, "Notify: 2 hours before");
    }

    #[test]
    fn overdue_record_is_flagged() {
        let mut record = make_record();
        record.due = DueDate::Timed(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());

        let view = RecordView::new(&record, now());
        assert!(view.overdue);
    }
}
