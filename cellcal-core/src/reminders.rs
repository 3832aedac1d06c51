//! Reminder/task orchestration: calendar first, then the record store.
//!
//! A record only exists once the calendar has confirmed its event, so the
//! success path creates the event and then writes the record. Deletion runs
//! the other way: the calendar delete is best-effort (failures are logged)
//! and the store removal is unconditional, because the store is the source
//! of truth for what still exists to the user.

use chrono::Utc;
use tracing::warn;

use crate::calendar::{CalendarService, EventDraft};
use crate::cell::CellIdentity;
use crate::error::{CellCalError, CellCalResult};
use crate::notification::NotificationOffset;
use crate::record::{Record, ValidationPolicy, validate_due_date};
use crate::recurrence::{RecurrenceInput, RecurrenceSpec};
use crate::spreadsheet::SpreadsheetSource;
use crate::store::{Namespace, PropertyBag, RecordStore};

/// A record as returned by [`Reminders::list_records`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListedRecord {
    pub key: String,
    pub record: Record,
    pub is_overdue: bool,
}

/// Coordinates calendar events and the record store.
pub struct Reminders<P: PropertyBag, C: CalendarService, S: SpreadsheetSource> {
    store: RecordStore<P>,
    calendar: C,
    sheet: S,
    policy: ValidationPolicy,
}

impl<P: PropertyBag, C: CalendarService, S: SpreadsheetSource> Reminders<P, C, S> {
    pub fn new(bag: P, calendar: C, sheet: S, policy: ValidationPolicy) -> Self {
        Reminders { store: RecordStore::new(bag), calendar, sheet, policy }
    }

    pub fn store(&self) -> &RecordStore<P> {
        &self.store
    }

    /// The spreadsheet's currently selected cell, if any.
    pub fn active_cell(&self) -> Option<CellIdentity> {
        self.sheet.active_cell()
    }

    /// Create a reminder for a cell: a timed (or all-day) calendar event plus
    /// a record in the `events` namespace.
    ///
    /// Returns the calendar event id. On calendar failure the store is left
    /// untouched.
    pub async fn create_reminder(
        &self,
        cell: CellIdentity,
        due_date: &str,
        message: &str,
        all_day: bool,
        recurrence: RecurrenceInput,
        notification: Option<NotificationOffset>,
    ) -> CellCalResult<String> {
        self.create(Namespace::Events, cell, due_date, message, all_day, recurrence, notification)
            .await
    }

    /// Create a task: an all-day record in its own namespace.
    pub async fn create_task(
        &self,
        cell: CellIdentity,
        due_date: &str,
        message: &str,
        recurrence: RecurrenceInput,
        notification: Option<NotificationOffset>,
    ) -> CellCalResult<String> {
        self.create(Namespace::Tasks, cell, due_date, message, true, recurrence, notification)
            .await
    }

    async fn create(
        &self,
        namespace: Namespace,
        cell: CellIdentity,
        due_date: &str,
        message: &str,
        all_day: bool,
        recurrence: RecurrenceInput,
        notification: Option<NotificationOffset>,
    ) -> CellCalResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CellCalError::EmptyMessage);
        }
        cell.validate()?;

        let now = Utc::now();
        let due = validate_due_date(due_date, all_day, self.policy, now)?;
        let spec = RecurrenceSpec::from(recurrence);

        let (start, end) = EventDraft::window(&due, all_day);
        let draft = EventDraft {
            title: message.to_string(),
            start,
            end,
            all_day,
            recurrence: spec.to_rule(),
            description: event_description(&cell, &spec),
        };

        let event_id = self.calendar.create_event(&draft).await?;

        if let Some(offset) = &notification {
            let minutes = offset.minutes();
            if minutes > 0
                && let Err(e) = self.calendar.add_popup_reminder(&event_id, minutes).await
            {
                // The event exists; a missing popup is not worth failing over
                warn!(event_id = %event_id, error = %e, "failed to add popup reminder");
            }
        }

        let record = Record {
            cell_snapshot: self.sheet.read_cell_value(&cell),
            cell,
            message: message.to_string(),
            due,
            all_day,
            recurrence: spec,
            notification,
            calendar_event_id: event_id.clone(),
            created_at: now,
        };

        let key = record.key();
        if let Err(e) = self.store.upsert(namespace, &key, record) {
            warn!(event_id = %event_id, key = %key, "record write failed; calendar event is orphaned");
            return Err(e);
        }

        Ok(event_id)
    }

    /// Delete a record and its calendar event.
    ///
    /// The calendar deletion is best-effort: its failure is logged, the
    /// store entry is removed regardless, and the call still succeeds.
    pub async fn delete_record(&self, namespace: Namespace, key: &str) -> CellCalResult<()> {
        let record = self
            .store
            .get(namespace, key)?
            .ok_or_else(|| CellCalError::RecordNotFound(key.to_string()))?;

        if let Err(e) = self.calendar.delete_event(&record.calendar_event_id).await {
            warn!(
                event_id = %record.calendar_event_id,
                key = %key,
                error = %e,
                "calendar deletion failed; removing record anyway"
            );
        }

        self.store.delete(namespace, key)
    }

    /// All records in a namespace, annotated with an overdue flag.
    pub fn list_records(&self, namespace: Namespace) -> CellCalResult<Vec<ListedRecord>> {
        let now = Utc::now();
        Ok(self
            .store
            .list_all(namespace)?
            .into_iter()
            .map(|(key, record)| {
                let is_overdue = record.due.is_overdue(now);
                ListedRecord { key, record, is_overdue }
            })
            .collect())
    }
}

/// Event description pointing back at the originating cell.
fn event_description(cell: &CellIdentity, spec: &RecurrenceSpec) -> String {
    let mut description =
        format!("Created from {} - {}", cell.spreadsheet_name, cell.label());
    if !spec.is_none() {
        description.push_str(&format!("\nRepeat: {}", spec.summary()));
    }
    description
}

// =============================================================================
// Tests
// =============================================================================
