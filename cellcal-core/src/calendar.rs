//! Calendar collaborator interface.
//!
//! The calendar itself is external; this module defines the minimal surface
//! the orchestrator needs (create, delete, popup reminders) plus the
//! scheduling-window arithmetic, and an in-memory implementation for tests
//! and embedders. Real access goes through [`crate::provider`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CellCalError, CellCalResult};
use crate::record::DueDate;
use crate::recurrence::RecurrenceRule;

/// Timed events occupy a fixed 30-minute window starting at the due time.
pub const EVENT_DURATION_MINUTES: i64 = 30;

/// Everything needed to create one calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub recurrence: Option<RecurrenceRule>,
    pub description: String,
}

impl EventDraft {
    /// Compute the event window for a due date.
    ///
    /// Timed: start at the due time, end 30 minutes later. All-day:
    /// midnight to the next midnight.
    pub fn window(due: &DueDate, all_day: bool) -> (DateTime<Utc>, DateTime<Utc>) {
        if all_day {
            let start = Utc.from_utc_datetime(&due.date().and_time(Default::default()));
            (start, start + Duration::days(1))
        } else {
            let start = due.to_utc();
            (start, start + Duration::minutes(EVENT_DURATION_MINUTES))
        }
    }
}

/// External calendar service.
///
/// Implementations must not panic on failure; every operation returns a
/// result the orchestrator can log or surface.
pub trait CalendarService: Send + Sync {
    /// Create an event, returning its calendar-assigned id.
    fn create_event(
        &self,
        draft: &EventDraft,
    ) -> impl Future<Output = CellCalResult<String>> + Send;

    fn delete_event(&self, event_id: &str) -> impl Future<Output = CellCalResult<()>> + Send;

    fn add_popup_reminder(
        &self,
        event_id: &str,
        minutes_before: i64,
    ) -> impl Future<Output = CellCalResult<()>> + Send;
}

/// An event as held by [`MemoryCalendar`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEvent {
    pub draft: EventDraft,
    pub popup_minutes: Vec<i64>,
}

/// In-memory calendar for tests and embedders.
#[derive(Default)]
pub struct MemoryCalendar {
    events: Mutex<HashMap<String, MemoryEvent>>,
    fail_creates: AtomicBool,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        MemoryCalendar::default()
    }

    /// Make subsequent `create_event` calls fail.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn event(&self, event_id: &str) -> Option<MemoryEvent> {
        let events = self.events.lock().expect("calendar lock poisoned");
        events.get(event_id).cloned()
    }

    pub fn event_count(&self) -> usize {
        let events = self.events.lock().expect("calendar lock poisoned");
        events.len()
    }
}

impl CalendarService for MemoryCalendar {
    async fn create_event(&self, draft: &EventDraft) -> CellCalResult<String> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(CellCalError::CalendarCreateFailed(
                "calendar rejected the event".to_string(),
            ));
        }
        let event_id = uuid::Uuid::new_v4().to_string();
        let mut events = self.events.lock().expect("calendar lock poisoned");
        events.insert(
            event_id.clone(),
            MemoryEvent { draft: draft.clone(), popup_minutes: Vec::new() },
        );
        Ok(event_id)
    }

    async fn delete_event(&self, event_id: &str) -> CellCalResult<()> {
        let mut events = self.events.lock().expect("calendar lock poisoned");
        if events.remove(event_id).is_none() {
            return Err(CellCalError::CalendarDeleteFailed(format!(
                "Event not found: {event_id}"
            )));
        }
        Ok(())
    }

    async fn add_popup_reminder(&self, event_id: &str, minutes_before: i64) -> CellCalResult<()> {
        let mut events = self.events.lock().expect("calendar lock poisoned");
        match events.get_mut(event_id) {
            Some(event) => {
                event.popup_minutes.push(minutes_before);
                Ok(())
            }
            None => Err(CellCalError::CalendarCreateFailed(format!(
                "Event not found: {event_id}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn timed_window_is_thirty_minutes() {
        let due = DueDate::Timed(Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
        let (start, end) = EventDraft::window(&due, false);
        assert_eq!(start, Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2030, 1, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn all_day_window_is_midnight_to_midnight() {
        let due = DueDate::DateOnly(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        let (start, end) = EventDraft::window(&due, true);
        assert_eq!(start, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn all_day_window_drops_time_of_day() {
        // A timed due date on an all-day record still snaps to midnight
        let due = DueDate::Timed(Utc.with_ymd_and_hms(2030, 1, 1, 15, 45, 0).unwrap());
        let (start, end) = EventDraft::window(&due, true);
        assert_eq!(start, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap());
    }
}
