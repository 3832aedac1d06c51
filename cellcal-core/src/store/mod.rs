//! Record storage: one JSON blob per namespace in a property bag.
//!
//! Reminders and tasks are separate namespaces, each persisted as a single
//! JSON object `{ "<compositeKey>": <Record> }` under the property name
//! `"events"` or `"tasks"`. The bag has whole-value semantics, so every
//! mutation is a full read-modify-write cycle; a mutex serializes those
//! cycles since the bag itself makes no atomicity promise.

mod property;

pub use property::{JsonFilePropertyBag, MemoryPropertyBag, PropertyBag};

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{CellCalError, CellCalResult};
use crate::record::Record;

/// Which class of record a store operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Events,
    Tasks,
}

impl Namespace {
    pub fn property_name(&self) -> &'static str {
        match self {
            Namespace::Events => "events",
            Namespace::Tasks => "tasks",
        }
    }
}

/// Keyed record storage on top of a [`PropertyBag`].
pub struct RecordStore<P: PropertyBag> {
    bag: P,
    write_lock: Mutex<()>,
}

impl<P: PropertyBag> RecordStore<P> {
    pub fn new(bag: P) -> Self {
        RecordStore { bag, write_lock: Mutex::new(()) }
    }

    fn load(&self, namespace: Namespace) -> CellCalResult<BTreeMap<String, Record>> {
        match self.bag.get_property(namespace.property_name())? {
            None => Ok(BTreeMap::new()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| {
                CellCalError::StorePersistFailed(format!(
                    "Malformed '{}' blob: {}",
                    namespace.property_name(),
                    e
                ))
            }),
        }
    }

    fn save(&self, namespace: Namespace, records: &BTreeMap<String, Record>) -> CellCalResult<()> {
        let blob = serde_json::to_string(records)
            .map_err(|e| CellCalError::StorePersistFailed(e.to_string()))?;
        self.bag.set_property(namespace.property_name(), &blob)
    }

    /// Write a record, unconditionally replacing any existing record at `key`.
    ///
    /// Overwriting does NOT touch the previous record's calendar event; the
    /// orchestrator owns that tradeoff.
    pub fn upsert(&self, namespace: Namespace, key: &str, record: Record) -> CellCalResult<()> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");
        let mut records = self.load(namespace)?;
        records.insert(key.to_string(), record);
        self.save(namespace, &records)
    }

    pub fn get(&self, namespace: Namespace, key: &str) -> CellCalResult<Option<Record>> {
        Ok(self.load(namespace)?.remove(key))
    }

    /// Remove the record at `key`, failing with `RecordNotFound` if absent.
    pub fn delete(&self, namespace: Namespace, key: &str) -> CellCalResult<()> {
        let _guard = self.write_lock.lock().expect("store lock poisoned");
        let mut records = self.load(namespace)?;
        if records.remove(key).is_none() {
            return Err(CellCalError::RecordNotFound(key.to_string()));
        }
        self.save(namespace, &records)
    }

    /// All records in a namespace, in stable key order.
    pub fn list_all(&self, namespace: Namespace) -> CellCalResult<Vec<(String, Record)>> {
        Ok(self.load(namespace)?.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellIdentity;
    use crate::record::DueDate;
    use crate::recurrence::RecurrenceSpec;
    use chrono::{TimeZone, Utc};

    fn make_record(cell_ref: &str, message: &str) -> Record {
        Record {
            cell: CellIdentity::new("ss-1", "Budget", "Sheet1", cell_ref),
            message: message.to_string(),
            due: DueDate::Timed(Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap()),
            all_day: false,
            recurrence: RecurrenceSpec::None,
            notification: None,
            calendar_event_id: format!("evt-{cell_ref}"),
            cell_snapshot: String::new(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn store() -> RecordStore<MemoryPropertyBag> {
        RecordStore::new(MemoryPropertyBag::new())
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let store = store();
        let record = make_record("B2", "Pay invoice");

        store.upsert(Namespace::Events, &record.key(), record.clone()).unwrap();
        assert_eq!(store.get(Namespace::Events, &record.key()).unwrap(), Some(record));
    }

    #[test]
    fn get_missing_is_none() {
        assert_eq!(store().get(Namespace::Events, "nope").unwrap(), None);
    }

    #[test]
    fn upsert_overwrites_existing_key() {
        let store = store();
        let first = make_record("B2", "first");
        let second = make_record("B2", "second");
        let key = first.key();

        store.upsert(Namespace::Events, &key, first).unwrap();
        store.upsert(Namespace::Events, &key, second.clone()).unwrap();

        assert_eq!(store.get(Namespace::Events, &key).unwrap(), Some(second));
        assert_eq!(store.list_all(Namespace::Events).unwrap().len(), 1);
    }

    #[test]
    fn delete_is_idempotent_in_effect() {
        let store = store();
        let record = make_record("B2", "Pay invoice");
        let key = record.key();
        store.upsert(Namespace::Events, &key, record).unwrap();

        store.delete(Namespace::Events, &key).unwrap();

        // Second delete fails with NotFound and leaves the store unchanged
        let err = store.delete(Namespace::Events, &key).unwrap_err();
        assert!(matches!(err, CellCalError::RecordNotFound(_)));
        assert!(store.list_all(Namespace::Events).unwrap().is_empty());
    }

    #[test]
    fn namespaces_are_separate() {
        let store = store();
        let record = make_record("B2", "Pay invoice");
        let key = record.key();

        store.upsert(Namespace::Events, &key, record).unwrap();

        assert_eq!(store.get(Namespace::Tasks, &key).unwrap(), None);
        assert!(store.list_all(Namespace::Tasks).unwrap().is_empty());
    }

    #[test]
    fn wire_format_is_key_to_record_object() {
        let bag = MemoryPropertyBag::new();
        let store = RecordStore::new(bag);
        let record = make_record("B2", "Pay invoice");
        store.upsert(Namespace::Events, &record.key(), record).unwrap();

        let blob = store.bag.get_property("events").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let entry = &value["ss-1_Sheet1_B2"];
        assert_eq!(entry["message"], "Pay invoice");
        assert_eq!(entry["eventId"], "evt-B2");
        assert_eq!(entry["isAllDay"], false);
        assert_eq!(entry["repeatType"], "none");
        assert_eq!(entry["cellInfo"]["cellRef"], "B2");
    }

    #[test]
    fn malformed_blob_is_store_persist_failed() {
        let bag = MemoryPropertyBag::new();
        bag.set_property("events", "not json").unwrap();
        let store = RecordStore::new(bag);

        let err = store.list_all(Namespace::Events).unwrap_err();
        assert!(matches!(err, CellCalError::StorePersistFailed(_)));
    }
}
