//! Document-scoped key-value persistence behind the record store.
//!
//! The hosting platform exposes one string-valued property bag per document
//! with whole-value semantics only. This module defines that collaborator as
//! a trait plus two implementations: an in-memory bag for tests and
//! embedders, and a JSON file on disk for real storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CellCalError, CellCalResult};

/// A string-valued key-value bag with whole-value semantics.
///
/// Implementations are not required to be atomic across `get`/`set` pairs;
/// callers performing read-modify-write cycles must serialize them.
pub trait PropertyBag: Send + Sync {
    fn get_property(&self, name: &str) -> CellCalResult<Option<String>>;
    fn set_property(&self, name: &str, value: &str) -> CellCalResult<()>;
}

/// In-memory property bag.
#[derive(Default)]
pub struct MemoryPropertyBag {
    properties: Mutex<BTreeMap<String, String>>,
}

impl MemoryPropertyBag {
    pub fn new() -> Self {
        MemoryPropertyBag::default()
    }
}

impl PropertyBag for MemoryPropertyBag {
    fn get_property(&self, name: &str) -> CellCalResult<Option<String>> {
        let properties = self.properties.lock().expect("property bag lock poisoned");
        Ok(properties.get(name).cloned())
    }

    fn set_property(&self, name: &str, value: &str) -> CellCalResult<()> {
        let mut properties = self.properties.lock().expect("property bag lock poisoned");
        properties.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Property bag backed by a single JSON object file on disk.
///
/// The whole file is rewritten on every `set_property`, matching the
/// whole-value semantics of the hosted bag it stands in for.
pub struct JsonFilePropertyBag {
    path: PathBuf,
}

impl JsonFilePropertyBag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFilePropertyBag { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CellCalResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            CellCalError::StorePersistFailed(format!(
                "Malformed property file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_all(&self, properties: &BTreeMap<String, String>) -> CellCalResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(properties)
            .map_err(|e| CellCalError::StorePersistFailed(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PropertyBag for JsonFilePropertyBag {
    fn get_property(&self, name: &str) -> CellCalResult<Option<String>> {
        Ok(self.read_all()?.get(name).cloned())
    }

    fn set_property(&self, name: &str, value: &str) -> CellCalResult<()> {
        let mut properties = self.read_all()?;
        properties.insert(name.to_string(), value.to_string());
        self.write_all(&properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_bag_round_trips() {
        let bag = MemoryPropertyBag::new();
        assert_eq!(bag.get_property("events").unwrap(), None);

        bag.set_property("events", "{}").unwrap();
        assert_eq!(bag.get_property("events").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn file_bag_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let bag = JsonFilePropertyBag::new(dir.path().join("properties.json"));

        assert_eq!(bag.get_property("events").unwrap(), None);
        bag.set_property("events", r#"{"a":1}"#).unwrap();
        bag.set_property("tasks", "{}").unwrap();

        // Re-open to prove the values hit disk
        let reopened = JsonFilePropertyBag::new(dir.path().join("properties.json"));
        assert_eq!(
            reopened.get_property("events").unwrap(),
            Some(r#"{"a":1}"#.to_string())
        );
        assert_eq!(reopened.get_property("tasks").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn file_bag_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        std::fs::write(&path, "not json").unwrap();

        let bag = JsonFilePropertyBag::new(&path);
        let err = bag.get_property("events").unwrap_err();
        assert!(matches!(err, CellCalError::StorePersistFailed(_)));
    }
}
