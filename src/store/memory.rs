//! In-memory store used by tests and offline inspection.

use crate::error::Result;
use crate::setting::Setting;
use crate::store::{ConfigStore, Observation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type EntryKey = (String, Option<String>);
type Entry = (String, Option<String>);

/// In-memory [`ConfigStore`] implementation.
///
/// Holds settings in a map keyed by `(key, label)` and counts get/set calls so
/// reconciliation behavior is assertable. Safe for concurrent use.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<EntryKey, Entry>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry without counting it as a reconciliation write.
    pub fn insert(
        &self,
        key: impl Into<String>,
        label: Option<&str>,
        value: impl Into<String>,
        content_type: Option<&str>,
    ) {
        self.entries.lock().unwrap().insert(
            (key.into(), label.map(str::to_string)),
            (value.into(), content_type.map(str::to_string)),
        );
    }

    /// Look up the stored entry for a key and label.
    pub fn entry(&self, key: &str, label: Option<&str>) -> Option<(String, Option<String>)> {
        self.entries
            .lock()
            .unwrap()
            .get(&(key.to_string(), label.map(str::to_string)))
            .cloned()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Number of `get` calls served.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set` calls served.
    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, key: &str, label: Option<&str>) -> Result<Observation> {
        self.gets.fetch_add(1, Ordering::SeqCst);

        let entries = self.entries.lock().unwrap();
        match entries.get(&(key.to_string(), label.map(str::to_string))) {
            Some((value, content_type)) => Ok(Observation::Present {
                value: value.clone(),
                content_type: content_type.clone(),
            }),
            None => Ok(Observation::Absent),
        }
    }

    async fn set(&self, setting: &Setting) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);

        self.entries.lock().unwrap().insert(
            (setting.key.clone(), setting.label.clone()),
            (setting.value.clone(), setting.content_type.clone()),
        );
        Ok(())
    }

    fn name(&self) -> String {
        "memory".to_string()
    }
}
