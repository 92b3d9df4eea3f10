//! Bounded, persisted log of user interactions.
//!
//! The log lives under a single storage key as a JSON array, oldest first.
//! Every append is read-modify-write: load, push, keep the newest `capacity`
//! records, store. Analytics are a convenience, so no operation here ever
//! surfaces a storage problem to its caller.

use serde_json::Value;
use tracing::{debug, warn};

use crate::analytics::models::EventRecord;
use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// What happened to a `record` call. Callers are free to ignore it.
#[derive(Debug)]
pub enum RecordOutcome {
    Recorded { retained: usize },
    Skipped(StorageError),
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct EventLog {
    key: String,
    capacity: usize,
}

impl EventLog {
    /// `capacity` is clamped to at least one record.
    pub fn new(key: impl Into<String>, capacity: usize) -> Self {
        EventLog {
            key: key.into(),
            capacity: capacity.max(1),
        }
    }

    /// Appends a record stamped with the current time.
    pub fn record<S>(
        &self,
        store: &mut S,
        category: &str,
        action: &str,
        label: Option<&str>,
    ) -> RecordOutcome
    where
        S: KeyValueStore + ?Sized,
    {
        self.append(store, EventRecord::now(category, action, label))
    }

    /// Appends an already-built record, then trims to the newest `capacity` entries.
    pub fn append<S>(&self, store: &mut S, record: EventRecord) -> RecordOutcome
    where
        S: KeyValueStore + ?Sized,
    {
        debug!(
            category = %record.category,
            action = %record.action,
            label = record.label.as_deref().unwrap_or(""),
            "analytics event"
        );

        let entry = match serde_json::to_value(&record) {
            Ok(entry) => entry,
            Err(e) => return RecordOutcome::Skipped(e.into()),
        };

        let mut entries = match self.load_entries(&*store) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping analytics event, storage unreadable: {e}");
                return RecordOutcome::Skipped(e);
            }
        };

        entries.push(entry);
        if entries.len() > self.capacity {
            let overflow = entries.len() - self.capacity;
            entries.drain(..overflow);
        }

        let body = match serde_json::to_string(&entries) {
            Ok(body) => body,
            Err(e) => return RecordOutcome::Skipped(e.into()),
        };

        match store.set(&self.key, &body) {
            Ok(()) => RecordOutcome::Recorded {
                retained: entries.len(),
            },
            Err(e) => {
                warn!("Skipping analytics event, storage write failed: {e}");
                RecordOutcome::Skipped(e)
            }
        }
    }

    /// The full persisted sequence, oldest first. Empty when storage is
    /// empty, unavailable, or holds something that is not an array.
    /// Entries that do not decode as records are left out.
    pub fn read_all<S>(&self, store: &S) -> Vec<EventRecord>
    where
        S: KeyValueStore + ?Sized,
    {
        self.load_entries(store)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable analytics entry {index} under '{}': {e}", self.key);
                    None
                }
            })
            .collect()
    }

    pub fn has_event_matching<S>(&self, store: &S, category: &str, action: &str) -> bool
    where
        S: KeyValueStore + ?Sized,
    {
        self.read_all(store)
            .iter()
            .any(|e| e.matches(category, action))
    }

    /// Raw array entries, kept verbatim so an append never drops an entry
    /// it cannot decode. Only an unreadable store is an error; a value that
    /// is not an array reads as empty and the next append replaces it.
    fn load_entries<S>(&self, store: &S) -> Result<Vec<Value>, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let Some(raw) = store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                warn!("Discarding analytics log under '{}': not an array", self.key);
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("Discarding malformed analytics log under '{}': {e}", self.key);
                Ok(Vec::new())
            }
        }
    }
}
