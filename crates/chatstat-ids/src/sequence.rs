//! Globally unique anonymized id generation

use std::collections::HashMap;
use std::sync::Mutex;

/// Hands out `{prefix}_{n}` ids, n starting at 1.
///
/// The counter is private; the only way to observe it is through
/// `next_id`, which increments and reads under one lock.
#[derive(Debug)]
pub struct IdSequence {
    prefix: String,
    counter: Mutex<u64>,
}

impl IdSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Mutex::new(0),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn next_id(&self) -> String {
        let mut counter = self
            .counter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *counter += 1;
        format!("{}_{}", self.prefix, *counter)
    }
}

/// Stable mapping from raw identifiers to sequence ids.
///
/// The same raw value always yields the same anonymized id, even when
/// many threads anonymize concurrently.
#[derive(Debug)]
pub struct Anonymizer {
    sequence: IdSequence,
    assigned: Mutex<HashMap<String, String>>,
}

impl Anonymizer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            sequence: IdSequence::new(prefix),
            assigned: Mutex::new(HashMap::new()),
        }
    }

    pub fn anonymize(&self, raw: &str) -> String {
        let mut assigned = self
            .assigned
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(id) = assigned.get(raw) {
            return id.clone();
        }
        let id = self.sequence.next_id();
        assigned.insert(raw.to_string(), id.clone());
        id
    }

    /// Snapshot of `raw -> anonymized id`
    pub fn assignments(&self) -> HashMap<String, String> {
        self.assigned
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
