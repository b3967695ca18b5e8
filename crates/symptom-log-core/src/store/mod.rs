//! Session log store.
//!
//! Insertion-ordered, append-only. One store per session, owned by whoever
//! opened the session and passed by reference to views and the report
//! composer. Nothing is persisted.

mod seed;

pub use seed::*;

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{LogCandidate, LogEntry, NewLogEntry};
use crate::validation::{validate_and_build, ValidationErrors};

/// In-memory symptom log for one session.
#[derive(Debug, Clone, Default)]
pub struct LogStore {
    entries: Vec<LogEntry>,
    ids: HashSet<String>,
}

impl LogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the example entries, dated back from now.
    pub fn with_examples() -> Self {
        Self::with_examples_at(Utc::now())
    }

    /// Create a store holding the example entries, dated back from `now`.
    pub fn with_examples_at(now: DateTime<Utc>) -> Self {
        let mut store = Self::new();
        for (recorded_at, entry) in example_entries(now) {
            store.append_at(entry, recorded_at);
        }
        tracing::debug!(count = store.len(), "Seeded symptom log with examples");
        store
    }

    /// Commit a validated entry, recorded now.
    pub fn append(&mut self, entry: NewLogEntry) -> LogEntry {
        self.append_at(entry, Utc::now())
    }

    /// Commit a validated entry with an explicit record time.
    ///
    /// Record times never go backwards: a time earlier than the newest entry
    /// is clamped to that entry's time.
    pub fn append_at(&mut self, entry: NewLogEntry, recorded_at: DateTime<Utc>) -> LogEntry {
        let date = match self.entries.last() {
            Some(last) if last.date > recorded_at => last.date,
            _ => recorded_at,
        };

        let mut log = LogEntry::from_new(entry, date);
        while self.ids.contains(&log.id) {
            log.id = uuid::Uuid::new_v4().to_string();
        }

        tracing::debug!(
            id = %log.id,
            symptom = %log.symptom,
            severity = log.severity.value(),
            "Appended symptom log entry"
        );

        self.ids.insert(log.id.clone());
        self.entries.push(log.clone());
        log
    }

    /// Validate a form submission and commit it. Rejections leave the store untouched.
    pub fn submit(&mut self, candidate: &LogCandidate) -> Result<LogEntry, ValidationErrors> {
        match validate_and_build(candidate) {
            Ok(entry) => Ok(self.append(entry)),
            Err(errors) => {
                tracing::warn!(
                    fields = errors.len(),
                    "Rejected symptom log submission: {}",
                    errors
                );
                Err(errors)
            }
        }
    }

    /// All entries in insertion order.
    pub fn list(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Get an entry by ID.
    pub fn get(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn candidate(symptom: &str, severity: f64) -> LogCandidate {
        LogCandidate {
            symptom: symptom.into(),
            location: "Lower back".into(),
            pain_start_time: "2024-01-15T08:00".into(),
            onset_speed: "Gradual".into(),
            frequency: "Continuous".into(),
            duration: "All day".into(),
            severity: Some(severity),
            impact: "Mild".into(),
            ..LogCandidate::default()
        }
    }

    fn new_entry(symptom: &str, severity: f64) -> NewLogEntry {
        validate_and_build(&candidate(symptom, severity)).unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = LogStore::new();
        assert!(store.is_empty());
        assert_eq!(store.list().len(), 0);
    }

    #[test]
    fn test_append_grows_by_one() {
        let mut store = LogStore::new();
        let first = store.append(new_entry("Back pain", 4.0));
        let before: Vec<LogEntry> = store.list().to_vec();

        let second = store.append(new_entry("Migraine", 7.0));

        assert_eq!(store.len(), 2);
        assert_eq!(&store.list()[..1], &before[..]);
        assert_eq!(store.list()[0], first);
        assert_eq!(store.list()[1], second);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_append_at_clamps_backwards_time() {
        let mut store = LogStore::new();
        let now = Utc::now();
        store.append_at(new_entry("Back pain", 4.0), now);
        let late = store.append_at(new_entry("Migraine", 7.0), now - Duration::hours(3));

        assert_eq!(late.date, now);
    }

    #[test]
    fn test_submit_rejection_leaves_store_unchanged() {
        let mut store = LogStore::new();
        store.submit(&candidate("Back pain", 4.0)).unwrap();

        let result = store.submit(&candidate("M", 11.0));
        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let mut store = LogStore::new();
        let entry = store.append(new_entry("Fatigue", 5.0));

        assert_eq!(store.get(&entry.id), Some(&entry));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_with_examples() {
        let now = Utc::now();
        let store = LogStore::with_examples_at(now);

        assert_eq!(store.len(), 7);
        assert!(store.list().windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(store.list().last().map(|e| e.date), Some(now));
        assert_eq!(store.list().first().map(|e| e.date), Some(now - Duration::days(6)));
    }
}
