//! Chronological views: sorted series, recent activity, trend points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LogEntry, SeverityBand};

/// Chart axis label format ("Jan 5").
pub const TREND_LABEL_FORMAT: &str = "%b %-d";

/// Entries oldest first. Stable: equal dates keep their input order.
pub fn chronological_ascending(entries: &[LogEntry]) -> Vec<&LogEntry> {
    let mut sorted: Vec<&LogEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}

/// Entries newest first. Stable: equal dates keep their input order.
pub fn chronological_descending(entries: &[LogEntry]) -> Vec<&LogEntry> {
    let mut sorted: Vec<&LogEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The `limit` most recent entries, newest first.
pub fn recent(entries: &[LogEntry], limit: usize) -> Vec<&LogEntry> {
    let mut sorted = chronological_descending(entries);
    sorted.truncate(limit);
    sorted
}

/// One point on the severity trend chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// Record time of the entry
    pub date: DateTime<Utc>,
    /// Axis label, e.g. "Jan 5" (UTC)
    pub label: String,
    pub severity: u8,
    pub band: SeverityBand,
    pub symptom: String,
}

/// Severity series for the trend chart, oldest first.
pub fn trend_points(entries: &[LogEntry]) -> Vec<TrendPoint> {
    chronological_ascending(entries)
        .into_iter()
        .map(|entry| TrendPoint {
            date: entry.date,
            label: entry.date.format(TREND_LABEL_FORMAT).to_string(),
            severity: entry.severity.value(),
            band: entry.severity_band(),
            symptom: entry.symptom.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LogCandidate, NewLogEntry};
    use crate::validation::validate_and_build;
    use chrono::{Duration, TimeZone};

    fn new_entry(symptom: &str, severity: f64) -> NewLogEntry {
        validate_and_build(&LogCandidate {
            symptom: symptom.into(),
            location: "Head".into(),
            pain_start_time: "2024-03-01T07:00".into(),
            onset_speed: "Sudden".into(),
            frequency: "Random".into(),
            duration: "Minutes".into(),
            severity: Some(severity),
            impact: "None".into(),
            ..LogCandidate::default()
        })
        .unwrap()
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn entries_at(offsets_hours: &[i64]) -> Vec<LogEntry> {
        offsets_hours
            .iter()
            .enumerate()
            .map(|(i, h)| {
                LogEntry::from_new(
                    new_entry(&format!("Symptom {}", i), 5.0),
                    base() + Duration::hours(*h),
                )
            })
            .collect()
    }

    fn symptoms(entries: &[&LogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.symptom.clone()).collect()
    }

    #[test]
    fn test_ascending_sorts_by_date() {
        let entries = entries_at(&[48, 0, 24]);
        let sorted = chronological_ascending(&entries);
        assert_eq!(symptoms(&sorted), vec!["Symptom 1", "Symptom 2", "Symptom 0"]);
    }

    #[test]
    fn test_descending_sorts_by_date() {
        let entries = entries_at(&[48, 0, 24]);
        let sorted = chronological_descending(&entries);
        assert_eq!(symptoms(&sorted), vec!["Symptom 0", "Symptom 2", "Symptom 1"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let entries = entries_at(&[0, 0, 5, 5]);

        let asc = chronological_ascending(&entries);
        assert_eq!(
            symptoms(&asc),
            vec!["Symptom 0", "Symptom 1", "Symptom 2", "Symptom 3"]
        );

        let desc = chronological_descending(&entries);
        assert_eq!(
            symptoms(&desc),
            vec!["Symptom 2", "Symptom 3", "Symptom 0", "Symptom 1"]
        );
    }

    #[test]
    fn test_recent_limits() {
        let entries = entries_at(&[0, 1, 2, 3]);
        let latest = recent(&entries, 2);
        assert_eq!(symptoms(&latest), vec!["Symptom 3", "Symptom 2"]);
        assert_eq!(recent(&entries, 10).len(), 4);
        assert!(recent(&[], 3).is_empty());
    }

    #[test]
    fn test_trend_points() {
        let mut entries = entries_at(&[24, 0]);
        entries[0].severity = crate::models::Severity::new(9).unwrap();

        let points = trend_points(&entries);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Mar 1");
        assert_eq!(points[0].severity, 5);
        assert_eq!(points[1].label, "Mar 2");
        assert_eq!(points[1].severity, 9);
        assert_eq!(points[1].band, SeverityBand::High);
    }
}
