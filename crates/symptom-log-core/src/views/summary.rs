//! Summary aggregates for the report header.

use serde::{Deserialize, Serialize};

use crate::models::{Impact, LogEntry};

/// Display value of the average when there are no entries.
pub const EMPTY_AVERAGE: &str = "0";

/// Aggregates over a set of entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of entries
    pub count: usize,
    /// Mean severity to one decimal place, "0" when empty
    pub average_severity: String,
    /// Symptom names in first-seen order
    pub distinct_symptoms: Vec<String>,
    /// Any entry with severe impact
    pub has_severe_impact: bool,
}

/// Unrounded mean severity, `None` when empty.
pub fn mean_severity(entries: &[LogEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.severity.value())).sum();
    Some(f64::from(total) / entries.len() as f64)
}

/// Mean severity to one decimal place, halves rounded up ("5.25" shows "5.3").
pub fn average_severity(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_AVERAGE.to_string();
    }
    let total: u64 = entries.iter().map(|e| u64::from(e.severity.value())).sum();
    let n = entries.len() as u64;
    let tenths = (20 * total + n) / (2 * n);
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Symptom names in the order they first appear.
pub fn distinct_symptoms(entries: &[LogEntry]) -> Vec<String> {
    let mut seen = Vec::new();
    for entry in entries {
        if !seen.contains(&entry.symptom) {
            seen.push(entry.symptom.clone());
        }
    }
    seen
}

/// Compute the summary block.
pub fn summary(entries: &[LogEntry]) -> SummaryStats {
    SummaryStats {
        count: entries.len(),
        average_severity: average_severity(entries),
        distinct_symptoms: distinct_symptoms(entries),
        has_severe_impact: entries.iter().any(|e| e.impact == Impact::Severe),
    }
}
