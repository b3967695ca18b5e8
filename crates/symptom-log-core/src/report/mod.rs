//! Clinical summary report for sharing with a physician.
//!
//! A report is a snapshot: summary block, every entry newest first with
//! red-flag callouts, and the time it was generated. Composing twice from an
//! unchanged store gives the same document apart from `generated_at`; use
//! [`ReportDocument::entries_digest`] to compare two reports' contents.

mod render;

pub use render::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::{LogEntry, SeverityBand};
use crate::views::{chronological_descending, summary, SummaryStats};

/// Default report title.
pub const REPORT_TITLE: &str = "GP Health Report";

/// Default patient name shown in the report header.
pub const DEFAULT_PATIENT_NAME: &str = "Jane Doe";

/// Report header options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    pub patient_name: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: REPORT_TITLE.to_string(),
            patient_name: DEFAULT_PATIENT_NAME.to_string(),
        }
    }
}

impl ReportOptions {
    pub fn for_patient(patient_name: impl Into<String>) -> Self {
        Self {
            patient_name: patient_name.into(),
            ..Self::default()
        }
    }
}

/// One row of the detailed log history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub severity_band: SeverityBand,
    /// "Alert: ..." line, empty for unflagged entries
    pub red_flag_alert: String,
}

impl ReportEntry {
    fn from_entry(entry: &LogEntry) -> Self {
        Self {
            entry: entry.clone(),
            severity_band: entry.severity_band(),
            red_flag_alert: entry
                .red_flags
                .as_ref()
                .map(|flags| format!("Alert: {}", flags))
                .unwrap_or_default(),
        }
    }
}

/// Composed report document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    pub patient_name: String,
    /// Composition time (not stored anywhere)
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryStats,
    /// Newest first
    pub entries: Vec<ReportEntry>,
}

impl ReportDocument {
    /// SHA-256 over the summary and entries, ignoring `generated_at`.
    pub fn entries_digest(&self) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_string(&(&self.summary, &self.entries))?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Whether two reports hold the same summary and entries.
    pub fn same_content(&self, other: &ReportDocument) -> bool {
        self.summary == other.summary && self.entries == other.entries
    }

    /// Entries carrying a red-flag callout.
    pub fn flagged_entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| !e.red_flag_alert.is_empty())
    }
}

/// Compose a report as of now.
pub fn compose_report(entries: &[LogEntry], options: &ReportOptions) -> ReportDocument {
    compose_report_at(entries, options, Utc::now())
}

/// Compose a report with an explicit generation time.
pub fn compose_report_at(
    entries: &[LogEntry],
    options: &ReportOptions,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let report = ReportDocument {
        title: options.title.clone(),
        patient_name: options.patient_name.clone(),
        generated_at,
        summary: summary(entries),
        entries: chronological_descending(entries)
            .into_iter()
            .map(ReportEntry::from_entry)
            .collect(),
    };

    tracing::info!(
        entries = report.entries.len(),
        flagged = report.flagged_entries().count(),
        "Composed symptom report"
    );

    report
}
