//! Symptom Log Core Library
//!
//! Personal symptom tracking with a clinical summary report for the GP.
//!
//! # Architecture
//!
//! ```text
//! Form submit → validate_and_build ──✗──▶ per-field errors (store untouched)
//!                      │
//!                      ▼
//!               LogStore::append   (id + record time assigned)
//!                      │
//!         ┌────────────┼─────────────────────┐
//!         ▼            ▼                     ▼
//!    trend_points   recent / descending   summary
//!    (chart)        (activity list)          │
//!                                            ▼
//!                               compose_report → text / JSON / CSV
//! ```
//!
//! # Core Principle
//!
//! **Nothing partial is ever committed.** An entry reaches the store only
//! after the whole submission validates, and is never modified afterwards.
//!
//! # Modules
//!
//! - [`models`]: Domain types (LogEntry, Severity, OnsetSpeed, etc.)
//! - [`validation`]: Candidate validation and field normalization
//! - [`store`]: Session-scoped append-only log store
//! - [`views`]: Sorted series, trend points and summary aggregates
//! - [`report`]: Report composition and export
//! - [`config`]: Session configuration

pub mod config;
pub mod models;
pub mod report;
pub mod store;
pub mod validation;
pub mod views;

// Re-export commonly used types
pub use config::SessionConfig;
pub use models::{
    Frequency, Impact, LogCandidate, LogEntry, NewLogEntry, OnsetSpeed, Severity, SeverityBand,
};
pub use report::{compose_report, ReportDocument, ReportOptions};
pub use store::LogStore;
pub use validation::{validate_and_build, Field, ValidationErrorKind, ValidationErrors};
pub use views::{
    chronological_ascending, chronological_descending, summary, trend_points, SummaryStats,
    TrendPoint,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use models::FormChoice;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SymptomLogError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl From<ValidationErrors> for SymptomLogError {
    fn from(e: ValidationErrors) -> Self {
        SymptomLogError::Validation(e.to_string())
    }
}

impl From<serde_json::Error> for SymptomLogError {
    fn from(e: serde_json::Error) -> Self {
        SymptomLogError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for SymptomLogError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        SymptomLogError::Session(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a new session.
#[uniffi::export]
pub fn open_session(seed_examples: bool, patient_name: Option<String>) -> Arc<SymptomLogSession> {
    let mut config = SessionConfig {
        seed_examples,
        ..SessionConfig::default()
    };
    if let Some(name) = patient_name.filter(|n| !n.trim().is_empty()) {
        config.patient_name = name.trim().to_string();
    }
    Arc::new(SymptomLogSession::new(&config))
}

/// Open a new session configured from the environment.
#[uniffi::export]
pub fn open_session_from_env() -> Arc<SymptomLogSession> {
    Arc::new(SymptomLogSession::new(&SessionConfig::from_env()))
}

// =========================================================================
// Main API Object
// =========================================================================

/// One user session: owns the log store until the host drops it.
///
/// The mutex is only here because foreign callers may hold the handle on any
/// thread; the core below it is single-writer.
#[derive(uniffi::Object)]
pub struct SymptomLogSession {
    store: Arc<Mutex<LogStore>>,
    report_options: ReportOptions,
}

impl SymptomLogSession {
    /// Create a session from config.
    pub fn new(config: &SessionConfig) -> Self {
        let store = if config.seed_examples {
            LogStore::with_examples()
        } else {
            LogStore::new()
        };

        tracing::info!(
            seeded = config.seed_examples,
            entries = store.len(),
            "Opened symptom log session"
        );

        Self {
            store: Arc::new(Mutex::new(store)),
            report_options: config.report_options(),
        }
    }

    fn report(&self) -> Result<ReportDocument, SymptomLogError> {
        let store = self.store.lock()?;
        Ok(compose_report(store.list(), &self.report_options))
    }
}

#[uniffi::export]
impl SymptomLogSession {
    // =========================================================================
    // Logging
    // =========================================================================

    /// Check a submission without committing it. Empty means valid.
    pub fn validate_entry(&self, candidate: FfiLogCandidate) -> Vec<FfiFieldError> {
        match validate_and_build(&candidate.into()) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.into_iter().map(|e| e.into()).collect(),
        }
    }

    /// Validate and commit a submission.
    pub fn submit_entry(&self, candidate: FfiLogCandidate) -> Result<FfiLogEntry, SymptomLogError> {
        let mut store = self.store.lock()?;
        let entry = store.submit(&candidate.into())?;
        Ok(entry.into())
    }

    /// All entries in insertion order.
    pub fn list_entries(&self) -> Result<Vec<FfiLogEntry>, SymptomLogError> {
        let store = self.store.lock()?;
        Ok(store.list().iter().cloned().map(|e| e.into()).collect())
    }

    /// Number of entries in the session.
    pub fn entry_count(&self) -> Result<u64, SymptomLogError> {
        let store = self.store.lock()?;
        Ok(store.len() as u64)
    }

    // =========================================================================
    // Dashboard Views
    // =========================================================================

    /// Most recent entries, newest first.
    pub fn recent_entries(&self, limit: u32) -> Result<Vec<FfiLogEntry>, SymptomLogError> {
        let store = self.store.lock()?;
        Ok(views::recent(store.list(), limit as usize)
            .into_iter()
            .cloned()
            .map(|e| e.into())
            .collect())
    }

    /// Severity trend series, oldest first.
    pub fn trend_points(&self) -> Result<Vec<FfiTrendPoint>, SymptomLogError> {
        let store = self.store.lock()?;
        Ok(trend_points(store.list())
            .into_iter()
            .map(|p| p.into())
            .collect())
    }

    /// Summary aggregates.
    pub fn summary(&self) -> Result<FfiSummary, SymptomLogError> {
        let store = self.store.lock()?;
        Ok(summary(store.list()).into())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Printable report.
    pub fn report_text(&self) -> Result<String, SymptomLogError> {
        Ok(self.report()?.to_text())
    }

    /// Report as JSON.
    pub fn report_json(&self) -> Result<String, SymptomLogError> {
        Ok(self.report()?.to_json()?)
    }

    /// Report entries as CSV.
    pub fn report_csv(&self) -> Result<String, SymptomLogError> {
        Ok(self.report()?.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe form submission.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiLogCandidate {
    pub symptom: String,
    pub location: String,
    pub pain_start_time: String,
    pub onset_speed: String,
    pub frequency: String,
    pub duration: String,
    pub severity: Option<f64>,
    pub triggers: Option<String>,
    pub relievers: Option<String>,
    pub associated_symptoms: Option<String>,
    pub impact: String,
    pub medication: Option<String>,
    pub has_red_flags: bool,
    pub red_flags: Option<String>,
    pub notes: Option<String>,
}

impl From<FfiLogCandidate> for LogCandidate {
    fn from(c: FfiLogCandidate) -> Self {
        LogCandidate {
            symptom: c.symptom,
            location: c.location,
            pain_start_time: c.pain_start_time,
            onset_speed: c.onset_speed,
            frequency: c.frequency,
            duration: c.duration,
            severity: c.severity,
            triggers: c.triggers,
            relievers: c.relievers,
            associated_symptoms: c.associated_symptoms,
            impact: c.impact,
            medication: c.medication,
            has_red_flags: c.has_red_flags,
            red_flags: c.red_flags,
            notes: c.notes,
        }
    }
}

/// FFI-safe committed entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLogEntry {
    pub id: String,
    /// RFC 3339 record time
    pub date: String,
    pub symptom: String,
    pub location: String,
    pub pain_start_time: String,
    pub onset_speed: String,
    pub frequency: String,
    pub duration: String,
    pub severity: u8,
    pub severity_band: String,
    pub triggers: String,
    pub relievers: String,
    pub associated_symptoms: String,
    pub impact: String,
    pub medication: String,
    pub has_red_flags: bool,
    /// Empty when `has_red_flags` is false
    pub red_flags: String,
    pub notes: String,
}

impl From<LogEntry> for FfiLogEntry {
    fn from(entry: LogEntry) -> Self {
        Self {
            has_red_flags: entry.has_red_flags(),
            severity_band: entry.severity_band().label().to_string(),
            date: entry.date.to_rfc3339(),
            pain_start_time: entry.pain_start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            onset_speed: entry.onset_speed.label().to_string(),
            frequency: entry.frequency.label().to_string(),
            severity: entry.severity.value(),
            impact: entry.impact.label().to_string(),
            red_flags: entry.red_flags.unwrap_or_default(),
            id: entry.id,
            symptom: entry.symptom,
            location: entry.location,
            duration: entry.duration,
            triggers: entry.triggers,
            relievers: entry.relievers,
            associated_symptoms: entry.associated_symptoms,
            medication: entry.medication,
            notes: entry.notes,
        }
    }
}

/// FFI-safe field error.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub kind: String,
    pub message: String,
}

impl From<validation::FieldError> for FfiFieldError {
    fn from(e: validation::FieldError) -> Self {
        Self {
            field: e.field.as_str().to_string(),
            kind: format!("{:?}", e.kind),
            message: e.message,
        }
    }
}

/// FFI-safe summary block.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSummary {
    pub count: u64,
    pub average_severity: String,
    pub distinct_symptoms: Vec<String>,
    pub has_severe_impact: bool,
}

impl From<SummaryStats> for FfiSummary {
    fn from(stats: SummaryStats) -> Self {
        Self {
            count: stats.count as u64,
            average_severity: stats.average_severity,
            distinct_symptoms: stats.distinct_symptoms,
            has_severe_impact: stats.has_severe_impact,
        }
    }
}

/// FFI-safe chart point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTrendPoint {
    pub date: String,
    pub label: String,
    pub severity: u8,
    pub band: String,
    pub symptom: String,
}

impl From<TrendPoint> for FfiTrendPoint {
    fn from(point: TrendPoint) -> Self {
        Self {
            date: point.date.to_rfc3339(),
            label: point.label,
            severity: point.severity,
            band: point.band.label().to_string(),
            symptom: point.symptom,
        }
    }
}
