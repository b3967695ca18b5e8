//! Log entry models: the validated record and its closed-set fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel stored in optional free-text fields left blank on submission.
pub const NONE_SENTINEL: &str = "None";

/// Red-flag text stored when the box is checked but no detail was given.
pub const RED_FLAG_PLACEHOLDER: &str = "Flagged";

/// Duration choices offered by the logging form.
pub const DURATION_OPTIONS: &[&str] = &[
    "Minutes",
    "< 1 hour",
    "1-4 hours",
    "4-8 hours",
    "All day",
    "Ongoing",
];

/// A closed set of form options with display labels.
pub trait FormChoice: Sized + Copy + 'static {
    /// Every member, in the order the form lists them.
    const ALL: &'static [Self];

    /// Form field name, used in validation messages.
    const FIELD_LABEL: &'static str;

    /// Display label (also the serialized form).
    fn label(&self) -> &'static str;

    /// Parse an exact label. Anything else is not a member.
    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.label() == raw)
    }
}

/// How quickly the symptom came on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OnsetSpeed {
    Sudden,
    Gradual,
    Unknown,
}

impl FormChoice for OnsetSpeed {
    const ALL: &'static [Self] = &[Self::Sudden, Self::Gradual, Self::Unknown];
    const FIELD_LABEL: &'static str = "Onset speed";

    fn label(&self) -> &'static str {
        match self {
            Self::Sudden => "Sudden",
            Self::Gradual => "Gradual",
            Self::Unknown => "Unknown",
        }
    }
}

/// How often the symptom occurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Frequency {
    #[serde(rename = "Once per day")]
    OncePerDay,
    Random,
    Continuous,
    #[serde(rename = "After activities")]
    AfterActivities,
    Other,
}

impl FormChoice for Frequency {
    const ALL: &'static [Self] = &[
        Self::OncePerDay,
        Self::Random,
        Self::Continuous,
        Self::AfterActivities,
        Self::Other,
    ];
    const FIELD_LABEL: &'static str = "Frequency";

    fn label(&self) -> &'static str {
        match self {
            Self::OncePerDay => "Once per day",
            Self::Random => "Random",
            Self::Continuous => "Continuous",
            Self::AfterActivities => "After activities",
            Self::Other => "Other",
        }
    }
}

/// Impact on daily life.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Impact {
    None,
    Mild,
    Moderate,
    Severe,
}

impl FormChoice for Impact {
    const ALL: &'static [Self] = &[Self::None, Self::Mild, Self::Moderate, Self::Severe];
    const FIELD_LABEL: &'static str = "Impact";

    fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

/// Severity outside the 1-10 scale.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("severity {0} is outside {min}-{max}", min = Severity::MIN, max = Severity::MAX)]
pub struct SeverityOutOfRange(pub i64);

/// Pain severity on the 1-10 scale. Cannot hold a value outside the scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Checked constructor.
    pub fn new(value: i64) -> Result<Self, SeverityOutOfRange> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SeverityOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Color band used by the recent list and the report table.
    pub fn band(self) -> SeverityBand {
        SeverityBand::of(self)
    }
}

impl TryFrom<i64> for Severity {
    type Error = SeverityOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity bucket for color coding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityBand {
    /// 1-4
    Low,
    /// 5-7
    Moderate,
    /// 8-10
    High,
}

impl SeverityBand {
    pub fn of(severity: Severity) -> Self {
        match severity.value() {
            8..=u8::MAX => Self::High,
            5..=7 => Self::Moderate,
            _ => Self::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// A validated entry that has not been committed yet (no id, no record time).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLogEntry {
    pub symptom: String,
    pub location: String,
    /// Onset as entered by the user (local wall-clock time)
    pub pain_start_time: NaiveDateTime,
    pub onset_speed: OnsetSpeed,
    pub frequency: Frequency,
    pub duration: String,
    pub severity: Severity,
    pub triggers: String,
    pub relievers: String,
    pub associated_symptoms: String,
    pub impact: Impact,
    pub medication: String,
    /// Present only when red flags were checked
    pub red_flags: Option<String>,
    pub notes: String,
}

/// A committed symptom log entry. Immutable once in the store.
///
/// Serializes through [`LogEntryRecord`], so the red-flag pair is always
/// present and never null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(into = "LogEntryRecord", from = "LogEntryRecord")]
pub struct LogEntry {
    /// Unique entry ID
    pub id: String,
    /// Record-entry time (not onset)
    pub date: DateTime<Utc>,
    pub symptom: String,
    pub location: String,
    pub pain_start_time: NaiveDateTime,
    pub onset_speed: OnsetSpeed,
    pub frequency: Frequency,
    pub duration: String,
    pub severity: Severity,
    pub triggers: String,
    pub relievers: String,
    pub associated_symptoms: String,
    pub impact: Impact,
    pub medication: String,
    pub red_flags: Option<String>,
    pub notes: String,
}

impl LogEntry {
    /// Finalize a validated entry with a fresh ID and the given record time.
    pub fn from_new(entry: NewLogEntry, date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            symptom: entry.symptom,
            location: entry.location,
            pain_start_time: entry.pain_start_time,
            onset_speed: entry.onset_speed,
            frequency: entry.frequency,
            duration: entry.duration,
            severity: entry.severity,
            triggers: entry.triggers,
            relievers: entry.relievers,
            associated_symptoms: entry.associated_symptoms,
            impact: entry.impact,
            medication: entry.medication,
            red_flags: entry.red_flags,
            notes: entry.notes,
        }
    }

    pub fn has_red_flags(&self) -> bool {
        self.red_flags.is_some()
    }

    /// Red-flag detail, or "" when none were flagged.
    pub fn red_flags_text(&self) -> &str {
        self.red_flags.as_deref().unwrap_or("")
    }

    pub fn severity_band(&self) -> SeverityBand {
        self.severity.band()
    }
}

/// Wire form of [`LogEntry`]: flat `hasRedFlags` / `redFlags` fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub symptom: String,
    pub location: String,
    pub pain_start_time: NaiveDateTime,
    pub onset_speed: OnsetSpeed,
    pub frequency: Frequency,
    pub duration: String,
    pub severity: Severity,
    pub triggers: String,
    pub relievers: String,
    pub associated_symptoms: String,
    pub impact: Impact,
    pub medication: String,
    pub has_red_flags: bool,
    /// Empty when `has_red_flags` is false
    #[serde(default)]
    pub red_flags: String,
    #[serde(default)]
    pub notes: String,
}

impl From<LogEntry> for LogEntryRecord {
    fn from(entry: LogEntry) -> Self {
        Self {
            has_red_flags: entry.has_red_flags(),
            red_flags: entry.red_flags.unwrap_or_default(),
            id: entry.id,
            date: entry.date,
            symptom: entry.symptom,
            location: entry.location,
            pain_start_time: entry.pain_start_time,
            onset_speed: entry.onset_speed,
            frequency: entry.frequency,
            duration: entry.duration,
            severity: entry.severity,
            triggers: entry.triggers,
            relievers: entry.relievers,
            associated_symptoms: entry.associated_symptoms,
            impact: entry.impact,
            medication: entry.medication,
            notes: entry.notes,
        }
    }
}

impl From<LogEntryRecord> for LogEntry {
    fn from(record: LogEntryRecord) -> Self {
        let red_flags = match (record.has_red_flags, record.red_flags.trim()) {
            (false, _) => None,
            (true, "") => Some(RED_FLAG_PLACEHOLDER.to_string()),
            (true, detail) => Some(detail.to_string()),
        };
        Self {
            id: record.id,
            date: record.date,
            symptom: record.symptom,
            location: record.location,
            pain_start_time: record.pain_start_time,
            onset_speed: record.onset_speed,
            frequency: record.frequency,
            duration: record.duration,
            severity: record.severity,
            triggers: record.triggers,
            relievers: record.relievers,
            associated_symptoms: record.associated_symptoms,
            impact: record.impact,
            medication: record.medication,
            red_flags,
            notes: record.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_new_entry() -> NewLogEntry {
        NewLogEntry {
            symptom: "Migraine".into(),
            location: "Left temple".into(),
            pain_start_time: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            onset_speed: OnsetSpeed::Sudden,
            frequency: Frequency::Random,
            duration: "1-4 hours".into(),
            severity: Severity::new(7).unwrap(),
            triggers: "Bright light".into(),
            relievers: NONE_SENTINEL.into(),
            associated_symptoms: "Nausea".into(),
            impact: Impact::Moderate,
            medication: NONE_SENTINEL.into(),
            red_flags: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_severity_bounds() {
        assert!(Severity::new(0).is_err());
        assert!(Severity::new(11).is_err());
        assert_eq!(Severity::new(1).unwrap().value(), 1);
        assert_eq!(Severity::new(10).unwrap().value(), 10);
        assert_eq!(Severity::new(-3), Err(SeverityOutOfRange(-3)));
    }

    #[test]
    fn test_severity_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Severity>("11").is_err());
        assert!(serde_json::from_str::<Severity>("0").is_err());
        let severity: Severity = serde_json::from_str("6").unwrap();
        assert_eq!(severity.value(), 6);
        assert_eq!(serde_json::to_string(&severity).unwrap(), "6");
    }

    #[test]
    fn test_severity_bands() {
        let band = |v| Severity::new(v).unwrap().band();
        assert_eq!(band(1), SeverityBand::Low);
        assert_eq!(band(4), SeverityBand::Low);
        assert_eq!(band(5), SeverityBand::Moderate);
        assert_eq!(band(7), SeverityBand::Moderate);
        assert_eq!(band(8), SeverityBand::High);
        assert_eq!(band(10), SeverityBand::High);
    }

    #[test]
    fn test_choice_labels_round_trip_through_parser() {
        for choice in Frequency::ALL {
            assert_eq!(Frequency::from_label(choice.label()), Some(*choice));
        }
        assert_eq!(Frequency::from_label(" once per DAY "), None);
        assert_eq!(Impact::from_label("severe"), None);
        assert_eq!(Impact::from_label("Severe "), None);
        assert_eq!(Impact::from_label("Catastrophic"), None);
    }

    #[test]
    fn test_choice_serializes_as_label() {
        let json = serde_json::to_string(&Frequency::AfterActivities).unwrap();
        assert_eq!(json, "\"After activities\"");
    }

    #[test]
    fn test_from_new_assigns_id() {
        let now = Utc::now();
        let entry = LogEntry::from_new(make_new_entry(), now);
        assert_eq!(entry.id.len(), 36);
        assert_eq!(entry.date, now);
        assert_eq!(entry.symptom, "Migraine");
        assert!(!entry.has_red_flags());
        assert_eq!(entry.red_flags_text(), "");
    }

    #[test]
    fn test_unflagged_entry_serializes_without_nulls() {
        let entry = LogEntry::from_new(make_new_entry(), Utc::now());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["hasRedFlags"], serde_json::json!(false));
        assert_eq!(json["redFlags"], serde_json::json!(""));
        assert!(json.as_object().unwrap().values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_flagged_entry_serde_round_trip() {
        let mut new = make_new_entry();
        new.red_flags = Some("Numbness".into());
        let entry = LogEntry::from_new(new, Utc::now());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"hasRedFlags\":true"));
        assert!(json.contains("\"redFlags\":\"Numbness\""));

        let back: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_from_new_ids_differ() {
        let now = Utc::now();
        let a = LogEntry::from_new(make_new_entry(), now);
        let b = LogEntry::from_new(make_new_entry(), now);
        assert_ne!(a.id, b.id);
    }
}
