//! Report renderers: printable text, JSON and CSV.

use super::{ReportDocument, ReportEntry};
use crate::models::FormChoice;

/// "January 5, 2024"
pub const GENERATED_ON_FORMAT: &str = "%B %-d, %Y";

/// "Jan 5, 9:30 AM"
pub const ENTRY_TIME_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Shown in place of the history table when there are no entries.
pub const EMPTY_HISTORY: &str = "No logs yet. Start tracking your health today.";

const CSV_HEADER: &str = "id,recorded_at,symptom,location,pain_start_time,onset_speed,frequency,duration,severity,triggers,relievers,associated_symptoms,impact,medication,has_red_flags,red_flags,notes\n";

impl ReportDocument {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Printable plain-text report.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{}\nPatient: {}\nGenerated on {}\n\n",
            self.title,
            self.patient_name,
            self.generated_at.format(GENERATED_ON_FORMAT)
        );

        let summary = &self.summary;
        out.push_str("Summary Overview\n");
        out.push_str(&format!("  Total entries:    {}\n", summary.count));
        out.push_str(&format!(
            "  Average severity: {}/10\n",
            summary.average_severity
        ));
        if summary.distinct_symptoms.is_empty() {
            out.push_str("  Active symptoms:  0\n");
        } else {
            out.push_str(&format!(
                "  Active symptoms:  {} ({})\n",
                summary.distinct_symptoms.len(),
                summary.distinct_symptoms.join(", ")
            ));
        }
        if summary.has_severe_impact {
            out.push_str("  Severe impact reported\n");
        }
        out.push('\n');

        out.push_str("Detailed Log History\n");
        if self.entries.is_empty() {
            out.push_str(&format!("  {}\n", EMPTY_HISTORY));
            return out;
        }

        for row in &self.entries {
            out.push('\n');
            out.push_str(&entry_text(row));
        }

        out
    }

    /// Export entries to CSV, newest first.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);

        for row in &self.entries {
            let e = &row.entry;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&e.id),
                e.date.to_rfc3339(),
                escape_csv(&e.symptom),
                escape_csv(&e.location),
                e.pain_start_time.format("%Y-%m-%dT%H:%M:%S"),
                e.onset_speed.label(),
                escape_csv(e.frequency.label()),
                escape_csv(&e.duration),
                e.severity,
                escape_csv(&e.triggers),
                escape_csv(&e.relievers),
                escape_csv(&e.associated_symptoms),
                e.impact.label(),
                escape_csv(&e.medication),
                e.has_red_flags(),
                escape_csv(e.red_flags_text()),
                escape_csv(&e.notes),
            ));
        }

        csv
    }
}

fn entry_text(row: &ReportEntry) -> String {
    let e = &row.entry;
    let mut text = format!(
        "{}  {}  {}/10 ({})\n",
        e.date.format(ENTRY_TIME_FORMAT),
        e.symptom,
        e.severity,
        row.severity_band.label()
    );
    text.push_str(&format!(
        "  Location: {} | Onset: {} ({}) | Frequency: {} | Duration: {}\n",
        e.location,
        e.pain_start_time.format(ENTRY_TIME_FORMAT),
        e.onset_speed.label(),
        e.frequency.label(),
        e.duration
    ));
    text.push_str(&format!(
        "  Triggers: {} | Relievers: {} | Associated: {}\n",
        e.triggers, e.relievers, e.associated_symptoms
    ));
    text.push_str(&format!(
        "  Impact: {} | Medication: {}\n",
        e.impact.label(),
        e.medication
    ));
    if !row.red_flag_alert.is_empty() {
        text.push_str(&format!("  !! {}\n", row.red_flag_alert));
    }
    let notes = if e.notes.is_empty() { "-" } else { e.notes.as_str() };
    text.push_str(&format!("  Notes: {}\n", notes));
    text
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
