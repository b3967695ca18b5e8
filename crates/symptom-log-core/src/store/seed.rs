//! Example entries a new session starts with.

use chrono::{DateTime, Duration, Utc};

use crate::models::{LogCandidate, NewLogEntry};
use crate::validation::validate_and_build;

/// One example episode, `days_ago` days before the session opened.
struct Example {
    days_ago: i64,
    symptom: &'static str,
    location: &'static str,
    onset_hours_before: i64,
    onset_speed: &'static str,
    frequency: &'static str,
    duration: &'static str,
    severity: f64,
    triggers: Option<&'static str>,
    relievers: Option<&'static str>,
    impact: &'static str,
    notes: &'static str,
}

const EXAMPLES: &[Example] = &[
    Example {
        days_ago: 0,
        symptom: "Migraine",
        location: "Left temple",
        onset_hours_before: 4,
        onset_speed: "Sudden",
        frequency: "Random",
        duration: "4 hours",
        severity: 7.0,
        triggers: Some("Bright light"),
        relievers: None,
        impact: "Moderate",
        notes: "Started after lunch, sensitive to light.",
    },
    Example {
        days_ago: 1,
        symptom: "Lower Back Pain",
        location: "Lower back",
        onset_hours_before: 8,
        onset_speed: "Gradual",
        frequency: "After activities",
        duration: "All day",
        severity: 4.0,
        triggers: Some("Sitting for long periods"),
        relievers: Some("Stretching"),
        impact: "Mild",
        notes: "Dull ache after sitting for too long.",
    },
    Example {
        days_ago: 2,
        symptom: "Migraine",
        location: "Left temple",
        onset_hours_before: 2,
        onset_speed: "Gradual",
        frequency: "Random",
        duration: "2 hours",
        severity: 5.0,
        triggers: None,
        relievers: Some("Water and rest"),
        impact: "Mild",
        notes: "Mild, managed with water and rest.",
    },
    Example {
        days_ago: 3,
        symptom: "Fatigue",
        location: "Whole body",
        onset_hours_before: 3,
        onset_speed: "Gradual",
        frequency: "Once per day",
        duration: "Morning",
        severity: 6.0,
        triggers: Some("Poor sleep"),
        relievers: None,
        impact: "Moderate",
        notes: "Woke up feeling unrefreshed.",
    },
    Example {
        days_ago: 4,
        symptom: "Joint Pain (Knees)",
        location: "Both knees",
        onset_hours_before: 6,
        onset_speed: "Unknown",
        frequency: "Continuous",
        duration: "Intermittent",
        severity: 3.0,
        triggers: Some("Rainy weather"),
        relievers: None,
        impact: "Mild",
        notes: "Rainy weather seems to trigger it.",
    },
    Example {
        days_ago: 5,
        symptom: "Migraine",
        location: "Behind both eyes",
        onset_hours_before: 6,
        onset_speed: "Sudden",
        frequency: "Random",
        duration: "6 hours",
        severity: 8.0,
        triggers: None,
        relievers: Some("Dark room"),
        impact: "Severe",
        notes: "Severe, had to lie down in dark room.",
    },
    Example {
        days_ago: 6,
        symptom: "Fatigue",
        location: "Whole body",
        onset_hours_before: 10,
        onset_speed: "Gradual",
        frequency: "Once per day",
        duration: "All day",
        severity: 4.0,
        triggers: None,
        relievers: None,
        impact: "Mild",
        notes: "Better than yesterday.",
    },
];

/// Example entries with their record times, oldest first.
///
/// Built through the validator so they satisfy the same invariants as
/// user submissions.
pub fn example_entries(now: DateTime<Utc>) -> Vec<(DateTime<Utc>, NewLogEntry)> {
    let mut entries: Vec<(DateTime<Utc>, NewLogEntry)> = EXAMPLES
        .iter()
        .filter_map(|example| {
            let recorded_at = now - Duration::days(example.days_ago);
            let onset = recorded_at - Duration::hours(example.onset_hours_before);
            let candidate = LogCandidate {
                symptom: example.symptom.into(),
                location: example.location.into(),
                pain_start_time: onset.format("%Y-%m-%dT%H:%M").to_string(),
                onset_speed: example.onset_speed.into(),
                frequency: example.frequency.into(),
                duration: example.duration.into(),
                severity: Some(example.severity),
                triggers: example.triggers.map(String::from),
                relievers: example.relievers.map(String::from),
                impact: example.impact.into(),
                notes: Some(example.notes.into()),
                ..LogCandidate::default()
            };

            match validate_and_build(&candidate) {
                Ok(entry) => Some((recorded_at, entry)),
                Err(errors) => {
                    tracing::error!(symptom = example.symptom, "Invalid example entry: {}", errors);
                    None
                }
            }
        })
        .collect();

    entries.sort_by_key(|(recorded_at, _)| *recorded_at);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_examples_validate() {
        let entries = example_entries(Utc::now());
        assert_eq!(entries.len(), EXAMPLES.len());
    }

    #[test]
    fn test_examples_oldest_first() {
        let entries = example_entries(Utc::now());
        assert!(entries.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(entries.last().map(|(_, e)| e.symptom.as_str()), Some("Migraine"));
        assert_eq!(
            entries.first().map(|(_, e)| e.symptom.as_str()),
            Some("Fatigue")
        );
    }

    #[test]
    fn test_examples_have_no_red_flags() {
        let entries = example_entries(Utc::now());
        assert!(entries.iter().all(|(_, e)| e.red_flags.is_none()));
    }
}
