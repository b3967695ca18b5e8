//! Candidate validator.
//!
//! Rules:
//! - `symptom`, `location`: at least 2 characters
//! - `painStartTime`, `duration`: required
//! - `severity`: whole number 1-10
//! - `onsetSpeed`, `frequency`, `impact`: one of the declared choices
//!
//! Red-flag detail has no rule of its own; it follows the checkbox.

use crate::models::{Frequency, Impact, LogCandidate, NewLogEntry, OnsetSpeed, Severity};

use super::normalizer::{
    normalize_text, notes_text, optional_text, parse_choice, parse_onset, red_flags, text_len,
};
use super::{Field, ValidationErrorKind, ValidationErrors};

/// Minimum length of the symptom and location fields.
pub const MIN_TEXT_LEN: usize = 2;

/// Validate a form submission and apply defaults.
///
/// Pure: no clock, no store, no I/O. On failure every offending field is
/// reported in form order.
pub fn validate_and_build(candidate: &LogCandidate) -> Result<NewLogEntry, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if text_len(&candidate.symptom) < MIN_TEXT_LEN {
        errors.push(
            Field::Symptom,
            ValidationErrorKind::TooShort,
            "Symptom must be at least 2 characters.",
        );
    }

    if text_len(&candidate.location) < MIN_TEXT_LEN {
        errors.push(
            Field::Location,
            ValidationErrorKind::TooShort,
            "Location must be at least 2 characters.",
        );
    }

    let pain_start_time = if candidate.pain_start_time.trim().is_empty() {
        errors.push(
            Field::PainStartTime,
            ValidationErrorKind::Required,
            "Please specify when the pain started.",
        );
        None
    } else {
        let parsed = parse_onset(&candidate.pain_start_time);
        if parsed.is_none() {
            errors.push(
                Field::PainStartTime,
                ValidationErrorKind::InvalidTimestamp,
                format!(
                    "\"{}\" is not a valid date and time.",
                    candidate.pain_start_time.trim()
                ),
            );
        }
        parsed
    };

    let onset_speed = choice::<OnsetSpeed>(&candidate.onset_speed, Field::OnsetSpeed, &mut errors);
    let frequency = choice::<Frequency>(&candidate.frequency, Field::Frequency, &mut errors);

    if candidate.duration.trim().is_empty() {
        errors.push(
            Field::Duration,
            ValidationErrorKind::Required,
            "Please specify duration.",
        );
    }

    let severity = match candidate.severity {
        Some(value) if value.fract() == 0.0 => Severity::new(value as i64).ok(),
        _ => None,
    };
    if severity.is_none() {
        errors.push(
            Field::Severity,
            ValidationErrorKind::OutOfRange,
            "Severity must be a whole number from 1 to 10.",
        );
    }

    let impact = choice::<Impact>(&candidate.impact, Field::Impact, &mut errors);

    match (pain_start_time, onset_speed, frequency, severity, impact) {
        (Some(pain_start_time), Some(onset_speed), Some(frequency), Some(severity), Some(impact))
            if errors.is_empty() =>
        {
            Ok(NewLogEntry {
                symptom: normalize_text(&candidate.symptom),
                location: normalize_text(&candidate.location),
                pain_start_time,
                onset_speed,
                frequency,
                duration: normalize_text(&candidate.duration),
                severity,
                triggers: optional_text(candidate.triggers.as_deref()),
                relievers: optional_text(candidate.relievers.as_deref()),
                associated_symptoms: optional_text(candidate.associated_symptoms.as_deref()),
                impact,
                medication: optional_text(candidate.medication.as_deref()),
                red_flags: red_flags(candidate.has_red_flags, candidate.red_flags.as_deref()),
                notes: notes_text(candidate.notes.as_deref()),
            })
        }
        _ => Err(errors),
    }
}

fn choice<T: crate::models::FormChoice>(
    raw: &str,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match parse_choice::<T>(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, ValidationErrorKind::InvalidEnum, message);
            None
        }
    }
}
