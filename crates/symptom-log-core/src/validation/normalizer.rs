//! Field normalizer.
//!
//! Handles:
//! - Whitespace trimming of free text
//! - Sentinel defaults for blank optional text ("None")
//! - Red-flag detail derived from the checkbox
//! - Onset date-time parsing (form `datetime-local` and RFC 3339)
//! - Choice parsing with a closest-match suggestion for near misses

use chrono::{DateTime, NaiveDateTime};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::{FormChoice, NONE_SENTINEL, RED_FLAG_PLACEHOLDER};

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Onset formats accepted besides RFC 3339.
const ONSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Trimmed copy of a text field.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Length in characters, ignoring surrounding whitespace.
pub fn text_len(raw: &str) -> usize {
    raw.trim().chars().count()
}

/// Optional free text: blank or absent becomes the "None" sentinel.
pub fn optional_text(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NONE_SENTINEL.to_string(),
    }
}

/// Notes: blank or absent becomes the empty string.
pub fn notes_text(raw: Option<&str>) -> String {
    raw.map(normalize_text).unwrap_or_default()
}

/// Red-flag detail. Unchecked drops any stale detail text.
pub fn red_flags(has_red_flags: bool, detail: Option<&str>) -> Option<String> {
    if !has_red_flags {
        return None;
    }
    match detail.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => Some(RED_FLAG_PLACEHOLDER.to_string()),
    }
}

/// Parse a user-entered onset. RFC 3339 input keeps its own wall-clock time.
pub fn parse_onset(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    ONSET_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Parse a form choice, or explain what was expected.
pub fn parse_choice<T: FormChoice>(raw: &str) -> Result<T, String> {
    if let Some(choice) = T::from_label(raw) {
        return Ok(choice);
    }

    let allowed = T::ALL
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");

    let message = if raw.trim().is_empty() {
        format!("{} is required. Choose one of: {}.", T::FIELD_LABEL, allowed)
    } else {
        match closest_choice::<T>(raw) {
            Some(suggestion) => format!(
                "{} must be one of: {}. Did you mean \"{}\"?",
                T::FIELD_LABEL,
                allowed,
                suggestion.label()
            ),
            None => format!("{} must be one of: {}.", T::FIELD_LABEL, allowed),
        }
    };

    Err(message)
}

/// Closest member to a misspelled label, if any is close enough.
pub fn closest_choice<T: FormChoice>(raw: &str) -> Option<T> {
    let wanted = raw.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    T::ALL
        .iter()
        .copied()
        .map(|choice| (choice, similarity(&wanted, &choice.label().to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(choice, _)| choice)
}

/// Combined string similarity (0.0 - 1.0).
fn similarity(a: &str, b: &str) -> f64 {
    // Jaro-Winkler favors shared prefixes, Levenshtein overall edits
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Impact, OnsetSpeed};
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_optional_text_sentinel() {
        assert_eq!(optional_text(None), "None");
        assert_eq!(optional_text(Some("")), "None");
        assert_eq!(optional_text(Some("   ")), "None");
        assert_eq!(optional_text(Some(" Ibuprofen ")), "Ibuprofen");
    }

    #[test]
    fn test_notes_default_empty() {
        assert_eq!(notes_text(None), "");
        assert_eq!(notes_text(Some("  ")), "");
        assert_eq!(notes_text(Some("after lunch")), "after lunch");
    }

    #[test]
    fn test_red_flags_derivation() {
        assert_eq!(red_flags(false, Some("fever")), None);
        assert_eq!(red_flags(false, None), None);
        assert_eq!(red_flags(true, None), Some("Flagged".to_string()));
        assert_eq!(red_flags(true, Some(" ")), Some("Flagged".to_string()));
        assert_eq!(red_flags(true, Some("High fever")), Some("High fever".to_string()));
    }

    #[test]
    fn test_text_len_counts_chars() {
        assert_eq!(text_len(" M "), 1);
        assert_eq!(text_len("Übel"), 4);
    }

    #[test]
    fn test_parse_onset_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        assert_eq!(parse_onset("2024-01-15T09:30"), Some(expected));
        assert_eq!(parse_onset("2024-01-15T09:30:00"), Some(expected));
        assert_eq!(parse_onset("2024-01-15 09:30"), Some(expected));
        assert_eq!(parse_onset("2024-01-15T09:30:00+02:00"), Some(expected));
        assert_eq!(parse_onset(" 2024-01-15T09:30 "), Some(expected));
    }

    #[test]
    fn test_parse_onset_fractional_seconds() {
        let parsed = parse_onset("2024-01-15T09:30:00.250").unwrap();
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_parse_onset_rejects_garbage() {
        assert_eq!(parse_onset(""), None);
        assert_eq!(parse_onset("yesterday"), None);
        assert_eq!(parse_onset("2024-13-40T09:30"), None);
    }

    #[test]
    fn test_parse_choice_exact_only() {
        assert_eq!(parse_choice::<OnsetSpeed>("Sudden"), Ok(OnsetSpeed::Sudden));
        let message = parse_choice::<Impact>("severe").unwrap_err();
        assert!(message.contains("Did you mean \"Severe\"?"));
        assert_eq!(
            parse_choice::<Frequency>("After activities"),
            Ok(Frequency::AfterActivities)
        );
    }

    #[test]
    fn test_parse_choice_suggests_close_match() {
        let message = parse_choice::<Impact>("Moderat").unwrap_err();
        assert!(message.contains("Did you mean \"Moderate\"?"));
        assert!(message.contains("None, Mild, Moderate, Severe"));
    }

    #[test]
    fn test_parse_choice_no_suggestion_for_unrelated() {
        let message = parse_choice::<OnsetSpeed>("xyz").unwrap_err();
        assert!(!message.contains("Did you mean"));
    }

    #[test]
    fn test_parse_choice_blank() {
        let message = parse_choice::<Frequency>("").unwrap_err();
        assert!(message.starts_with("Frequency is required"));
    }
}
