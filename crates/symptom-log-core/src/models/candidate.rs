//! Raw form submission before validation.

use serde::{Deserialize, Serialize};

/// Field values as submitted by the logging form.
///
/// Nothing here is trusted: free text may be blank, choices may be
/// misspelled, severity may be missing or fractional. Run it through
/// [`crate::validation::validate_and_build`] to get a [`super::NewLogEntry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LogCandidate {
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

impl LogCandidate {
    /// Candidate with the form's initial values (severity slider at 5).
    pub fn form_defaults() -> Self {
        Self {
            severity: Some(5.0),
            ..Self::default()
        }
    }
}
