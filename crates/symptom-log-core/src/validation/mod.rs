//! Candidate validation.
//!
//! Turns a [`LogCandidate`](crate::models::LogCandidate) into a
//! [`NewLogEntry`](crate::models::NewLogEntry) or a set of per-field errors.
//! Every failing field is reported, not just the first one.

mod normalizer;
mod validator;

pub use normalizer::*;
pub use validator::*;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form fields that can fail validation, in form order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Symptom,
    Location,
    PainStartTime,
    OnsetSpeed,
    Frequency,
    Duration,
    Severity,
    Impact,
}

impl Field {
    /// Field name as the form knows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Symptom => "symptom",
            Field::Location => "location",
            Field::PainStartTime => "painStartTime",
            Field::OnsetSpeed => "onsetSpeed",
            Field::Frequency => "frequency",
            Field::Duration => "duration",
            Field::Severity => "severity",
            Field::Impact => "impact",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationErrorKind {
    TooShort,
    Required,
    OutOfRange,
    InvalidEnum,
    /// Non-blank onset that is not a recognizable date-time
    InvalidTimestamp,
}

/// A single rejected field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationErrorKind,
    /// Human-readable reason, shown under the form field
    pub message: String,
}

/// All field errors from one submission attempt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: Field, kind: ValidationErrorKind, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Error for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Kind of failure for a field, if it failed.
    pub fn kind_of(&self, field: Field) -> Option<ValidationErrorKind> {
        self.get(field).map(|e| e.kind)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.iter().map(|e| e.field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Field name → message, for form display.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field.as_str().to_string(), e.message.clone()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
