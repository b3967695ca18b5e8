//! Session configuration.

use crate::report::{ReportOptions, DEFAULT_PATIENT_NAME};

/// Application-level constants
pub const APP_NAME: &str = "Symptom Log";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Patient name printed in the report header.
pub const PATIENT_ENV: &str = "SYMPTOM_LOG_PATIENT";

/// Whether a new session starts with the example entries.
pub const SEED_ENV: &str = "SYMPTOM_LOG_SEED";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_log_core=info"
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub patient_name: String,
    pub seed_examples: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            patient_name: DEFAULT_PATIENT_NAME.to_string(),
            seed_examples: true,
        }
    }
}

impl SessionConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(PATIENT_ENV) {
            let name = name.trim();
            if !name.is_empty() {
                config.patient_name = name.to_string();
            }
        }

        if let Some(raw) = lookup(SEED_ENV) {
            match parse_flag(&raw) {
                Some(seed) => config.seed_examples = seed,
                None => tracing::warn!(
                    value = %raw,
                    "Ignoring unrecognized {} value",
                    SEED_ENV
                ),
            }
        }

        config
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions::for_patient(self.patient_name.clone())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
