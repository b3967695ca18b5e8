//! Print the clinical summary report for a new session.
//!
//! Usage: `symptom-report [text|json|csv]`
//!
//! Patient name and seeding come from `SYMPTOM_LOG_PATIENT` and
//! `SYMPTOM_LOG_SEED`; log verbosity from `RUST_LOG`.

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use symptom_log_core::config::{self, SessionConfig};
use symptom_log_core::{compose_report, LogStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} report v{}", config::APP_NAME, config::APP_VERSION);

    let format = std::env::args().nth(1).unwrap_or_else(|| "text".to_string());

    let session = SessionConfig::from_env();
    let store = if session.seed_examples {
        LogStore::with_examples()
    } else {
        LogStore::new()
    };

    let report = compose_report(store.list(), &session.report_options());

    let output = match format.as_str() {
        "text" => report.to_text(),
        "json" => report.to_json().context("failed to serialize report")?,
        "csv" => report.to_csv(),
        other => bail!("unknown format '{}', expected text, json or csv", other),
    };

    print!("{}", output);
    Ok(())
}
