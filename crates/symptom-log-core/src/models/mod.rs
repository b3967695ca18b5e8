//! Domain models for the symptom log.

mod candidate;
mod entry;

pub use candidate::*;
pub use entry::*;
