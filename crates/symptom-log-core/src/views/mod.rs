//! Derived views over the log store.
//!
//! Pure functions of `LogStore::list()`. Recomputed on every read; nothing
//! here is cached or stored.

mod summary;
mod timeline;

pub use summary::*;
pub use timeline::*;
