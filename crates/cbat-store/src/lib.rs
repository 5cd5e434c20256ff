//! cbat-store — Record store implementations and configuration.
//!
//! Implements the `cbat-core` `RecordStore` trait (in-memory for tests,
//! JSON-file-backed for production), the submission lifecycle, and the
//! application configuration including the admin credential.

pub mod config;
pub mod json;
pub mod memory;
pub mod submit;

pub use config::{load_config, load_config_from, AdminCredential, CbatConfig};
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use submit::{submit, RecordSummary, SubmitOutcome};
