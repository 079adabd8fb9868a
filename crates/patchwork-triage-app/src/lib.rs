//! Application layer for patchwork-triage.
//!
//! This crate wires the pure reconciliation logic to its data sources and
//! loads project configuration.

pub mod config;
pub mod service;
pub mod sources;

// Re-exports for convenience
pub use config::{ProjectConfig, StatesConfig, TriageConfig};
pub use service::{CommitHistory, PatchQueue, TriageService, TriageSettings};
pub use sources::CommitLogFile;
