//! Domain types & reconciliation logic for patchwork-triage.
//!
//! Everything in this crate is pure: callers feed it the raw text produced by
//! `pwclient list` and `git log --oneline` (or equivalent sources) together
//! with the run date, and get back which queue entries are stale, duplicated,
//! or already committed.

/// Commit log line parsing.
pub mod commit_log;
/// Error types.
pub mod error;
/// Patchwork queue listing parsing.
pub mod queue;
/// Duplicate, staleness, and commit reconciliation.
pub mod reconcile;
/// Plain-text report rendering.
pub mod report;

pub use commit_log::{CommitLine, parse_commit_line, parse_commit_log};
pub use error::QueueError;
pub use queue::{NEW_STATE, PatchId, QueueEntry, parse_queue_line};
pub use reconcile::{DEFAULT_STALE_AFTER_DAYS, Reconciler, Reconciliation};
pub use report::{Report, render_report};
