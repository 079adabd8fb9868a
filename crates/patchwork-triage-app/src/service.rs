//! Triage orchestration over pluggable queue and history sources.

use anyhow::{Context, Error, Result};
use patchwork_triage_core::{CommitLine, PatchId, Reconciler, Report, parse_queue_line};
use time::Date;
use tracing::{debug, info};

/// Source of the Patchwork `New` queue and sink for state updates.
pub trait PatchQueue {
    /// Error type bubbled up from the backing client.
    type Error: Into<Error>;

    /// Raw listing lines, oldest submission first.
    ///
    /// # Errors
    /// Returns a client-specific error when the listing cannot be fetched.
    fn list_new(&self) -> Result<Vec<String>, Self::Error>;

    /// Move every patch in `ids` to `state` in one request.
    ///
    /// # Errors
    /// Returns a client-specific error when the update is rejected.
    fn update_state(&self, ids: &[PatchId], state: &str) -> Result<(), Self::Error>;
}

/// Source of recently merged commit subjects.
pub trait CommitHistory {
    /// Error type bubbled up from the backing history.
    type Error: Into<Error>;

    /// Up to `limit` commits reachable from `rev`, newest first.
    ///
    /// # Errors
    /// Returns a history-specific error when the log cannot be read.
    fn recent_commits(&self, rev: &str, limit: usize) -> Result<Vec<CommitLine>, Self::Error>;
}

/// Per-run inputs that are not data sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageSettings {
    /// Revision the commit log starts from.
    pub rev: String,
    /// Maximum number of commits to inspect.
    pub log_limit: usize,
    /// Whole days after which a patch is stale.
    pub stale_after_days: i64,
    /// Date staleness is measured against.
    pub today: Date,
}

/// Drives one triage run over a patch queue and a commit history.
pub struct TriageService<Q, H> {
    queue: Q,
    history: H,
    settings: TriageSettings,
}

impl<Q, H> TriageService<Q, H> {
    /// Build a service over the given sources.
    #[must_use]
    pub const fn new(queue: Q, history: H, settings: TriageSettings) -> Self {
        Self {
            queue,
            history,
            settings,
        }
    }
}

impl<Q: PatchQueue, H: CommitHistory> TriageService<Q, H> {
    /// Fetch the queue, classify it, then match it against the commit log.
    ///
    /// # Errors
    /// Returns an error if the queue cannot be listed, a queue line carries an
    /// invalid date or id, or the commit log cannot be read.
    pub fn reconcile(&self) -> Result<Report> {
        let lines = self
            .queue
            .list_new()
            .map_err(Into::<Error>::into)
            .context("failed to list the patch queue")?;

        let mut reconciler = Reconciler::new(self.settings.today, self.settings.stale_after_days);
        let mut skipped = 0_usize;
        for line in &lines {
            match parse_queue_line(line)? {
                Some(entry) => reconciler.push(entry),
                None => {
                    skipped += 1;
                    debug!(line = %line, "Ignoring non-queue line");
                }
            }
        }
        let reconciliation = reconciler.finish();
        info!(
            lines = lines.len(),
            skipped,
            distinct = reconciliation.canonical_len(),
            stale = reconciliation.stale().len(),
            duplicates = reconciliation.duplicates().len(),
            "Classified patch queue"
        );

        let commits = self
            .history
            .recent_commits(&self.settings.rev, self.settings.log_limit)
            .map_err(Into::<Error>::into)
            .with_context(|| format!("failed to read commit log from {}", self.settings.rev))?;
        let committed = reconciliation.match_commits(&commits);
        info!(
            commits = commits.len(),
            committed = committed.len(),
            "Matched commit log"
        );

        Ok(Report::new(
            &reconciliation,
            committed,
            self.settings.stale_after_days,
        ))
    }

    /// Set `ids` to `state`. Returns `false` without calling the queue when
    /// there is nothing to update.
    ///
    /// # Errors
    /// Returns an error if the queue rejects the update.
    pub fn mark(&self, ids: &[PatchId], state: &str) -> Result<bool> {
        if ids.is_empty() {
            info!(state, "No patches to mark");
            return Ok(false);
        }
        self.queue
            .update_state(ids, state)
            .map_err(Into::<Error>::into)
            .with_context(|| format!("failed to mark {} patch(es) as {state}", ids.len()))?;
        info!(count = ids.len(), state, "Marked patches");
        Ok(true)
    }
}
