use std::io::{self, Write};

use serde::Serialize;

use crate::queue::{PatchId, QueueEntry};
use crate::reconcile::Reconciliation;

const HEADER: &str = "ID      State  Date                  Name";
const RULE: &str = "--      -----  ----                  ----";

/// Everything a triage run found, in report order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Threshold used for the stale table.
    #[serde(skip)]
    pub stale_after_days: i64,
    /// Entries older than the threshold.
    pub stale: Vec<QueueEntry>,
    /// Later submissions of an already queued name.
    pub duplicates: Vec<QueueEntry>,
    /// Canonical entries whose name appears in the commit log.
    pub committed: Vec<QueueEntry>,
}

impl Report {
    /// Assemble a report from a reconciliation and its commit matches.
    #[must_use]
    pub fn new(reconciliation: &Reconciliation, committed: Vec<QueueEntry>, stale_after_days: i64) -> Self {
        Self {
            stale_after_days,
            stale: reconciliation.stale().to_vec(),
            duplicates: reconciliation.duplicates().to_vec(),
            committed,
        }
    }

    /// Ids of duplicate entries, in listing order.
    #[must_use]
    pub fn duplicate_ids(&self) -> Vec<PatchId> {
        self.duplicates.iter().map(|entry| entry.id).collect()
    }

    /// Ids of committed entries, in commit order.
    #[must_use]
    pub fn committed_ids(&self) -> Vec<PatchId> {
        self.committed.iter().map(|entry| entry.id).collect()
    }

    /// True when no table would be printed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stale.is_empty() && self.duplicates.is_empty() && self.committed.is_empty()
    }
}

/// Write the stale, duplicate, and committed tables. Empty tables are omitted.
///
/// # Errors
/// Propagates write failures from `out`.
pub fn render_report(report: &Report, out: &mut impl Write) -> io::Result<()> {
    let stale_title = format!("{}+ Day Old Patches", report.stale_after_days);
    render_table(out, &stale_title, &report.stale)?;
    render_table(out, "Duplicate Patches in Patchwork", &report.duplicates)?;
    render_table(out, "Committed Patches in Patchwork", &report.committed)
}

fn render_table(out: &mut impl Write, title: &str, entries: &[QueueEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{RULE}")?;
    for entry in entries {
        writeln!(out, "{}", entry.line)?;
    }
    writeln!(out)
}
