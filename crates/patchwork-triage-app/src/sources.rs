//! Data-source implementations backing [`TriageService`](crate::TriageService).

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use patchwork_triage_core::{CommitLine, PatchId, parse_commit_log};
use patchwork_triage_git::{GitHistory, GitHistoryError};
use patchwork_triage_pwclient::{Pwclient, PwclientError};
use tracing::debug;

use crate::service::{CommitHistory, PatchQueue};

impl PatchQueue for Pwclient {
    type Error = PwclientError;

    fn list_new(&self) -> Result<Vec<String>, Self::Error> {
        Self::list_new(self)
    }

    fn update_state(&self, ids: &[PatchId], state: &str) -> Result<(), Self::Error> {
        self.update(ids, state)
    }
}

impl CommitHistory for GitHistory {
    type Error = GitHistoryError;

    fn recent_commits(&self, rev: &str, limit: usize) -> Result<Vec<CommitLine>, Self::Error> {
        Self::recent_commits(self, rev, limit)
    }
}

/// A saved `git log --oneline` dump used instead of a repository.
#[derive(Debug, Clone)]
pub struct CommitLogFile {
    path: PathBuf,
}

impl CommitLogFile {
    /// Read commits from the dump at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CommitHistory for CommitLogFile {
    type Error = anyhow::Error;

    /// The dump already starts at the revision it was taken from, so `rev` is
    /// only logged.
    fn recent_commits(&self, rev: &str, limit: usize) -> Result<Vec<CommitLine>, Self::Error> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read commit log {}", self.path.display()))?;
        debug!(path = %self.path.display(), rev, "Reading saved commit log");
        let mut commits = parse_commit_log(&text);
        commits.truncate(limit);
        Ok(commits)
    }
}
