//! Read-only access to the commit history patches are merged into.

mod error;

pub use error::GitHistoryError;

use git2::{Repository, Sort};
use patchwork_triage_core::CommitLine;
use std::path::Path;
use tracing::{debug, info};

/// Commits inspected per run unless configured otherwise.
pub const DEFAULT_LOG_LIMIT: usize = 500;

const SHORT_HASH_LEN: usize = 7;

/// Commit history of a local repository.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Discover and open the repository from `cwd_or_repo`.
    ///
    /// # Errors
    /// Returns an error if a Git repository cannot be discovered from the given path.
    pub fn open(cwd_or_repo: impl AsRef<Path>) -> Result<Self, GitHistoryError> {
        let path = cwd_or_repo.as_ref();
        let repo = Repository::discover(path).map_err(|source| GitHistoryError::Discover {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { repo })
    }

    /// Up to `limit` commits reachable from `rev`, newest first, as
    /// `git log --oneline -n <limit> <rev>` would list them.
    ///
    /// # Errors
    /// Returns an error if `rev` does not name a commit or history cannot be traversed.
    pub fn recent_commits(&self, rev: &str, limit: usize) -> Result<Vec<CommitLine>, GitHistoryError> {
        let start = self
            .repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|source| GitHistoryError::UnknownRevision {
                rev: rev.to_owned(),
                source,
            })?;

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        walk.push(start.id())?;

        let mut out = Vec::new();
        for oid in walk.take(limit) {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let Some(summary) = commit.summary() else {
                debug!(%oid, "Skipping commit without a UTF-8 subject");
                continue;
            };
            let hash = oid.to_string();
            let short = hash.get(..SHORT_HASH_LEN).unwrap_or(&hash);
            out.push(CommitLine::new(short, summary));
        }

        info!(rev, count = out.len(), "Read commit history");
        Ok(out)
    }
}
