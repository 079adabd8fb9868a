//! Error types for reading commit history.

use thiserror::Error;

/// Errors that can occur while reading history through `GitHistory`.
#[derive(Error, Debug)]
pub enum GitHistoryError {
    /// No repository could be discovered from the given path.
    #[error("Failed to discover git repository at {path}: {source}")]
    Discover {
        /// Path the search started from.
        path: String,
        /// Underlying git error.
        #[source]
        source: git2::Error,
    },

    /// The starting revision does not resolve to a commit.
    #[error("Cannot resolve commit {rev}: {source}")]
    UnknownRevision {
        /// Revision as given by the user.
        rev: String,
        /// Underlying git error.
        #[source]
        source: git2::Error,
    },

    /// Git repository error.
    #[error("Git repository error: {0}")]
    GitError(#[from] git2::Error),
}
