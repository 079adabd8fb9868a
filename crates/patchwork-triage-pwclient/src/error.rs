//! Error types for pwclient invocations

use std::io;

/// Result type for pwclient operations
pub type Result<T> = std::result::Result<T, PwclientError>;

/// Errors that can occur while running pwclient
#[derive(Debug, thiserror::Error)]
pub enum PwclientError {
    /// The child process could not be started
    #[error("'pwclient {action}' run error: {source}")]
    Spawn {
        /// Subcommand being run
        action: &'static str,
        /// Underlying spawn failure
        #[source]
        source: io::Error,
    },

    /// The child process exited unsuccessfully
    #[error("'pwclient {action}' exit error: {status}{}", format_stderr(.stderr))]
    Failed {
        /// Subcommand being run
        action: &'static str,
        /// Exit status description
        status: String,
        /// Captured standard error (empty when passed through)
        stderr: String,
    },

    /// pwclient configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
