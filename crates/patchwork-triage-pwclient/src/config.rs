//! pwclient configuration

use serde::Deserialize;
use std::path::PathBuf;

/// How to invoke `pwclient`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PwclientConfig {
    /// Program followed by leading arguments, e.g. `["python", "./pwclient"]`
    pub command: Vec<String>,

    /// Directory to run the client in (defaults to the current directory)
    pub working_dir: Option<PathBuf>,
}

impl Default for PwclientConfig {
    fn default() -> Self {
        Self {
            command: vec!["python".to_owned(), "./pwclient".to_owned()],
            working_dir: None,
        }
    }
}

impl PwclientConfig {
    /// Check that a program is configured
    #[must_use]
    pub fn is_runnable(&self) -> bool {
        self.command.first().is_some_and(|program| !program.trim().is_empty())
    }
}
