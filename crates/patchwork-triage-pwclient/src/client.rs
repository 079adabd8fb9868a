//! pwclient execution logic

use crate::{PwclientConfig, PwclientError, Result};
use patchwork_triage_core::PatchId;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

/// State filter passed to `pwclient list -s`
pub const LIST_STATE: &str = "NEW";

/// Column layout requested from `pwclient list -f`
pub const LIST_FORMAT: &str = "%{id}  %{state}    %{date}   %{name}";

/// Runs the Patchwork command-line client
#[derive(Debug, Clone)]
pub struct Pwclient {
    config: PwclientConfig,
}

impl Pwclient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `PwclientError::Config` when no program is configured
    pub fn new(config: PwclientConfig) -> Result<Self> {
        if !config.is_runnable() {
            return Err(PwclientError::Config("pwclient command must not be empty".to_owned()));
        }
        Ok(Self { config })
    }

    /// List every `New` patch, one raw line per patch
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits non-zero
    pub fn list_new(&self) -> Result<Vec<String>> {
        let mut cmd = self.command(["list", "-s", LIST_STATE, "-f", LIST_FORMAT]);
        debug!(?cmd, "running pwclient list");

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|source| PwclientError::Spawn { action: "list", source })?;
        check_status("list", output.status, &String::from_utf8_lossy(&output.stderr))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<String> = stdout.lines().map(str::to_owned).collect();
        debug!(lines = lines.len(), "pwclient list finished");
        Ok(lines)
    }

    /// Set every patch in `ids` to `state` with a single `pwclient update` call
    ///
    /// The child's stderr is passed through to ours.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits non-zero
    pub fn update(&self, ids: &[PatchId], state: &str) -> Result<()> {
        let mut cmd = self.command(["update", "-s", state]);
        cmd.args(ids.iter().map(ToString::to_string));
        info!(count = ids.len(), state, "running pwclient update");
        debug!(?cmd, "running pwclient update");

        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| PwclientError::Spawn { action: "update", source })?;
        check_status("update", status, "")
    }

    fn command<'a>(&self, args: impl IntoIterator<Item = &'a str>) -> Command {
        let (program, leading) = self
            .config
            .command
            .split_first()
            .map_or(("", &[][..]), |(program, rest)| (program.as_str(), rest));
        let mut cmd = Command::new(program);
        cmd.args(leading).args(args);
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

fn check_status(action: &'static str, status: ExitStatus, stderr: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(PwclientError::Failed {
        action,
        status: status.to_string(),
        stderr: stderr.to_owned(),
    })
}
