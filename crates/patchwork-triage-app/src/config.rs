//! Project configuration loaded from the repository or an explicit file.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use patchwork_triage_core::DEFAULT_STALE_AFTER_DAYS;
use patchwork_triage_git::DEFAULT_LOG_LIMIT;
use patchwork_triage_pwclient::PwclientConfig;
use serde::Deserialize;

const CONFIG_DIR: &str = ".patchwork-triage";
const CONFIG_FILE: &str = "config.toml";

/// Top-level project configuration loaded from `.patchwork-triage/config.toml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// How to run `pwclient`.
    #[serde(default)]
    pub pwclient: PwclientConfig,
    /// Reconciliation knobs.
    #[serde(default)]
    pub triage: TriageConfig,
    /// States applied by the bulk update flags.
    #[serde(default)]
    pub states: StatesConfig,
}

impl ProjectConfig {
    /// Load configuration from `dir/.patchwork-triage/config.toml`, falling
    /// back to defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read, parsed, or validated.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Load configuration from an explicit file, which must exist.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, malformed, or
    /// holds invalid values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.pwclient.is_runnable() {
            bail!("pwclient.command must name a program");
        }
        self.triage.validate()?;
        self.states.validate()
    }
}

/// Reconciliation knobs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TriageConfig {
    /// Whole days after which a queued patch is reported as stale.
    pub stale_after_days: i64,
    /// Number of commits to compare the queue against.
    pub log_limit: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl TriageConfig {
    fn validate(&self) -> Result<()> {
        if self.stale_after_days < 0 {
            bail!("triage.stale_after_days must not be negative");
        }
        if self.log_limit == 0 {
            bail!("triage.log_limit must be greater than zero");
        }
        Ok(())
    }
}

/// Patchwork states applied by the bulk update flags.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatesConfig {
    /// State for queued patches already found in the commit log.
    pub committed: String,
    /// State for later submissions of an already queued patch.
    pub duplicate: String,
}

impl Default for StatesConfig {
    fn default() -> Self {
        Self {
            committed: "Accepted".into(),
            duplicate: "Not Applicable".into(),
        }
    }
}

impl StatesConfig {
    fn validate(&self) -> Result<()> {
        if self.committed.trim().is_empty() {
            bail!("states.committed must not be blank");
        }
        if self.duplicate.trim().is_empty() {
            bail!("states.duplicate must not be blank");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> Result<PathBuf> {
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        let path = config_dir.join(CONFIG_FILE);
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let config = ProjectConfig::from_dir(dir.path())?;

        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.pwclient.command, vec!["python", "./pwclient"]);
        assert_eq!(config.triage.stale_after_days, 30);
        assert_eq!(config.triage.log_limit, 500);
        assert_eq!(config.states.committed, "Accepted");
        assert_eq!(config.states.duplicate, "Not Applicable");
        Ok(())
    }

    #[test]
    fn partial_file_overrides_only_given_keys() -> Result<()> {
        let dir = TempDir::new()?;
        write_config(
            &dir,
            r#"
[pwclient]
command = ["pwclient"]

[triage]
log_limit = 2000

[states]
duplicate = "Superseded"
"#,
        )?;

        let config = ProjectConfig::from_dir(dir.path())?;
        assert_eq!(config.pwclient.command, vec!["pwclient"]);
        assert_eq!(config.triage.log_limit, 2000);
        assert_eq!(config.triage.stale_after_days, 30);
        assert_eq!(config.states.committed, "Accepted");
        assert_eq!(config.states.duplicate, "Superseded");
        Ok(())
    }

    #[test]
    fn rejects_invalid_values() -> Result<()> {
        for contents in [
            "[pwclient]\ncommand = []\n",
            "[triage]\nstale_after_days = -1\n",
            "[triage]\nlog_limit = 0\n",
            "[states]\ncommitted = \"  \"\n",
            "[unknown]\nkey = 1\n",
        ] {
            let dir = TempDir::new()?;
            let path = write_config(&dir, contents)?;
            assert!(ProjectConfig::from_file(&path).is_err(), "accepted {contents:?}");
        }
        Ok(())
    }

    #[test]
    fn explicit_file_must_exist() -> Result<()> {
        let dir = TempDir::new()?;
        let err = ProjectConfig::from_file(dir.path().join("absent.toml"))
            .err()
            .unwrap_or_else(|| panic!("missing file must fail"));
        assert!(err.to_string().contains("failed to read"));
        Ok(())
    }
}
