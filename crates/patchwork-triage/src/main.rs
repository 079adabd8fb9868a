//! CLI entry point for patchwork-triage.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use time::OffsetDateTime;
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::format::FmtSpan,
};

use commands::RunOptions;
use patchwork_triage_app::{CommitLogFile, ProjectConfig, TriageService, TriageSettings};
use patchwork_triage_git::GitHistory;
use patchwork_triage_pwclient::Pwclient;

mod commands;

/// Reconcile the Patchwork `New` queue against git history.
#[derive(Parser, Debug)]
#[command(
    name = "patchwork-triage",
    version,
    about = "Find stale, duplicate, and already committed patches in a Patchwork queue"
)]
struct Cli {
    /// Path to the git repository patches are merged into.
    #[arg(long, visible_alias = "ovs-dir", required_unless_present = "commit_log")]
    repo: Option<PathBuf>,

    /// Commit to start the check for committed patches from.
    #[arg(long, visible_alias = "ovs-commit", required_unless_present = "commit_log")]
    commit: Option<String>,

    /// Saved `git log --oneline` output to match against instead of the repository.
    #[arg(long, value_name = "FILE")]
    commit_log: Option<PathBuf>,

    /// Configuration file (defaults to <repo>/.patchwork-triage/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Mark committed patches with the configured state ("Accepted").
    #[arg(long)]
    mark_committed: bool,

    /// Mark duplicate patches with the configured state ("Not Applicable").
    #[arg(long)]
    mark_dup: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.repo.as_deref())?;
    let settings = TriageSettings {
        rev: cli.commit.clone().unwrap_or_else(|| "HEAD".to_owned()),
        log_limit: config.triage.log_limit,
        stale_after_days: config.triage.stale_after_days,
        today: OffsetDateTime::now_utc().date(),
    };
    let options = RunOptions {
        format: cli.format,
        mark_committed: cli.mark_committed,
        mark_dup: cli.mark_dup,
        states: config.states,
    };
    let queue = Pwclient::new(config.pwclient)?;
    let mut out = io::stdout().lock();

    match (cli.commit_log, cli.repo) {
        (Some(path), _) => {
            let service = TriageService::new(queue, CommitLogFile::new(path), settings);
            commands::run(&service, &options, &mut out)
        }
        (None, Some(repo)) => {
            let service = TriageService::new(queue, GitHistory::open(&repo)?, settings);
            commands::run(&service, &options, &mut out)
        }
        (None, None) => anyhow::bail!("must provide option --repo"),
    }
}

fn load_config(explicit: Option<&Path>, repo: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => ProjectConfig::from_file(path),
        None => ProjectConfig::from_dir(repo.unwrap_or_else(|| Path::new("."))),
    }
}

/// Filter for `RUST_LOG`-style directives, INFO when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn install_tracing() {
    // Logs go to stderr so stdout stays a clean report.
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}
