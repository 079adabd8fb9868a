//! End-to-end runs of the binary against a fake pwclient and a saved commit log.
#![cfg(unix)]
#![allow(missing_docs)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LISTING: &str = "\
100  New    2015-06-01 09:00:00   [ovs-dev] netdev: Fix leak
101  New    2015-06-02 09:00:00   [ovs-dev] ofproto: Trim
102  New    2015-06-03 09:00:00   [ovs-dev,v2] netdev: Fix leak
";

/// Lays out a fake `pwclient` that prints `LISTING` and records update calls,
/// a saved commit log, and a config pointing at both.
fn workspace() -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = TempDir::new()?;
    let root = dir.path();

    fs::write(root.join("listing.txt"), LISTING)?;
    fs::write(
        root.join("pwclient"),
        r#"case "$1" in
  list) cat listing.txt ;;
  update) printf '%s\n' "$*" >> updates.txt ;;
esac
"#,
    )?;
    fs::write(root.join("log.txt"), "0a1b2c3 ofproto: Trim\n4d5e6f7 unrelated\n")?;

    let config = root.join("config.toml");
    fs::write(
        &config,
        format!(
            "[pwclient]\ncommand = [\"sh\", \"{}\"]\nworking_dir = \"{}\"\n",
            root.join("pwclient").display(),
            root.display()
        ),
    )?;
    let log = root.join("log.txt");
    Ok((dir, config, log))
}

fn triage(config: &Path, log: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("patchwork-triage")?;
    cmd.arg("--config").arg(config).arg("--commit-log").arg(log);
    Ok(cmd)
}

#[test]
fn prints_all_three_tables() -> Result<()> {
    let (_dir, config, log) = workspace()?;

    let output = triage(&config, &log)?.output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let stale = stdout.find("30+ Day Old Patches").unwrap_or(usize::MAX);
    let duplicate = stdout.find("Duplicate Patches in Patchwork").unwrap_or(usize::MAX);
    let committed = stdout.find("Committed Patches in Patchwork").unwrap_or(usize::MAX);
    assert!(stale < duplicate && duplicate < committed, "unexpected order:\n{stdout}");
    assert!(stdout.contains("\n102  New    2015-06-03 09:00:00   [ovs-dev,v2] netdev: Fix leak\n"));
    assert!(stdout.contains("\n101  New    2015-06-02 09:00:00   [ovs-dev] ofproto: Trim\n\n"));
    Ok(())
}

#[test]
fn marks_committed_then_duplicates() -> Result<()> {
    let (dir, config, log) = workspace()?;

    triage(&config, &log)?
        .args(["--mark-committed", "--mark-dup", "--format", "json"])
        .assert()
        .success();

    let updates = fs::read_to_string(dir.path().join("updates.txt"))?;
    assert_eq!(updates, "update -s Accepted 101\nupdate -s Not Applicable 102\n");
    Ok(())
}

#[test]
fn failing_pwclient_aborts_the_run() -> Result<()> {
    let (dir, config, log) = workspace()?;
    fs::write(dir.path().join("pwclient"), "echo 'connection refused' >&2\nexit 1\n")?;

    let output = triage(&config, &log)?.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("connection refused"));
    Ok(())
}
