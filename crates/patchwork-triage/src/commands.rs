use std::io::Write;

use anyhow::Result;
use patchwork_triage_app::{CommitHistory, PatchQueue, StatesConfig, TriageService};
use patchwork_triage_core::{PatchId, render_report};

use crate::OutputFormat;

/// Flags that shape a single run.
pub struct RunOptions {
    pub format: OutputFormat,
    pub mark_committed: bool,
    pub mark_dup: bool,
    pub states: StatesConfig,
}

/// Reconcile, print the report, then apply the requested bulk updates.
///
/// Committed patches are marked before duplicates; the first failed update
/// aborts the run.
pub fn run<Q: PatchQueue, H: CommitHistory>(
    service: &TriageService<Q, H>,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<()> {
    let report = service.reconcile()?;

    match options.format {
        OutputFormat::Table => render_report(&report, out)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
    }

    if options.mark_committed {
        let state = &options.states.committed;
        let heading = format!("Mark Committed as {state}");
        mark(service, options.format, out, &heading, &report.committed_ids(), state)?;
    }
    if options.mark_dup {
        let state = &options.states.duplicate;
        let heading = format!("Mark Dup as {state}");
        mark(service, options.format, out, &heading, &report.duplicate_ids(), state)?;
    }
    Ok(())
}

fn mark<Q: PatchQueue, H: CommitHistory>(
    service: &TriageService<Q, H>,
    format: OutputFormat,
    out: &mut impl Write,
    heading: &str,
    ids: &[PatchId],
    state: &str,
) -> Result<()> {
    if format == OutputFormat::Table {
        writeln!(out, "{heading}")?;
        writeln!(out, "{}", "=".repeat(heading.chars().count()))?;
    }
    // pwclient writes straight to our stderr; keep the heading ahead of it.
    out.flush()?;
    service.mark(ids, state)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use patchwork_triage_app::TriageSettings;
    use patchwork_triage_core::CommitLine;
    use std::sync::{Arc, Mutex};
    use time::macros::date;

    type Updates = Arc<Mutex<Vec<(Vec<PatchId>, String)>>>;

    struct FakeQueue {
        lines: Vec<String>,
        updates: Updates,
    }

    impl PatchQueue for FakeQueue {
        type Error = anyhow::Error;

        fn list_new(&self) -> Result<Vec<String>, Self::Error> {
            Ok(self.lines.clone())
        }

        fn update_state(&self, ids: &[PatchId], state: &str) -> Result<(), Self::Error> {
            self.updates
                .lock()
                .map_err(|_| anyhow!("poisoned"))?
                .push((ids.to_vec(), state.to_owned()));
            Ok(())
        }
    }

    struct FakeHistory(Vec<CommitLine>);

    impl CommitHistory for FakeHistory {
        type Error = anyhow::Error;

        fn recent_commits(&self, _rev: &str, limit: usize) -> Result<Vec<CommitLine>, Self::Error> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    fn service() -> (TriageService<FakeQueue, FakeHistory>, Updates) {
        let lines = [
            "5  New    2016-02-27 09:00:00   [ovs-dev] netdev: Fix leak",
            "6  New    2016-02-28 09:00:00   [ovs-dev] ofproto: Trim",
            "7  New    2016-02-29 09:00:00   [ovs-dev,v2] ofproto: Trim",
        ];
        let updates = Updates::default();
        let service = TriageService::new(
            FakeQueue {
                lines: lines.iter().map(|l| (*l).to_owned()).collect(),
                updates: Arc::clone(&updates),
            },
            FakeHistory(vec![CommitLine::new("abc1234", "netdev: Fix leak")]),
            TriageSettings {
                rev: "HEAD".into(),
                log_limit: 500,
                stale_after_days: 30,
                today: date!(2016 - 03 - 01),
            },
        );
        (service, updates)
    }

    fn options(format: OutputFormat, mark: bool) -> RunOptions {
        RunOptions {
            format,
            mark_committed: mark,
            mark_dup: mark,
            states: StatesConfig::default(),
        }
    }

    fn recorded(updates: &Updates) -> Vec<(Vec<PatchId>, String)> {
        updates.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    #[test]
    fn table_run_prints_report_and_marks_in_order() -> Result<()> {
        let (service, updates) = service();
        let mut out = Vec::new();

        run(&service, &options(OutputFormat::Table, true), &mut out)?;

        let text = String::from_utf8(out)?;
        let expected = "\
Duplicate Patches in Patchwork
==============================
ID      State  Date                  Name
--      -----  ----                  ----
7  New    2016-02-29 09:00:00   [ovs-dev,v2] ofproto: Trim

Committed Patches in Patchwork
==============================
ID      State  Date                  Name
--      -----  ----                  ----
5  New    2016-02-27 09:00:00   [ovs-dev] netdev: Fix leak

Mark Committed as Accepted
==========================
Mark Dup as Not Applicable
==========================
";
        assert_eq!(text, expected);
        assert_eq!(
            recorded(&updates),
            vec![
                (vec![PatchId(5)], "Accepted".to_owned()),
                (vec![PatchId(7)], "Not Applicable".to_owned()),
            ]
        );
        Ok(())
    }

    #[test]
    fn json_run_prints_only_json() -> Result<()> {
        let (service, updates) = service();
        let mut out = Vec::new();

        run(&service, &options(OutputFormat::Json, false), &mut out)?;

        let value: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(value["stale"], serde_json::json!([]));
        assert_eq!(value["duplicates"][0]["id"], 7);
        assert_eq!(value["committed"][0]["id"], 5);
        assert!(recorded(&updates).is_empty());
        Ok(())
    }
}
