use std::collections::{HashMap, HashSet};

use time::Date;

use crate::commit_log::CommitLine;
use crate::queue::{PatchId, QueueEntry};

/// Patches older than this many whole days are reported as stale.
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 30;

/// Incrementally classifies queue entries as they stream in.
///
/// The listing is expected oldest first; the first entry seen for a given
/// name stays canonical and every later one is a duplicate.
#[derive(Debug)]
pub struct Reconciler {
    today: Date,
    stale_after_days: i64,
    canonical: HashMap<String, QueueEntry>,
    stale: Vec<QueueEntry>,
    duplicates: Vec<QueueEntry>,
}

impl Reconciler {
    /// Create a reconciler measuring staleness against `today`.
    #[must_use]
    pub fn new(today: Date, stale_after_days: i64) -> Self {
        Self {
            today,
            stale_after_days,
            canonical: HashMap::new(),
            stale: Vec::new(),
            duplicates: Vec::new(),
        }
    }

    /// Classify one entry.
    pub fn push(&mut self, entry: QueueEntry) {
        if self.is_stale(&entry) {
            self.stale.push(entry.clone());
        }
        if self.canonical.contains_key(&entry.name) {
            self.duplicates.push(entry);
        } else {
            self.canonical.insert(entry.name.clone(), entry);
        }
    }

    fn is_stale(&self, entry: &QueueEntry) -> bool {
        (self.today - entry.date).whole_days() > self.stale_after_days
    }

    /// Stop accepting entries.
    #[must_use]
    pub fn finish(self) -> Reconciliation {
        Reconciliation {
            canonical: self.canonical,
            stale: self.stale,
            duplicates: self.duplicates,
        }
    }
}

impl Extend<QueueEntry> for Reconciler {
    fn extend<I: IntoIterator<Item = QueueEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}

/// Outcome of classifying a whole queue listing.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    canonical: HashMap<String, QueueEntry>,
    stale: Vec<QueueEntry>,
    duplicates: Vec<QueueEntry>,
}

impl Reconciliation {
    /// Entries older than the staleness threshold, in listing order.
    #[must_use]
    pub fn stale(&self) -> &[QueueEntry] {
        &self.stale
    }

    /// Later submissions of an already-seen name, in listing order.
    #[must_use]
    pub fn duplicates(&self) -> &[QueueEntry] {
        &self.duplicates
    }

    /// Canonical entry for a patch name, if any.
    #[must_use]
    pub fn canonical(&self, name: &str) -> Option<&QueueEntry> {
        self.canonical.get(name)
    }

    /// Number of distinct patch names.
    #[must_use]
    pub fn canonical_len(&self) -> usize {
        self.canonical.len()
    }

    /// Canonical entries whose name equals a commit subject exactly.
    ///
    /// Results follow commit order; an entry matched by several commits is
    /// returned once.
    pub fn match_commits<'a, I>(&self, commits: I) -> Vec<QueueEntry>
    where
        I: IntoIterator<Item = &'a CommitLine>,
    {
        let mut seen: HashSet<PatchId> = HashSet::new();
        commits
            .into_iter()
            .filter_map(|commit| self.canonical.get(&commit.message))
            .filter(|entry| seen.insert(entry.id))
            .cloned()
            .collect()
    }
}
