use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use time::Date;
use time::macros::format_description;

use crate::error::QueueError;

/// State label Patchwork prints for patches waiting for review.
pub const NEW_STATE: &str = "New";

/// `pwclient list -f "%{id}  %{state}    %{date}   %{name}"` prints
/// `ID  New    YYYY-MM-DD HH:MM:SS   [tag] NAME`.
#[allow(clippy::expect_used)]
static QUEUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^([0-9]+)  {}    ([-0-9]+) .*   \[.*\] (.*)$",
        regex::escape(NEW_STATE)
    );
    Regex::new(&pattern).expect("queue line regex is valid")
});

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Numeric identifier Patchwork assigns to a patch.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct PatchId(pub u64);

impl fmt::Display for PatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PatchId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// One `New` patch from the Patchwork queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    /// Patchwork id.
    pub id: PatchId,
    /// Submission date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Patch subject with the `[tag]` prefix stripped.
    pub name: String,
    /// Listing line exactly as `pwclient` printed it.
    pub line: String,
}

/// Parse a single `pwclient list` line.
///
/// Returns `Ok(None)` for lines that are not `New` queue entries (headers,
/// other states, blank lines).
///
/// # Errors
/// Returns [`QueueError`] when a matching line carries an unparsable date or id.
pub fn parse_queue_line(line: &str) -> Result<Option<QueueEntry>, QueueError> {
    let Some(caps) = QUEUE_LINE.captures(line) else {
        return Ok(None);
    };
    let (raw_id, raw_date, name) = (&caps[1], &caps[2], &caps[3]);

    let id: PatchId = raw_id.parse().map_err(|_| QueueError::InvalidId {
        id: raw_id.to_owned(),
        line: line.to_owned(),
    })?;
    let date = Date::parse(raw_date, format_description!("[year]-[month]-[day]")).map_err(|source| {
        QueueError::InvalidDate {
            date: raw_date.to_owned(),
            line: line.to_owned(),
            source,
        }
    })?;

    Ok(Some(QueueEntry {
        id,
        date,
        name: name.to_owned(),
        line: line.to_owned(),
    }))
}
