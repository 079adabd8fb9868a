use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static COMMIT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]+) (.*)$").expect("commit line regex is valid"));

/// A commit reduced to what `git log --oneline` shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitLine {
    /// Abbreviated or full hex object id.
    pub hash: String,
    /// Subject line.
    pub message: String,
}

impl CommitLine {
    /// Build a commit line from its parts.
    #[must_use]
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }
}

/// Parse one `HASH MESSAGE` line. Returns `None` for anything else.
#[must_use]
pub fn parse_commit_line(line: &str) -> Option<CommitLine> {
    let caps = COMMIT_LINE.captures(line)?;
    Some(CommitLine::new(&caps[1], &caps[2]))
}

/// Parse a whole `git log --oneline` dump, skipping lines that do not match.
#[must_use]
pub fn parse_commit_log(text: &str) -> Vec<CommitLine> {
    text.lines().filter_map(parse_commit_line).collect()
}
