use thiserror::Error;

/// Errors raised while reading a Patchwork queue listing.
#[derive(Error, Debug)]
pub enum QueueError {
    /// The listing line matched the expected shape but its date is not `YYYY-MM-DD`.
    #[error("cannot parse date {date:?} in queue line {line:?}: {source}")]
    InvalidDate {
        /// Raw date field.
        date: String,
        /// Full listing line.
        line: String,
        /// Underlying parse failure.
        #[source]
        source: time::error::Parse,
    },

    /// The patch id does not fit in a `u64`.
    #[error("invalid patch id {id:?} in queue line {line:?}")]
    InvalidId {
        /// Raw id field.
        id: String,
        /// Full listing line.
        line: String,
    },
}
