//! Error taxonomy for encode/decode runs.
//!
//! Per-frame failures (`Format`) are dropped with a warning while
//! collecting; per-group failures (`ConflictingMetadata`, `MissingParts`)
//! fail only their reconstruction group; `Io` and `Capacity` are fatal to
//! the run or the encode job. `Corruption` is always surfaced, never
//! swallowed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Unreadable or unwritable path; aborts the whole run.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed frame bytes or invalid encode-side input.
    #[error("malformed frame: {reason}")]
    Format { reason: String },

    /// The file name's header overhead does not fit the symbol budget.
    #[error(
        "'{file_name}': header overhead {overhead} B leaves no body room \
         in a {budget} B symbol budget"
    )]
    Capacity {
        file_name: String,
        overhead: usize,
        budget: usize,
    },

    /// Frames of one group disagree on count, or an index carries
    /// conflicting bodies.
    #[error("group '{file_name}' (crc32 {checksum:#010x}): {detail}")]
    ConflictingMetadata {
        file_name: String,
        checksum: u32,
        detail: String,
    },

    /// Incomplete index coverage; no partial file is ever written.
    #[error(
        "group '{file_name}' (crc32 {checksum:#010x}): missing part(s) \
         {missing:?} of {count}, found {found:?}"
    )]
    MissingParts {
        file_name: String,
        checksum: u32,
        count: u32,
        missing: Vec<u32>,
        found: Vec<u32>,
    },

    /// Whole-file checksum mismatch after reassembly.
    #[error(
        "group '{file_name}': checksum mismatch, expected {expected:#010x}, \
         got {actual:#010x}"
    )]
    Corruption {
        file_name: String,
        expected: u32,
        actual: u32,
    },
}

impl Error {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Error::Format {
            reason: reason.into(),
        }
    }
}
