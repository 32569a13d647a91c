//! reassemble — group, validate, order, concatenate, verify.
//!
//! Input is an already-deduplicated set of transport strings. Strings that
//! fail to transcode or decode are dropped with a warning and never abort
//! the batch; each `(file_name, checksum)` group resolves independently.
//!
//! Policy for ambiguous input: an index that appears with differing bodies
//! fails the group as conflicting metadata (byte-identical duplicates are
//! harmless). A checksum mismatch still returns the reconstructed bytes,
//! flagged `verified = false`, so callers can inspect without trusting.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::error::Error;
use crate::frame::{self, checksum::crc32, Frame};
use crate::transport::TextTranscoder;

/// Identity key of one reconstruction group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub file_name: String,
    pub checksum: u32,
}

/// One reconstructed file.
#[derive(Debug, Clone)]
pub struct RecoveredFile {
    pub file_name: String,
    /// CRC-32 the frames claim for the whole file.
    pub checksum: u32,
    /// CRC-32 recomputed over the reconstructed bytes.
    pub actual_checksum: u32,
    pub bytes: Vec<u8>,
    /// True when the recomputed checksum matches the claim.
    pub verified: bool,
}

/// Failure of a single group; other groups are unaffected.
#[derive(Debug)]
pub struct GroupFailure {
    pub file_name: String,
    pub checksum: u32,
    pub error: Error,
}

/// Batch outcome, groups resolved in `(file_name, checksum)` order.
#[derive(Debug, Default)]
pub struct Reassembly {
    pub files: Vec<RecoveredFile>,
    pub failures: Vec<GroupFailure>,
    /// Transport strings dropped as undecodable.
    pub dropped: usize,
}

/// Decode, group, and resolve every file in `codes`.
pub fn reassemble(codes: &[String], transcoder: &dyn TextTranscoder) -> Reassembly {
    let mut groups: BTreeMap<GroupKey, Vec<Frame>> = BTreeMap::new();
    let mut dropped = 0usize;

    for code in codes {
        let decoded = transcoder
            .decode_text(code)
            .and_then(|bytes| frame::decode(&bytes));
        match decoded {
            Ok(f) => {
                let key = GroupKey {
                    file_name: f.file_name.clone(),
                    checksum: f.checksum,
                };
                groups.entry(key).or_default().push(f);
            }
            Err(e) => {
                dropped += 1;
                warn!("dropping undecodable frame: {e}");
            }
        }
    }

    let mut out = Reassembly {
        dropped,
        ..Reassembly::default()
    };
    for (key, frames) in groups {
        match resolve_group(&key, &frames) {
            Ok(file) => out.files.push(file),
            Err(error) => out.failures.push(GroupFailure {
                file_name: key.file_name,
                checksum: key.checksum,
                error,
            }),
        }
    }

    info!(
        "reassembly: {} file(s) reconstructed, {} group failure(s), {} dropped frame(s)",
        out.files.len(),
        out.failures.len(),
        out.dropped
    );
    out
}

fn resolve_group(key: &GroupKey, frames: &[Frame]) -> Result<RecoveredFile, Error> {
    let conflict = |detail: String| Error::ConflictingMetadata {
        file_name: key.file_name.clone(),
        checksum: key.checksum,
        detail,
    };

    // Groups are only created from at least one frame.
    let count = frames.first().map(|f| f.count).unwrap_or(0);
    let mut counts: Vec<u32> = frames.iter().map(|f| f.count).collect();
    counts.sort_unstable();
    counts.dedup();
    if counts.len() > 1 {
        return Err(conflict(format!("frames disagree on count: {counts:?}")));
    }
    if count == 0 {
        return Err(conflict("frames claim count = 0".to_string()));
    }

    let mut by_index: BTreeMap<u32, &Frame> = BTreeMap::new();
    for f in frames {
        if f.index >= count {
            return Err(conflict(format!(
                "index {} out of range for count {}",
                f.index, count
            )));
        }
        match by_index.get(&f.index) {
            Some(prev) if prev.body != f.body => {
                return Err(conflict(format!(
                    "index {} appears with differing bodies",
                    f.index
                )));
            }
            Some(_) => {} // byte-identical duplicate, harmless
            None => {
                by_index.insert(f.index, f);
            }
        }
    }

    let found: Vec<u32> = by_index.keys().copied().collect();
    let missing: Vec<u32> = (0..count).filter(|i| !by_index.contains_key(i)).collect();
    if !missing.is_empty() {
        return Err(Error::MissingParts {
            file_name: key.file_name.clone(),
            checksum: key.checksum,
            count,
            missing,
            found,
        });
    }

    let total: usize = by_index.values().map(|f| f.body.len()).sum();
    let mut bytes = Vec::with_capacity(total);
    for f in by_index.values() {
        bytes.extend_from_slice(&f.body);
    }

    let actual = crc32(&bytes);
    let verified = actual == key.checksum;
    if verified {
        debug!(
            "group '{}': {} part(s), {} B, checksum ok",
            key.file_name, count, total
        );
    } else {
        warn!(
            "group '{}': checksum mismatch, expected {:#010x}, got {actual:#010x}",
            key.file_name, key.checksum
        );
    }

    Ok(RecoveredFile {
        file_name: key.file_name.clone(),
        checksum: key.checksum,
        actual_checksum: actual,
        bytes,
        verified,
    })
}
