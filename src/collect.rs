//! collect — merge candidate transport strings from scans and code lists.
//!
//! Exact string equality collapses duplicates within and across sources:
//! the same frame scanned twice, or scanned once and also transcribed into
//! a text file, survives as one entry. First sighting wins the position;
//! output order is not significant to correctness.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;

/// Exact-duplicate collapsing accumulator for candidate frames.
#[derive(Debug)]
pub struct Collector {
    prefix: String,
    seen: HashSet<String>,
    codes: Vec<String>,
}

impl Collector {
    /// `prefix` is the transport token every candidate line must start
    /// with (see `transport::code_prefix`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Collector {
            prefix: prefix.into(),
            seen: HashSet::new(),
            codes: Vec::new(),
        }
    }

    /// Add one candidate string. Returns true if it was new.
    pub fn add(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if self.seen.contains(&code) {
            return false;
        }
        self.seen.insert(code.clone());
        self.codes.push(code);
        true
    }

    /// Read a codes file: one candidate per line; only trimmed lines
    /// starting with the transport prefix qualify. Returns how many new
    /// entries the file contributed.
    pub fn add_codes_file(&mut self, path: &Path) -> Result<usize> {
        let text = fs::read_to_string(path)?;
        let mut added = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || !line.starts_with(&self.prefix) {
                continue;
            }
            if self.add(line) {
                added += 1;
            }
        }
        debug!(
            "codes file {}: {} new candidate(s), {} total",
            path.display(),
            added,
            self.codes.len()
        );
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Hand over the merged set, insertion order preserved.
    pub fn into_codes(self) -> Vec<String> {
        self.codes
    }
}
