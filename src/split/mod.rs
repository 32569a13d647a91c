//! split — partition a file into barcode-sized frames.
//!
//! The capacity budget is the total encoded frame length allowed into one
//! symbol. Every non-final frame carries exactly `budget - overhead` body
//! bytes; a short final frame is padded so its total encoded length equals
//! the others.

use log::debug;

use crate::consts::FRAME_FIXED_HDR;
use crate::error::{Error, Result};
use crate::frame::{checksum::crc32, Frame};

/// Symbol robustness level, strongest to weakest.
///
/// Budgets are total encoded frame bytes per symbol, derived from the QR
/// version-40 alphanumeric character capacity at the matching EC level,
/// divided through the radix-32 expansion (5 bytes per 8 characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobustnessLevel {
    High,
    Quartile,
    Medium,
    Low,
}

impl RobustnessLevel {
    /// All levels, strongest first.
    pub const ALL: [RobustnessLevel; 4] = [
        RobustnessLevel::High,
        RobustnessLevel::Quartile,
        RobustnessLevel::Medium,
        RobustnessLevel::Low,
    ];

    /// Total encoded frame bytes that fit one symbol at this level.
    pub fn budget(self) -> usize {
        match self {
            RobustnessLevel::High => 1157,     // 1852 chars
            RobustnessLevel::Quartile => 1512, // 2420 chars
            RobustnessLevel::Medium => 2119,   // 3391 chars
            RobustnessLevel::Low => 2685,      // 4296 chars
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RobustnessLevel::High => "high",
            RobustnessLevel::Quartile => "quartile",
            RobustnessLevel::Medium => "medium",
            RobustnessLevel::Low => "low",
        }
    }
}

impl Default for RobustnessLevel {
    fn default() -> Self {
        RobustnessLevel::High
    }
}

impl std::fmt::Display for RobustnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RobustnessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(RobustnessLevel::High),
            "quartile" | "q" => Ok(RobustnessLevel::Quartile),
            "medium" | "m" => Ok(RobustnessLevel::Medium),
            "low" | "l" => Ok(RobustnessLevel::Low),
            other => Err(Error::format(format!(
                "unknown robustness level '{other}' (high|quartile|medium|low)"
            ))),
        }
    }
}

/// Split `data` into an ordered frame sequence for `file_name`.
///
/// An empty file still yields exactly one frame with an empty body and
/// `count = 1`.
pub fn split(data: &[u8], file_name: &str, level: RobustnessLevel) -> Result<Vec<Frame>> {
    if file_name.is_empty() {
        return Err(Error::format("file name must not be empty"));
    }
    if file_name.as_bytes().contains(&0) {
        return Err(Error::format("file name must not contain NUL"));
    }

    let budget = level.budget();
    // A zero-body, zero-padding frame for this name.
    let overhead = FRAME_FIXED_HDR + file_name.len() + 1;
    if overhead >= budget {
        return Err(Error::Capacity {
            file_name: file_name.to_string(),
            overhead,
            budget,
        });
    }
    let body_cap = budget - overhead;

    let checksum = crc32(data);
    let full_parts = data.len() / body_cap;
    let last_len = data.len() % body_cap;
    let count = if last_len == 0 {
        full_parts.max(1)
    } else {
        full_parts + 1
    };
    let count32 = u32::try_from(count)
        .map_err(|_| Error::format(format!("{count} frames exceed the u32 sequence space")))?;

    let mut frames = Vec::with_capacity(count);
    for index in 0..count {
        let start = index * body_cap;
        let end = (start + body_cap).min(data.len());
        let padding = if last_len > 0 && index == count - 1 {
            (body_cap - last_len) as u32
        } else {
            0
        };
        frames.push(Frame {
            checksum,
            count: count32,
            index: index as u32,
            file_name: file_name.to_string(),
            padding,
            body: data[start..end].to_vec(),
        });
    }

    debug!(
        "split '{}': {} B -> {} frame(s), body capacity {} B at level {}",
        file_name,
        data.len(),
        count,
        body_cap,
        level
    );
    Ok(frames)
}
