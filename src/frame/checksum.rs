//! Whole-file integrity code.
//!
//! CRC-32 with the ISO-HDLC polynomial (the one used by zip/zlib/png),
//! standard initial value, no extra seeding.

use crc32fast::Hasher;

/// CRC-32 of `bytes`. Deterministic, no failure mode.
#[inline]
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut h = Hasher::new();
    h.update(bytes);
    h.finalize()
}
