//! Frame model and byte codec.

pub mod checksum;
pub mod codec;

pub use checksum::crc32;
pub use codec::{decode, encode};

use crate::consts::FRAME_FIXED_HDR;

/// One chunk of a split file.
///
/// All frames of one file share `(file_name, checksum, count)`; `index` is
/// unique within the group. `padding` counts the zero filler bytes between
/// the name's NUL terminator and the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// CRC-32 of the entire original file, identical across the group.
    pub checksum: u32,
    /// Total number of frames in the file's sequence.
    pub count: u32,
    /// Zero-based position of this frame.
    pub index: u32,
    /// Original file name (non-empty UTF-8, no embedded NUL).
    pub file_name: String,
    /// Zero filler bytes after the name terminator.
    pub padding: u32,
    /// This frame's slice of the original file.
    pub body: Vec<u8>,
}

impl Frame {
    /// Byte length of everything preceding the body.
    pub fn header_size(&self) -> usize {
        FRAME_FIXED_HDR + self.file_name.len() + 1 + self.padding as usize
    }

    /// Total encoded length of this frame.
    pub fn encoded_len(&self) -> usize {
        self.header_size() + self.body.len()
    }
}
