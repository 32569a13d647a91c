//! Shared format constants (frame layout, transport, output naming).

// -------- Frame --------
//
// Layout (all integers LE):
// [magic 4][checksum u32][header_size u32][count u32][index u32]
// [file name ..][NUL 1][padding zeros ..][body ..]
//
// header_size covers everything before the body; the byte at
// header_size - 1 is always the terminator or a padding zero.
pub const FRAME_MAGIC: &[u8; 4] = b"PFR1";

pub const OFF_MAGIC: usize = 0;
pub const OFF_CHECKSUM: usize = 4;
pub const OFF_HEADER_SIZE: usize = 8;
pub const OFF_COUNT: usize = 12;
pub const OFF_INDEX: usize = 16;
pub const OFF_NAME: usize = 20;

/// Fixed-size prefix of every header (magic + four u32 fields).
pub const FRAME_FIXED_HDR: usize = 20;
/// Smallest decodable frame: fixed prefix + one name byte + NUL.
pub const FRAME_HDR_MIN: usize = FRAME_FIXED_HDR + 2;

// -------- Transport --------

/// Transport characters fully determined by the 4 magic bytes:
/// floor(32 bits / 5 bits per character).
pub const CODE_PREFIX_LEN: usize = 6;

// -------- Output naming --------

pub const SYMBOL_PREFIX: &str = "pf";
pub const PAGE_TOKEN: &str = "page";
pub const DECODED_PREFIX: &str = "decoded-";
pub const SYMBOL_EXT: &str = "png";
