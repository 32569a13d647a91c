//! frame/codec — canonical frame byte layout.
//!
//! Encode writes the layout from `consts`; `header_size` is always derived
//! from the other fields, never supplied. Decode validates the header only:
//! the body is everything from `header_size` to the end of input, and body
//! length is the reassembler's concern.

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::{
    FRAME_HDR_MIN, FRAME_MAGIC, OFF_CHECKSUM, OFF_COUNT, OFF_HEADER_SIZE, OFF_INDEX, OFF_MAGIC,
    OFF_NAME,
};
use crate::error::{Error, Result};

use super::Frame;

/// Serialize a frame into its canonical byte layout.
pub fn encode(frame: &Frame) -> Vec<u8> {
    let name = frame.file_name.as_bytes();
    let header_size = frame.header_size();
    let mut out = vec![0u8; header_size + frame.body.len()];

    out[OFF_MAGIC..OFF_MAGIC + 4].copy_from_slice(FRAME_MAGIC);
    LittleEndian::write_u32(&mut out[OFF_CHECKSUM..OFF_CHECKSUM + 4], frame.checksum);
    LittleEndian::write_u32(
        &mut out[OFF_HEADER_SIZE..OFF_HEADER_SIZE + 4],
        header_size as u32,
    );
    LittleEndian::write_u32(&mut out[OFF_COUNT..OFF_COUNT + 4], frame.count);
    LittleEndian::write_u32(&mut out[OFF_INDEX..OFF_INDEX + 4], frame.index);
    out[OFF_NAME..OFF_NAME + name.len()].copy_from_slice(name);
    // NUL terminator and padding are the buffer's zero fill.
    out[header_size..].copy_from_slice(&frame.body);
    out
}

/// Parse a frame from its canonical byte layout.
pub fn decode(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < FRAME_HDR_MIN {
        return Err(Error::format(format!(
            "input too short: {} B, need at least {}",
            bytes.len(),
            FRAME_HDR_MIN
        )));
    }
    if &bytes[OFF_MAGIC..OFF_MAGIC + 4] != FRAME_MAGIC {
        return Err(Error::format(format!(
            "bad magic {:02x?}",
            &bytes[OFF_MAGIC..OFF_MAGIC + 4]
        )));
    }

    let checksum = LittleEndian::read_u32(&bytes[OFF_CHECKSUM..OFF_CHECKSUM + 4]);
    let header_size = LittleEndian::read_u32(&bytes[OFF_HEADER_SIZE..OFF_HEADER_SIZE + 4]) as usize;
    let count = LittleEndian::read_u32(&bytes[OFF_COUNT..OFF_COUNT + 4]);
    let index = LittleEndian::read_u32(&bytes[OFF_INDEX..OFF_INDEX + 4]);

    if header_size < FRAME_HDR_MIN {
        return Err(Error::format(format!(
            "header_size {header_size} below minimum {FRAME_HDR_MIN}"
        )));
    }
    if bytes.len() < header_size {
        return Err(Error::format(format!(
            "input {} B shorter than header_size {header_size}",
            bytes.len()
        )));
    }
    if bytes[OFF_NAME] == 0 {
        return Err(Error::format("empty file name"));
    }
    if bytes[header_size - 1] != 0 {
        return Err(Error::format(
            "byte before body is non-zero (missing name terminator)",
        ));
    }

    // The name runs to its first NUL; everything after that up to
    // header_size is padding. A terminator exists because the last header
    // byte is zero.
    let name_end = bytes[OFF_NAME..header_size]
        .iter()
        .position(|&b| b == 0)
        .map(|p| OFF_NAME + p)
        .unwrap_or(header_size - 1);
    let file_name = std::str::from_utf8(&bytes[OFF_NAME..name_end])
        .map_err(|e| Error::format(format!("file name is not UTF-8: {e}")))?
        .to_string();
    let padding = (header_size - name_end - 1) as u32;

    Ok(Frame {
        checksum,
        count,
        index,
        file_name,
        padding,
        body: bytes[header_size..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_FIXED_HDR;

    fn sample() -> Frame {
        Frame {
            checksum: 0xDEAD_BEEF,
            count: 3,
            index: 1,
            file_name: "notes.txt".to_string(),
            padding: 5,
            body: b"hello body".to_vec(),
        }
    }

    #[test]
    fn roundtrip_preserves_fields() {
        let f = sample();
        let bytes = encode(&f);
        assert_eq!(bytes.len(), f.encoded_len());
        let back = decode(&bytes).expect("must decode");
        assert_eq!(back, f);
    }

    #[test]
    fn header_size_points_at_body() {
        let f = sample();
        let bytes = encode(&f);
        let hs = LittleEndian::read_u32(&bytes[OFF_HEADER_SIZE..OFF_HEADER_SIZE + 4]) as usize;
        assert_eq!(hs, FRAME_FIXED_HDR + f.file_name.len() + 1 + f.padding as usize);
        assert_eq!(&bytes[hs..], f.body.as_slice());
        assert_eq!(bytes[hs - 1], 0);
    }
}
