use byteorder::{BigEndian, ByteOrder};

use crate::config;
use crate::integrity;

/// Parsed frame header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub payload_len: u32,
    pub checksum: u8,
}

// Header field offsets (5 bytes total)
const OFF_LEN: usize = 0;
const OFF_CRC: usize = 4;

impl FrameHeader {
    /// Decode a header from its fixed-size byte representation.
    pub fn parse(bytes: &[u8; config::FRAME_HEADER_SIZE]) -> Self {
        Self {
            payload_len: BigEndian::read_u32(&bytes[OFF_LEN..]),
            checksum: bytes[OFF_CRC],
        }
    }
}

/// Serialize a payload into a frame: `[len: u32 BE][crc8][payload]`.
///
/// The checksum covers the payload bytes exactly as they will be embedded.
pub fn serialize_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(config::FRAME_HEADER_SIZE + payload.len());

    let mut header = [0u8; config::FRAME_HEADER_SIZE];
    BigEndian::write_u32(&mut header[OFF_LEN..OFF_LEN + config::LENGTH_FIELD_SIZE], payload.len() as u32);
    header[OFF_CRC] = integrity::payload_crc8(payload);

    frame.extend_from_slice(&header);
    frame.extend_from_slice(payload);
    frame
}
