use log::debug;
use thiserror::Error;

use crate::config;
use crate::frame::{self, FrameHeader};
use crate::integrity;
use crate::layout::{self, PlanError};
use crate::pixel::PixelBuffer;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("truncated frame header: need {need_bits} bits, have {have_bits}")]
    TruncatedHeader { need_bits: u64, have_bits: u64 },
    #[error("payload checksum mismatch: expected 0x{expected:02X}, computed 0x{computed:02X}")]
    IntegrityMismatch { expected: u8, computed: u8 },
}

/// Embed a payload into the LSBs of a cover image.
///
/// The payload is framed (`[len: u32 BE][crc8][payload]`) and written one
/// bit per usable channel, MSB first within each frame byte: row-major
/// pixels, channels R then G then B, alpha skipped. Channels past the end
/// of the frame keep their original values.
///
/// Returns a new buffer of identical dimensions; the cover itself is never
/// mutated. Fails before touching any pixel if the frame does not fit.
///
/// Note: embedding into a buffer that already carries a frame silently
/// overwrites the previous payload.
pub fn embed(cover: &PixelBuffer, payload: &[u8]) -> Result<PixelBuffer, PlanError> {
    let layout = layout::plan(cover.width(), cover.height(), payload.len())?;
    let frame = frame::serialize_frame(payload);
    let total_bits = frame.len() * 8;

    let mut stego = cover.clone();
    let mut bit_index = 0usize;

    for (i, channel) in stego.raw_mut().iter_mut().enumerate() {
        if bit_index >= total_bits {
            break;
        }
        if i % config::CHANNELS_PER_PIXEL == config::ALPHA_CHANNEL {
            continue;
        }

        let byte_idx = bit_index / 8;
        let bit_pos = 7 - (bit_index % 8); // MSB first
        let bit = (frame[byte_idx] >> bit_pos) & 1;

        *channel = (*channel & 0xFE) | bit;
        bit_index += 1;
    }

    debug!(
        "embedded {} frame bits into {}x{} cover ({} bits capacity)",
        total_bits, layout.width, layout.height, layout.capacity_bits
    );
    Ok(stego)
}

/// Recover the embedded payload from a stego image.
///
/// Reads the 40 header bits first, bounds-checks the declared length
/// against the buffer's capacity, reads the payload bits, and verifies the
/// checksum. Both failure modes are expected on images that never carried
/// an embedding or were altered in transit.
pub fn extract(stego: &PixelBuffer) -> Result<Vec<u8>, ExtractError> {
    let have_bits = config::capacity_bits(stego.width(), stego.height());
    let mut reader = LsbReader::new(stego.as_raw());

    let mut header_bytes = [0u8; config::FRAME_HEADER_SIZE];
    if !reader.read_exact(&mut header_bytes) {
        return Err(ExtractError::TruncatedHeader {
            need_bits: config::FRAME_HEADER_BITS,
            have_bits,
        });
    }
    let header = FrameHeader::parse(&header_bytes);

    let need_bits = config::FRAME_HEADER_BITS + header.payload_len as u64 * 8;
    if need_bits > have_bits {
        return Err(ExtractError::TruncatedHeader {
            need_bits,
            have_bits,
        });
    }

    let mut payload = vec![0u8; header.payload_len as usize];
    let filled = reader.read_exact(&mut payload);
    debug_assert!(filled, "capacity check guarantees the payload bits");

    let computed = integrity::payload_crc8(&payload);
    if computed != header.checksum {
        return Err(ExtractError::IntegrityMismatch {
            expected: header.checksum,
            computed,
        });
    }

    debug!(
        "extracted {} payload bytes from {}x{} image",
        payload.len(),
        stego.width(),
        stego.height()
    );
    Ok(payload)
}

/// Cursor over the LSBs of the usable channels of an RGBA byte stream.
struct LsbReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LsbReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next_bit(&mut self) -> Option<u8> {
        while self.pos < self.data.len() {
            let i = self.pos;
            self.pos += 1;
            if i % config::CHANNELS_PER_PIXEL == config::ALPHA_CHANNEL {
                continue;
            }
            return Some(self.data[i] & 1);
        }
        None
    }

    /// Fill `out` from the bit stream, MSB first within each byte.
    /// Returns `false` if the stream ran out before `out` was filled.
    fn read_exact(&mut self, out: &mut [u8]) -> bool {
        for byte in out.iter_mut() {
            let mut acc = 0u8;
            for _ in 0..8 {
                match self.next_bit() {
                    Some(bit) => acc = (acc << 1) | bit,
                    None => return false,
                }
            }
            *byte = acc;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, RngCore, SeedableRng};

    fn random_cover(width: u32, height: u32, seed: u64) -> PixelBuffer {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut data = vec![0u8; width as usize * height as usize * 4];
        rng.fill_bytes(&mut data);
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    /// Map a frame bit index to its byte offset in the RGBA stream.
    fn channel_offset(bit_index: usize) -> usize {
        (bit_index / 3) * 4 + bit_index % 3
    }

    #[test]
    fn test_roundtrip() {
        let cover = random_cover(32, 32, 1);
        let payload = b"the quick brown fox jumps over the lazy dog";
        let stego = embed(&cover, payload).unwrap();
        assert_eq!(extract(&stego).unwrap(), payload);
    }

    #[test]
    fn test_roundtrip_empty_payload() {
        let cover = random_cover(8, 8, 2);
        let stego = embed(&cover, b"").unwrap();
        assert_eq!(extract(&stego).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_roundtrip_binary_payload() {
        let mut rng = StdRng::seed_from_u64(3);
        let cover = random_cover(64, 64, 4);
        let mut payload = vec![0u8; 1000];
        rng.fill_bytes(&mut payload);
        let stego = embed(&cover, &payload).unwrap();
        assert_eq!(extract(&stego).unwrap(), payload);
    }

    #[test]
    fn test_roundtrip_exact_capacity() {
        // 32x32: 3072 capacity bits, (3072 - 40) / 8 = 379 payload bytes.
        let cover = random_cover(32, 32, 5);
        let payload = vec![0x5Au8; 379];
        let stego = embed(&cover, &payload).unwrap();
        assert_eq!(extract(&stego).unwrap(), payload);

        assert_eq!(
            embed(&cover, &vec![0x5Au8; 380]),
            Err(PlanError::CapacityExceeded {
                required_bits: 40 + 380 * 8,
                capacity_bits: 3072
            })
        );
    }

    #[test]
    fn test_embed_is_deterministic() {
        let cover = random_cover(16, 16, 6);
        let a = embed(&cover, b"same input").unwrap();
        let b = embed(&cover, b"same input").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_embed_leaves_cover_untouched() {
        let cover = random_cover(16, 16, 7);
        let snapshot = cover.clone();
        let _stego = embed(&cover, b"payload").unwrap();
        assert_eq!(cover, snapshot);
    }

    #[test]
    fn test_alpha_channel_preserved() {
        let cover = random_cover(16, 16, 8);
        let stego = embed(&cover, &vec![0xFFu8; 90]).unwrap();
        for (i, (before, after)) in cover
            .as_raw()
            .iter()
            .zip(stego.as_raw().iter())
            .enumerate()
        {
            if i % 4 == 3 {
                assert_eq!(before, after, "alpha byte {} changed", i);
            }
        }
    }

    #[test]
    fn test_channels_past_frame_untouched() {
        let cover = random_cover(16, 16, 9);
        let payload = b"tiny";
        let stego = embed(&cover, payload).unwrap();

        let frame_bits = (5 + payload.len()) * 8;
        let first_untouched = channel_offset(frame_bits);
        assert_eq!(
            &cover.as_raw()[first_untouched..],
            &stego.as_raw()[first_untouched..]
        );
    }

    #[test]
    fn test_embed_changes_at_most_lsbs() {
        let cover = random_cover(16, 16, 10);
        let stego = embed(&cover, b"lsb only").unwrap();
        for (before, after) in cover.as_raw().iter().zip(stego.as_raw().iter()) {
            assert_eq!(before & 0xFE, after & 0xFE);
        }
    }

    #[test]
    fn test_embed_zero_dimensions() {
        let cover = PixelBuffer::filled(0, 8, [0, 0, 0, 255]);
        assert_eq!(
            embed(&cover, b"x"),
            Err(PlanError::InvalidDimensions {
                width: 0,
                height: 8
            })
        );
    }

    #[test]
    fn test_scenario_4x4() {
        // 4x4 all-black cover: 48 capacity bits, room for exactly one
        // payload byte after the 5-byte header.
        let cover = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);

        let stego = embed(&cover, &[0x41]).unwrap();
        assert_eq!(extract(&stego).unwrap(), vec![0x41]);

        assert!(matches!(
            embed(&cover, &[0x41, 0x42]),
            Err(PlanError::CapacityExceeded {
                required_bits: 56,
                capacity_bits: 48
            })
        ));
    }

    #[test]
    fn test_single_bit_tamper_detected() {
        let cover = random_cover(16, 16, 11);
        let payload = b"abc";
        let stego = embed(&cover, payload).unwrap();

        // Flip each payload bit in turn; the checksum must catch all of them.
        for bit in 0..payload.len() * 8 {
            let frame_bit = 40 + bit;
            let mut data = stego.as_raw().to_vec();
            data[channel_offset(frame_bit)] ^= 1;
            let tampered = PixelBuffer::from_raw(16, 16, data).unwrap();
            assert!(
                matches!(
                    extract(&tampered),
                    Err(ExtractError::IntegrityMismatch { .. })
                ),
                "payload bit {} not detected",
                bit
            );
        }
    }

    #[test]
    fn test_extract_from_random_noise() {
        // LSBs full of random noise: the declared length is read from noise
        // and is almost surely implausible, or the checksum fails.
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..16 {
            let noise = random_cover(64, 64, rng.gen());
            assert!(extract(&noise).is_err());
        }
    }

    #[test]
    fn test_extract_truncated_header_reports_bits() {
        // A length claim far beyond the buffer's capacity.
        let big = vec![0u8; 100];
        let stego = embed(&random_cover(64, 64, 14), &big).unwrap();

        // Re-read the first 8x8 worth of pixels only: header promises more
        // bits than this smaller buffer holds.
        let cropped =
            PixelBuffer::from_raw(8, 8, stego.as_raw()[..8 * 8 * 4].to_vec()).unwrap();
        match extract(&cropped) {
            Err(ExtractError::TruncatedHeader {
                need_bits,
                have_bits,
            }) => {
                assert_eq!(need_bits, 40 + 800);
                assert_eq!(have_bits, 192);
            }
            other => panic!("expected TruncatedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_header_smaller_than_buffer() {
        // 2x2 buffer: 12 usable bits, not even a full header.
        let tiny = PixelBuffer::filled(2, 2, [1, 2, 3, 4]);
        assert_eq!(
            extract(&tiny),
            Err(ExtractError::TruncatedHeader {
                need_bits: 40,
                have_bits: 12
            })
        );
    }
}
