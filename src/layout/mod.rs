use thiserror::Error;

use crate::config;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid cover dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("payload exceeds cover capacity: need {required_bits} bits, have {capacity_bits}")]
    CapacityExceeded {
        required_bits: u64,
        capacity_bits: u64,
    },
}

/// Bit layout for one embed/extract operation over a given cover size.
///
/// A successful plan guarantees the frame header plus payload fit in the
/// cover's usable LSBs. Bit ordering is fixed by the wire format: row-major
/// pixels, channels R then G then B (alpha skipped), MSB first within each
/// frame byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// Total embeddable bits: `width * height * 3`.
    pub capacity_bits: u64,
    /// Header bits plus payload bits.
    pub required_bits: u64,
}

impl Layout {
    /// Bits consumed by the frame header.
    pub fn header_bits(&self) -> u64 {
        config::FRAME_HEADER_BITS
    }

    /// Bits consumed by the payload body.
    pub fn payload_bits(&self) -> u64 {
        self.required_bits - config::FRAME_HEADER_BITS
    }

    /// Capacity left unused by this plan.
    pub fn spare_bits(&self) -> u64 {
        self.capacity_bits - self.required_bits
    }
}

/// Check that a payload of `payload_len` bytes fits in a `width` x `height`
/// cover and compute the resulting bit layout.
///
/// All validation happens here, before any pixel is touched: embedding is
/// all-or-nothing. A zero-length payload is valid (the header alone is
/// embedded, signaling "empty" on extraction).
pub fn plan(width: u32, height: u32, payload_len: usize) -> Result<Layout, PlanError> {
    if width == 0 || height == 0 {
        return Err(PlanError::InvalidDimensions { width, height });
    }

    let capacity_bits = config::capacity_bits(width, height);
    let required_bits = config::FRAME_HEADER_BITS + payload_len as u64 * 8;

    // The length field is 32-bit, so a payload beyond u32::MAX bytes cannot
    // be declared no matter how large the cover is.
    if required_bits > capacity_bits || payload_len as u64 > u32::MAX as u64 {
        return Err(PlanError::CapacityExceeded {
            required_bits,
            capacity_bits,
        });
    }

    Ok(Layout {
        width,
        height,
        capacity_bits,
        required_bits,
    })
}
