use thiserror::Error;

use crate::config;

#[derive(Error, Debug)]
pub enum PixelError {
    #[error("pixel data size mismatch: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// An owned RGBA8 pixel buffer with explicit dimensions.
///
/// Pixels are stored row-major, four bytes per pixel in R, G, B, A order.
/// The buffer is a plain value: codec operations clone it and return a new
/// buffer, so the caller's copy is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Build a buffer where every pixel has the given RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * config::CHANNELS_PER_PIXEL);
        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA bytes, validating that the length matches the
    /// dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelError> {
        let expected = width as usize * height as usize * config::CHANNELS_PER_PIXEL;
        if data.len() != expected {
            return Err(PixelError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The RGBA value of the pixel at (x, y). Panics if out of bounds.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * config::CHANNELS_PER_PIXEL;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// The underlying bytes, row-major RGBA.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, handing the bytes back to the caller (for
    /// re-encoding by an external image codec).
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
