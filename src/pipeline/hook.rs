use anyhow::Result;

use crate::pixel::PixelBuffer;

/// A hook invoked between embedding and extraction in a
/// [`roundtrip`](super::roundtrip).
///
/// Implement this trait to inject the external collaborator's work between
/// the two codec calls. The typical implementation encodes the stego buffer
/// to a lossless format (PNG), stores or transmits it, decodes it back to
/// raw pixels, and returns the result. A lossy step here (JPEG, rescaling)
/// destroys the LSBs and the subsequent extraction fails its checksum.
///
/// # Example
///
/// ```rust
/// use anyhow::Result;
/// use pixstash::{PixelBuffer, TransitHook};
///
/// struct PngTransit;
///
/// impl TransitHook for PngTransit {
///     fn after_embed(&self, stego: PixelBuffer) -> Result<PixelBuffer> {
///         // encode `stego` to PNG, upload, download, decode ...
///         Ok(stego) // placeholder
///     }
/// }
/// ```
pub trait TransitHook {
    /// Called with the freshly embedded buffer. Return the buffer the
    /// extractor should read; this may be the same value, or a copy that
    /// survived a lossless round-trip through storage or a network.
    fn after_embed(&self, stego: PixelBuffer) -> Result<PixelBuffer>;
}

/// A no-op hook that passes the stego buffer through unchanged.
///
/// Used as the default when no intermediate steps are needed.
pub struct NoopHook;

impl TransitHook for NoopHook {
    fn after_embed(&self, stego: PixelBuffer) -> Result<PixelBuffer> {
        Ok(stego)
    }
}
