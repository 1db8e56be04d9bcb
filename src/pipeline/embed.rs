use anyhow::{Context, Result};
use log::info;

use crate::codec;
use crate::obfuscate;
use crate::pixel::PixelBuffer;

/// Full embed pipeline: payload -> [obfuscate] -> frame -> cover LSBs.
///
/// With a key, the payload is XOR-masked before framing; the frame checksum
/// then covers the masked bytes, so extraction verifies integrity without
/// the key.
pub fn embed_payload(
    cover: &PixelBuffer,
    payload: &[u8],
    key: Option<&[u8]>,
) -> Result<PixelBuffer> {
    let body = match key {
        Some(k) => obfuscate::apply(payload, k).context("failed to obfuscate payload")?,
        None => payload.to_vec(),
    };

    info!(
        "embedding {} payload bytes into {}x{} cover",
        body.len(),
        cover.width(),
        cover.height()
    );
    codec::embed(cover, &body).context("failed to embed payload")
}

/// Embed a UTF-8 string as its byte representation.
pub fn embed_text(cover: &PixelBuffer, text: &str, key: Option<&[u8]>) -> Result<PixelBuffer> {
    embed_payload(cover, text.as_bytes(), key)
}
