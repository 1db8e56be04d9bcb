use anyhow::{Context, Result};
use log::info;

use crate::codec;
use crate::obfuscate;
use crate::pixel::PixelBuffer;

/// Full extract pipeline: stego LSBs -> frame -> [deobfuscate] -> payload.
///
/// The checksum is verified on the bytes as embedded, before any
/// deobfuscation. A wrong key therefore passes the integrity check and
/// yields wrong bytes; the XOR stage carries no authentication.
pub fn extract_payload(stego: &PixelBuffer, key: Option<&[u8]>) -> Result<Vec<u8>> {
    let body = codec::extract(stego).context("failed to extract payload")?;
    info!(
        "extracted {} payload bytes from {}x{} image",
        body.len(),
        stego.width(),
        stego.height()
    );

    match key {
        Some(k) => obfuscate::apply(&body, k).context("failed to deobfuscate payload"),
        None => Ok(body),
    }
}

/// Extract a payload and decode it as UTF-8 text.
pub fn extract_text(stego: &PixelBuffer, key: Option<&[u8]>) -> Result<String> {
    let payload = extract_payload(stego, key)?;
    String::from_utf8(payload).context("extracted payload is not valid UTF-8")
}
