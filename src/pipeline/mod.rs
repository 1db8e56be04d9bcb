pub mod embed;
pub mod extract;
pub mod hook;

use anyhow::Result;

use crate::integrity;
use crate::pixel::PixelBuffer;
use hook::TransitHook;

/// Result of a full embed → hook → extract roundtrip.
pub struct RoundtripResult {
    /// SHA-256 hex digest of the original payload.
    pub original_hash: String,
    /// SHA-256 hex digest of the extracted payload.
    pub recovered_hash: String,
    /// `true` if the digests match (lossless round-trip).
    pub matched: bool,
}

/// Run a full embed → hook → extract roundtrip.
///
/// Steps:
/// 1. SHA-256 hashes `payload`.
/// 2. Embeds `payload` into `cover` (obfuscating first if `key` is given).
/// 3. Calls `hook.after_embed(stego)`; storage or transfer happens here.
/// 4. Extracts from the buffer returned by the hook.
/// 5. SHA-256 hashes the extracted payload and compares with the original.
///
/// # Example
///
/// ```rust
/// use pixstash::{roundtrip, NoopHook, PixelBuffer};
///
/// let cover = PixelBuffer::filled(16, 16, [200, 180, 40, 255]);
/// let result = roundtrip(&cover, b"meet at dawn", None, &NoopHook).unwrap();
///
/// assert!(result.matched, "round-trip failed: {} != {}", result.original_hash, result.recovered_hash);
/// ```
pub fn roundtrip<H: TransitHook>(
    cover: &PixelBuffer,
    payload: &[u8],
    key: Option<&[u8]>,
    hook: &H,
) -> Result<RoundtripResult> {
    let original_hash = integrity::sha256_hex(payload);

    let stego = embed::embed_payload(cover, payload, key)?;
    let stego = hook.after_embed(stego)?;
    let recovered = extract::extract_payload(&stego, key)?;

    let recovered_hash = integrity::sha256_hex(&recovered);
    let matched = original_hash == recovered_hash;

    Ok(RoundtripResult {
        original_hash,
        recovered_hash,
        matched,
    })
}
