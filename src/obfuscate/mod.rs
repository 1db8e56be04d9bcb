use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ObfuscateError {
    #[error("obfuscation key is empty")]
    EmptyKey,
}

/// XOR a byte sequence with a repeating key.
///
/// This is a reversible obfuscation step, not encryption: it hides the
/// payload from a casual LSB dump and nothing more. Applying it twice with
/// the same key restores the input, so the same call serves both
/// directions. It composes in front of the codec; embed and extract are
/// correct with or without it.
pub fn apply(data: &[u8], key: &[u8]) -> Result<Vec<u8>, ObfuscateError> {
    if key.is_empty() {
        return Err(ObfuscateError::EmptyKey);
    }

    Ok(data
        .iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()])
        .collect())
}
