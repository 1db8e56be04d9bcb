use crc::{Crc, CRC_8_SMBUS};
use sha2::{Digest, Sha256};

/// CRC-8/SMBUS calculator.
const CRC_8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Compute the CRC-8/SMBUS checksum of a payload.
pub fn payload_crc8(data: &[u8]) -> u8 {
    CRC_8.checksum(data)
}

/// Verify a payload against its frame checksum.
pub fn verify_payload_crc8(data: &[u8], expected: u8) -> bool {
    payload_crc8(data) == expected
}

/// SHA-256 digest type.
pub type Sha256Digest = [u8; 32];

/// Compute SHA-256 hash of a byte slice.
pub fn sha256(data: &[u8]) -> Sha256Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Hex-encode a SHA-256 digest.
pub fn sha256_hex(data: &[u8]) -> String {
    sha256(data).iter().map(|b| format!("{:02x}", b)).collect()
}
