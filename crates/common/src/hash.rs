use blake2::{digest::typenum::U32, Blake2b, Digest};

/// BLAKE2b digest of `data`, truncated to 256 bits.
pub fn blake2(data: &[u8]) -> [u8; 32] {
    Blake2b::<U32>::digest(data).into()
}

/// Hex-encoded BLAKE2b-256 digest of `data`.
pub fn blake2_hex(data: &[u8]) -> String {
    hex::encode(blake2(data))
}
