//! SHA-256 digests for normalized text.
//!
//! ```text
//! digest = SHA-256(version.to_be_bytes() || 0x00 || text_bytes)
//! ```
//!
//! The version is folded in so two builds with different normalization
//! behavior never share a digest for the same output text.

use sha2::{Digest, Sha256};

/// Version-aware digest of normalized text, as a 64-char lowercase hex string.
///
/// ```rust
/// use normalize::hash_normalized_bytes;
///
/// let v1 = hash_normalized_bytes(1, "الله".as_bytes());
/// assert_eq!(v1.len(), 64);
/// assert_ne!(v1, hash_normalized_bytes(2, "الله".as_bytes()));
/// ```
pub fn hash_normalized_bytes(version: u32, bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(version.to_be_bytes());
    hasher.update([0]);
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Plain SHA-256 of `text`, without a version prefix. Useful for logging raw
/// input identity without echoing the input itself.
pub fn hash_text(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
