//! Content fingerprints for cache keys.

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a chunk sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Compute hash from an ordered sequence of chunks.
    ///
    /// Each chunk is length-prefixed, so `["ab", "c"]` and `["a", "bc"]`
    /// hash differently.
    pub fn from_chunks<S: AsRef<str>>(chunks: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for chunk in chunks {
            let bytes = chunk.as_ref().as_bytes();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }
        Self(hasher.finalize().into())
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First `len` hex digits, for human-readable file names.
    pub fn short(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len);
        hex
    }
}
