//! # Hashing Utilities
//!
//! The node identifies everything with SHA-256: transaction ids, the key hash
//! inside an address, derived NFT ids. We don't get a vote, so this module
//! is small on purpose. One hash function, two shapes of output.

use sha2::{Digest, Sha256};

use crate::codec::Id;
use crate::config::ID_LEN;

/// Compute the SHA-256 hash and return a fixed-size array.
///
/// # Example
///
/// ```
/// use nova_sdk::crypto::sha256_array;
///
/// let hash = sha256_array(b"NOVA protocol");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 as an [`Id`]. Transaction ids are exactly this over the
/// canonical signed bytes.
pub fn compute_id(data: &[u8]) -> Id {
    Id::new(sha256_array(data))
}

/// Derives a child id from a parent id and an index:
/// `SHA-256(parent ‖ index as big-endian u64)`.
///
/// Used for NFT ids, which hang off their collection's asset id.
pub fn generate_id_with_index(parent: &Id, index: u64) -> Id {
    let mut buf = [0u8; ID_LEN + 8];
    buf[..ID_LEN].copy_from_slice(parent.as_bytes());
    buf[ID_LEN..].copy_from_slice(&index.to_be_bytes());
    compute_id(&buf)
}
