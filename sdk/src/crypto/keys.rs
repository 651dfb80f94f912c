//! # Key Material Parsing
//!
//! Shared plumbing for importing private keys from hex. The scheme-specific
//! key types live next to their auth implementations in [`crate::auth`].
//!
//! Key bytes are never logged. Errors say *that* a key was bad, never *how*.

use thiserror::Error;

/// Errors that can occur during key operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("keypair validation failed: public key does not match secret key")]
    KeypairMismatch,
}

/// Decodes a hex string into a secret key buffer of exactly `N` bytes.
/// An optional `0x` prefix is accepted.
pub(crate) fn decode_key_hex<const N: usize>(hex_str: &str) -> Result<[u8; N], KeyError> {
    let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let mut out = [0u8; N];
    hex::decode_to_slice(trimmed, &mut out).map_err(|_| KeyError::InvalidSecretKey)?;
    Ok(out)
}
