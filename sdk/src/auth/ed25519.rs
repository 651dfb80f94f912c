//! Ed25519 auth: a 32-byte public key followed by a 64-byte signature.
//!
//! Deterministic signatures (RFC 8032), so signing the same digest twice
//! yields the same bytes and therefore the same transaction id.

use std::fmt;
use std::sync::OnceLock;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use crate::codec::{Address, Packer};
use crate::config::{ED25519_COMPUTE_UNITS, ED25519_ID};
use crate::crypto::keys::decode_key_hex;
use crate::crypto::{sha256_array, KeyError};
use crate::error::Error;

pub const ED25519_PUBLIC_KEY_LEN: usize = 32;
pub const ED25519_SIGNATURE_LEN: usize = 64;
pub const ED25519_SEED_LEN: usize = 32;
/// Some wallets export `seed ‖ public key`.
pub const ED25519_EXPANDED_KEY_LEN: usize = ED25519_SEED_LEN + ED25519_PUBLIC_KEY_LEN;

// ---------------------------------------------------------------------------
// Ed25519Auth
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct Ed25519Auth {
    signer: [u8; ED25519_PUBLIC_KEY_LEN],
    signature: [u8; ED25519_SIGNATURE_LEN],
    address: OnceLock<Address>,
}

impl Ed25519Auth {
    pub const SIZE: usize = ED25519_PUBLIC_KEY_LEN + ED25519_SIGNATURE_LEN;

    pub fn new(
        signer: [u8; ED25519_PUBLIC_KEY_LEN],
        signature: [u8; ED25519_SIGNATURE_LEN],
    ) -> Self {
        Self {
            signer,
            signature,
            address: OnceLock::new(),
        }
    }

    pub fn signer(&self) -> &[u8; ED25519_PUBLIC_KEY_LEN] {
        &self.signer
    }

    pub fn signature(&self) -> &[u8; ED25519_SIGNATURE_LEN] {
        &self.signature
    }

    /// `ED25519_ID ‖ SHA-256(public key)`, derived on first use.
    pub fn address(&self) -> Address {
        *self
            .address
            .get_or_init(|| Address::new(ED25519_ID, &sha256_array(&self.signer)))
    }

    /// `false` for a bad key, a bad signature, or the wrong message. We
    /// don't say which.
    pub fn verify(&self, message: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.signer) else {
            return false;
        };
        let signature = Signature::from_bytes(&self.signature);
        verifying_key.verify(message, &signature).is_ok()
    }

    pub fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_fixed_bytes(&self.signer);
        p.pack_fixed_bytes(&self.signature);
    }

    pub fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let signer = p.unpack_fixed::<ED25519_PUBLIC_KEY_LEN>();
        let signature = p.unpack_fixed::<ED25519_SIGNATURE_LEN>();
        p.check()?;
        Ok(Self::new(signer, signature))
    }

    pub fn compute_units(&self) -> u64 {
        ED25519_COMPUTE_UNITS
    }
}

impl PartialEq for Ed25519Auth {
    fn eq(&self, other: &Self) -> bool {
        self.signer == other.signer && self.signature == other.signature
    }
}

impl Eq for Ed25519Auth {}

impl fmt::Debug for Ed25519Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Auth")
            .field("signer", &hex::encode(self.signer))
            .field("signature", &hex::encode(self.signature))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Ed25519Factory
// ---------------------------------------------------------------------------

/// Holds an Ed25519 signing key and produces [`Ed25519Auth`]s.
///
/// Deliberately not `Serialize`. Exporting a private key should be an
/// explicit [`to_hex`](Self::to_hex) call, not a side effect of logging a
/// struct.
pub struct Ed25519Factory {
    signing_key: SigningKey,
}

impl Ed25519Factory {
    /// Fresh key from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_seed(seed: &[u8; ED25519_SEED_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Accepts a 32-byte seed, or a 64-byte `seed ‖ public key` whose second
    /// half must match the key derived from the first.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        match trimmed.len() / 2 {
            ED25519_SEED_LEN => {
                let seed = decode_key_hex::<ED25519_SEED_LEN>(trimmed)?;
                Ok(Self::from_seed(&seed))
            }
            ED25519_EXPANDED_KEY_LEN => {
                let raw = decode_key_hex::<ED25519_EXPANDED_KEY_LEN>(trimmed)?;
                let mut seed = [0u8; ED25519_SEED_LEN];
                seed.copy_from_slice(&raw[..ED25519_SEED_LEN]);
                let factory = Self::from_seed(&seed);
                if factory.public_key()[..] != raw[ED25519_SEED_LEN..] {
                    return Err(KeyError::KeypairMismatch);
                }
                Ok(factory)
            }
            _ => Err(KeyError::InvalidSecretKey),
        }
    }

    /// Hex of the 32-byte seed. Handle with care.
    pub fn to_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn public_key(&self) -> [u8; ED25519_PUBLIC_KEY_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn address(&self) -> Address {
        Address::new(ED25519_ID, &sha256_array(&self.public_key()))
    }

    pub fn sign(&self, message: &[u8]) -> Ed25519Auth {
        let signature = self.signing_key.sign(message);
        Ed25519Auth::new(self.public_key(), signature.to_bytes())
    }
}

impl Clone for Ed25519Factory {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for Ed25519Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never the secret, not even partially.
        write!(f, "Ed25519Factory(pub={})", hex::encode(self.public_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let factory = Ed25519Factory::from_seed(&[7u8; 32]);
        let auth = factory.sign(b"digest");
        assert!(auth.verify(b"digest"));
        assert!(!auth.verify(b"digest!"));
    }

    #[test]
    fn one_bit_flips_fail() {
        let factory = Ed25519Factory::from_seed(&[9u8; 32]);
        let auth = factory.sign(b"payload");

        let mut sig = *auth.signature();
        sig[0] ^= 0x01;
        assert!(!Ed25519Auth::new(*auth.signer(), sig).verify(b"payload"));

        let mut msg = b"payload".to_vec();
        msg[3] ^= 0x80;
        assert!(!auth.verify(&msg));
    }

    #[test]
    fn garbage_public_key_does_not_panic() {
        let auth = Ed25519Auth::new([0xFF; 32], [0u8; 64]);
        assert!(!auth.verify(b"anything"));
    }

    #[test]
    fn address_is_cached_and_deterministic() {
        let factory = Ed25519Factory::from_seed(&[1u8; 32]);
        let auth = factory.sign(b"m");
        let first = auth.address();
        assert_eq!(first, auth.address());
        assert_eq!(first, factory.address());
        assert_eq!(first.type_tag(), ED25519_ID);
        assert_eq!(&first.as_bytes()[1..], &sha256_array(&factory.public_key()));
    }

    #[test]
    fn signing_is_deterministic() {
        let factory = Ed25519Factory::from_seed(&[3u8; 32]);
        assert_eq!(factory.sign(b"same"), factory.sign(b"same"));
    }

    #[test]
    fn hex_import_export() {
        let factory = Ed25519Factory::from_seed(&[5u8; 32]);
        let seed_hex = factory.to_hex();
        assert_eq!(seed_hex.len(), 64);
        let restored = Ed25519Factory::from_hex(&seed_hex).unwrap();
        assert_eq!(restored.public_key(), factory.public_key());

        let expanded = format!("0x{}{}", seed_hex, hex::encode(factory.public_key()));
        let restored = Ed25519Factory::from_hex(&expanded).unwrap();
        assert_eq!(restored.public_key(), factory.public_key());

        let wrong = format!("{}{}", seed_hex, hex::encode([0u8; 32]));
        assert_eq!(
            Ed25519Factory::from_hex(&wrong).unwrap_err(),
            KeyError::KeypairMismatch
        );
        assert_eq!(
            Ed25519Factory::from_hex("abcd").unwrap_err(),
            KeyError::InvalidSecretKey
        );
    }

    #[test]
    fn debug_does_not_leak_the_seed() {
        let factory = Ed25519Factory::from_seed(&[0xAB; 32]);
        let printed = format!("{:?}", factory);
        assert!(!printed.contains(&factory.to_hex()));
    }

    #[test]
    fn wire_roundtrip() {
        let auth = Ed25519Factory::from_seed(&[4u8; 32]).sign(b"x");
        let mut p = Packer::new_writer(Ed25519Auth::SIZE, Ed25519Auth::SIZE);
        auth.marshal(&mut p);
        let bytes = p.into_bytes();
        assert_eq!(bytes.len(), Ed25519Auth::SIZE);

        let mut r = Packer::new_reader(&bytes, bytes.len());
        assert_eq!(Ed25519Auth::unmarshal(&mut r).unwrap(), auth);

        let truncated = &bytes[..Ed25519Auth::SIZE - 1];
        let mut r = Packer::new_reader(truncated, truncated.len());
        assert!(Ed25519Auth::unmarshal(&mut r).is_err());
    }
}
