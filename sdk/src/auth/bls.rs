//! BLS12-381 auth (minimal-pubkey variant): a 48-byte compressed G1 public
//! key followed by a 96-byte compressed G2 signature.
//!
//! Signatures use the proof-of-possession ciphersuite, the same one the
//! node's validator keys use.

use std::fmt;
use std::sync::OnceLock;

use blst::min_pk::{PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use rand::rngs::OsRng;
use rand_core::RngCore;

use crate::codec::{Address, Packer};
use crate::config::{BLS_COMPUTE_UNITS, BLS_ID};
use crate::crypto::keys::decode_key_hex;
use crate::crypto::{sha256_array, KeyError};
use crate::error::Error;

pub const BLS_PUBLIC_KEY_LEN: usize = 48;
pub const BLS_SIGNATURE_LEN: usize = 96;
pub const BLS_SECRET_KEY_LEN: usize = 32;

const SIGNATURE_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

// ---------------------------------------------------------------------------
// BlsAuth
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct BlsAuth {
    signer: [u8; BLS_PUBLIC_KEY_LEN],
    signature: [u8; BLS_SIGNATURE_LEN],
    address: OnceLock<Address>,
}

impl BlsAuth {
    pub const SIZE: usize = BLS_PUBLIC_KEY_LEN + BLS_SIGNATURE_LEN;

    pub fn new(signer: [u8; BLS_PUBLIC_KEY_LEN], signature: [u8; BLS_SIGNATURE_LEN]) -> Self {
        Self {
            signer,
            signature,
            address: OnceLock::new(),
        }
    }

    pub fn signer(&self) -> &[u8; BLS_PUBLIC_KEY_LEN] {
        &self.signer
    }

    pub fn signature(&self) -> &[u8; BLS_SIGNATURE_LEN] {
        &self.signature
    }

    pub fn address(&self) -> Address {
        *self
            .address
            .get_or_init(|| Address::new(BLS_ID, &sha256_array(&self.signer)))
    }

    /// Group-checks both the key and the signature before pairing. Any
    /// failure is just `false`.
    pub fn verify(&self, message: &[u8]) -> bool {
        let Ok(public_key) = PublicKey::from_bytes(&self.signer) else {
            return false;
        };
        let Ok(signature) = Signature::from_bytes(&self.signature) else {
            return false;
        };
        signature.verify(true, message, SIGNATURE_DST, &[], &public_key, true)
            == BLST_ERROR::BLST_SUCCESS
    }

    pub fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_fixed_bytes(&self.signer);
        p.pack_fixed_bytes(&self.signature);
    }

    pub fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let signer = p.unpack_fixed::<BLS_PUBLIC_KEY_LEN>();
        let signature = p.unpack_fixed::<BLS_SIGNATURE_LEN>();
        p.check()?;
        Ok(Self::new(signer, signature))
    }

    pub fn compute_units(&self) -> u64 {
        BLS_COMPUTE_UNITS
    }
}

impl PartialEq for BlsAuth {
    fn eq(&self, other: &Self) -> bool {
        self.signer == other.signer && self.signature == other.signature
    }
}

impl Eq for BlsAuth {}

impl fmt::Debug for BlsAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlsAuth")
            .field("signer", &hex::encode(self.signer))
            .field("signature", &hex::encode(self.signature))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// BlsFactory
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct BlsFactory {
    secret_key: SecretKey,
}

impl BlsFactory {
    /// Fresh key derived from 32 bytes of OS randomness.
    pub fn generate() -> Result<Self, KeyError> {
        let mut ikm = [0u8; 32];
        OsRng.fill_bytes(&mut ikm);
        Self::from_ikm(&ikm)
    }

    /// Deterministic key generation (IETF KeyGen) from input key material.
    pub fn from_ikm(ikm: &[u8; 32]) -> Result<Self, KeyError> {
        let secret_key = SecretKey::key_gen(ikm, &[]).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { secret_key })
    }

    /// Big-endian 32-byte scalar. Zero and values ≥ the group order fail.
    pub fn from_bytes(bytes: &[u8; BLS_SECRET_KEY_LEN]) -> Result<Self, KeyError> {
        let secret_key = SecretKey::from_bytes(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { secret_key })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Self::from_bytes(&decode_key_hex::<BLS_SECRET_KEY_LEN>(hex_str)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.secret_key.to_bytes())
    }

    pub fn public_key(&self) -> [u8; BLS_PUBLIC_KEY_LEN] {
        self.secret_key.sk_to_pk().compress()
    }

    pub fn address(&self) -> Address {
        Address::new(BLS_ID, &sha256_array(&self.public_key()))
    }

    pub fn sign(&self, message: &[u8]) -> BlsAuth {
        let signature = self.secret_key.sign(message, SIGNATURE_DST, &[]);
        BlsAuth::new(self.public_key(), signature.compress())
    }
}

impl fmt::Debug for BlsFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsFactory(pub={})", hex::encode(self.public_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> BlsFactory {
        BlsFactory::from_ikm(&[42u8; 32]).unwrap()
    }

    #[test]
    fn sign_and_verify() {
        let auth = factory().sign(b"digest");
        assert!(auth.verify(b"digest"));
        assert!(!auth.verify(b"other digest"));
    }

    #[test]
    fn flipped_signature_bit_fails() {
        let auth = factory().sign(b"digest");
        let mut sig = *auth.signature();
        sig[BLS_SIGNATURE_LEN - 1] ^= 0x01;
        assert!(!BlsAuth::new(*auth.signer(), sig).verify(b"digest"));
    }

    #[test]
    fn garbage_key_is_rejected_not_panicked() {
        let auth = BlsAuth::new([0xFF; BLS_PUBLIC_KEY_LEN], [0u8; BLS_SIGNATURE_LEN]);
        assert!(!auth.verify(b"digest"));
    }

    #[test]
    fn address_uses_bls_tag() {
        let f = factory();
        let auth = f.sign(b"m");
        assert_eq!(auth.address(), f.address());
        assert_eq!(auth.address().type_tag(), BLS_ID);
    }

    #[test]
    fn hex_roundtrip() {
        let f = factory();
        let restored = BlsFactory::from_hex(&f.to_hex()).unwrap();
        assert_eq!(restored.public_key(), f.public_key());
        assert!(BlsFactory::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn wire_size() {
        let auth = factory().sign(b"m");
        let mut p = Packer::new_writer(BlsAuth::SIZE, BlsAuth::SIZE);
        auth.marshal(&mut p);
        let bytes = p.into_bytes();
        assert_eq!(bytes.len(), 144);
        let mut r = Packer::new_reader(&bytes, bytes.len());
        assert_eq!(BlsAuth::unmarshal(&mut r).unwrap(), auth);
    }
}
