//! # Authorization
//!
//! An [`Auth`] is what proves a transaction was approved: a public key and a
//! signature over the transaction digest. An [`AuthFactory`] holds the
//! private half and produces them.
//!
//! Two schemes are supported, each identified on the wire by a one-byte tag:
//!
//! | tag | scheme  | public key | signature | compute units |
//! |-----|---------|-----------:|----------:|--------------:|
//! | 0   | Ed25519 | 32         | 64        | 5             |
//! | 2   | BLS     | 48         | 96        | 10            |
//!
//! The sponsor of a transaction (who pays the fee) is the address derived
//! from the auth's public key.

pub mod bls;
pub mod ed25519;

pub use bls::{BlsAuth, BlsFactory};
pub use ed25519::{Ed25519Auth, Ed25519Factory};

use tracing::debug;

use crate::codec::{Address, Packer};
use crate::config::{BLS_ID, BYTE_LEN, ED25519_ID};
use crate::crypto::KeyError;
use crate::error::{Error, TagKind};
use crate::registry::{Decoder, TypeRegistry};

/// Tag → decoder table for auths.
pub type AuthRegistry = TypeRegistry<Auth>;

impl Default for TypeRegistry<Auth> {
    fn default() -> Self {
        let entries: [(u8, Decoder<Auth>); 2] =
            [(ED25519_ID, decode_ed25519), (BLS_ID, decode_bls)];
        Self::from_entries(TagKind::Auth, entries)
    }
}

fn decode_ed25519(p: &mut Packer<'_>) -> Result<Auth, Error> {
    Ed25519Auth::unmarshal(p).map(Auth::Ed25519)
}

fn decode_bls(p: &mut Packer<'_>) -> Result<Auth, Error> {
    BlsAuth::unmarshal(p).map(Auth::Bls)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Ed25519(Ed25519Auth),
    Bls(BlsAuth),
}

impl Auth {
    pub fn type_id(&self) -> u8 {
        match self {
            Self::Ed25519(_) => ED25519_ID,
            Self::Bls(_) => BLS_ID,
        }
    }

    /// Payload size, excluding the tag byte.
    pub fn size(&self) -> usize {
        match self {
            Self::Ed25519(_) => Ed25519Auth::SIZE,
            Self::Bls(_) => BlsAuth::SIZE,
        }
    }

    pub fn compute_units(&self) -> u64 {
        match self {
            Self::Ed25519(a) => a.compute_units(),
            Self::Bls(a) => a.compute_units(),
        }
    }

    pub fn address(&self) -> Address {
        match self {
            Self::Ed25519(a) => a.address(),
            Self::Bls(a) => a.address(),
        }
    }

    /// The account charged for the transaction.
    pub fn sponsor(&self) -> Address {
        self.address()
    }

    pub fn verify(&self, message: &[u8]) -> bool {
        match self {
            Self::Ed25519(a) => a.verify(message),
            Self::Bls(a) => a.verify(message),
        }
    }

    pub fn signer_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(a) => a.signer(),
            Self::Bls(a) => a.signer(),
        }
    }

    pub fn signature_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(a) => a.signature(),
            Self::Bls(a) => a.signature(),
        }
    }

    /// Writes the payload. The tag byte is the caller's job.
    pub fn marshal(&self, p: &mut Packer<'_>) {
        match self {
            Self::Ed25519(a) => a.marshal(p),
            Self::Bls(a) => a.marshal(p),
        }
    }

    /// `signer ‖ signature`, untagged.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut p = Packer::new_writer(self.size(), self.size());
        self.marshal(&mut p);
        p.check()?;
        Ok(p.into_bytes())
    }

    /// Decodes an untagged payload of the scheme named by `type_id`. The
    /// slice must be exactly the scheme's size.
    pub fn from_bytes(type_id: u8, bytes: &[u8]) -> Result<Self, Error> {
        let mut p = Packer::new_reader(bytes, bytes.len());
        let auth = AuthRegistry::default().decode(type_id, &mut p)?;
        if !p.is_empty() {
            return Err(Error::TrailingBytes {
                remaining: p.remaining(),
            });
        }
        Ok(auth)
    }
}

impl From<Ed25519Auth> for Auth {
    fn from(a: Ed25519Auth) -> Self {
        Self::Ed25519(a)
    }
}

impl From<BlsAuth> for Auth {
    fn from(a: BlsAuth) -> Self {
        Self::Bls(a)
    }
}

// ---------------------------------------------------------------------------
// AuthFactory
// ---------------------------------------------------------------------------

/// A signing capability bound to one private key.
///
/// Besides signing, a factory declares what its auth will cost so fees can
/// be estimated before anything is signed.
#[derive(Debug, Clone)]
pub enum AuthFactory {
    Ed25519(Ed25519Factory),
    Bls(BlsFactory),
}

impl AuthFactory {
    pub fn generate_ed25519() -> Self {
        Self::Ed25519(Ed25519Factory::generate())
    }

    pub fn generate_bls() -> Result<Self, KeyError> {
        Ok(Self::Bls(BlsFactory::generate()?))
    }

    /// 32-byte seed, or 64-byte `seed ‖ public key`, hex encoded.
    pub fn ed25519_from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Ok(Self::Ed25519(Ed25519Factory::from_hex(hex_str)?))
    }

    /// 32-byte big-endian secret scalar, hex encoded.
    pub fn bls_from_hex(hex_str: &str) -> Result<Self, KeyError> {
        Ok(Self::Bls(BlsFactory::from_hex(hex_str)?))
    }

    /// Signs `message` (the transaction digest).
    pub fn sign(&self, message: &[u8]) -> Auth {
        let auth: Auth = match self {
            Self::Ed25519(f) => f.sign(message).into(),
            Self::Bls(f) => f.sign(message).into(),
        };
        debug!(
            scheme = self.scheme(),
            signer = %auth.address(),
            message_len = message.len(),
            "signed digest"
        );
        auth
    }

    pub fn type_id(&self) -> u8 {
        match self {
            Self::Ed25519(_) => ED25519_ID,
            Self::Bls(_) => BLS_ID,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => "ed25519",
            Self::Bls(_) => "bls",
        }
    }

    /// Serialized auth size, without the tag byte.
    pub fn bandwidth(&self) -> u64 {
        match self {
            Self::Ed25519(_) => Ed25519Auth::SIZE as u64,
            Self::Bls(_) => BlsAuth::SIZE as u64,
        }
    }

    pub fn compute_units(&self) -> u64 {
        match self {
            Self::Ed25519(_) => crate::config::ED25519_COMPUTE_UNITS,
            Self::Bls(_) => crate::config::BLS_COMPUTE_UNITS,
        }
    }

    /// `(bandwidth, compute)` the auth adds to a transaction, tag byte
    /// included in the bandwidth.
    pub fn max_units(&self) -> (u64, u64) {
        (BYTE_LEN as u64 + self.bandwidth(), self.compute_units())
    }

    pub fn address(&self) -> Address {
        match self {
            Self::Ed25519(f) => f.address(),
            Self::Bls(f) => f.address(),
        }
    }

    pub fn public_key_hex(&self) -> String {
        match self {
            Self::Ed25519(f) => hex::encode(f.public_key()),
            Self::Bls(f) => hex::encode(f.public_key()),
        }
    }

    /// Exports the private key. Treat the result as a secret.
    pub fn to_hex(&self) -> String {
        match self {
            Self::Ed25519(f) => f.to_hex(),
            Self::Bls(f) => f.to_hex(),
        }
    }
}

impl From<Ed25519Factory> for AuthFactory {
    fn from(f: Ed25519Factory) -> Self {
        Self::Ed25519(f)
    }
}

impl From<BlsFactory> for AuthFactory {
    fn from(f: BlsFactory) -> Self {
        Self::Bls(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factories() -> Vec<AuthFactory> {
        vec![
            Ed25519Factory::from_seed(&[11u8; 32]).into(),
            BlsFactory::from_ikm(&[12u8; 32]).unwrap().into(),
        ]
    }

    #[test]
    fn sign_verify_both_schemes() {
        for factory in factories() {
            let auth = factory.sign(b"tx digest");
            assert!(auth.verify(b"tx digest"), "{}", factory.scheme());
            assert!(!auth.verify(b"tx digesT"), "{}", factory.scheme());
            assert_eq!(auth.type_id(), factory.type_id());
            assert_eq!(auth.address(), factory.address());
            assert_eq!(auth.sponsor(), factory.address());
            assert_eq!(auth.compute_units(), factory.compute_units());
            assert_eq!(auth.size() as u64, factory.bandwidth());
        }
    }

    #[test]
    fn bytes_roundtrip_through_registry() {
        for factory in factories() {
            let auth = factory.sign(b"m");
            let bytes = auth.to_bytes().unwrap();
            assert_eq!(bytes.len(), auth.size());
            assert_eq!(&bytes[..auth.signer_bytes().len()], auth.signer_bytes());
            let decoded = Auth::from_bytes(auth.type_id(), &bytes).unwrap();
            assert_eq!(decoded, auth);
        }
    }

    #[test]
    fn wrong_length_is_a_codec_error() {
        let auth = factories()[0].sign(b"m");
        let mut bytes = auth.to_bytes().unwrap();
        bytes.pop();
        assert!(matches!(
            Auth::from_bytes(ED25519_ID, &bytes),
            Err(Error::Codec(_))
        ));
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(
            Auth::from_bytes(ED25519_ID, &bytes),
            Err(Error::TrailingBytes { remaining: 1 })
        ));
    }

    #[test]
    fn unknown_scheme_tag() {
        assert!(matches!(
            Auth::from_bytes(1, &[0u8; 96]),
            Err(Error::UnknownTypeTag {
                kind: TagKind::Auth,
                tag: 1
            })
        ));
    }

    #[test]
    fn default_registry_knows_both_schemes() {
        assert_eq!(AuthRegistry::default().tags(), vec![ED25519_ID, BLS_ID]);
    }

    #[test]
    fn declared_costs() {
        let f = &factories();
        assert_eq!(f[0].max_units(), (97, 5));
        assert_eq!(f[1].max_units(), (145, 10));
    }

    #[test]
    fn hex_export_reimports() {
        for factory in factories() {
            let restored = match &factory {
                AuthFactory::Ed25519(_) => AuthFactory::ed25519_from_hex(&factory.to_hex()),
                AuthFactory::Bls(_) => AuthFactory::bls_from_hex(&factory.to_hex()),
            }
            .unwrap();
            assert_eq!(restored.public_key_hex(), factory.public_key_hex());
            assert_eq!(restored.address(), factory.address());
        }
    }
}
