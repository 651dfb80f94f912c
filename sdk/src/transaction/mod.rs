//! # Transactions
//!
//! A transaction is a [`BaseTx`] header, one to 255 actions, and once
//! signed an [`Auth`]. On the wire:
//!
//! ```text
//! BaseTx (48) ‖ u8 count ‖ count × (u8 tag ‖ action) ‖ [u8 tag ‖ auth]
//! ```
//!
//! The auth block is present iff bytes remain after the last action.
//!
//! ## Lifecycle
//!
//! 1. **Built**: [`Transaction::new`] or [`TransactionBuilder`]. Header and
//!    actions only. [`digest`](Transaction::digest) is available;
//!    [`id`](Transaction::id) is not.
//! 2. **Signed**: [`Transaction::sign`] consumes the built transaction,
//!    signs the digest, serializes everything and decodes those bytes back.
//!    The result carries its canonical bytes and they never change again.
//!
//! A transaction decoded with [`Transaction::from_bytes`] also carries its
//! canonical bytes (the input), signed or not.

pub mod base;
pub mod builder;
pub mod verification;

pub use base::BaseTx;
pub use builder::{generate_transaction, TransactionBuilder};
pub use verification::verify_transaction;

use tracing::{debug, warn};

use crate::actions::{Action, ActionRegistry};
use crate::auth::{Auth, AuthFactory, AuthRegistry};
use crate::codec::{Address, Id, Packer};
use crate::config::{Genesis, BYTE_LEN, MAX_ACTIONS_PER_TX, NETWORK_SIZE_LIMIT};
use crate::crypto::compute_id;
use crate::error::{Error, ValidationError};
use crate::fees::{self, Dimensions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    base: BaseTx,
    actions: Vec<Action>,
    auth: Option<Auth>,
    /// Canonical encoding, present after a sign or a decode.
    bytes: Option<Vec<u8>>,
}

impl Transaction {
    /// An unsigned transaction. Carries between 1 and 255 actions.
    pub fn new(base: BaseTx, actions: Vec<Action>) -> Result<Self, Error> {
        check_action_count(actions.len())?;
        Ok(Self {
            base,
            actions,
            auth: None,
            bytes: None,
        })
    }

    pub fn base(&self) -> &BaseTx {
        &self.base
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.auth.is_some()
    }

    /// The account paying for the transaction, once signed.
    pub fn sponsor(&self) -> Option<Address> {
        self.auth.as_ref().map(Auth::sponsor)
    }

    /// The bytes handed to the signer: header, count and tagged actions.
    /// Never includes the auth, so signing does not change it.
    pub fn digest(&self) -> Result<Vec<u8>, Error> {
        let mut p = Packer::new_writer(self.unsigned_size(), NETWORK_SIZE_LIMIT);
        self.marshal_unsigned(&mut p);
        p.check()?;
        Ok(p.into_bytes())
    }

    /// Encoded length, computed without encoding.
    pub fn size(&self) -> usize {
        self.unsigned_size()
            + self
                .auth
                .as_ref()
                .map_or(0, |auth| BYTE_LEN + auth.size())
    }

    fn unsigned_size(&self) -> usize {
        BaseTx::SIZE
            + BYTE_LEN
            + self
                .actions
                .iter()
                .map(|a| BYTE_LEN + a.size())
                .sum::<usize>()
    }

    fn marshal_unsigned(&self, p: &mut Packer<'_>) {
        self.base.marshal(p);
        // `new` and the decoder both cap the count at 255.
        p.pack_byte(self.actions.len() as u8);
        for action in &self.actions {
            p.pack_byte(action.type_id());
            action.marshal(p);
        }
    }

    fn marshal(&self) -> Result<Vec<u8>, Error> {
        let mut p = Packer::new_writer(self.size(), NETWORK_SIZE_LIMIT);
        self.marshal_unsigned(&mut p);
        if let Some(auth) = &self.auth {
            p.pack_byte(auth.type_id());
            auth.marshal(&mut p);
        }
        p.check()?;
        Ok(p.into_bytes())
    }

    /// Signs with the built-in registries. See [`sign_with`](Self::sign_with).
    pub fn sign(self, factory: &AuthFactory) -> Result<Self, Error> {
        self.sign_with(factory, &ActionRegistry::default(), &AuthRegistry::default())
    }

    /// Signs the digest, attaches the auth, encodes the whole transaction
    /// and returns the result of decoding those bytes. The returned value is
    /// exactly what the node will see.
    pub fn sign_with(
        self,
        factory: &AuthFactory,
        actions: &ActionRegistry,
        auths: &AuthRegistry,
    ) -> Result<Self, Error> {
        if self.auth.is_some() {
            return Err(Error::AlreadySigned);
        }
        let digest = self.digest()?;
        let signed = Self {
            auth: Some(factory.sign(&digest)),
            bytes: None,
            ..self
        };
        let bytes = signed.marshal()?;
        let tx = Self::from_bytes_with(&bytes, actions, auths)?;
        debug!(
            id = %compute_id(&bytes),
            size = bytes.len(),
            actions = tx.actions.len(),
            "signed transaction"
        );
        Ok(tx)
    }

    /// The canonical encoding. Signed or decoded transactions return their
    /// cached bytes untouched; built ones are encoded on each call.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        match &self.bytes {
            Some(bytes) => Ok(bytes.clone()),
            None => self.marshal(),
        }
    }

    /// The cached canonical bytes, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// `SHA-256` of the canonical bytes. Built transactions have none yet
    /// and return [`Error::Unsigned`].
    pub fn id(&self) -> Result<Id, Error> {
        self.bytes
            .as_deref()
            .map(compute_id)
            .ok_or(Error::Unsigned)
    }

    /// Units this signed transaction consumes, using its actual auth.
    pub fn max_units(&self, genesis: &Genesis) -> Result<Dimensions, Error> {
        let auth = self.auth.as_ref().ok_or(Error::Unsigned)?;
        fees::units_with_auth(
            genesis,
            &self.actions,
            ((BYTE_LEN + auth.size()) as u64, auth.compute_units()),
        )
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_bytes_with(bytes, &ActionRegistry::default(), &AuthRegistry::default())
    }

    /// Decodes with caller-supplied registries. Fails on the first bad step;
    /// the error says which step through [`Error::Decode`].
    pub fn from_bytes_with(
        bytes: &[u8],
        actions: &ActionRegistry,
        auths: &AuthRegistry,
    ) -> Result<Self, Error> {
        decode(bytes, actions, auths).map_err(|err| {
            warn!(len = bytes.len(), error = %err, "transaction decode failed");
            err
        })
    }
}

fn check_action_count(count: usize) -> Result<(), Error> {
    if count == 0 {
        return Err(Error::NoActions);
    }
    if count > MAX_ACTIONS_PER_TX {
        return Err(ValidationError::TooManyActions {
            count,
            max: MAX_ACTIONS_PER_TX,
        }
        .into());
    }
    Ok(())
}

fn decode(
    bytes: &[u8],
    action_registry: &ActionRegistry,
    auth_registry: &AuthRegistry,
) -> Result<Transaction, Error> {
    let mut p = Packer::new_reader(bytes, NETWORK_SIZE_LIMIT);
    p.check().map_err(|e| Error::decode("transaction", e.into()))?;

    let base = BaseTx::unmarshal(&mut p).map_err(|e| Error::decode("base", e))?;

    let count = p.unpack_byte();
    p.check()
        .map_err(|e| Error::decode("action count", e.into()))?;
    if count == 0 {
        return Err(Error::decode("action count", Error::NoActions));
    }

    let mut actions = Vec::with_capacity(usize::from(count));
    for index in 0..count {
        let step = || format!("action {index}");
        let tag = p.unpack_byte();
        p.check().map_err(|e| Error::decode(step(), e.into()))?;
        let action = action_registry
            .decode(tag, &mut p)
            .map_err(|e| Error::decode(step(), e))?;
        actions.push(action);
    }

    let auth = if p.is_empty() {
        None
    } else {
        let tag = p.unpack_byte();
        let auth = auth_registry
            .decode(tag, &mut p)
            .map_err(|e| Error::decode("auth", e))?;
        Some(auth)
    };

    if !p.is_empty() {
        let trailing = Error::TrailingBytes {
            remaining: p.remaining(),
        };
        return Err(Error::decode("auth", trailing));
    }

    Ok(Transaction {
        base,
        actions,
        auth,
        bytes: Some(bytes.to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::tests::{addr, sample_actions};
    use crate::actions::Transfer;
    use crate::auth::{BlsFactory, Ed25519Factory};
    use crate::codec::CodecError;
    use crate::error::TagKind;

    fn chain() -> Id {
        Id::new([0x42; 32])
    }

    fn transfer(value: u64) -> Action {
        Transfer::new(addr(7), Id::EMPTY, value, Vec::new())
            .unwrap()
            .into()
    }

    fn unsigned(actions: Vec<Action>) -> Transaction {
        Transaction::new(BaseTx::new(60_000, chain(), 1_000).unwrap(), actions).unwrap()
    }

    fn ed25519() -> AuthFactory {
        Ed25519Factory::from_seed(&[3u8; 32]).into()
    }

    #[test]
    fn sign_roundtrip_is_byte_identical() {
        for factory in [ed25519(), BlsFactory::from_ikm(&[4u8; 32]).unwrap().into()] {
            let signed = unsigned(sample_actions()).sign(&factory).unwrap();
            let bytes = signed.to_bytes().unwrap();
            assert_eq!(bytes.len(), signed.size());

            let decoded = Transaction::from_bytes(&bytes).unwrap();
            assert_eq!(decoded.to_bytes().unwrap(), bytes);
            assert_eq!(decoded, signed);
            assert_eq!(decoded.id().unwrap(), signed.id().unwrap());
            assert_eq!(decoded.sponsor(), Some(factory.address()));
        }
    }

    #[test]
    fn digest_excludes_auth() {
        let tx = unsigned(vec![transfer(1)]);
        let digest = tx.digest().unwrap();
        let signed = tx.sign(&ed25519()).unwrap();
        assert_eq!(signed.digest().unwrap(), digest);
        assert!(signed.auth().unwrap().verify(&digest));
        assert_eq!(&signed.bytes().unwrap()[..digest.len()], &digest[..]);
    }

    #[test]
    fn digest_is_deterministic_and_field_sensitive() {
        let a = unsigned(vec![transfer(1)]).digest().unwrap();
        let b = unsigned(vec![transfer(1)]).digest().unwrap();
        let c = unsigned(vec![transfer(2)]).digest().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn id_hashes_full_bytes_not_digest() {
        let tx = unsigned(vec![transfer(1)]);
        assert!(matches!(tx.id(), Err(Error::Unsigned)));
        let digest = tx.digest().unwrap();
        let signed = tx.sign(&ed25519()).unwrap();
        let id = signed.id().unwrap();
        assert_eq!(id, compute_id(signed.bytes().unwrap()));
        assert_ne!(id, compute_id(&digest));
    }

    #[test]
    fn signing_twice_is_refused() {
        let signed = unsigned(vec![transfer(1)]).sign(&ed25519()).unwrap();
        assert!(matches!(signed.sign(&ed25519()), Err(Error::AlreadySigned)));
    }

    #[test]
    fn action_count_bounds() {
        let base = BaseTx::new(0, chain(), 0).unwrap();
        assert!(matches!(
            Transaction::new(base, Vec::new()),
            Err(Error::NoActions)
        ));
        assert!(Transaction::new(base, vec![transfer(1); MAX_ACTIONS_PER_TX]).is_ok());
        assert!(matches!(
            Transaction::new(base, vec![transfer(1); MAX_ACTIONS_PER_TX + 1]),
            Err(Error::Validation(ValidationError::TooManyActions { .. }))
        ));
    }

    #[test]
    fn zero_action_count_fails_decode() {
        let mut bytes = unsigned(vec![transfer(1)]).digest().unwrap();
        bytes.truncate(BaseTx::SIZE);
        bytes.push(0);
        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err.root(), Error::NoActions));
        assert!(matches!(err, Error::Decode { ref step, .. } if step == "action count"));
    }

    #[test]
    fn unknown_action_tag_fails_decode() {
        let mut bytes = unsigned(vec![transfer(1)]).digest().unwrap();
        bytes[BaseTx::SIZE + 1] = 200;
        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err.root(),
            Error::UnknownTypeTag {
                kind: TagKind::Action,
                tag: 200
            }
        ));
    }

    #[test]
    fn unknown_auth_tag_fails_decode() {
        let signed = unsigned(vec![transfer(1)]).sign(&ed25519()).unwrap();
        let mut bytes = signed.to_bytes().unwrap();
        let tag_at = signed.digest().unwrap().len();
        bytes[tag_at] = 1;
        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err.root(),
            Error::UnknownTypeTag {
                kind: TagKind::Auth,
                tag: 1
            }
        ));
    }

    #[test]
    fn trailing_bytes_after_auth() {
        let signed = unsigned(vec![transfer(1)]).sign(&ed25519()).unwrap();
        let mut bytes = signed.to_bytes().unwrap();
        bytes.push(0);
        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode auth"));
        assert!(matches!(err.root(), Error::TrailingBytes { remaining: 1 }));
    }

    #[test]
    fn truncated_auth_is_a_codec_error() {
        let signed = unsigned(vec![transfer(1)]).sign(&ed25519()).unwrap();
        let bytes = signed.to_bytes().unwrap();
        let err = Transaction::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(
            err.root(),
            Error::Codec(CodecError::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn oversized_input_is_rejected_up_front() {
        let bytes = vec![0u8; NETWORK_SIZE_LIMIT + 1];
        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(
            err.root(),
            Error::Codec(CodecError::Oversized { .. })
        ));
    }

    #[test]
    fn unsigned_transaction_decodes_without_auth() {
        let tx = unsigned(vec![transfer(1)]);
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes, tx.digest().unwrap());
        let decoded = Transaction::from_bytes(&bytes).unwrap();
        assert!(!decoded.is_signed());
        assert_eq!(decoded.actions(), tx.actions());
        assert!(decoded.id().is_ok());
    }

    #[test]
    fn max_units_matches_estimate() {
        let genesis = Genesis::default();
        let factory = ed25519();
        let actions = sample_actions();
        let estimated = fees::estimate_units(&genesis, &actions, &factory).unwrap();
        let signed = unsigned(actions).sign(&factory).unwrap();
        assert_eq!(signed.max_units(&genesis).unwrap(), estimated);
        assert_eq!(
            signed.max_units(&genesis).unwrap()[fees::Dimension::Bandwidth],
            signed.size() as u64
        );
    }
}
