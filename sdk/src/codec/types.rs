//! Fixed-width identifiers carried on the wire.

use std::fmt;

use crate::config::{ADDRESS_LEN, ID_LEN};

/// A 32-byte identifier: transaction ids, asset ids, chain ids.
///
/// The all-zero id is the "empty" sentinel. It doubles as the native asset
/// id, so only fields marked required treat it as missing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Id([u8; ID_LEN]);

impl Id {
    pub const EMPTY: Id = Id([0u8; ID_LEN]);

    pub const fn new(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses exactly 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; ID_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ID_LEN]> for Id {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.to_hex())
    }
}

/// A 33-byte account address: `auth type tag ‖ SHA-256(public key)`.
///
/// Addresses are derived by [`crate::auth::Auth::address`]; this type only
/// carries the bytes. Bech32 rendering for humans belongs to the wallet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const EMPTY: Address = Address([0u8; ADDRESS_LEN]);

    /// Builds an address from a type tag and a 32-byte key hash.
    pub fn new(type_tag: u8, key_hash: &[u8; ID_LEN]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[0] = type_tag;
        bytes[1..].copy_from_slice(key_hash);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// The auth scheme tag the address was derived under.
    pub fn type_tag(&self) -> u8 {
        self.0[0]
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinels() {
        assert!(Id::EMPTY.is_empty());
        assert!(Id::default().is_empty());
        assert!(Address::default().is_empty());
        assert!(!Id::new([1u8; 32]).is_empty());
    }

    #[test]
    fn address_layout_is_tag_then_hash() {
        let addr = Address::new(2, &[0xAB; 32]);
        assert_eq!(addr.type_tag(), 2);
        assert_eq!(addr.as_bytes()[0], 2);
        assert!(addr.as_bytes()[1..].iter().all(|b| *b == 0xAB));
    }

    #[test]
    fn hex_parsing_checks_length() {
        let id = Id::new([7u8; 32]);
        assert_eq!(Id::from_hex(&id.to_hex()).unwrap(), id);
        assert!(Id::from_hex("abcd").is_err());

        let addr = Address::new(0, &[9u8; 32]);
        assert_eq!(Address::from_hex(&addr.to_hex()).unwrap(), addr);
        assert!(Address::from_hex(&id.to_hex()).is_err());
    }
}
