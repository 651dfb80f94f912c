//! Asset lifecycle: create, update, mint and burn, for both fungible and
//! non-fungible assets.

use std::fmt;

use crate::codec::{string_len, Address, Id, Packer};
use crate::config::{
    ADDRESS_LEN, ASSET_CHUNKS, ASSET_NFT_CHUNKS, BALANCE_CHUNKS, BURN_ASSET_COMPUTE_UNITS,
    BURN_ASSET_FT_ID, BURN_ASSET_NFT_ID, BYTE_LEN, CREATE_ASSET_COMPUTE_UNITS, CREATE_ASSET_ID,
    ID_LEN, MAX_DECIMALS, MAX_METADATA_SIZE, MAX_NAME_SIZE, MAX_SYMBOL_SIZE, MAX_TEXT_SIZE,
    MINT_ASSET_COMPUTE_UNITS, MINT_ASSET_FT_ID, MINT_ASSET_NFT_ID, MIN_NAME_SIZE,
    MIN_SYMBOL_SIZE, U64_LEN, UPDATE_ASSET_COMPUTE_UNITS, UPDATE_ASSET_ID,
};
use crate::crypto::generate_id_with_index;
use crate::error::{Error, ValidationError};

use super::{
    check_address, check_id, check_len, check_non_zero, check_update_len, ActionPayload,
};

// ---------------------------------------------------------------------------
// AssetType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AssetType {
    Fungible = 0,
    NonFungible = 1,
    Dataset = 2,
}

impl AssetType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fungible => "fungible",
            Self::NonFungible => "non-fungible",
            Self::Dataset => "dataset",
        }
    }
}

impl TryFrom<u8> for AssetType {
    type Error = ValidationError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Fungible),
            1 => Ok(Self::NonFungible),
            2 => Ok(Self::Dataset),
            other => Err(ValidationError::InvalidAssetType(other)),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssetActors
// ---------------------------------------------------------------------------

/// Accounts allowed to perform privileged operations on an asset. An empty
/// address means nobody (on create) or unchanged (on update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetActors {
    pub mint: Address,
    pub pause_unpause: Address,
    pub freeze_unfreeze: Address,
    pub enable_disable_kyc_account: Address,
}

impl AssetActors {
    pub const SIZE: usize = 4 * ADDRESS_LEN;

    pub fn new(
        mint: Address,
        pause_unpause: Address,
        freeze_unfreeze: Address,
        enable_disable_kyc_account: Address,
    ) -> Self {
        Self {
            mint,
            pause_unpause,
            freeze_unfreeze,
            enable_disable_kyc_account,
        }
    }

    /// The same account for every role.
    pub fn all(actor: Address) -> Self {
        Self::new(actor, actor, actor, actor)
    }

    pub fn is_empty(&self) -> bool {
        self.mint.is_empty()
            && self.pause_unpause.is_empty()
            && self.freeze_unfreeze.is_empty()
            && self.enable_disable_kyc_account.is_empty()
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_address(&self.mint);
        p.pack_address(&self.pause_unpause);
        p.pack_address(&self.freeze_unfreeze);
        p.pack_address(&self.enable_disable_kyc_account);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Self {
        Self {
            mint: p.unpack_address(false),
            pause_unpause: p.unpack_address(false),
            freeze_unfreeze: p.unpack_address(false),
            enable_disable_kyc_account: p.unpack_address(false),
        }
    }
}

// ---------------------------------------------------------------------------
// CreateAsset
// ---------------------------------------------------------------------------

/// Registers a new asset owned by the sponsor. The asset id is derived by
/// the node from the transaction id and the action's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAsset {
    asset_type: AssetType,
    name: String,
    symbol: String,
    decimals: u8,
    metadata: String,
    uri: String,
    max_supply: u64,
    parent_nft_metadata: String,
    actors: AssetActors,
}

impl CreateAsset {
    /// `max_supply == 0` means uncapped. Non-fungible and dataset assets must
    /// have zero decimals, and only non-fungible assets may carry
    /// `parent_nft_metadata`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        asset_type: AssetType,
        name: String,
        symbol: String,
        decimals: u8,
        metadata: String,
        uri: String,
        max_supply: u64,
        parent_nft_metadata: String,
        actors: AssetActors,
    ) -> Result<Self, ValidationError> {
        check_len("name", name.len(), MIN_NAME_SIZE, MAX_NAME_SIZE)?;
        check_len("symbol", symbol.len(), MIN_SYMBOL_SIZE, MAX_SYMBOL_SIZE)?;
        check_len("metadata", metadata.len(), 0, MAX_METADATA_SIZE)?;
        check_len("uri", uri.len(), 0, MAX_TEXT_SIZE)?;
        check_len(
            "parent_nft_metadata",
            parent_nft_metadata.len(),
            0,
            MAX_METADATA_SIZE,
        )?;
        if decimals > MAX_DECIMALS {
            return Err(ValidationError::InvalidDecimals {
                decimals,
                max: MAX_DECIMALS,
            });
        }
        if asset_type != AssetType::Fungible && decimals != 0 {
            return Err(ValidationError::AssetTypeMismatch {
                field: "decimals",
                asset_type: asset_type.as_str(),
            });
        }
        if asset_type != AssetType::NonFungible && !parent_nft_metadata.is_empty() {
            return Err(ValidationError::AssetTypeMismatch {
                field: "parent_nft_metadata",
                asset_type: asset_type.as_str(),
            });
        }
        Ok(Self {
            asset_type,
            name,
            symbol,
            decimals,
            metadata,
            uri,
            max_supply,
            parent_nft_metadata,
            actors,
        })
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn parent_nft_metadata(&self) -> &str {
        &self.parent_nft_metadata
    }

    pub fn actors(&self) -> &AssetActors {
        &self.actors
    }
}

impl ActionPayload for CreateAsset {
    const TYPE_ID: u8 = CREATE_ASSET_ID;

    fn size(&self) -> usize {
        BYTE_LEN
            + string_len(&self.name)
            + string_len(&self.symbol)
            + BYTE_LEN
            + string_len(&self.metadata)
            + string_len(&self.uri)
            + U64_LEN
            + string_len(&self.parent_nft_metadata)
            + AssetActors::SIZE
    }

    fn compute_units(&self) -> u64 {
        CREATE_ASSET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_byte(self.asset_type as u8);
        p.pack_string(&self.name);
        p.pack_string(&self.symbol);
        p.pack_byte(self.decimals);
        p.pack_string(&self.metadata);
        p.pack_string(&self.uri);
        p.pack_long(self.max_supply);
        p.pack_string(&self.parent_nft_metadata);
        self.actors.marshal(p);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let asset_type = p.unpack_byte();
        let name = p.unpack_limited_string(MAX_NAME_SIZE, true);
        let symbol = p.unpack_limited_string(MAX_SYMBOL_SIZE, true);
        let decimals = p.unpack_byte();
        let metadata = p.unpack_limited_string(MAX_METADATA_SIZE, false);
        let uri = p.unpack_limited_string(MAX_TEXT_SIZE, false);
        let max_supply = p.unpack_long();
        let parent_nft_metadata = p.unpack_limited_string(MAX_METADATA_SIZE, false);
        let actors = AssetActors::unmarshal(p);
        p.check()?;
        Ok(Self::new(
            AssetType::try_from(asset_type)?,
            name,
            symbol,
            decimals,
            metadata,
            uri,
            max_supply,
            parent_nft_metadata,
            actors,
        )?)
    }
}

// ---------------------------------------------------------------------------
// UpdateAsset
// ---------------------------------------------------------------------------

/// Changes the mutable properties of an existing asset. Empty strings,
/// empty addresses and a zero `max_supply` leave the field as it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAsset {
    asset_id: Id,
    name: String,
    symbol: String,
    metadata: String,
    uri: String,
    max_supply: u64,
    owner: Address,
    actors: AssetActors,
}

impl UpdateAsset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        asset_id: Id,
        name: String,
        symbol: String,
        metadata: String,
        uri: String,
        max_supply: u64,
        owner: Address,
        actors: AssetActors,
    ) -> Result<Self, ValidationError> {
        check_id("asset_id", &asset_id)?;
        check_update_len("name", name.len(), MIN_NAME_SIZE, MAX_NAME_SIZE)?;
        check_update_len("symbol", symbol.len(), MIN_SYMBOL_SIZE, MAX_SYMBOL_SIZE)?;
        check_len("metadata", metadata.len(), 0, MAX_METADATA_SIZE)?;
        check_len("uri", uri.len(), 0, MAX_TEXT_SIZE)?;
        let unchanged = name.is_empty()
            && symbol.is_empty()
            && metadata.is_empty()
            && uri.is_empty()
            && max_supply == 0
            && owner.is_empty()
            && actors.is_empty();
        if unchanged {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(Self {
            asset_id,
            name,
            symbol,
            metadata,
            uri,
            max_supply,
            owner,
            actors,
        })
    }

    pub fn asset_id(&self) -> &Id {
        &self.asset_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn actors(&self) -> &AssetActors {
        &self.actors
    }
}

impl ActionPayload for UpdateAsset {
    const TYPE_ID: u8 = UPDATE_ASSET_ID;

    fn size(&self) -> usize {
        ID_LEN
            + string_len(&self.name)
            + string_len(&self.symbol)
            + string_len(&self.metadata)
            + string_len(&self.uri)
            + U64_LEN
            + ADDRESS_LEN
            + AssetActors::SIZE
    }

    fn compute_units(&self) -> u64 {
        UPDATE_ASSET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.asset_id);
        p.pack_string(&self.name);
        p.pack_string(&self.symbol);
        p.pack_string(&self.metadata);
        p.pack_string(&self.uri);
        p.pack_long(self.max_supply);
        p.pack_address(&self.owner);
        self.actors.marshal(p);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let asset_id = p.unpack_id(true);
        let name = p.unpack_limited_string(MAX_NAME_SIZE, false);
        let symbol = p.unpack_limited_string(MAX_SYMBOL_SIZE, false);
        let metadata = p.unpack_limited_string(MAX_METADATA_SIZE, false);
        let uri = p.unpack_limited_string(MAX_TEXT_SIZE, false);
        let max_supply = p.unpack_long();
        let owner = p.unpack_address(false);
        let actors = AssetActors::unmarshal(p);
        p.check()?;
        Ok(Self::new(
            asset_id, name, symbol, metadata, uri, max_supply, owner, actors,
        )?)
    }
}

// ---------------------------------------------------------------------------
// MintAssetFT
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAssetFT {
    to: Address,
    asset_id: Id,
    value: u64,
}

impl MintAssetFT {
    pub fn new(to: Address, asset_id: Id, value: u64) -> Result<Self, ValidationError> {
        check_address("to", &to)?;
        check_id("asset_id", &asset_id)?;
        check_non_zero("value", value)?;
        Ok(Self {
            to,
            asset_id,
            value,
        })
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    pub fn asset_id(&self) -> &Id {
        &self.asset_id
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl ActionPayload for MintAssetFT {
    const TYPE_ID: u8 = MINT_ASSET_FT_ID;

    fn size(&self) -> usize {
        ADDRESS_LEN + ID_LEN + U64_LEN
    }

    fn compute_units(&self) -> u64 {
        MINT_ASSET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_address(&self.to);
        p.pack_id(&self.asset_id);
        p.pack_long(self.value);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let to = p.unpack_address(true);
        let asset_id = p.unpack_id(true);
        let value = p.unpack_long();
        p.check()?;
        Ok(Self::new(to, asset_id, value)?)
    }
}

// ---------------------------------------------------------------------------
// MintAssetNFT
// ---------------------------------------------------------------------------

/// Mints the NFT numbered `unique_id` of collection `asset_id` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAssetNFT {
    asset_id: Id,
    unique_id: u64,
    uri: String,
    metadata: String,
    to: Address,
}

impl MintAssetNFT {
    pub fn new(
        asset_id: Id,
        unique_id: u64,
        uri: String,
        metadata: String,
        to: Address,
    ) -> Result<Self, ValidationError> {
        check_id("asset_id", &asset_id)?;
        check_address("to", &to)?;
        check_len("uri", uri.len(), 0, MAX_TEXT_SIZE)?;
        check_len("metadata", metadata.len(), 0, MAX_METADATA_SIZE)?;
        Ok(Self {
            asset_id,
            unique_id,
            uri,
            metadata,
            to,
        })
    }

    pub fn asset_id(&self) -> &Id {
        &self.asset_id
    }

    pub fn unique_id(&self) -> u64 {
        self.unique_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    /// Id the node assigns to the minted token:
    /// `SHA-256(asset_id ‖ unique_id)`.
    pub fn nft_id(&self) -> Id {
        generate_id_with_index(&self.asset_id, self.unique_id)
    }
}

impl ActionPayload for MintAssetNFT {
    const TYPE_ID: u8 = MINT_ASSET_NFT_ID;

    fn size(&self) -> usize {
        ID_LEN + U64_LEN + string_len(&self.uri) + string_len(&self.metadata) + ADDRESS_LEN
    }

    fn compute_units(&self) -> u64 {
        MINT_ASSET_COMPUTE_UNITS
    }

    /// Collection, token, and the recipient's collection and token balances.
    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, ASSET_NFT_CHUNKS, BALANCE_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.asset_id);
        p.pack_long(self.unique_id);
        p.pack_string(&self.uri);
        p.pack_string(&self.metadata);
        p.pack_address(&self.to);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let asset_id = p.unpack_id(true);
        let unique_id = p.unpack_long();
        let uri = p.unpack_limited_string(MAX_TEXT_SIZE, false);
        let metadata = p.unpack_limited_string(MAX_METADATA_SIZE, false);
        let to = p.unpack_address(true);
        p.check()?;
        Ok(Self::new(asset_id, unique_id, uri, metadata, to)?)
    }
}

// ---------------------------------------------------------------------------
// BurnAssetFT
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnAssetFT {
    asset_id: Id,
    value: u64,
}

impl BurnAssetFT {
    pub fn new(asset_id: Id, value: u64) -> Result<Self, ValidationError> {
        check_id("asset_id", &asset_id)?;
        check_non_zero("value", value)?;
        Ok(Self { asset_id, value })
    }

    pub fn asset_id(&self) -> &Id {
        &self.asset_id
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl ActionPayload for BurnAssetFT {
    const TYPE_ID: u8 = BURN_ASSET_FT_ID;

    fn size(&self) -> usize {
        ID_LEN + U64_LEN
    }

    fn compute_units(&self) -> u64 {
        BURN_ASSET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.asset_id);
        p.pack_long(self.value);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let asset_id = p.unpack_id(true);
        let value = p.unpack_long();
        p.check()?;
        Ok(Self::new(asset_id, value)?)
    }
}

// ---------------------------------------------------------------------------
// BurnAssetNFT
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnAssetNFT {
    asset_id: Id,
    nft_id: Id,
}

impl BurnAssetNFT {
    pub fn new(asset_id: Id, nft_id: Id) -> Result<Self, ValidationError> {
        check_id("asset_id", &asset_id)?;
        check_id("nft_id", &nft_id)?;
        Ok(Self { asset_id, nft_id })
    }

    pub fn asset_id(&self) -> &Id {
        &self.asset_id
    }

    pub fn nft_id(&self) -> &Id {
        &self.nft_id
    }
}

impl ActionPayload for BurnAssetNFT {
    const TYPE_ID: u8 = BURN_ASSET_NFT_ID;

    fn size(&self) -> usize {
        ID_LEN * 2
    }

    fn compute_units(&self) -> u64 {
        BURN_ASSET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, ASSET_NFT_CHUNKS, BALANCE_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.asset_id);
        p.pack_id(&self.nft_id);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let asset_id = p.unpack_id(true);
        let nft_id = p.unpack_id(true);
        p.check()?;
        Ok(Self::new(asset_id, nft_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::tests::{addr, id, roundtrip};
    use crate::codec::CodecError;

    fn create(asset_type: AssetType, decimals: u8, parent: &str) -> Result<CreateAsset, ValidationError> {
        CreateAsset::new(
            asset_type,
            "Token".into(),
            "TKN".into(),
            decimals,
            String::new(),
            String::new(),
            0,
            parent.into(),
            AssetActors::default(),
        )
    }

    #[test]
    fn asset_type_discriminants() {
        for (byte, ty) in [
            (0, AssetType::Fungible),
            (1, AssetType::NonFungible),
            (2, AssetType::Dataset),
        ] {
            assert_eq!(AssetType::try_from(byte), Ok(ty));
            assert_eq!(ty as u8, byte);
        }
        assert_eq!(
            AssetType::try_from(3),
            Err(ValidationError::InvalidAssetType(3))
        );
    }

    #[test]
    fn create_asset_type_rules() {
        assert!(create(AssetType::Fungible, 9, "").is_ok());
        assert_eq!(
            create(AssetType::Fungible, 10, "").unwrap_err(),
            ValidationError::InvalidDecimals {
                decimals: 10,
                max: MAX_DECIMALS
            }
        );
        assert_eq!(
            create(AssetType::NonFungible, 2, "").unwrap_err(),
            ValidationError::AssetTypeMismatch {
                field: "decimals",
                asset_type: "non-fungible"
            }
        );
        assert!(create(AssetType::NonFungible, 0, "{\"collection\":1}").is_ok());
        assert!(matches!(
            create(AssetType::Fungible, 0, "parent"),
            Err(ValidationError::AssetTypeMismatch {
                field: "parent_nft_metadata",
                ..
            })
        ));
    }

    #[test]
    fn name_and_symbol_bounds() {
        let make = |name: &str, symbol: &str| {
            CreateAsset::new(
                AssetType::Fungible,
                name.into(),
                symbol.into(),
                0,
                String::new(),
                String::new(),
                0,
                String::new(),
                AssetActors::default(),
            )
        };
        assert!(make(&"n".repeat(MIN_NAME_SIZE), "SYM").is_ok());
        assert!(make(&"n".repeat(MAX_NAME_SIZE), "SYM").is_ok());
        assert!(make(&"n".repeat(MAX_NAME_SIZE + 1), "SYM").is_err());
        assert!(make("ab", "SYM").is_err());
        assert!(make("name", &"S".repeat(MAX_SYMBOL_SIZE)).is_ok());
        assert!(make("name", &"S".repeat(MAX_SYMBOL_SIZE + 1)).is_err());
    }

    #[test]
    fn create_asset_roundtrip_at_limits() {
        let action = CreateAsset::new(
            AssetType::NonFungible,
            "n".repeat(MAX_NAME_SIZE),
            "S".repeat(MAX_SYMBOL_SIZE),
            0,
            "m".repeat(MAX_METADATA_SIZE),
            "u".repeat(MAX_TEXT_SIZE),
            u64::MAX,
            "p".repeat(MAX_METADATA_SIZE),
            AssetActors::all(addr(8)),
        )
        .unwrap();
        roundtrip(action.into());
    }

    #[test]
    fn unknown_asset_type_byte_fails_decode() {
        let action = create(AssetType::Fungible, 0, "").unwrap();
        let mut bytes = crate::actions::Action::from(action).to_bytes().unwrap();
        bytes[0] = 7;
        let mut p = Packer::new_reader(&bytes, bytes.len());
        assert!(matches!(
            CreateAsset::unmarshal(&mut p),
            Err(Error::Validation(ValidationError::InvalidAssetType(7)))
        ));
    }

    #[test]
    fn update_asset_needs_a_change() {
        let none = UpdateAsset::new(
            id(1),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            0,
            Address::EMPTY,
            AssetActors::default(),
        );
        assert_eq!(none.unwrap_err(), ValidationError::NothingToUpdate);

        let owner_only = UpdateAsset::new(
            id(1),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            0,
            addr(3),
            AssetActors::default(),
        )
        .unwrap();
        roundtrip(owner_only.into());
    }

    #[test]
    fn update_asset_requires_asset_id() {
        let build = |asset_id| {
            UpdateAsset::new(
                asset_id,
                "Renamed".into(),
                String::new(),
                String::new(),
                String::new(),
                0,
                Address::EMPTY,
                AssetActors::default(),
            )
        };
        assert_eq!(
            build(Id::EMPTY),
            Err(ValidationError::Required { field: "asset_id" })
        );

        let action = build(id(1)).unwrap();
        roundtrip(action.clone().into());

        let mut bytes = crate::actions::Action::from(action).to_bytes().unwrap();
        bytes[..ID_LEN].fill(0);
        let mut p = Packer::new_reader(&bytes, bytes.len());
        assert!(matches!(
            UpdateAsset::unmarshal(&mut p),
            Err(Error::Codec(CodecError::FieldNotPopulated))
        ));
    }

    #[test]
    fn mint_and_burn_require_ids_and_recipients() {
        assert_eq!(
            MintAssetFT::new(Address::EMPTY, id(1), 1),
            Err(ValidationError::Required { field: "to" })
        );
        assert_eq!(
            MintAssetFT::new(addr(1), Id::EMPTY, 1),
            Err(ValidationError::Required { field: "asset_id" })
        );
        assert_eq!(
            MintAssetNFT::new(Id::EMPTY, 1, String::new(), String::new(), addr(1)),
            Err(ValidationError::Required { field: "asset_id" })
        );
        assert_eq!(
            MintAssetNFT::new(id(1), 1, String::new(), String::new(), Address::EMPTY),
            Err(ValidationError::Required { field: "to" })
        );
        assert_eq!(
            BurnAssetFT::new(Id::EMPTY, 1),
            Err(ValidationError::Required { field: "asset_id" })
        );
    }

    #[test]
    fn nft_id_is_derived_from_collection_and_index() {
        let mint = MintAssetNFT::new(id(2), 7, String::new(), String::new(), addr(1)).unwrap();
        assert_eq!(mint.nft_id(), generate_id_with_index(&id(2), 7));
        let other = MintAssetNFT::new(id(2), 8, String::new(), String::new(), addr(1)).unwrap();
        assert_ne!(mint.nft_id(), other.nft_id());
    }

    #[test]
    fn mint_and_burn_values_must_be_positive() {
        assert!(MintAssetFT::new(addr(1), id(1), 0).is_err());
        assert!(BurnAssetFT::new(id(1), 0).is_err());
        roundtrip(MintAssetFT::new(addr(1), id(1), u64::MAX).unwrap().into());
    }

    #[test]
    fn burn_nft_requires_both_ids() {
        assert_eq!(
            BurnAssetNFT::new(Id::EMPTY, id(2)),
            Err(ValidationError::Required { field: "asset_id" })
        );
        assert_eq!(
            BurnAssetNFT::new(id(1), Id::EMPTY),
            Err(ValidationError::Required { field: "nft_id" })
        );

        let action = BurnAssetNFT::new(id(1), id(2)).unwrap();
        roundtrip(action.clone().into());

        let mut bytes = crate::actions::Action::from(action).to_bytes().unwrap();
        bytes[ID_LEN..].fill(0);
        let mut p = Packer::new_reader(&bytes, bytes.len());
        assert!(matches!(
            BurnAssetNFT::unmarshal(&mut p),
            Err(Error::Codec(CodecError::FieldNotPopulated))
        ));
    }
}
