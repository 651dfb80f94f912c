//! Datasets and the contribution flow that attaches data to them.

use crate::codec::{string_len, Address, Id, Packer};
use crate::config::{
    ADDRESS_LEN, ASSET_CHUNKS, ASSET_NFT_CHUNKS, BALANCE_CHUNKS, BOOL_LEN,
    COMPLETE_CONTRIBUTE_DATASET_ID, CONTRIBUTE_DATASET_COMPUTE_UNITS,
    CREATE_DATASET_COMPUTE_UNITS, CREATE_DATASET_ID, DATASET_CHUNKS,
    DATASET_CONTRIBUTION_CHUNKS, ID_LEN, INITIATE_CONTRIBUTE_DATASET_ID, MAX_DATA_IDENTIFIER_SIZE,
    MAX_DATA_LOCATION_SIZE, MAX_METADATA_SIZE, MAX_NAME_SIZE, MAX_SYMBOL_SIZE, MAX_TEXT_SIZE,
    MIN_DATA_IDENTIFIER_SIZE, MIN_NAME_SIZE, U64_LEN, UPDATE_DATASET_COMPUTE_UNITS,
    UPDATE_DATASET_ID,
};
use crate::error::{Error, ValidationError};

use super::{check_address, check_id, check_len, check_update_len, ActionPayload};

/// Descriptive fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct DatasetInfo {
    name: String,
    description: String,
    categories: String,
    license_name: String,
    license_symbol: String,
    license_url: String,
}

impl DatasetInfo {
    /// On update every field is optional, so only the upper bounds apply
    /// to empty strings.
    fn validate(&self, updating: bool) -> Result<(), ValidationError> {
        if updating {
            check_update_len("name", self.name.len(), MIN_NAME_SIZE, MAX_NAME_SIZE)?;
        } else {
            check_len("name", self.name.len(), MIN_NAME_SIZE, MAX_NAME_SIZE)?;
        }
        check_len("description", self.description.len(), 0, MAX_TEXT_SIZE)?;
        check_len("categories", self.categories.len(), 0, MAX_TEXT_SIZE)?;
        check_len("license_name", self.license_name.len(), 0, MAX_NAME_SIZE)?;
        check_len("license_symbol", self.license_symbol.len(), 0, MAX_SYMBOL_SIZE)?;
        check_len("license_url", self.license_url.len(), 0, MAX_TEXT_SIZE)?;
        Ok(())
    }

    fn size(&self) -> usize {
        string_len(&self.name)
            + string_len(&self.description)
            + string_len(&self.categories)
            + string_len(&self.license_name)
            + string_len(&self.license_symbol)
            + string_len(&self.license_url)
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_string(&self.name);
        p.pack_string(&self.description);
        p.pack_string(&self.categories);
        p.pack_string(&self.license_name);
        p.pack_string(&self.license_symbol);
        p.pack_string(&self.license_url);
    }

    fn unmarshal(p: &mut Packer<'_>, name_required: bool) -> Self {
        Self {
            name: p.unpack_limited_string(MAX_NAME_SIZE, name_required),
            description: p.unpack_limited_string(MAX_TEXT_SIZE, false),
            categories: p.unpack_limited_string(MAX_TEXT_SIZE, false),
            license_name: p.unpack_limited_string(MAX_NAME_SIZE, false),
            license_symbol: p.unpack_limited_string(MAX_SYMBOL_SIZE, false),
            license_url: p.unpack_limited_string(MAX_TEXT_SIZE, false),
        }
    }
}

// ---------------------------------------------------------------------------
// CreateDataset
// ---------------------------------------------------------------------------

/// Turns an existing dataset-type asset into a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDataset {
    asset_id: Id,
    info: DatasetInfo,
    metadata: String,
    is_community_dataset: bool,
}

impl CreateDataset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        asset_id: Id,
        name: String,
        description: String,
        categories: String,
        license_name: String,
        license_symbol: String,
        license_url: String,
        metadata: String,
        is_community_dataset: bool,
    ) -> Result<Self, ValidationError> {
        check_id("asset_id", &asset_id)?;
        let info = DatasetInfo {
            name,
            description,
            categories,
            license_name,
            license_symbol,
            license_url,
        };
        info.validate(false)?;
        check_len("metadata", metadata.len(), 0, MAX_METADATA_SIZE)?;
        Ok(Self {
            asset_id,
            info,
            metadata,
            is_community_dataset,
        })
    }

    pub fn asset_id(&self) -> &Id {
        &self.asset_id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn description(&self) -> &str {
        &self.info.description
    }

    pub fn categories(&self) -> &str {
        &self.info.categories
    }

    pub fn license_name(&self) -> &str {
        &self.info.license_name
    }

    pub fn license_symbol(&self) -> &str {
        &self.info.license_symbol
    }

    pub fn license_url(&self) -> &str {
        &self.info.license_url
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// Community datasets accept contributions from anyone.
    pub fn is_community_dataset(&self) -> bool {
        self.is_community_dataset
    }
}

impl ActionPayload for CreateDataset {
    const TYPE_ID: u8 = CREATE_DATASET_ID;

    fn size(&self) -> usize {
        ID_LEN + self.info.size() + string_len(&self.metadata) + BOOL_LEN
    }

    fn compute_units(&self) -> u64 {
        CREATE_DATASET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, DATASET_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.asset_id);
        self.info.marshal(p);
        p.pack_string(&self.metadata);
        p.pack_bool(self.is_community_dataset);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let asset_id = p.unpack_id(true);
        let info = DatasetInfo::unmarshal(p, true);
        let metadata = p.unpack_limited_string(MAX_METADATA_SIZE, false);
        let is_community_dataset = p.unpack_bool();
        p.check()?;
        Ok(Self::new(
            asset_id,
            info.name,
            info.description,
            info.categories,
            info.license_name,
            info.license_symbol,
            info.license_url,
            metadata,
            is_community_dataset,
        )?)
    }
}

// ---------------------------------------------------------------------------
// UpdateDataset
// ---------------------------------------------------------------------------

/// Empty strings leave a field unchanged. The community flag is always
/// written, so an update is never a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDataset {
    dataset_id: Id,
    info: DatasetInfo,
    is_community_dataset: bool,
}

impl UpdateDataset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dataset_id: Id,
        name: String,
        description: String,
        categories: String,
        license_name: String,
        license_symbol: String,
        license_url: String,
        is_community_dataset: bool,
    ) -> Result<Self, ValidationError> {
        check_id("dataset_id", &dataset_id)?;
        let info = DatasetInfo {
            name,
            description,
            categories,
            license_name,
            license_symbol,
            license_url,
        };
        info.validate(true)?;
        Ok(Self {
            dataset_id,
            info,
            is_community_dataset,
        })
    }

    pub fn dataset_id(&self) -> &Id {
        &self.dataset_id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn description(&self) -> &str {
        &self.info.description
    }

    pub fn categories(&self) -> &str {
        &self.info.categories
    }

    pub fn license_name(&self) -> &str {
        &self.info.license_name
    }

    pub fn license_symbol(&self) -> &str {
        &self.info.license_symbol
    }

    pub fn license_url(&self) -> &str {
        &self.info.license_url
    }

    pub fn is_community_dataset(&self) -> bool {
        self.is_community_dataset
    }
}

impl ActionPayload for UpdateDataset {
    const TYPE_ID: u8 = UPDATE_DATASET_ID;

    fn size(&self) -> usize {
        ID_LEN + self.info.size() + BOOL_LEN
    }

    fn compute_units(&self) -> u64 {
        UPDATE_DATASET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[DATASET_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.dataset_id);
        self.info.marshal(p);
        p.pack_bool(self.is_community_dataset);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let dataset_id = p.unpack_id(true);
        let info = DatasetInfo::unmarshal(p, false);
        let is_community_dataset = p.unpack_bool();
        p.check()?;
        Ok(Self::new(
            dataset_id,
            info.name,
            info.description,
            info.categories,
            info.license_name,
            info.license_symbol,
            info.license_url,
            is_community_dataset,
        )?)
    }
}

// ---------------------------------------------------------------------------
// InitiateContributeDataset
// ---------------------------------------------------------------------------

/// Offers a piece of data to a dataset. The owner later accepts it with
/// [`CompleteContributeDataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateContributeDataset {
    dataset_id: Id,
    data_location: String,
    data_identifier: String,
}

impl InitiateContributeDataset {
    pub fn new(
        dataset_id: Id,
        data_location: String,
        data_identifier: String,
    ) -> Result<Self, ValidationError> {
        check_id("dataset_id", &dataset_id)?;
        check_len("data_location", data_location.len(), 0, MAX_DATA_LOCATION_SIZE)?;
        check_len(
            "data_identifier",
            data_identifier.len(),
            MIN_DATA_IDENTIFIER_SIZE,
            MAX_DATA_IDENTIFIER_SIZE,
        )?;
        Ok(Self {
            dataset_id,
            data_location,
            data_identifier,
        })
    }

    pub fn dataset_id(&self) -> &Id {
        &self.dataset_id
    }

    pub fn data_location(&self) -> &str {
        &self.data_location
    }

    pub fn data_identifier(&self) -> &str {
        &self.data_identifier
    }
}

impl ActionPayload for InitiateContributeDataset {
    const TYPE_ID: u8 = INITIATE_CONTRIBUTE_DATASET_ID;

    fn size(&self) -> usize {
        ID_LEN + string_len(&self.data_location) + string_len(&self.data_identifier)
    }

    fn compute_units(&self) -> u64 {
        CONTRIBUTE_DATASET_COMPUTE_UNITS
    }

    /// Dataset, the pending contribution, and the contributor's balance for
    /// the collateral.
    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[DATASET_CHUNKS, DATASET_CONTRIBUTION_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.dataset_id);
        p.pack_string(&self.data_location);
        p.pack_string(&self.data_identifier);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let dataset_id = p.unpack_id(true);
        let data_location = p.unpack_limited_string(MAX_DATA_LOCATION_SIZE, false);
        let data_identifier = p.unpack_limited_string(MAX_DATA_IDENTIFIER_SIZE, true);
        p.check()?;
        Ok(Self::new(dataset_id, data_location, data_identifier)?)
    }
}

// ---------------------------------------------------------------------------
// CompleteContributeDataset
// ---------------------------------------------------------------------------

/// Accepts a pending contribution and mints the contributor an NFT
/// numbered `unique_nft_id` in the dataset's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteContributeDataset {
    dataset_id: Id,
    contributor: Address,
    unique_nft_id: u64,
}

impl CompleteContributeDataset {
    pub fn new(
        dataset_id: Id,
        contributor: Address,
        unique_nft_id: u64,
    ) -> Result<Self, ValidationError> {
        check_id("dataset_id", &dataset_id)?;
        check_address("contributor", &contributor)?;
        Ok(Self {
            dataset_id,
            contributor,
            unique_nft_id,
        })
    }

    pub fn dataset_id(&self) -> &Id {
        &self.dataset_id
    }

    pub fn contributor(&self) -> &Address {
        &self.contributor
    }

    pub fn unique_nft_id(&self) -> u64 {
        self.unique_nft_id
    }
}

impl ActionPayload for CompleteContributeDataset {
    const TYPE_ID: u8 = COMPLETE_CONTRIBUTE_DATASET_ID;

    fn size(&self) -> usize {
        ID_LEN + ADDRESS_LEN + U64_LEN
    }

    fn compute_units(&self) -> u64 {
        CONTRIBUTE_DATASET_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[
            DATASET_CHUNKS,
            DATASET_CONTRIBUTION_CHUNKS,
            ASSET_CHUNKS,
            ASSET_NFT_CHUNKS,
            BALANCE_CHUNKS,
            BALANCE_CHUNKS,
        ]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.dataset_id);
        p.pack_address(&self.contributor);
        p.pack_long(self.unique_nft_id);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let dataset_id = p.unpack_id(true);
        let contributor = p.unpack_address(true);
        let unique_nft_id = p.unpack_long();
        p.check()?;
        Ok(Self::new(dataset_id, contributor, unique_nft_id)?)
    }
}
