//! # Actions
//!
//! The state-changing intents a transaction can carry. Every payload type
//! implements [`ActionPayload`], which pins down four things the rest of the
//! crate relies on:
//!
//! - its one-byte wire tag,
//! - its exact encoded size (so buffers can be sized before encoding),
//! - its compute cost and the storage chunks of every state key it touches
//!   (both feed fee estimation),
//! - how to encode and decode itself through a [`Packer`].
//!
//! Constructors validate field lengths against the same maxima the decoder
//! enforces and refuse empty ids where the decoder requires one. Decoding
//! always finishes by calling the constructor, so a payload that exists in
//! memory is always one the node would accept, and one this crate decodes.
//!
//! [`Action`] is the closed sum of all payloads; [`ActionRegistry`] maps the
//! wire tag back to a decoder.

mod asset;
mod dataset;
mod marketplace;
mod transfer;

pub use asset::{
    AssetActors, AssetType, BurnAssetFT, BurnAssetNFT, CreateAsset, MintAssetFT, MintAssetNFT,
    UpdateAsset,
};
pub use dataset::{
    CompleteContributeDataset, CreateDataset, InitiateContributeDataset, UpdateDataset,
};
pub use marketplace::{
    ClaimMarketplacePayment, PublishDatasetMarketplace, SubscribeDatasetMarketplace,
};
pub use transfer::Transfer;

use crate::codec::{Address, Id, Packer};
use crate::error::{Error, TagKind, ValidationError};
use crate::registry::{Decoder, TypeRegistry};

/// One payload type that can ride inside a transaction.
pub trait ActionPayload: Sized {
    /// Wire tag. Unique across all payload types.
    const TYPE_ID: u8;

    /// Exact number of bytes [`marshal`](Self::marshal) writes.
    fn size(&self) -> usize;

    fn compute_units(&self) -> u64;

    /// Maximum storage chunks of each state key the payload reads or writes,
    /// one entry per key.
    fn state_keys_max_chunks(&self) -> &'static [u16];

    fn marshal(&self, p: &mut Packer<'_>);

    /// Reads every field, checks the packer once, then validates through the
    /// constructor.
    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error>;
}

// ---------------------------------------------------------------------------
// Validation helpers shared by the payload constructors
// ---------------------------------------------------------------------------

pub(crate) fn check_len(
    field: &'static str,
    len: usize,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if len < min || len > max {
        return Err(ValidationError::FieldLength {
            field,
            len,
            min,
            max,
        });
    }
    Ok(())
}

/// Like [`check_len`], except empty means "leave unchanged" and is always
/// accepted.
pub(crate) fn check_update_len(
    field: &'static str,
    len: usize,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if len == 0 {
        return Ok(());
    }
    check_len(field, len, min, max)
}

pub(crate) fn check_non_zero(field: &'static str, value: u64) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::ZeroValue { field });
    }
    Ok(())
}

/// Rejects the empty id for fields the decoder reads as required.
pub(crate) fn check_id(field: &'static str, id: &Id) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

pub(crate) fn check_address(field: &'static str, addr: &Address) -> Result<(), ValidationError> {
    if addr.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Transfer(Transfer),
    CreateAsset(CreateAsset),
    UpdateAsset(UpdateAsset),
    MintAssetFT(MintAssetFT),
    MintAssetNFT(MintAssetNFT),
    BurnAssetFT(BurnAssetFT),
    BurnAssetNFT(BurnAssetNFT),
    CreateDataset(CreateDataset),
    UpdateDataset(UpdateDataset),
    InitiateContributeDataset(InitiateContributeDataset),
    CompleteContributeDataset(CompleteContributeDataset),
    PublishDatasetMarketplace(PublishDatasetMarketplace),
    SubscribeDatasetMarketplace(SubscribeDatasetMarketplace),
    ClaimMarketplacePayment(ClaimMarketplacePayment),
}

/// Runs `$body` with `$a` bound to the inner payload, whatever the variant.
macro_rules! dispatch {
    ($action:expr, $a:ident => $body:expr) => {
        match $action {
            Action::Transfer($a) => $body,
            Action::CreateAsset($a) => $body,
            Action::UpdateAsset($a) => $body,
            Action::MintAssetFT($a) => $body,
            Action::MintAssetNFT($a) => $body,
            Action::BurnAssetFT($a) => $body,
            Action::BurnAssetNFT($a) => $body,
            Action::CreateDataset($a) => $body,
            Action::UpdateDataset($a) => $body,
            Action::InitiateContributeDataset($a) => $body,
            Action::CompleteContributeDataset($a) => $body,
            Action::PublishDatasetMarketplace($a) => $body,
            Action::SubscribeDatasetMarketplace($a) => $body,
            Action::ClaimMarketplacePayment($a) => $body,
        }
    };
}

/// Tag lookup that works on a bare payload type.
fn type_id_of<A: ActionPayload>(_: &A) -> u8 {
    A::TYPE_ID
}

impl Action {
    pub fn type_id(&self) -> u8 {
        dispatch!(self, a => type_id_of(a))
    }

    /// Payload size, excluding the tag byte.
    pub fn size(&self) -> usize {
        dispatch!(self, a => a.size())
    }

    pub fn compute_units(&self) -> u64 {
        dispatch!(self, a => a.compute_units())
    }

    pub fn state_keys_max_chunks(&self) -> &'static [u16] {
        dispatch!(self, a => a.state_keys_max_chunks())
    }

    /// Writes the payload. The tag byte is the caller's job.
    pub fn marshal(&self, p: &mut Packer<'_>) {
        dispatch!(self, a => a.marshal(p))
    }

    /// Human-readable variant name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "transfer",
            Self::CreateAsset(_) => "create_asset",
            Self::UpdateAsset(_) => "update_asset",
            Self::MintAssetFT(_) => "mint_asset_ft",
            Self::MintAssetNFT(_) => "mint_asset_nft",
            Self::BurnAssetFT(_) => "burn_asset_ft",
            Self::BurnAssetNFT(_) => "burn_asset_nft",
            Self::CreateDataset(_) => "create_dataset",
            Self::UpdateDataset(_) => "update_dataset",
            Self::InitiateContributeDataset(_) => "initiate_contribute_dataset",
            Self::CompleteContributeDataset(_) => "complete_contribute_dataset",
            Self::PublishDatasetMarketplace(_) => "publish_dataset_marketplace",
            Self::SubscribeDatasetMarketplace(_) => "subscribe_dataset_marketplace",
            Self::ClaimMarketplacePayment(_) => "claim_marketplace_payment",
        }
    }

    /// Untagged payload bytes. Fails if the payload writes past its own
    /// [`size`](Self::size).
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut p = Packer::new_writer(self.size(), self.size());
        self.marshal(&mut p);
        p.check()?;
        Ok(p.into_bytes())
    }
}

macro_rules! impl_from_payload {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Action {
                fn from(a: $variant) -> Self {
                    Self::$variant(a)
                }
            }
        )+
    };
}

impl_from_payload!(
    Transfer,
    CreateAsset,
    UpdateAsset,
    MintAssetFT,
    MintAssetNFT,
    BurnAssetFT,
    BurnAssetNFT,
    CreateDataset,
    UpdateDataset,
    InitiateContributeDataset,
    CompleteContributeDataset,
    PublishDatasetMarketplace,
    SubscribeDatasetMarketplace,
    ClaimMarketplacePayment,
);

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Tag → decoder table for actions.
pub type ActionRegistry = TypeRegistry<Action>;

fn decode_as<A: ActionPayload + Into<Action>>(p: &mut Packer<'_>) -> Result<Action, Error> {
    A::unmarshal(p).map(Into::into)
}

impl Default for TypeRegistry<Action> {
    fn default() -> Self {
        let entries: [(u8, Decoder<Action>); 14] = [
            (Transfer::TYPE_ID, decode_as::<Transfer>),
            (CreateAsset::TYPE_ID, decode_as::<CreateAsset>),
            (UpdateAsset::TYPE_ID, decode_as::<UpdateAsset>),
            (MintAssetFT::TYPE_ID, decode_as::<MintAssetFT>),
            (MintAssetNFT::TYPE_ID, decode_as::<MintAssetNFT>),
            (BurnAssetFT::TYPE_ID, decode_as::<BurnAssetFT>),
            (BurnAssetNFT::TYPE_ID, decode_as::<BurnAssetNFT>),
            (CreateDataset::TYPE_ID, decode_as::<CreateDataset>),
            (UpdateDataset::TYPE_ID, decode_as::<UpdateDataset>),
            (
                InitiateContributeDataset::TYPE_ID,
                decode_as::<InitiateContributeDataset>,
            ),
            (
                CompleteContributeDataset::TYPE_ID,
                decode_as::<CompleteContributeDataset>,
            ),
            (
                PublishDatasetMarketplace::TYPE_ID,
                decode_as::<PublishDatasetMarketplace>,
            ),
            (
                SubscribeDatasetMarketplace::TYPE_ID,
                decode_as::<SubscribeDatasetMarketplace>,
            ),
            (
                ClaimMarketplacePayment::TYPE_ID,
                decode_as::<ClaimMarketplacePayment>,
            ),
        ];
        Self::from_entries(TagKind::Action, entries)
    }
}
