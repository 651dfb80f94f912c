//! Selling access to a dataset: publish it, subscribe to it, and collect
//! the accumulated subscription fees.

use crate::codec::{Id, Packer};
use crate::config::{
    ASSET_CHUNKS, ASSET_NFT_CHUNKS, BALANCE_CHUNKS, CLAIM_MARKETPLACE_PAYMENT_ID, DATASET_CHUNKS,
    ID_LEN, MARKETPLACE_COMPUTE_UNITS, PUBLISH_DATASET_MARKETPLACE_ID,
    SUBSCRIBE_DATASET_MARKETPLACE_ID, U64_LEN,
};
use crate::error::{Error, ValidationError};

use super::{check_id, check_non_zero, ActionPayload};

/// Lists a dataset for subscription at `base_price` units of `base_asset_id`
/// per block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDatasetMarketplace {
    dataset_id: Id,
    base_asset_id: Id,
    base_price: u64,
}

impl PublishDatasetMarketplace {
    pub fn new(
        dataset_id: Id,
        base_asset_id: Id,
        base_price: u64,
    ) -> Result<Self, ValidationError> {
        check_id("dataset_id", &dataset_id)?;
        Ok(Self {
            dataset_id,
            base_asset_id,
            base_price,
        })
    }

    pub fn dataset_id(&self) -> &Id {
        &self.dataset_id
    }

    pub fn base_asset_id(&self) -> &Id {
        &self.base_asset_id
    }

    pub fn base_price(&self) -> u64 {
        self.base_price
    }
}

impl ActionPayload for PublishDatasetMarketplace {
    const TYPE_ID: u8 = PUBLISH_DATASET_MARKETPLACE_ID;

    fn size(&self) -> usize {
        ID_LEN * 2 + U64_LEN
    }

    fn compute_units(&self) -> u64 {
        MARKETPLACE_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[DATASET_CHUNKS, ASSET_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.dataset_id);
        p.pack_id(&self.base_asset_id);
        p.pack_long(self.base_price);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let dataset_id = p.unpack_id(true);
        let base_asset_id = p.unpack_id(false);
        let base_price = p.unpack_long();
        p.check()?;
        Ok(Self::new(dataset_id, base_asset_id, base_price)?)
    }
}

/// Buys `num_blocks_to_subscribe` blocks of access, paid in
/// `payment_asset_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeDatasetMarketplace {
    marketplace_asset_id: Id,
    payment_asset_id: Id,
    num_blocks_to_subscribe: u64,
}

impl SubscribeDatasetMarketplace {
    pub fn new(
        marketplace_asset_id: Id,
        payment_asset_id: Id,
        num_blocks_to_subscribe: u64,
    ) -> Result<Self, ValidationError> {
        check_id("marketplace_asset_id", &marketplace_asset_id)?;
        check_non_zero("num_blocks_to_subscribe", num_blocks_to_subscribe)?;
        Ok(Self {
            marketplace_asset_id,
            payment_asset_id,
            num_blocks_to_subscribe,
        })
    }

    pub fn marketplace_asset_id(&self) -> &Id {
        &self.marketplace_asset_id
    }

    pub fn payment_asset_id(&self) -> &Id {
        &self.payment_asset_id
    }

    pub fn num_blocks_to_subscribe(&self) -> u64 {
        self.num_blocks_to_subscribe
    }
}

impl ActionPayload for SubscribeDatasetMarketplace {
    const TYPE_ID: u8 = SUBSCRIBE_DATASET_MARKETPLACE_ID;

    fn size(&self) -> usize {
        ID_LEN * 2 + U64_LEN
    }

    fn compute_units(&self) -> u64 {
        MARKETPLACE_COMPUTE_UNITS
    }

    /// Marketplace asset, the subscription NFT, and both balances.
    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, ASSET_NFT_CHUNKS, BALANCE_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.marketplace_asset_id);
        p.pack_id(&self.payment_asset_id);
        p.pack_long(self.num_blocks_to_subscribe);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let marketplace_asset_id = p.unpack_id(true);
        let payment_asset_id = p.unpack_id(false);
        let num_blocks_to_subscribe = p.unpack_long();
        p.check()?;
        Ok(Self::new(
            marketplace_asset_id,
            payment_asset_id,
            num_blocks_to_subscribe,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimMarketplacePayment {
    marketplace_asset_id: Id,
    payment_asset_id: Id,
}

impl ClaimMarketplacePayment {
    pub fn new(marketplace_asset_id: Id, payment_asset_id: Id) -> Result<Self, ValidationError> {
        check_id("marketplace_asset_id", &marketplace_asset_id)?;
        Ok(Self {
            marketplace_asset_id,
            payment_asset_id,
        })
    }

    pub fn marketplace_asset_id(&self) -> &Id {
        &self.marketplace_asset_id
    }

    pub fn payment_asset_id(&self) -> &Id {
        &self.payment_asset_id
    }
}

impl ActionPayload for ClaimMarketplacePayment {
    const TYPE_ID: u8 = CLAIM_MARKETPLACE_PAYMENT_ID;

    fn size(&self) -> usize {
        ID_LEN * 2
    }

    fn compute_units(&self) -> u64 {
        MARKETPLACE_COMPUTE_UNITS
    }

    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[ASSET_CHUNKS, BALANCE_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_id(&self.marketplace_asset_id);
        p.pack_id(&self.payment_asset_id);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let marketplace_asset_id = p.unpack_id(true);
        let payment_asset_id = p.unpack_id(false);
        p.check()?;
        Ok(Self::new(marketplace_asset_id, payment_asset_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::tests::{id, roundtrip};
    use crate::actions::Action;
    use crate::codec::CodecError;

    #[test]
    fn subscribe_needs_blocks() {
        assert_eq!(
            SubscribeDatasetMarketplace::new(id(1), Id::EMPTY, 0),
            Err(ValidationError::ZeroValue {
                field: "num_blocks_to_subscribe"
            })
        );
    }

    #[test]
    fn native_payment_asset_is_allowed() {
        roundtrip(
            SubscribeDatasetMarketplace::new(id(1), Id::EMPTY, u64::MAX)
                .unwrap()
                .into(),
        );
        roundtrip(PublishDatasetMarketplace::new(id(1), Id::EMPTY, 0).unwrap().into());
    }

    #[test]
    fn claim_requires_marketplace_asset() {
        assert_eq!(
            ClaimMarketplacePayment::new(Id::EMPTY, id(2)),
            Err(ValidationError::Required {
                field: "marketplace_asset_id"
            })
        );
        assert_eq!(
            SubscribeDatasetMarketplace::new(Id::EMPTY, id(2), 1),
            Err(ValidationError::Required {
                field: "marketplace_asset_id"
            })
        );
        assert_eq!(
            PublishDatasetMarketplace::new(Id::EMPTY, id(2), 1),
            Err(ValidationError::Required {
                field: "dataset_id"
            })
        );

        let action: Action = ClaimMarketplacePayment::new(id(1), id(2)).unwrap().into();
        let mut bytes = action.to_bytes().unwrap();
        bytes[..ID_LEN].fill(0);
        let mut p = Packer::new_reader(&bytes, bytes.len());
        assert!(matches!(
            ClaimMarketplacePayment::unmarshal(&mut p),
            Err(Error::Codec(CodecError::FieldNotPopulated))
        ));
    }

    #[test]
    fn truncated_payload_underflows() {
        let action: Action = PublishDatasetMarketplace::new(id(1), id(2), 5).unwrap().into();
        let bytes = action.to_bytes().unwrap();
        let cut = &bytes[..bytes.len() - 3];
        let mut p = Packer::new_reader(cut, cut.len());
        assert!(matches!(
            PublishDatasetMarketplace::unmarshal(&mut p),
            Err(Error::Codec(CodecError::BufferUnderflow { .. }))
        ));
    }
}
