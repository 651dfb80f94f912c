//! # Protocol Configuration & Constants
//!
//! Every magic number the wire format depends on lives here. The node on the
//! other side of the socket owns these values; we mirror them. If one of them
//! drifts, signatures still verify locally and then get rejected remotely,
//! which is the most annoying possible failure mode.
//!
//! The second half of this module is [`Genesis`], the subset of the chain's
//! genesis rules the fee estimator needs. It arrives as JSON from the node's
//! genesis RPC and is parsed with serde.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fees::Dimensions;

// ---------------------------------------------------------------------------
// Wire Sizes
// ---------------------------------------------------------------------------

/// Largest message the node accepts on the wire. Transactions that encode
/// beyond this are rejected before they ever reach a mempool.
pub const NETWORK_SIZE_LIMIT: usize = 2_044_723;

/// Length of an id (transaction id, asset id, chain id).
pub const ID_LEN: usize = 32;

/// Length of an address: one auth type tag byte plus a 32-byte key hash.
pub const ADDRESS_LEN: usize = 1 + ID_LEN;

/// Strings are prefixed with a u16 length, so this is a hard ceiling.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

pub const BYTE_LEN: usize = 1;
pub const BOOL_LEN: usize = 1;
pub const U16_LEN: usize = 2;
pub const U32_LEN: usize = 4;
pub const U64_LEN: usize = 8;
pub const I64_LEN: usize = 8;

/// The action count is a single byte on the wire.
pub const MAX_ACTIONS_PER_TX: usize = u8::MAX as usize;

/// Transaction timestamps are whole seconds expressed in milliseconds.
pub const MILLISECONDS_PER_SECOND: i64 = 1_000;

// ---------------------------------------------------------------------------
// Field Limits
// ---------------------------------------------------------------------------
//
// Constructors and decoders both read these. Keep them in one place so the
// two layers can never disagree about what "too long" means.

pub const MIN_NAME_SIZE: usize = 3;
pub const MAX_NAME_SIZE: usize = 64;
pub const MIN_SYMBOL_SIZE: usize = 3;
pub const MAX_SYMBOL_SIZE: usize = 8;
pub const MAX_DECIMALS: u8 = 9;
pub const MAX_METADATA_SIZE: usize = 256;
pub const MAX_TEXT_SIZE: usize = 256;
pub const MAX_MEMO_SIZE: usize = 256;
pub const MAX_DATA_LOCATION_SIZE: usize = 64;
pub const MIN_DATA_IDENTIFIER_SIZE: usize = 1;
pub const MAX_DATA_IDENTIFIER_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Storage Chunks
// ---------------------------------------------------------------------------

/// Maximum number of 64-byte chunks a balance record occupies.
pub const BALANCE_CHUNKS: u16 = 1;
pub const ASSET_CHUNKS: u16 = 5;
pub const ASSET_NFT_CHUNKS: u16 = 3;
pub const DATASET_CHUNKS: u16 = 5;
pub const DATASET_CONTRIBUTION_CHUNKS: u16 = 3;

// ---------------------------------------------------------------------------
// Compute Units
// ---------------------------------------------------------------------------

pub const TRANSFER_COMPUTE_UNITS: u64 = 1;
pub const CREATE_ASSET_COMPUTE_UNITS: u64 = 15;
pub const UPDATE_ASSET_COMPUTE_UNITS: u64 = 15;
pub const MINT_ASSET_COMPUTE_UNITS: u64 = 5;
pub const BURN_ASSET_COMPUTE_UNITS: u64 = 1;
pub const CREATE_DATASET_COMPUTE_UNITS: u64 = 15;
pub const UPDATE_DATASET_COMPUTE_UNITS: u64 = 5;
pub const CONTRIBUTE_DATASET_COMPUTE_UNITS: u64 = 15;
pub const MARKETPLACE_COMPUTE_UNITS: u64 = 5;

pub const ED25519_COMPUTE_UNITS: u64 = 5;
pub const BLS_COMPUTE_UNITS: u64 = 10;

// ---------------------------------------------------------------------------
// Type Tags
// ---------------------------------------------------------------------------

pub const TRANSFER_ID: u8 = 0;
pub const CREATE_ASSET_ID: u8 = 1;
pub const UPDATE_ASSET_ID: u8 = 2;
pub const MINT_ASSET_FT_ID: u8 = 3;
pub const MINT_ASSET_NFT_ID: u8 = 4;
pub const BURN_ASSET_FT_ID: u8 = 5;
pub const BURN_ASSET_NFT_ID: u8 = 6;
pub const CREATE_DATASET_ID: u8 = 7;
pub const UPDATE_DATASET_ID: u8 = 8;
pub const INITIATE_CONTRIBUTE_DATASET_ID: u8 = 9;
pub const COMPLETE_CONTRIBUTE_DATASET_ID: u8 = 10;
pub const PUBLISH_DATASET_MARKETPLACE_ID: u8 = 11;
pub const SUBSCRIBE_DATASET_MARKETPLACE_ID: u8 = 12;
pub const CLAIM_MARKETPLACE_PAYMENT_ID: u8 = 13;

pub const ED25519_ID: u8 = 0;
// 1 is taken by secp256r1 on the node. We don't sign with it.
pub const BLS_ID: u8 = 2;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Chain rules published in genesis, as far as transaction costing cares.
///
/// Field names follow the node's JSON (camelCase). Unknown fields are
/// ignored so a newer node can add rules without breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genesis {
    /// Floor for each of the five unit prices.
    pub min_unit_price: Dimensions,
    /// Per-block capacity in each dimension.
    pub max_block_units: Dimensions,
    /// How far into the future a transaction timestamp may sit, in ms.
    pub validity_window: i64,

    pub base_compute_units: u64,

    pub storage_key_read_units: u64,
    pub storage_value_read_units: u64,
    pub storage_key_allocate_units: u64,
    pub storage_value_allocate_units: u64,
    pub storage_key_write_units: u64,
    pub storage_value_write_units: u64,
}

impl Default for Genesis {
    fn default() -> Self {
        Self {
            min_unit_price: Dimensions::new([100, 100, 100, 100, 100]),
            max_block_units: Dimensions::new([1_800_000, 2_000, 2_000, 2_000, 2_000]),
            validity_window: 60 * MILLISECONDS_PER_SECOND,
            base_compute_units: 1,
            storage_key_read_units: 5,
            storage_value_read_units: 2,
            storage_key_allocate_units: 20,
            storage_value_allocate_units: 5,
            storage_key_write_units: 10,
            storage_value_write_units: 3,
        }
    }
}

impl Genesis {
    /// Parse the genesis document returned by the node.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Config)
    }

    /// Every transaction debits its sponsor's balance, which touches one key
    /// no action declares.
    pub fn sponsor_state_keys_max_chunks(&self) -> [u16; 1] {
        [BALANCE_CHUNKS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_is_tag_plus_hash() {
        assert_eq!(ADDRESS_LEN, 33);
        assert_eq!(ID_LEN, 32);
    }

    #[test]
    fn test_action_tags_are_distinct() {
        let tags = [
            TRANSFER_ID,
            CREATE_ASSET_ID,
            UPDATE_ASSET_ID,
            MINT_ASSET_FT_ID,
            MINT_ASSET_NFT_ID,
            BURN_ASSET_FT_ID,
            BURN_ASSET_NFT_ID,
            CREATE_DATASET_ID,
            UPDATE_DATASET_ID,
            INITIATE_CONTRIBUTE_DATASET_ID,
            COMPLETE_CONTRIBUTE_DATASET_ID,
            PUBLISH_DATASET_MARKETPLACE_ID,
            SUBSCRIBE_DATASET_MARKETPLACE_ID,
            CLAIM_MARKETPLACE_PAYMENT_ID,
        ];
        let mut sorted = tags.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), tags.len());
    }

    #[test]
    fn test_field_limits_fit_in_a_string_prefix() {
        for max in [
            MAX_NAME_SIZE,
            MAX_SYMBOL_SIZE,
            MAX_METADATA_SIZE,
            MAX_TEXT_SIZE,
            MAX_DATA_LOCATION_SIZE,
            MAX_DATA_IDENTIFIER_SIZE,
        ] {
            assert!(max <= MAX_STRING_LEN);
        }
        assert!(MIN_NAME_SIZE < MAX_NAME_SIZE);
        assert!(MIN_SYMBOL_SIZE < MAX_SYMBOL_SIZE);
    }

    #[test]
    fn test_genesis_from_node_json() {
        let json = r#"{
            "minUnitPrice": [100, 100, 100, 100, 100],
            "maxBlockUnits": [1800000, 2000, 2000, 2000, 2000],
            "validityWindow": 60000,
            "baseComputeUnits": 1,
            "storageKeyReadUnits": 5,
            "storageValueReadUnits": 2,
            "storageKeyAllocateUnits": 20,
            "storageValueAllocateUnits": 5,
            "storageKeyWriteUnits": 10,
            "storageValueWriteUnits": 3,
            "someFutureRule": true
        }"#;
        let genesis = Genesis::from_json(json).unwrap();
        assert_eq!(genesis, Genesis::default());
    }

    #[test]
    fn test_genesis_rejects_garbage() {
        assert!(matches!(
            Genesis::from_json("{\"validityWindow\": \"soon\"}"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_sponsor_touches_one_balance_key() {
        assert_eq!(
            Genesis::default().sponsor_state_keys_max_chunks(),
            [BALANCE_CHUNKS]
        );
    }
}
