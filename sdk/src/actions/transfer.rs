use crate::codec::{bytes_len, Address, Id, Packer};
use crate::config::{
    ADDRESS_LEN, BALANCE_CHUNKS, ID_LEN, MAX_MEMO_SIZE, TRANSFER_COMPUTE_UNITS, TRANSFER_ID,
    U64_LEN,
};
use crate::error::{Error, ValidationError};

use super::{check_address, check_len, check_non_zero, ActionPayload};

/// Moves `value` units of `asset_id` from the sponsor to `to`.
///
/// An empty `asset_id` names the chain's native asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    to: Address,
    asset_id: Id,
    value: u64,
    memo: Vec<u8>,
}

impl Transfer {
    pub fn new(
        to: Address,
        asset_id: Id,
        value: u64,
        memo: Vec<u8>,
    ) -> Result<Self, ValidationError> {
        check_address("to", &to)?;
        check_non_zero("value", value)?;
        check_len("memo", memo.len(), 0, MAX_MEMO_SIZE)?;
        Ok(Self {
            to,
            asset_id,
            value,
            memo,
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

    pub fn memo(&self) -> &[u8] {
        &self.memo
    }
}

impl ActionPayload for Transfer {
    const TYPE_ID: u8 = TRANSFER_ID;

    fn size(&self) -> usize {
        ADDRESS_LEN + ID_LEN + U64_LEN + bytes_len(&self.memo)
    }

    fn compute_units(&self) -> u64 {
        TRANSFER_COMPUTE_UNITS
    }

    /// Sender and receiver balances.
    fn state_keys_max_chunks(&self) -> &'static [u16] {
        &[BALANCE_CHUNKS, BALANCE_CHUNKS]
    }

    fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_address(&self.to);
        p.pack_id(&self.asset_id);
        p.pack_long(self.value);
        p.pack_bytes(&self.memo);
    }

    fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let to = p.unpack_address(true);
        let asset_id = p.unpack_id(false);
        let value = p.unpack_long();
        let memo = p.unpack_limited_bytes(MAX_MEMO_SIZE, false);
        p.check()?;
        Ok(Self::new(to, asset_id, value, memo)?)
    }
}
