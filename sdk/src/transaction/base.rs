//! The fixed-width transaction header.

use crate::codec::{Id, Packer};
use crate::config::{I64_LEN, ID_LEN, MILLISECONDS_PER_SECOND, U64_LEN};
use crate::error::{Error, ValidationError};

/// `timestamp ‖ chain_id ‖ max_fee`, always 48 bytes.
///
/// `timestamp` is the expiry in Unix milliseconds and must fall on a whole
/// second. The node rejects the transaction once that moment has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseTx {
    timestamp: i64,
    chain_id: Id,
    max_fee: u64,
}

impl BaseTx {
    pub const SIZE: usize = I64_LEN + ID_LEN + U64_LEN;

    pub fn new(timestamp: i64, chain_id: Id, max_fee: u64) -> Result<Self, Error> {
        if timestamp % MILLISECONDS_PER_SECOND != 0 {
            return Err(Error::MisalignedTimestamp(timestamp));
        }
        if chain_id.is_empty() {
            return Err(ValidationError::Required { field: "chain_id" }.into());
        }
        Ok(Self {
            timestamp,
            chain_id,
            max_fee,
        })
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn chain_id(&self) -> &Id {
        &self.chain_id
    }

    pub fn max_fee(&self) -> u64 {
        self.max_fee
    }

    pub fn size(&self) -> usize {
        Self::SIZE
    }

    pub fn marshal(&self, p: &mut Packer<'_>) {
        p.pack_i64(self.timestamp);
        p.pack_id(&self.chain_id);
        p.pack_long(self.max_fee);
    }

    /// The chain id is required. A misaligned timestamp is rejected even if
    /// the rest of the header decoded cleanly.
    pub fn unmarshal(p: &mut Packer<'_>) -> Result<Self, Error> {
        let timestamp = p.unpack_i64();
        let chain_id = p.unpack_id(true);
        let max_fee = p.unpack_long();
        p.check()?;
        Self::new(timestamp, chain_id, max_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    #[test]
    fn layout_is_48_bytes_big_endian() {
        let base = BaseTx::new(1_000, Id::new([0xCC; 32]), 0x0A0B).unwrap();
        let mut p = Packer::new_writer(BaseTx::SIZE, BaseTx::SIZE);
        base.marshal(&mut p);
        let bytes = p.into_bytes();

        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0x03, 0xE8]);
        assert_eq!(&bytes[8..40], &[0xCC; 32]);
        assert_eq!(&bytes[40..], &[0, 0, 0, 0, 0, 0, 0x0A, 0x0B]);

        let mut r = Packer::new_reader(&bytes, bytes.len());
        assert_eq!(BaseTx::unmarshal(&mut r).unwrap(), base);
    }

    #[test]
    fn misaligned_timestamp() {
        assert!(matches!(
            BaseTx::new(1_001, Id::new([1; 32]), 0),
            Err(Error::MisalignedTimestamp(1_001))
        ));

        let mut bytes = 1_500i64.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[1u8; 32]);
        bytes.extend_from_slice(&0u64.to_be_bytes());
        let mut r = Packer::new_reader(&bytes, bytes.len());
        assert!(matches!(
            BaseTx::unmarshal(&mut r),
            Err(Error::MisalignedTimestamp(1_500))
        ));
    }

    #[test]
    fn negative_whole_seconds_are_aligned() {
        assert!(BaseTx::new(-2_000, Id::new([1; 32]), 0).is_ok());
    }

    #[test]
    fn chain_id_is_required() {
        assert!(matches!(
            BaseTx::new(1_000, Id::EMPTY, 0),
            Err(Error::Validation(ValidationError::Required {
                field: "chain_id"
            }))
        ));

        let bytes = [0u8; BaseTx::SIZE];
        let mut r = Packer::new_reader(&bytes, bytes.len());
        assert!(matches!(
            BaseTx::unmarshal(&mut r),
            Err(Error::Codec(CodecError::FieldNotPopulated))
        ));
    }
}
